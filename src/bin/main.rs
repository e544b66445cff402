//! CLI binary for Tracker Decoder
//!
//! This provides the command-line interface for the tracker decoder library.

use anyhow::Result;
use clap::{Arg, ArgAction, Command};
use glob::glob;
use std::path::{Path, PathBuf};
use tracker_decoder::{
    decode_payload_file, decode_payload_text, export_records, BatchOutcome, DecodeFailure,
    DecodedRecord, ExportOptions, GeoPoint, OutputMode, PayloadDecoder, PayloadEncoding,
    ShadowLocation,
};

/// Label used for payloads given directly on the command line
const LITERAL_INPUT: &str = "payloads";

enum Input {
    File(PathBuf),
    Literal(String),
}

fn version() -> String {
    match option_env!("VERGEN_GIT_SHA") {
        Some(sha) => format!("{} ({})", env!("CARGO_PKG_VERSION"), sha),
        None => env!("CARGO_PKG_VERSION").to_string(),
    }
}

fn build_command() -> Command {
    Command::new("Tracker Decoder")
        .version(version())
        .about("Decode GPS tracker uplink payloads (hex or base64) into named fields.")
        .arg(
            Arg::new("inputs")
                .help("Payload literals or files with one payload per line (supports globbing)")
                .required(true)
                .num_args(1..)
                .index(1),
        )
        .arg(
            Arg::new("port")
                .long("port")
                .help("LoRaWAN port the payloads were received on")
                .value_parser(clap::value_parser!(u8))
                .default_value("1"),
        )
        .arg(
            Arg::new("location")
                .long("location")
                .help("Emit a combined \"lat,lon\" location field instead of separate coordinates")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("encoding")
                .long("encoding")
                .help("Payload text encoding")
                .value_parser(["hex", "base64", "auto"])
                .default_value("auto"),
        )
        .arg(
            Arg::new("csv")
                .long("csv")
                .help("Export decoded fields to <input>.decoded.csv")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("json")
                .long("json")
                .help("Export decoded fields to <input>.decoded.jsonl (requires the json feature)")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("output-dir")
                .long("output-dir")
                .help("Directory for output files (default: same as input file)")
                .value_name("DIR"),
        )
        .arg(
            Arg::new("places")
                .long("places")
                .help("CSV of known places (location,latitude,longitude,approach_distance_km) to check each fix against")
                .value_name("FILE"),
        )
        .arg(
            Arg::new("debug")
                .long("debug")
                .help("Enable debug output and detailed decoding information")
                .action(ArgAction::SetTrue),
        )
}

fn looks_like_path(value: &str) -> bool {
    value.contains('*') || value.contains('?') || Path::new(value).is_file()
}

fn resolve_inputs(patterns: &[&String], debug: bool) -> Vec<Input> {
    let mut inputs = Vec::new();

    for pattern in patterns {
        if !looks_like_path(pattern) {
            inputs.push(Input::Literal(pattern.to_string()));
            continue;
        }

        if !(pattern.contains('*') || pattern.contains('?')) {
            inputs.push(Input::File(PathBuf::from(pattern)));
            continue;
        }

        match glob(pattern) {
            Ok(glob_iter) => match glob_iter.collect::<Result<Vec<_>, _>>() {
                Ok(paths) => {
                    if debug {
                        println!("Glob pattern '{pattern}' matched {} files", paths.len());
                    }
                    if paths.is_empty() {
                        eprintln!("Warning: Pattern matched no files: {pattern}");
                    }
                    inputs.extend(paths.into_iter().filter(|p| p.is_file()).map(Input::File));
                }
                Err(e) => eprintln!("Error expanding glob pattern '{pattern}': {e}"),
            },
            Err(e) => eprintln!("Invalid glob pattern '{pattern}': {e}"),
        }
    }

    inputs
}

#[cfg(feature = "csv")]
fn load_places(path: Option<&String>) -> Result<Vec<GeoPoint>> {
    match path {
        Some(path) => Ok(tracker_decoder::load_geo_points_csv(Path::new(path))?),
        None => Ok(Vec::new()),
    }
}

#[cfg(not(feature = "csv"))]
fn load_places(path: Option<&String>) -> Result<Vec<GeoPoint>> {
    if path.is_some() {
        eprintln!("Warning: --places requires the csv feature; ignoring");
    }
    Ok(Vec::new())
}

fn print_record(record: &DecodedRecord, places: &[GeoPoint], location: &mut ShadowLocation) {
    if record.fields.is_empty() {
        println!("{}: no fields for port {}", record.source, record.port);
        return;
    }

    let rendered: Vec<String> = record
        .fields
        .iter()
        .map(|(name, value)| format!("{name}={value}"))
        .collect();
    println!("{}: {}", record.source, rendered.join(" "));

    if places.is_empty() {
        return;
    }
    if let Some(position) = record.fields.position() {
        match tracker_decoder::nearest_in_range(position, places) {
            Some(hit) => {
                println!("  near {} ({:.3} km)", hit.location, hit.distance_km);
                if location.apply_match(&hit) {
                    println!("  arrived at {}", location.current_location);
                }
            }
            None => println!("  not near any known place"),
        }
    }
}

fn print_failure(failure: &DecodeFailure) {
    eprintln!("Error decoding {}: {}", failure.source, failure.error);
}

fn report_batch(
    outcome: &BatchOutcome,
    input_path: &Path,
    export_options: &ExportOptions,
    mode: OutputMode,
    places: &[GeoPoint],
    location: &mut ShadowLocation,
) {
    for record in &outcome.records {
        print_record(record, places, location);
    }
    for failure in &outcome.failures {
        print_failure(failure);
    }

    if !(export_options.csv || export_options.json) {
        return;
    }
    match export_records(&outcome.records, input_path, export_options, mode) {
        Ok(report) => {
            if let Some(path) = &report.csv_path {
                println!("Exported {} record(s) to: {}", report.written, path.display());
            }
            if let Some(path) = &report.json_path {
                println!("Exported {} record(s) to: {}", report.written, path.display());
            }
            if report.skipped > 0 {
                println!("Skipped {} record(s) with no decoded fields", report.skipped);
            }
        }
        Err(e) => eprintln!("Error exporting {}: {e}", input_path.display()),
    }
}

fn main() -> Result<()> {
    let matches = build_command().get_matches();

    let debug = matches.get_flag("debug");
    let port = *matches.get_one::<u8>("port").unwrap_or(&1);
    let mode = if matches.get_flag("location") {
        OutputMode::CombinedLocation
    } else {
        OutputMode::SeparateFields
    };
    let encoding: PayloadEncoding = matches
        .get_one::<String>("encoding")
        .map(|s| s.parse::<PayloadEncoding>())
        .transpose()?
        .unwrap_or_default();
    let export_json = matches.get_flag("json");
    if export_json && !cfg!(feature = "json") {
        eprintln!("Warning: --json requires the json feature; JSON export disabled");
    }

    let export_options = ExportOptions {
        csv: matches.get_flag("csv"),
        json: export_json,
        output_dir: matches.get_one::<String>("output-dir").cloned(),
    };
    let places = load_places(matches.get_one::<String>("places"))?;
    let decoder = PayloadDecoder::new(mode).with_debug(debug);
    let mut location = ShadowLocation::default();

    let patterns: Vec<&String> = matches
        .get_many::<String>("inputs")
        .map(|v| v.collect())
        .unwrap_or_default();

    if debug {
        println!("Input patterns: {patterns:?}");
        println!("Port: {port}, mode: {mode:?}, encoding: {encoding:?}");
    }

    let inputs = resolve_inputs(&patterns, debug);
    let mut literals = BatchOutcome::default();
    let mut decoded_total = 0;

    for input in &inputs {
        match input {
            Input::Literal(text) => match decode_payload_text(text, port, encoding, &decoder) {
                Ok(fields) => literals.records.push(DecodedRecord {
                    source: text.clone(),
                    port,
                    fields,
                }),
                Err(error) => literals.failures.push(DecodeFailure {
                    source: text.clone(),
                    error,
                }),
            },
            Input::File(path) => {
                println!("Processing: {}", path.display());
                match decode_payload_file(path, port, encoding, &decoder) {
                    Ok(outcome) => {
                        decoded_total += outcome.decoded_count();
                        report_batch(&outcome, path, &export_options, mode, &places, &mut location);
                    }
                    Err(e) => {
                        eprintln!("Error processing {}: {e}", path.display());
                        eprintln!("Continuing with next input...");
                    }
                }
            }
        }
    }

    if !literals.records.is_empty() || !literals.failures.is_empty() {
        decoded_total += literals.decoded_count();
        report_batch(
            &literals,
            Path::new(LITERAL_INPUT),
            &export_options,
            mode,
            &places,
            &mut location,
        );
    }

    if decoded_total == 0 {
        eprintln!("Error: No payloads were decoded out of {} input(s).", inputs.len());
        eprintln!("This could be due to:");
        eprintln!("  - Payloads shorter than 13 bytes");
        eprintln!("  - A port with no known schema (only port 1 is decoded)");
        eprintln!("  - Text that is neither hex nor base64");
        eprintln!("Use --debug flag for more detailed error information.");
        std::process::exit(1);
    }

    if !location.previous_locations.is_empty() {
        println!("Visited: {}", location.previous_locations.join(", "));
    }

    Ok(())
}
