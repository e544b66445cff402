//! Integration tests for export functionality
//!
//! Tests the export layer across different scenarios:
//! - CSV export with directory creation
//! - Column layout per output mode
//! - Records without fields being skipped
//! - Output directory defaulting to input parent

use std::fs;
use std::path::Path;
use tempfile::TempDir;
use tracker_decoder::{
    decode, decode_payload_file, export_records, DecodedRecord, ExportOptions, OutputMode,
    PayloadDecoder, PayloadEncoding, GPS_PORT,
};

const SAMPLE: [u8; 13] = [100, 0, 0, 0, 0, 200, 0, 0, 0, 0, 100, 1, 134];

fn record(source: &str, port: u8, mode: OutputMode) -> DecodedRecord {
    DecodedRecord {
        source: source.to_string(),
        port,
        fields: decode(&SAMPLE, port, mode).unwrap(),
    }
}

#[cfg(feature = "csv")]
#[test]
fn test_export_csv_creates_output_directory() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let nonexistent_dir = temp_dir.path().join("nonexistent").join("output");
    let input_path = temp_dir.path().join("uplinks.txt");

    let export_opts = ExportOptions {
        csv: true,
        json: false,
        output_dir: Some(nonexistent_dir.to_str().unwrap().to_string()),
    };

    let records = vec![record("uplinks.txt:1", GPS_PORT, OutputMode::SeparateFields)];
    let report = export_records(&records, &input_path, &export_opts, OutputMode::SeparateFields)
        .expect("CSV export should succeed and create directories");

    assert!(nonexistent_dir.exists(), "Output directory should be created");
    let csv_path = nonexistent_dir.join("uplinks.decoded.csv");
    assert_eq!(report.csv_path.as_deref(), Some(csv_path.as_path()));
    assert_eq!(report.written, 1);

    let content = fs::read_to_string(&csv_path).unwrap();
    let lines: Vec<&str> = content.lines().collect();
    assert_eq!(lines[0], "source,port,latitude,longitude,altitude,course");
    assert_eq!(lines[1], "uplinks.txt:1,1,10,20,100,39");
}

#[cfg(feature = "csv")]
#[test]
fn test_export_csv_combined_location_is_quoted() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let input_path = temp_dir.path().join("uplinks.txt");

    let export_opts = ExportOptions {
        csv: true,
        ..Default::default()
    };
    let records = vec![record("a", GPS_PORT, OutputMode::CombinedLocation)];
    export_records(&records, &input_path, &export_opts, OutputMode::CombinedLocation).unwrap();

    // Defaults to the input's directory
    let content = fs::read_to_string(temp_dir.path().join("uplinks.decoded.csv")).unwrap();
    let lines: Vec<&str> = content.lines().collect();
    assert_eq!(lines[0], "source,port,location,altitude,course");
    assert_eq!(lines[1], "a,1,\"10,20\",100,39");
}

#[cfg(feature = "csv")]
#[test]
fn test_export_csv_skips_empty_records() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let input_path = temp_dir.path().join("mixed.txt");

    let records = vec![
        record("mixed.txt:1", GPS_PORT, OutputMode::SeparateFields),
        record("mixed.txt:2", 2, OutputMode::SeparateFields),
        record("mixed.txt:3", GPS_PORT, OutputMode::SeparateFields),
    ];
    let export_opts = ExportOptions {
        csv: true,
        ..Default::default()
    };
    let report =
        export_records(&records, &input_path, &export_opts, OutputMode::SeparateFields).unwrap();

    assert_eq!(report.written, 2);
    assert_eq!(report.skipped, 1);

    let content = fs::read_to_string(report.csv_path.unwrap()).unwrap();
    let header_fields = content.lines().next().unwrap().split(',').count();
    for line in content.lines().skip(1) {
        assert_eq!(line.split(',').count(), header_fields, "row: {line}");
    }
    assert_eq!(content.lines().count(), 3);
}

#[test]
fn test_export_nothing_enabled() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let input_path = temp_dir.path().join("uplinks.txt");

    let report = export_records(
        &[record("x", GPS_PORT, OutputMode::SeparateFields)],
        &input_path,
        &ExportOptions::default(),
        OutputMode::SeparateFields,
    )
    .unwrap();

    assert!(report.csv_path.is_none());
    assert!(report.json_path.is_none());
    assert_eq!(fs::read_dir(temp_dir.path()).unwrap().count(), 0);
}

#[cfg(feature = "json")]
#[test]
fn test_export_json_lines() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let input_path = temp_dir.path().join("uplinks.txt");

    let export_opts = ExportOptions {
        json: true,
        ..Default::default()
    };
    let records = vec![
        record("uplinks.txt:1", GPS_PORT, OutputMode::SeparateFields),
        record("uplinks.txt:2", 9, OutputMode::SeparateFields),
    ];
    let report =
        export_records(&records, &input_path, &export_opts, OutputMode::SeparateFields).unwrap();
    assert_eq!(report.written, 1);
    assert_eq!(report.skipped, 1);

    let content = fs::read_to_string(temp_dir.path().join("uplinks.decoded.jsonl")).unwrap();
    let line = content.lines().next().unwrap();
    let value: serde_json::Value = serde_json::from_str(line).unwrap();
    assert_eq!(value["source"], "uplinks.txt:1");
    assert_eq!(value["fields"]["latitude"], 10.0);
    assert_eq!(value["fields"]["altitude"], 100);
}

#[cfg(feature = "csv")]
#[test]
fn test_decode_file_then_export() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let input_path = temp_dir.path().join("capture.txt");
    fs::write(
        &input_path,
        "# tracker capture\n\
         6400000000c800000000640186\n\
         zz\n\
         ZAAAAADIAAAAAGQBhg==\n",
    )
    .unwrap();

    let decoder = PayloadDecoder::new(OutputMode::SeparateFields);
    let outcome =
        decode_payload_file(&input_path, GPS_PORT, PayloadEncoding::Auto, &decoder).unwrap();
    assert_eq!(outcome.records.len(), 2);
    assert_eq!(outcome.failures.len(), 1);
    assert_eq!(outcome.failures[0].source, "capture.txt:3");

    let export_opts = ExportOptions {
        csv: true,
        ..Default::default()
    };
    let report = export_records(
        &outcome.records,
        &input_path,
        &export_opts,
        OutputMode::SeparateFields,
    )
    .unwrap();
    assert_eq!(report.written, 2);
    assert!(Path::new(&report.csv_path.unwrap()).exists());
}

#[test]
fn test_decode_missing_file() {
    let decoder = PayloadDecoder::new(OutputMode::SeparateFields);
    let result = decode_payload_file(
        Path::new("/nonexistent/uplinks.txt"),
        GPS_PORT,
        PayloadEncoding::Hex,
        &decoder,
    );
    assert!(result.is_err());
}
