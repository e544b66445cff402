//! Export functionality for decoded uplinks
//!
//! Writes decoded records to CSV (feature `csv`) or JSON lines (feature `json`).
//! Records whose port carried no schema have nothing to write and are counted
//! as skipped.

use crate::types::*;
use crate::Result;
use anyhow::Context;
use std::path::{Path, PathBuf};

/// Export options for controlling output formats
#[derive(Debug, Clone, Default)]
pub struct ExportOptions {
    pub csv: bool,
    pub json: bool,
    pub output_dir: Option<String>,
}

/// What an export run produced
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ExportReport {
    pub csv_path: Option<PathBuf>,
    pub json_path: Option<PathBuf>,
    pub written: usize,
    pub skipped: usize,
}

impl ExportReport {
    fn merge(&mut self, other: ExportReport) {
        self.csv_path = other.csv_path.or(self.csv_path.take());
        self.json_path = other.json_path.or(self.json_path.take());
        self.written = self.written.max(other.written);
        self.skipped = self.skipped.max(other.skipped);
    }
}

/// Output file locations for one input
#[derive(Debug, Clone, PartialEq)]
pub struct ExportPaths {
    pub csv: PathBuf,
    pub json: PathBuf,
}

/// Compute `<stem>.decoded.csv` / `<stem>.decoded.jsonl` for an input path
///
/// Files go to `output_dir` when set, otherwise next to the input.
pub fn compute_export_paths(input_path: &Path, export_options: &ExportOptions) -> ExportPaths {
    let stem = input_path
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("payloads");

    let dir = match &export_options.output_dir {
        Some(dir) => PathBuf::from(dir),
        None => input_path
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_default(),
    };

    ExportPaths {
        csv: dir.join(format!("{stem}.decoded.csv")),
        json: dir.join(format!("{stem}.decoded.jsonl")),
    }
}

fn ensure_parent_dir(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create output directory: {parent:?}"))?;
        }
    }
    Ok(())
}

/// Run every export enabled in `export_options`
#[cfg_attr(
    not(any(feature = "csv", feature = "json")),
    allow(unused_variables, unused_mut)
)]
pub fn export_records(
    records: &[DecodedRecord],
    input_path: &Path,
    export_options: &ExportOptions,
    mode: OutputMode,
) -> Result<ExportReport> {
    let mut report = ExportReport::default();

    #[cfg(feature = "csv")]
    {
        if export_options.csv {
            report.merge(export_to_csv(records, input_path, export_options, mode)?);
        }
    }

    #[cfg(feature = "json")]
    {
        if export_options.json {
            report.merge(export_to_json(records, input_path, export_options)?);
        }
    }

    Ok(report)
}

/// Export decoded records to CSV
///
/// Columns are `source,port` followed by the field names of `mode`.
#[cfg(feature = "csv")]
pub fn export_to_csv(
    records: &[DecodedRecord],
    input_path: &Path,
    export_options: &ExportOptions,
    mode: OutputMode,
) -> Result<ExportReport> {
    let csv_path = compute_export_paths(input_path, export_options).csv;
    ensure_parent_dir(&csv_path)?;

    let file = std::fs::File::create(&csv_path)
        .with_context(|| format!("Failed to create CSV file: {csv_path:?}"))?;
    let mut writer = csv::Writer::from_writer(std::io::BufWriter::new(file));

    let names = mode.field_names();
    let mut header = vec!["source", "port"];
    header.extend_from_slice(names);
    writer.write_record(&header)?;

    let mut written = 0;
    let mut skipped = 0;
    for record in records {
        if record.fields.is_empty() {
            skipped += 1;
            continue;
        }

        let mut row = vec![record.source.clone(), record.port.to_string()];
        row.extend(names.iter().map(|name| {
            record
                .fields
                .get(name)
                .map(|v| v.to_string())
                .unwrap_or_default()
        }));
        writer.write_record(&row)?;
        written += 1;
    }

    writer
        .flush()
        .with_context(|| format!("Failed to flush CSV file: {csv_path:?}"))?;

    Ok(ExportReport {
        csv_path: Some(csv_path),
        json_path: None,
        written,
        skipped,
    })
}

/// Export decoded records as JSON lines, one object per record
#[cfg(feature = "json")]
pub fn export_to_json(
    records: &[DecodedRecord],
    input_path: &Path,
    export_options: &ExportOptions,
) -> Result<ExportReport> {
    use std::io::{BufWriter, Write};

    let json_path = compute_export_paths(input_path, export_options).json;
    ensure_parent_dir(&json_path)?;

    let file = std::fs::File::create(&json_path)
        .with_context(|| format!("Failed to create JSON file: {json_path:?}"))?;
    let mut writer = BufWriter::new(file);

    let mut written = 0;
    let mut skipped = 0;
    for record in records {
        if record.fields.is_empty() {
            skipped += 1;
            continue;
        }
        serde_json::to_writer(&mut writer, record)?;
        writeln!(writer)?;
        written += 1;
    }

    writer
        .flush()
        .with_context(|| format!("Failed to flush JSON file: {json_path:?}"))?;

    Ok(ExportReport {
        csv_path: None,
        json_path: Some(json_path),
        written,
        skipped,
    })
}
