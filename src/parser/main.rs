use crate::parser::decoder::PayloadDecoder;
use crate::parser::payload::{parse_payload_text, PayloadEncoding};
use crate::types::*;
use crate::Result;
use anyhow::Context;
use std::path::Path;

/// Decode a single textual payload
pub fn decode_payload_text(
    text: &str,
    port: u8,
    encoding: PayloadEncoding,
    decoder: &PayloadDecoder,
) -> Result<DecodedFields> {
    let bytes = parse_payload_text(text, encoding)?;
    decoder.decode(&bytes, port)
}

/// Decode newline-separated payloads
///
/// Blank lines and lines starting with `#` are skipped. Each remaining line is
/// labelled `<label>:<line number>`. A bad line is recorded as a failure and
/// decoding carries on with the next one.
pub fn decode_payload_lines(
    text: &str,
    label: &str,
    port: u8,
    encoding: PayloadEncoding,
    decoder: &PayloadDecoder,
) -> BatchOutcome {
    let mut outcome = BatchOutcome::default();

    for (index, line) in text.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        let source = format!("{}:{}", label, index + 1);
        if decoder.debug() {
            println!("DEBUG: {} -> {}", source, line);
        }

        match decode_payload_text(line, port, encoding, decoder) {
            Ok(fields) => outcome.records.push(DecodedRecord {
                source,
                port,
                fields,
            }),
            Err(error) => outcome.failures.push(DecodeFailure { source, error }),
        }
    }

    outcome
}

/// Decode a file holding one payload per line
pub fn decode_payload_file(
    file_path: &Path,
    port: u8,
    encoding: PayloadEncoding,
    decoder: &PayloadDecoder,
) -> Result<BatchOutcome> {
    if decoder.debug() {
        println!("=== DECODING PAYLOAD FILE ===");
        let metadata = std::fs::metadata(file_path)?;
        println!("File size: {} bytes", metadata.len());
    }

    let contents = std::fs::read_to_string(file_path)
        .with_context(|| format!("Failed to read payload file: {:?}", file_path))?;

    let label = file_path
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or("payloads");

    Ok(decode_payload_lines(
        &contents, label, port, encoding, decoder,
    ))
}
