//! Tracker Decoder Library
//!
//! A Rust library for decoding LoRaWAN uplink payloads sent by GPS trackers.
//! Port 1 carries a fixed 13-byte position report that decodes to latitude,
//! longitude, altitude and course.
//!
//! # Features
//!
//! - **`csv`** (default): Enable CSV export functionality
//! - **`cli`** (default): Build the command-line interface binary
//! - **`json`**: Enable TTN uplink envelopes, shadow documents and JSON-lines export
//! - **`serde`**: Enable serialization of decoded types
//!
//! # Quick Start
//!
//! Decode a payload into separate coordinate fields:
//! ```rust
//! use tracker_decoder::{decode, FieldValue, OutputMode, GPS_PORT};
//!
//! let bytes = [100, 0, 0, 0, 0, 200, 0, 0, 0, 0, 100, 1, 134];
//! let fields = decode(&bytes, GPS_PORT, OutputMode::SeparateFields).unwrap();
//! assert_eq!(fields.get("latitude"), Some(&FieldValue::Float(10.0)));
//! assert_eq!(fields.get("course"), Some(&FieldValue::Float(39.0)));
//! ```
//!
//! Or with a combined location string:
//! ```rust
//! use tracker_decoder::{decode, OutputMode, GPS_PORT};
//!
//! let bytes = [100, 0, 0, 0, 0, 200, 0, 0, 0, 0, 100, 1, 134];
//! let fields = decode(&bytes, GPS_PORT, OutputMode::CombinedLocation).unwrap();
//! assert_eq!(fields.get("location").and_then(|v| v.as_str()), Some("10,20"));
//! ```
//!
//! # Coordinate encoding
//!
//! The fractional part of each coordinate is the decimal text of a 24-bit
//! integer appended after the decimal point, not a scaled value. Fraction
//! bytes `[0, 0, 5]` therefore give `.5`, not `.000005`. Deployed trackers
//! produce exactly this, so the decoder reproduces it unchanged.
//!
//! # Public API
//!
//! ## Decoding Functions
//! - [`decode`] - Decode raw bytes for a port into a field mapping
//! - [`decode_fix`] - Decode a port 1 payload into a [`TrackerFix`]
//! - [`PayloadDecoder`] - Decoder with an output mode and optional debug output
//! - [`decode_payload_text`] / [`decode_payload_file`] - Decode hex or base64 text
//!
//! ## Data Types
//! - [`DecodedFields`] - Ordered field mapping
//! - [`FieldValue`] - Integer, float or text value
//! - [`OutputMode`] - Separate coordinates or combined location
//! - [`DecodedRecord`] / [`BatchOutcome`] - Batch decoding results
//!
//! ## Geofencing
//! - [`haversine_km`] - Great-circle distance
//! - [`check_proximity`] - Closest known place in range
//!
//! ## Export Functions
//! - [`export_records`] - Run enabled exports
//! - [`export_to_csv`] - Export decoded records to CSV
//! - [`compute_export_paths`] - Helper for consistent path computation

// Module declarations
pub mod conversion;
pub mod error;
pub mod export;
pub mod parser;
pub mod proximity;
pub mod types;
#[cfg(feature = "json")]
pub mod uplink;

// Re-export everything from modules for convenience
pub use conversion::*;
pub use error::*;
pub use export::*;
pub use parser::*;
pub use proximity::*;
pub use types::*;
#[cfg(feature = "json")]
pub use uplink::*;
