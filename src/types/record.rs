use crate::types::DecodedFields;

#[cfg(feature = "serde")]
use serde::Serialize;

/// One decoded uplink together with where it came from
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct DecodedRecord {
    /// Input label, e.g. `uplinks.txt:12` or the payload literal itself
    pub source: String,
    pub port: u8,
    pub fields: DecodedFields,
}

/// Payload that could not be decoded
#[derive(Debug)]
pub struct DecodeFailure {
    pub source: String,
    pub error: crate::error::DecodeError,
}

/// Result of decoding a batch of payloads
#[derive(Debug, Default)]
pub struct BatchOutcome {
    pub records: Vec<DecodedRecord>,
    pub failures: Vec<DecodeFailure>,
}

impl BatchOutcome {
    /// Records that produced at least one field
    pub fn decoded_count(&self) -> usize {
        self.records.iter().filter(|r| !r.fields.is_empty()).count()
    }

    pub fn extend(&mut self, other: BatchOutcome) {
        self.records.extend(other.records);
        self.failures.extend(other.failures);
    }
}
