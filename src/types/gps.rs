use crate::conversion::format_location;
use crate::types::{DecodedFields, FieldValue, OutputMode};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// GPS fix carried by a port 1 uplink
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct TrackerFix {
    pub latitude: f64,
    pub longitude: f64,
    /// Meters, as reported by the receiver (never negative on the wire)
    pub altitude: u16,
    /// Degrees, one decimal of precision
    pub course: f64,
}

impl TrackerFix {
    /// Assemble the field mapping for the requested output mode
    pub fn into_fields(self, mode: OutputMode) -> DecodedFields {
        let mut fields = DecodedFields::new();
        match mode {
            OutputMode::SeparateFields => {
                fields.insert("latitude", FieldValue::Float(self.latitude));
                fields.insert("longitude", FieldValue::Float(self.longitude));
            }
            OutputMode::CombinedLocation => {
                fields.insert(
                    "location",
                    FieldValue::Text(format_location(self.latitude, self.longitude)),
                );
            }
        }
        fields.insert("altitude", FieldValue::Integer(i64::from(self.altitude)));
        fields.insert("course", FieldValue::Float(self.course));
        fields
    }

    pub fn position(&self) -> (f64, f64) {
        (self.latitude, self.longitude)
    }
}
