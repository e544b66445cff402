//! Value conversion utilities for tracker payloads
//!
//! Contains the coordinate reconstruction used by the port 1 layout, course
//! scaling and the textual location format.

use crate::error::{DecodeError, Result};

/// Divisor applied to the raw course value (one implied decimal)
pub const COURSE_SCALE: f64 = 10.0;

/// Build a coordinate from an integer part and a block of fraction digits
///
/// The fraction is the base-10 text of `fraction_digits` appended after the
/// decimal point, with no zero padding. `concat_decimal(10, 5)` is `10.5` and
/// `concat_decimal(10, 50)` is `10.5` as well, while `concat_decimal(10, 123456)`
/// is `10.123456`. Trackers in the field emit values in this form, so the
/// rule is kept as-is rather than scaled by a fixed power of ten. Whether the
/// firmware meant to zero-pad to six digits is unknown.
pub fn concat_decimal(integer_part: i32, fraction_digits: u32) -> Result<f64> {
    let text = format!("{}.{}", integer_part, fraction_digits);
    text.parse::<f64>()
        .map_err(|e| DecodeError::NumericParse(format!("'{}': {}", text, e)))
}

/// Convert raw course (degrees * 10) to degrees
pub fn convert_course(raw_value: u16) -> f64 {
    f64::from(raw_value) / COURSE_SCALE
}

/// Format a position as `"<latitude>,<longitude>"`
///
/// Uses the shortest round-trip rendering, so whole degrees print without a
/// fractional part (`10.0` becomes `"10"`).
pub fn format_location(latitude: f64, longitude: f64) -> String {
    format!("{},{}", latitude, longitude)
}
