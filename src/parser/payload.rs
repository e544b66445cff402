//! Textual payload input
//!
//! Network servers hand uplink payloads over as text: base64 in TTN's
//! `payload_raw`, hex in consoles and gateway logs. These helpers turn either
//! form back into raw bytes for the decoder.

use crate::error::{DecodeError, Result};
use base64::{engine::general_purpose::STANDARD as BASE64, Engine};

/// How a textual payload is encoded
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PayloadEncoding {
    Hex,
    Base64,
    /// Hex first, base64 as fallback
    #[default]
    Auto,
}

impl std::str::FromStr for PayloadEncoding {
    type Err = DecodeError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "hex" => Ok(PayloadEncoding::Hex),
            "base64" | "b64" => Ok(PayloadEncoding::Base64),
            "auto" => Ok(PayloadEncoding::Auto),
            other => Err(DecodeError::InvalidPayloadText(format!(
                "unknown payload encoding '{}'",
                other
            ))),
        }
    }
}

/// Parse a hex payload such as `64000000 00c8` or `64:00:00:00`
pub fn parse_hex_payload(text: &str) -> Result<Vec<u8>> {
    let trimmed = text.trim();
    let body = trimmed
        .strip_prefix("0x")
        .or_else(|| trimmed.strip_prefix("0X"))
        .unwrap_or(trimmed);
    let cleaned: String = body
        .chars()
        .filter(|c| !c.is_whitespace() && *c != ':' && *c != '-')
        .collect();

    if cleaned.is_empty() {
        return Err(DecodeError::InvalidPayloadText("empty hex payload".into()));
    }

    hex::decode(&cleaned)
        .map_err(|e| DecodeError::InvalidPayloadText(format!("bad hex '{}': {}", text.trim(), e)))
}

/// Parse a standard base64 payload
pub fn parse_base64_payload(text: &str) -> Result<Vec<u8>> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Err(DecodeError::InvalidPayloadText(
            "empty base64 payload".into(),
        ));
    }
    BASE64
        .decode(trimmed)
        .map_err(|e| DecodeError::InvalidPayloadText(format!("bad base64 '{}': {}", trimmed, e)))
}

/// Parse payload text using the given encoding
///
/// With [`PayloadEncoding::Auto`], text that is valid hex is always read as
/// hex, even if it would also be valid base64.
pub fn parse_payload_text(text: &str, encoding: PayloadEncoding) -> Result<Vec<u8>> {
    match encoding {
        PayloadEncoding::Hex => parse_hex_payload(text),
        PayloadEncoding::Base64 => parse_base64_payload(text),
        PayloadEncoding::Auto => parse_hex_payload(text).or_else(|hex_err| {
            parse_base64_payload(text).map_err(|b64_err| {
                DecodeError::InvalidPayloadText(format!(
                    "neither hex nor base64 ({}; {})",
                    hex_err, b64_err
                ))
            })
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hex_with_separators() {
        let expected = vec![0x64, 0x00, 0x00, 0x00, 0xC8];
        assert_eq!(parse_hex_payload("64000000c8").unwrap(), expected);
        assert_eq!(parse_hex_payload("64 00 00 00 C8").unwrap(), expected);
        assert_eq!(parse_hex_payload("64:00:00:00:c8").unwrap(), expected);
        assert_eq!(parse_hex_payload(" 0x64000000C8\n").unwrap(), expected);
    }

    #[test]
    fn test_hex_rejects_garbage() {
        assert!(parse_hex_payload("").is_err());
        assert!(parse_hex_payload("abc").is_err()); // odd length
        assert!(parse_hex_payload("zz").is_err());
    }

    #[test]
    fn test_base64() {
        assert_eq!(
            parse_base64_payload("ZAAAAADIAAAAAGQBhg==").unwrap(),
            vec![100, 0, 0, 0, 0, 200, 0, 0, 0, 0, 100, 1, 134]
        );
        assert!(parse_base64_payload("not base64!").is_err());
    }

    #[test]
    fn test_auto_falls_back_to_base64() {
        let bytes = parse_payload_text("ZAAAAADIAAAAAGQBhg==", PayloadEncoding::Auto).unwrap();
        assert_eq!(bytes.len(), 13);
        // Valid hex wins
        assert_eq!(
            parse_payload_text("abcd", PayloadEncoding::Auto).unwrap(),
            vec![0xAB, 0xCD]
        );
        assert!(parse_payload_text("%%%", PayloadEncoding::Auto).is_err());
    }

    #[test]
    fn test_encoding_from_str() {
        assert_eq!("HEX".parse::<PayloadEncoding>().unwrap(), PayloadEncoding::Hex);
        assert_eq!("b64".parse::<PayloadEncoding>().unwrap(), PayloadEncoding::Base64);
        assert!("rot13".parse::<PayloadEncoding>().is_err());
    }
}
