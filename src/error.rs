use std::fmt;

/// Errors produced while decoding tracker uplinks
///
/// An unsupported port is deliberately not represented here: decoding such a
/// message yields an empty field mapping instead.
#[derive(Debug)]
pub enum DecodeError {
    /// Payload shorter than the schema selected by the port
    InsufficientData {
        port: u8,
        expected: usize,
        actual: usize,
    },
    /// Concatenated coordinate text did not parse as a number
    NumericParse(String),
    /// Read past the end of the payload
    UnexpectedEof,
    /// Hex or base64 payload text could not be decoded
    InvalidPayloadText(String),
    /// Malformed auxiliary input, such as a places file
    Parse(String),
    /// I/O errors
    Io(std::io::Error),
    /// Export format error
    Export(String),
    /// JSON envelope or document error
    Json(String),
}

impl fmt::Display for DecodeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DecodeError::InsufficientData {
                port,
                expected,
                actual,
            } => write!(
                f,
                "Insufficient data for port {}: expected at least {} bytes, got {}",
                port, expected, actual
            ),
            DecodeError::NumericParse(msg) => write!(f, "Numeric parse error: {}", msg),
            DecodeError::UnexpectedEof => write!(f, "Unexpected end of payload"),
            DecodeError::InvalidPayloadText(msg) => write!(f, "Invalid payload text: {}", msg),
            DecodeError::Parse(msg) => write!(f, "Parse error: {}", msg),
            DecodeError::Io(err) => write!(f, "I/O error: {}", err),
            DecodeError::Export(msg) => write!(f, "Export error: {}", msg),
            DecodeError::Json(msg) => write!(f, "JSON error: {}", msg),
        }
    }
}

impl std::error::Error for DecodeError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            DecodeError::Io(err) => Some(err),
            _ => None,
        }
    }
}

impl From<std::io::Error> for DecodeError {
    fn from(err: std::io::Error) -> Self {
        DecodeError::Io(err)
    }
}

impl From<anyhow::Error> for DecodeError {
    fn from(err: anyhow::Error) -> Self {
        // Keep the context chain in the message
        let message = format!("{:#}", err);
        match err.downcast::<std::io::Error>() {
            Ok(io) => DecodeError::Io(std::io::Error::new(io.kind(), message)),
            Err(_) => DecodeError::Parse(message),
        }
    }
}

#[cfg(feature = "csv")]
impl From<csv::Error> for DecodeError {
    fn from(err: csv::Error) -> Self {
        DecodeError::Export(err.to_string())
    }
}

#[cfg(feature = "json")]
impl From<serde_json::Error> for DecodeError {
    fn from(err: serde_json::Error) -> Self {
        DecodeError::Json(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, DecodeError>;
