use crate::conversion::{concat_decimal, convert_course};
use crate::error::{DecodeError, Result};
use crate::parser::stream::PayloadStream;
use crate::types::{DecodedFields, OutputMode, TrackerFix};

// Port 1 layout (big-endian):
//   0      latitude integer, u8 offset by +90
//   1..=3  latitude fraction digits, u24
//   4..=5  longitude integer, u16 offset by +180
//   6..=8  longitude fraction digits, u24
//   9..=10 altitude, u16
//   11..=12 course * 10, u16
pub const GPS_PORT: u8 = 1;
pub const GPS_PAYLOAD_LEN: usize = 13;
pub const LATITUDE_OFFSET: i32 = 90;
pub const LONGITUDE_OFFSET: i32 = 180;

/// Decode a port 1 payload into a typed fix
///
/// Bytes past the 13-byte layout are ignored.
pub fn decode_fix(bytes: &[u8]) -> Result<TrackerFix> {
    if bytes.len() < GPS_PAYLOAD_LEN {
        return Err(DecodeError::InsufficientData {
            port: GPS_PORT,
            expected: GPS_PAYLOAD_LEN,
            actual: bytes.len(),
        });
    }

    let mut stream = PayloadStream::new(bytes);

    let lat_int = stream.read_byte()? as i32 - LATITUDE_OFFSET;
    let lat_frac = stream.read_u24_be()?;
    let lon_int = stream.read_u16_be()? as i32 - LONGITUDE_OFFSET;
    let lon_frac = stream.read_u24_be()?;
    let altitude = stream.read_u16_be()?;
    let course_raw = stream.read_u16_be()?;

    Ok(TrackerFix {
        latitude: concat_decimal(lat_int, lat_frac)?,
        longitude: concat_decimal(lon_int, lon_frac)?,
        altitude,
        course: convert_course(course_raw),
    })
}

/// Decode an uplink payload for the given port
///
/// Ports other than [`GPS_PORT`] have no schema and produce an empty mapping,
/// whatever the payload holds. Never logs; see [`PayloadDecoder`] for the
/// diagnostic variant.
pub fn decode(bytes: &[u8], port: u8, mode: OutputMode) -> Result<DecodedFields> {
    if port != GPS_PORT {
        return Ok(DecodedFields::new());
    }
    Ok(decode_fix(bytes)?.into_fields(mode))
}

/// Configured decoder with optional diagnostic output
#[derive(Debug, Clone, Copy, Default)]
pub struct PayloadDecoder {
    mode: OutputMode,
    debug: bool,
}

impl PayloadDecoder {
    pub fn new(mode: OutputMode) -> Self {
        Self { mode, debug: false }
    }

    /// Print each decoded value to stdout while decoding
    pub fn with_debug(mut self, debug: bool) -> Self {
        self.debug = debug;
        self
    }

    pub fn mode(&self) -> OutputMode {
        self.mode
    }

    pub fn debug(&self) -> bool {
        self.debug
    }

    pub fn decode(&self, bytes: &[u8], port: u8) -> Result<DecodedFields> {
        if !self.debug {
            return decode(bytes, port, self.mode);
        }

        println!("DEBUG: Decoding {} bytes on port {}", bytes.len(), port);
        if port != GPS_PORT {
            println!("DEBUG: No schema for port {}, nothing decoded", port);
            return Ok(DecodedFields::new());
        }

        let fix = decode_fix(bytes)?;
        println!("DEBUG: latitude: {}", fix.latitude);
        println!("DEBUG: longitude: {}", fix.longitude);
        println!("DEBUG: altitude: {}", fix.altitude);
        println!("DEBUG: course: {}", fix.course);
        Ok(fix.into_fields(self.mode))
    }
}
