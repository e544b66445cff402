//! TTN uplink envelope handling
//!
//! Parses the JSON uplink delivered by the network server, decodes its payload
//! and builds the device shadow document reported for the tracker.

use crate::error::Result;
use crate::parser::{parse_base64_payload, PayloadDecoder};
use crate::proximity::ShadowLocation;
use crate::types::{DecodedFields, OutputMode};
use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value};

/// Uplink message as delivered by The Things Network
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UplinkMessage {
    #[serde(default)]
    pub app_id: Option<String>,
    pub dev_id: String,
    #[serde(alias = "fport", alias = "f_port")]
    pub port: u8,
    #[serde(default)]
    pub counter: Option<u32>,
    /// Base64 encoded payload bytes
    pub payload_raw: String,
}

impl UplinkMessage {
    pub fn from_json(text: &str) -> Result<Self> {
        Ok(serde_json::from_str(text)?)
    }

    pub fn payload_bytes(&self) -> Result<Vec<u8>> {
        parse_base64_payload(&self.payload_raw)
    }
}

/// Uplink after its payload has been decoded
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DecodedUplink {
    pub dev_id: String,
    pub port: u8,
    pub counter: Option<u32>,
    pub fields: DecodedFields,
}

/// Decode the payload carried by an uplink message
pub fn decode_uplink(message: &UplinkMessage, mode: OutputMode) -> Result<DecodedUplink> {
    decode_uplink_with(message, &PayloadDecoder::new(mode))
}

pub fn decode_uplink_with(
    message: &UplinkMessage,
    decoder: &PayloadDecoder,
) -> Result<DecodedUplink> {
    let bytes = message.payload_bytes()?;
    let fields = decoder.decode(&bytes, message.port)?;

    Ok(DecodedUplink {
        dev_id: message.dev_id.clone(),
        port: message.port,
        counter: message.counter,
        fields,
    })
}

/// Build the `{"state": {"reported": ...}}` shadow update for a decoded uplink
///
/// The reported state carries `dev_id` plus every decoded field.
pub fn shadow_document(uplink: &DecodedUplink) -> Result<Value> {
    reported_document(uplink, None)
}

/// [`shadow_document`] that also reports the tracker's location state
pub fn shadow_document_with_location(
    uplink: &DecodedUplink,
    location: &ShadowLocation,
) -> Result<Value> {
    reported_document(uplink, Some(location))
}

fn reported_document(uplink: &DecodedUplink, location: Option<&ShadowLocation>) -> Result<Value> {
    let mut reported = Map::new();
    reported.insert("dev_id".to_string(), Value::String(uplink.dev_id.clone()));

    for (name, value) in uplink.fields.iter() {
        reported.insert(name.to_string(), serde_json::to_value(value)?);
    }

    if let Some(location) = location {
        if let Value::Object(state) = serde_json::to_value(location)? {
            reported.extend(state);
        }
    }

    Ok(json!({ "state": { "reported": reported } }))
}

impl ShadowLocation {
    /// Read the location state out of a shadow document
    ///
    /// Accepts either the whole `{"state":{"reported":...}}` document or the
    /// reported object itself. Missing keys take their defaults.
    pub fn from_shadow(document: &Value) -> Result<Self> {
        let reported = document
            .get("state")
            .and_then(|state| state.get("reported"))
            .unwrap_or(document);

        match reported {
            Value::Object(_) => Ok(serde_json::from_value(reported.clone())?),
            _ => Ok(ShadowLocation::default()),
        }
    }
}

/// Parse, decode and wrap an uplink in one step
pub fn shadow_document_from_json(text: &str, mode: OutputMode) -> Result<Value> {
    let message = UplinkMessage::from_json(text)?;
    let decoded = decode_uplink(&message, mode)?;
    shadow_document(&decoded)
}
