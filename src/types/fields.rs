use std::fmt;

#[cfg(feature = "serde")]
use serde::{ser::SerializeMap, Deserialize, Serialize, Serializer};

/// Shape of the decoded field mapping
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum OutputMode {
    /// `latitude`, `longitude`, `altitude`, `course`
    #[default]
    SeparateFields,
    /// `location` ("lat,lon"), `altitude`, `course`
    CombinedLocation,
}

impl OutputMode {
    /// Field names produced in this mode, in output order
    pub fn field_names(&self) -> &'static [&'static str] {
        match self {
            OutputMode::SeparateFields => &["latitude", "longitude", "altitude", "course"],
            OutputMode::CombinedLocation => &["location", "altitude", "course"],
        }
    }
}

/// A single decoded value
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(untagged))]
pub enum FieldValue {
    Integer(i64),
    Float(f64),
    Text(String),
}

impl FieldValue {
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            FieldValue::Integer(v) => Some(*v as f64),
            FieldValue::Float(v) => Some(*v),
            FieldValue::Text(_) => None,
        }
    }

    pub fn as_i64(&self) -> Option<i64> {
        match self {
            FieldValue::Integer(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            FieldValue::Text(s) => Some(s),
            _ => None,
        }
    }
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldValue::Integer(v) => write!(f, "{}", v),
            FieldValue::Float(v) => write!(f, "{}", v),
            FieldValue::Text(s) => write!(f, "{}", s),
        }
    }
}

/// Field mapping produced by a decode call
///
/// Keeps insertion order so output columns line up with [`OutputMode::field_names`].
/// Empty when the port carries no known schema.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct DecodedFields {
    entries: Vec<(String, FieldValue)>,
}

impl DecodedFields {
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Insert or replace a field
    pub fn insert(&mut self, name: impl Into<String>, value: FieldValue) {
        let name = name.into();
        if let Some(slot) = self.entries.iter_mut().find(|(n, _)| *n == name) {
            slot.1 = value;
        } else {
            self.entries.push((name, value));
        }
    }

    pub fn get(&self, name: &str) -> Option<&FieldValue> {
        self.entries
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &FieldValue)> {
        self.entries.iter().map(|(n, v)| (n.as_str(), v))
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(n, _)| n.as_str())
    }

    /// `(latitude, longitude)` from either output mode
    pub fn position(&self) -> Option<(f64, f64)> {
        if let (Some(lat), Some(lon)) = (self.get("latitude"), self.get("longitude")) {
            return Some((lat.as_f64()?, lon.as_f64()?));
        }
        let (lat, lon) = self.get("location")?.as_str()?.split_once(',')?;
        Some((lat.trim().parse().ok()?, lon.trim().parse().ok()?))
    }
}

#[cfg(feature = "serde")]
impl Serialize for DecodedFields {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (name, value) in &self.entries {
            map.serialize_entry(name, value)?;
        }
        map.end()
    }
}
