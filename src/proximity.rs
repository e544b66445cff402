//! Geofence checks for decoded tracker positions
//!
//! Compares a decoded fix against a set of known places and reports the
//! closest one the tracker is approaching.
//!
//! # Usage
//!
//! ```rust
//! use tracker_decoder::{check_proximity, GeoPoint, TrackerFix};
//!
//! let depot = GeoPoint::new("depot", 51.5072, -0.1276, 2.0);
//! let fix = TrackerFix { latitude: 51.51, longitude: -0.13, altitude: 20, course: 90.0 };
//! let hit = check_proximity(&fix, &[depot]).unwrap();
//! assert_eq!(hit.location, "depot");
//! ```

#[cfg(feature = "csv")]
use crate::error::{DecodeError, Result};
use crate::types::TrackerFix;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Mean Earth radius (IUGG) in kilometres
pub const EARTH_RADIUS_KM: f64 = 6371.0088;

/// A named place with an approach radius
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct GeoPoint {
    pub location: String,
    pub latitude: f64,
    pub longitude: f64,
    pub approach_distance_km: f64,
}

impl GeoPoint {
    pub fn new(
        location: impl Into<String>,
        latitude: f64,
        longitude: f64,
        approach_distance_km: f64,
    ) -> Self {
        Self {
            location: location.into(),
            latitude,
            longitude,
            approach_distance_km,
        }
    }
}

/// A place the tracker is within range of
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ProximityMatch {
    pub location: String,
    pub distance_km: f64,
}

/// Great-circle distance between two `(latitude, longitude)` pairs in degrees
pub fn haversine_km(a: (f64, f64), b: (f64, f64)) -> f64 {
    let (lat1, lon1) = (a.0.to_radians(), a.1.to_radians());
    let (lat2, lon2) = (b.0.to_radians(), b.1.to_radians());
    let dlat = lat2 - lat1;
    let dlon = lon2 - lon1;

    let h = (dlat / 2.0).sin().powi(2) + lat1.cos() * lat2.cos() * (dlon / 2.0).sin().powi(2);
    2.0 * EARTH_RADIUS_KM * h.sqrt().min(1.0).asin()
}

/// Where the tracker currently is, as kept in its reported shadow state
///
/// Both fields default when the shadow has never carried them.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ShadowLocation {
    pub current_location: String,
    pub previous_locations: Vec<String>,
}

impl ShadowLocation {
    /// Move to the matched place
    ///
    /// Returns `true` when the tracker arrived somewhere other than its current
    /// location. A place is added to `previous_locations` on its first visit only.
    pub fn apply_match(&mut self, hit: &ProximityMatch) -> bool {
        if hit.location == self.current_location {
            return false;
        }

        self.current_location = hit.location.clone();
        if !self.previous_locations.contains(&hit.location) {
            self.previous_locations.push(hit.location.clone());
        }
        true
    }

    /// Check `position` against `points` and apply the nearest match
    ///
    /// Returns the match only when it changed the current location.
    pub fn update(&mut self, position: (f64, f64), points: &[GeoPoint]) -> Option<ProximityMatch> {
        let hit = nearest_in_range(position, points)?;
        self.apply_match(&hit).then_some(hit)
    }
}

/// Find the closest place whose approach radius contains the fix
///
/// A point matches only when the distance is strictly below its
/// `approach_distance_km`. Returns `None` when nothing is in range.
pub fn check_proximity(fix: &TrackerFix, points: &[GeoPoint]) -> Option<ProximityMatch> {
    nearest_in_range(fix.position(), points)
}

/// [`check_proximity`] for a bare `(latitude, longitude)` position
pub fn nearest_in_range(position: (f64, f64), points: &[GeoPoint]) -> Option<ProximityMatch> {
    points
        .iter()
        .map(|p| (p, haversine_km((p.latitude, p.longitude), position)))
        .filter(|(p, distance)| *distance < p.approach_distance_km)
        .min_by(|a, b| a.1.total_cmp(&b.1))
        .map(|(p, distance_km)| ProximityMatch {
            location: p.location.clone(),
            distance_km,
        })
}

/// Load places from a CSV file with columns
/// `location,latitude,longitude,approach_distance_km` and a header row
#[cfg(feature = "csv")]
pub fn load_geo_points_csv(path: &std::path::Path) -> Result<Vec<GeoPoint>> {
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .flexible(true)
        .from_path(path)
        .map_err(|e| places_error(path, e))?;

    let mut points = Vec::new();
    for (index, row) in reader.records().enumerate() {
        let row = row.map_err(|e| places_error(path, e))?;
        // Header is row 1
        let line = index + 2;
        if row.len() < 4 {
            return Err(DecodeError::Parse(format!(
                "{:?} line {}: expected 4 columns, found {}",
                path,
                line,
                row.len()
            )));
        }

        let number = |col: usize| -> Result<f64> {
            row[col].parse::<f64>().map_err(|e| {
                DecodeError::Parse(format!("{:?} line {}: '{}': {}", path, line, &row[col], e))
            })
        };

        points.push(GeoPoint {
            location: row[0].to_string(),
            latitude: number(1)?,
            longitude: number(2)?,
            approach_distance_km: number(3)?,
        });
    }

    Ok(points)
}

/// Read-side CSV errors are I/O or malformed input, never export failures
#[cfg(feature = "csv")]
fn places_error(path: &std::path::Path, err: csv::Error) -> DecodeError {
    let line = err.position().map(|pos| pos.line());
    let message = err.to_string();

    match err.into_kind() {
        csv::ErrorKind::Io(io) => DecodeError::Io(io),
        _ => match line {
            Some(line) => DecodeError::Parse(format!("{:?} line {}: {}", path, line, message)),
            None => DecodeError::Parse(format!("{:?}: {}", path, message)),
        },
    }
}
