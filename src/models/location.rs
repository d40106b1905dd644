//! Location models for geographic coordinates and per-request time context

use chrono::{DateTime, FixedOffset, Offset, Utc};
use serde::{Deserialize, Serialize};

/// Location coordinates
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Location {
    /// Latitude in decimal degrees
    pub latitude: f64,
    /// Longitude in decimal degrees
    pub longitude: f64,
    /// Location name (city, region, etc.)
    pub name: String,
    /// Country code (ISO 3166-1 alpha-2)
    pub country: Option<String>,
}

impl Location {
    /// Create a new location
    #[must_use]
    pub fn new(latitude: f64, longitude: f64, name: String) -> Self {
        Self {
            latitude,
            longitude,
            name,
            country: None,
        }
    }

    /// Create an unnamed location labeled by its own coordinates
    #[must_use]
    pub fn from_coordinates(latitude: f64, longitude: f64) -> Self {
        let mut location = Self::new(latitude, longitude, String::new());
        location.name = location.format_coordinates();
        location
    }

    /// Format location as coordinates string
    #[must_use]
    pub fn format_coordinates(&self) -> String {
        format!("{:.4}, {:.4}", self.latitude, self.longitude)
    }
}

/// Per-request time context for a location.
///
/// The offset and sun times describe the forecast location, never the
/// caller; everything downstream does local-time math through this.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LocationContext {
    pub latitude: f64,
    pub longitude: f64,
    /// UTC offset of the location in seconds
    pub utc_offset_seconds: i32,
    /// Sunrise for the current local day, when the provider supplied it
    pub sunrise: Option<DateTime<Utc>>,
    /// Sunset for the current local day, when the provider supplied it
    pub sunset: Option<DateTime<Utc>>,
}

impl LocationContext {
    /// The location's fixed UTC offset; out-of-range offsets fall back to UTC
    #[must_use]
    pub fn offset(&self) -> FixedOffset {
        FixedOffset::east_opt(self.utc_offset_seconds).unwrap_or_else(|| Utc.fix())
    }
}
