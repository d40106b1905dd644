//! Location Resolution Module
//!
//! Turns raw location strings (decimal coordinates or place names) into
//! structured Location values, geocoding names through the weather service.

use crate::error::{GolfcastError, Result};
use crate::models::Location;
use crate::weather::WeatherService;
use tracing::debug;

/// Classified location input
#[derive(Debug, Clone, PartialEq)]
pub enum LocationInput {
    /// Decimal latitude/longitude pair
    Coordinates(f64, f64),
    /// Free-form place name to geocode
    Name(String),
}

impl LocationInput {
    /// Classify a raw string: a "lat,lon" decimal pair becomes coordinates,
    /// anything else is treated as a place name.
    pub fn parse(raw: &str) -> Result<Self> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(GolfcastError::validation("Location cannot be empty"));
        }

        if let Some((lat_raw, lon_raw)) = trimmed.split_once(',') {
            if let (Ok(lat), Ok(lon)) = (
                lat_raw.trim().parse::<f64>(),
                lon_raw.trim().parse::<f64>(),
            ) {
                return Self::coordinates(lat, lon);
            }
        }

        Ok(Self::Name(trimmed.to_string()))
    }

    /// Build a coordinate input, validating the ranges
    pub fn coordinates(lat: f64, lon: f64) -> Result<Self> {
        if !(-90.0..=90.0).contains(&lat) {
            return Err(GolfcastError::validation(
                "Latitude must be between -90 and 90",
            ));
        }
        if !(-180.0..=180.0).contains(&lon) {
            return Err(GolfcastError::validation(
                "Longitude must be between -180 and 180",
            ));
        }
        Ok(Self::Coordinates(lat, lon))
    }
}

/// Service for resolving location inputs
pub struct LocationResolver;

impl LocationResolver {
    /// Resolve a location input into a structured Location
    pub async fn resolve_location(
        weather: &WeatherService,
        input: LocationInput,
    ) -> Result<Location> {
        debug!("Resolving location input: {:?}", input);

        let location = match input {
            LocationInput::Coordinates(lat, lon) => {
                // Coordinates pass straight through, labeled by their values
                Location::from_coordinates(lat, lon)
            }
            LocationInput::Name(name) => Self::resolve_name(weather, &name).await?,
        };

        debug!(
            "Resolved location: {} at ({}, {})",
            location.name, location.latitude, location.longitude
        );

        Ok(location)
    }

    /// Resolve a location name to coordinates via geocoding
    async fn resolve_name(weather: &WeatherService, name: &str) -> Result<Location> {
        debug!("Geocoding location name: {}", name);

        let mut candidates = weather.geocode(name).await?;
        if candidates.is_empty() {
            return Err(GolfcastError::validation(format!(
                "Location not found: {name}"
            )));
        }

        // Use the first (best) result
        let best = candidates.remove(0);
        debug!(
            "Found location: {} ({:.4}, {:.4})",
            best.name, best.lat, best.lon
        );

        Ok(Location::from(best))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_coordinate_pair() {
        let input = LocationInput::parse("48.85, 2.35").unwrap();
        assert_eq!(input, LocationInput::Coordinates(48.85, 2.35));
    }

    #[test]
    fn test_parse_negative_coordinates() {
        let input = LocationInput::parse("-33.87,151.21").unwrap();
        assert_eq!(input, LocationInput::Coordinates(-33.87, 151.21));
    }

    #[test]
    fn test_parse_name_with_comma_stays_a_name() {
        let input = LocationInput::parse("Paris, France").unwrap();
        assert_eq!(input, LocationInput::Name("Paris, France".to_string()));
    }

    #[test]
    fn test_parse_plain_name() {
        let input = LocationInput::parse("St Andrews").unwrap();
        assert_eq!(input, LocationInput::Name("St Andrews".to_string()));
    }

    #[test]
    fn test_out_of_range_latitude_is_rejected() {
        let result = LocationInput::parse("91.0, 0.0");
        assert!(matches!(result, Err(GolfcastError::Validation { .. })));
    }

    #[test]
    fn test_empty_input_is_rejected() {
        assert!(LocationInput::parse("   ").is_err());
    }
}
