//! Weather reading model and local-time helpers

use chrono::{DateTime, Datelike, FixedOffset, Timelike, Utc};
use serde::{Deserialize, Serialize};

/// Probability assigned when the provider omits one but reports measurable
/// precipitation
const WET_FALLBACK_PROBABILITY: f32 = 0.9;
/// Probability assigned when the provider omits one and reports none
const DRY_FALLBACK_PROBABILITY: f32 = 0.1;

/// One weather observation or forecast block, normalized at ingestion.
///
/// Units are fixed here: Celsius, km/h, millimetres, probability in [0,1].
/// Missing upstream fields have already been defaulted to zero, so scoring
/// never re-guesses provider shapes.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct WeatherReading {
    /// Timestamp for this reading
    pub timestamp: DateTime<Utc>,
    /// Temperature in Celsius
    pub temperature: f32,
    /// Feels-like temperature in Celsius
    pub feels_like: f32,
    /// Sustained wind speed in km/h
    pub wind_kmh: f32,
    /// Gust speed in km/h
    pub gust_kmh: f32,
    /// Precipitation over the reading's interval in mm (rain plus snow)
    pub precipitation_mm: f32,
    /// Probability of precipitation in [0,1]
    pub precipitation_probability: f32,
    /// Free-form condition text from the provider (e.g. "Rain", "Clear")
    pub conditions: String,
    /// Whether a severe-weather alert covers this reading
    pub has_alert: bool,
}

impl WeatherReading {
    /// Convert a provider wind speed in m/s to km/h
    #[must_use]
    pub fn kmh_from_ms(meters_per_second: f32) -> f32 {
        meters_per_second * 3.6
    }

    /// Precipitation probability, substituting a measured-amount proxy when
    /// the provider omits it
    #[must_use]
    pub fn probability_or_default(probability: Option<f32>, precipitation_mm: f32) -> f32 {
        probability.unwrap_or(if precipitation_mm > 0.0 {
            WET_FALLBACK_PROBABILITY
        } else {
            DRY_FALLBACK_PROBABILITY
        })
    }

    /// The reading's wall-clock time at the location
    #[must_use]
    pub fn local_time(&self, offset: FixedOffset) -> DateTime<FixedOffset> {
        self.timestamp.with_timezone(&offset)
    }

    /// Local calendar date key, "YYYY-MM-DD"
    #[must_use]
    pub fn day_key(&self, offset: FixedOffset) -> String {
        self.local_time(offset).format("%Y-%m-%d").to_string()
    }

    /// Local time label, "HH:MM"
    #[must_use]
    pub fn time_label(&self, offset: FixedOffset) -> String {
        self.local_time(offset).format("%H:%M").to_string()
    }

    /// Local hour of day (0-23)
    #[must_use]
    pub fn local_hour(&self, offset: FixedOffset) -> u32 {
        self.local_time(offset).hour()
    }

    /// Local month (1-12)
    #[must_use]
    pub fn local_month(&self, offset: FixedOffset) -> u32 {
        self.local_time(offset).month()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn create_test_reading() -> WeatherReading {
        WeatherReading {
            timestamp: Utc.with_ymd_and_hms(2024, 6, 15, 22, 30, 0).unwrap(),
            temperature: 18.0,
            feels_like: 17.0,
            wind_kmh: 10.0,
            gust_kmh: 15.0,
            precipitation_mm: 0.0,
            precipitation_probability: 0.1,
            conditions: "Clear".to_string(),
            has_alert: false,
        }
    }

    #[test]
    fn test_kmh_conversion() {
        assert_eq!(WeatherReading::kmh_from_ms(10.0), 36.0);
        assert_eq!(WeatherReading::kmh_from_ms(0.0), 0.0);
    }

    #[test]
    fn test_probability_fallbacks() {
        assert_eq!(WeatherReading::probability_or_default(Some(0.45), 0.0), 0.45);
        assert_eq!(WeatherReading::probability_or_default(None, 2.5), 0.9);
        assert_eq!(WeatherReading::probability_or_default(None, 0.0), 0.1);
    }

    #[test]
    fn test_local_time_crosses_the_date_line() {
        let reading = create_test_reading();
        // 22:30 UTC is already the next morning at UTC+10
        let offset = FixedOffset::east_opt(10 * 3600).unwrap();

        assert_eq!(reading.day_key(offset), "2024-06-16");
        assert_eq!(reading.time_label(offset), "08:30");
        assert_eq!(reading.local_hour(offset), 8);
        assert_eq!(reading.local_month(offset), 6);
    }

    #[test]
    fn test_camel_case_serialization() {
        let reading = create_test_reading();
        let json = serde_json::to_value(&reading).unwrap();

        assert!(json.get("feelsLike").is_some());
        assert!(json.get("windKmh").is_some());
        assert!(json.get("precipitationMm").is_some());
        assert!(json.get("hasAlert").is_some());
        assert!(json.get("feels_like").is_none());
    }
}
