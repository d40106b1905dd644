//! OpenWeatherMap API response structures
//!
//! Raw shapes for the current-weather, 5-day forecast and geocoding
//! endpoints, plus conversions into normalized readings. Optional upstream
//! fields are defaulted once here so nothing downstream re-guesses provider
//! field names.

use crate::models::location::{Location, LocationContext};
use crate::models::reading::WeatherReading;
use chrono::{DateTime, Utc};
use serde::Deserialize;

/// Current weather endpoint response (`/data/2.5/weather`)
#[derive(Debug, Deserialize)]
pub struct OwmCurrentResponse {
    pub dt: i64,
    pub main: OwmMain,
    #[serde(default)]
    pub weather: Vec<OwmWeather>,
    #[serde(default)]
    pub wind: OwmWind,
    #[serde(default)]
    pub rain: Option<OwmPrecipitation>,
    #[serde(default)]
    pub snow: Option<OwmPrecipitation>,
    /// UTC offset of the location in seconds
    #[serde(default)]
    pub timezone: i32,
    #[serde(default)]
    pub sys: OwmSys,
    #[serde(default)]
    pub name: String,
}

/// 5-day/3-hour forecast endpoint response (`/data/2.5/forecast`)
#[derive(Debug, Deserialize)]
pub struct OwmForecastResponse {
    #[serde(default)]
    pub list: Vec<OwmForecastItem>,
    pub city: OwmCity,
}

#[derive(Debug, Deserialize)]
pub struct OwmForecastItem {
    pub dt: i64,
    pub main: OwmMain,
    #[serde(default)]
    pub weather: Vec<OwmWeather>,
    #[serde(default)]
    pub wind: OwmWind,
    /// Probability of precipitation; absent on the current-weather endpoint
    #[serde(default)]
    pub pop: Option<f32>,
    #[serde(default)]
    pub rain: Option<OwmPrecipitation>,
    #[serde(default)]
    pub snow: Option<OwmPrecipitation>,
}

#[derive(Debug, Deserialize)]
pub struct OwmMain {
    pub temp: f32,
    pub feels_like: f32,
}

#[derive(Debug, Default, Deserialize)]
pub struct OwmWeather {
    #[serde(default)]
    pub main: String,
}

#[derive(Debug, Default, Deserialize)]
pub struct OwmWind {
    /// Wind speed in m/s
    #[serde(default)]
    pub speed: f32,
    /// Gust speed in m/s
    #[serde(default)]
    pub gust: Option<f32>,
}

/// Rain or snow volume; the current endpoint reports "1h", the forecast "3h"
#[derive(Debug, Default, Deserialize)]
pub struct OwmPrecipitation {
    #[serde(rename = "3h", default)]
    pub three_hour: f32,
    #[serde(rename = "1h", default)]
    pub one_hour: f32,
}

impl OwmPrecipitation {
    fn amount_mm(&self) -> f32 {
        self.three_hour + self.one_hour
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct OwmSys {
    #[serde(default)]
    pub sunrise: i64,
    #[serde(default)]
    pub sunset: i64,
}

#[derive(Debug, Deserialize)]
pub struct OwmCity {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub country: String,
    pub coord: OwmCoord,
    /// UTC offset of the location in seconds
    #[serde(default)]
    pub timezone: i32,
    #[serde(default)]
    pub sunrise: i64,
    #[serde(default)]
    pub sunset: i64,
}

#[derive(Debug, Deserialize)]
pub struct OwmCoord {
    pub lat: f64,
    pub lon: f64,
}

/// Geocoding endpoint result (`/geo/1.0/direct`)
#[derive(Debug, Deserialize)]
pub struct OwmGeocodeResult {
    pub name: String,
    pub lat: f64,
    pub lon: f64,
    #[serde(default)]
    pub country: Option<String>,
    #[serde(default)]
    pub state: Option<String>,
}

impl From<OwmGeocodeResult> for Location {
    fn from(result: OwmGeocodeResult) -> Self {
        let name = match &result.state {
            Some(state) => format!("{}, {}", result.name, state),
            None => result.name.clone(),
        };
        Self {
            latitude: result.lat,
            longitude: result.lon,
            name,
            country: result.country,
        }
    }
}

fn datetime_from_unix(seconds: i64) -> DateTime<Utc> {
    DateTime::from_timestamp(seconds, 0).unwrap_or_else(Utc::now)
}

/// Sun times arrive as unix seconds; zero means the provider omitted them
fn sun_time(seconds: i64) -> Option<DateTime<Utc>> {
    (seconds > 0).then(|| datetime_from_unix(seconds))
}

fn conditions_text(weather: &[OwmWeather]) -> String {
    weather
        .first()
        .map_or_else(|| "Unknown".to_string(), |w| w.main.clone())
}

impl OwmCurrentResponse {
    /// Normalize into a reading.
    ///
    /// These endpoints carry no alert feed, so `has_alert` is always false
    /// at ingestion.
    #[must_use]
    pub fn to_reading(&self) -> WeatherReading {
        let precipitation_mm = self.rain.as_ref().map_or(0.0, OwmPrecipitation::amount_mm)
            + self.snow.as_ref().map_or(0.0, OwmPrecipitation::amount_mm);

        WeatherReading {
            timestamp: datetime_from_unix(self.dt),
            temperature: self.main.temp,
            feels_like: self.main.feels_like,
            wind_kmh: WeatherReading::kmh_from_ms(self.wind.speed),
            gust_kmh: self.wind.gust.map_or(0.0, WeatherReading::kmh_from_ms),
            precipitation_mm,
            precipitation_probability: WeatherReading::probability_or_default(
                None,
                precipitation_mm,
            ),
            conditions: conditions_text(&self.weather),
            has_alert: false,
        }
    }

    /// Time context from the current-weather payload
    #[must_use]
    pub fn context(&self, latitude: f64, longitude: f64) -> LocationContext {
        LocationContext {
            latitude,
            longitude,
            utc_offset_seconds: self.timezone,
            sunrise: sun_time(self.sys.sunrise),
            sunset: sun_time(self.sys.sunset),
        }
    }
}

impl OwmForecastItem {
    #[must_use]
    pub fn to_reading(&self) -> WeatherReading {
        let precipitation_mm = self.rain.as_ref().map_or(0.0, OwmPrecipitation::amount_mm)
            + self.snow.as_ref().map_or(0.0, OwmPrecipitation::amount_mm);

        WeatherReading {
            timestamp: datetime_from_unix(self.dt),
            temperature: self.main.temp,
            feels_like: self.main.feels_like,
            wind_kmh: WeatherReading::kmh_from_ms(self.wind.speed),
            gust_kmh: self.wind.gust.map_or(0.0, WeatherReading::kmh_from_ms),
            precipitation_mm,
            precipitation_probability: WeatherReading::probability_or_default(
                self.pop,
                precipitation_mm,
            ),
            conditions: conditions_text(&self.weather),
            has_alert: false,
        }
    }
}

impl OwmForecastResponse {
    /// All forecast blocks as normalized readings, provider order preserved
    #[must_use]
    pub fn readings(&self) -> Vec<WeatherReading> {
        self.list.iter().map(OwmForecastItem::to_reading).collect()
    }

    /// Time context from the forecast payload's city record
    #[must_use]
    pub fn context(&self) -> LocationContext {
        LocationContext {
            latitude: self.city.coord.lat,
            longitude: self.city.coord.lon,
            utc_offset_seconds: self.city.timezone,
            sunrise: sun_time(self.city.sunrise),
            sunset: sun_time(self.city.sunset),
        }
    }
}
