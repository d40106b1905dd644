//! Data models for golfcast
//!
//! This module contains the core domain models organized by concern:
//! - Location: Geographic coordinates and per-request time context
//! - Reading: Normalized weather readings and local-time helpers
//! - Provider shapes: OpenWeatherMap and Open-Meteo wire structures

pub mod location;
pub mod openmeteo;
pub mod openweathermap;
pub mod reading;

// Re-export all public types for convenient access
pub use location::{Location, LocationContext};
pub use openmeteo::{MeteoHistoryResponse, MeteoHourly, PrecipitationHistory};
pub use openweathermap::{
    OwmCurrentResponse, OwmForecastItem, OwmForecastResponse, OwmGeocodeResult,
};
pub use reading::WeatherReading;
