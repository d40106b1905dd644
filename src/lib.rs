//! Golfcast - golf weather scoring with best tee-time windows
//!
//! This library turns raw weather feeds into golfability ratings: a 0-100
//! score per forecast block, a recommended 3-hour tee window per day, and
//! course-condition estimates for greens and fairways.

pub mod api;
pub mod cli;
pub mod config;
pub mod courses;
pub mod error;
pub mod golf;
pub mod location_resolver;
pub mod models;
pub mod outlook;
pub mod weather;
pub mod web;

// Re-export core types for public API
pub use config::GolfcastConfig;
pub use courses::{Course, CourseSearch};
pub use error::{GolfcastError, Result};
pub use golf::{DailySummary, GolfOutlook, GolfScore, GroundSignal, ScoredBlock, TeeWindow, Verdict};
pub use location_resolver::{LocationInput, LocationResolver};
pub use models::{Location, LocationContext, PrecipitationHistory, WeatherReading};
pub use outlook::OutlookService;
pub use weather::WeatherService;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version_is_set() {
        assert!(!VERSION.is_empty());
    }
}
