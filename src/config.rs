//! Configuration management for golfcast
//!
//! Handles loading configuration from files and environment variables,
//! and provides validation for all configuration settings.

use crate::GolfcastError;
use anyhow::{Context, Result};
use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Root configuration structure for golfcast
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GolfcastConfig {
    /// Weather provider configuration (OpenWeatherMap)
    #[serde(default)]
    pub weather: WeatherConfig,
    /// Historical precipitation provider configuration (Open-Meteo)
    #[serde(default)]
    pub history: HistoryConfig,
    /// Nearby course search configuration (Overpass)
    #[serde(default)]
    pub courses: CoursesConfig,
    /// HTTP server configuration
    #[serde(default)]
    pub server: ServerConfig,
}

/// Weather provider settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeatherConfig {
    /// OpenWeatherMap API key; required before the first forecast call
    pub api_key: Option<String>,
    /// Base URL for the data endpoints
    #[serde(default = "default_weather_base_url")]
    pub base_url: String,
    /// Base URL for the geocoding endpoints
    #[serde(default = "default_weather_geo_url")]
    pub geo_url: String,
    /// Request timeout in seconds
    #[serde(default = "default_timeout_seconds")]
    pub timeout_seconds: u32,
    /// Unit system passed to the provider; scoring thresholds assume metric
    #[serde(default = "default_weather_units")]
    pub units: String,
}

/// Historical precipitation settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HistoryConfig {
    /// Base URL for the Open-Meteo forecast API
    #[serde(default = "default_history_base_url")]
    pub base_url: String,
    /// Trailing days of hourly history to request
    #[serde(default = "default_history_past_days")]
    pub past_days: u32,
}

/// Nearby course search settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CoursesConfig {
    /// Overpass interpreter endpoint
    #[serde(default = "default_courses_base_url")]
    pub base_url: String,
    /// Search radius in kilometers
    #[serde(default = "default_courses_radius")]
    pub radius_km: u32,
    /// Maximum number of courses to return
    #[serde(default = "default_courses_max_results")]
    pub max_results: usize,
}

/// HTTP server settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Bind address
    #[serde(default = "default_server_host")]
    pub host: String,
    /// Bind port
    #[serde(default = "default_server_port")]
    pub port: u16,
    /// Per-request timeout in seconds
    #[serde(default = "default_timeout_seconds")]
    pub request_timeout_seconds: u32,
}

// Default value functions
fn default_weather_base_url() -> String {
    "https://api.openweathermap.org/data/2.5".to_string()
}

fn default_weather_geo_url() -> String {
    "https://api.openweathermap.org/geo/1.0".to_string()
}

fn default_weather_units() -> String {
    "metric".to_string()
}

fn default_timeout_seconds() -> u32 {
    30
}

fn default_history_base_url() -> String {
    "https://api.open-meteo.com/v1".to_string()
}

fn default_history_past_days() -> u32 {
    2
}

fn default_courses_base_url() -> String {
    "https://overpass-api.de/api/interpreter".to_string()
}

fn default_courses_radius() -> u32 {
    25
}

fn default_courses_max_results() -> usize {
    10
}

fn default_server_host() -> String {
    "127.0.0.1".to_string()
}

fn default_server_port() -> u16 {
    8080
}

impl Default for WeatherConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: default_weather_base_url(),
            geo_url: default_weather_geo_url(),
            timeout_seconds: default_timeout_seconds(),
            units: default_weather_units(),
        }
    }
}

impl Default for HistoryConfig {
    fn default() -> Self {
        Self {
            base_url: default_history_base_url(),
            past_days: default_history_past_days(),
        }
    }
}

impl Default for CoursesConfig {
    fn default() -> Self {
        Self {
            base_url: default_courses_base_url(),
            radius_km: default_courses_radius(),
            max_results: default_courses_max_results(),
        }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_server_host(),
            port: default_server_port(),
            request_timeout_seconds: default_timeout_seconds(),
        }
    }
}

impl Default for GolfcastConfig {
    fn default() -> Self {
        Self {
            weather: WeatherConfig::default(),
            history: HistoryConfig::default(),
            courses: CoursesConfig::default(),
            server: ServerConfig::default(),
        }
    }
}

impl GolfcastConfig {
    /// Load configuration from file and environment variables
    pub fn load() -> Result<Self> {
        Self::load_from_path(None)
    }

    /// Load configuration from specified path
    pub fn load_from_path(config_path: Option<PathBuf>) -> Result<Self> {
        let mut builder = Config::builder();

        // Explicit path wins, then ./golfcast.toml, then the user config dir
        let config_file = config_path.unwrap_or_else(|| {
            let local = PathBuf::from("golfcast.toml");
            if local.exists() {
                local
            } else {
                Self::get_config_path().unwrap_or_else(|| PathBuf::from("golfcast.toml"))
            }
        });

        if config_file.exists() {
            builder = builder.add_source(
                File::from(config_file.clone())
                    .required(false)
                    .format(config::FileFormat::Toml),
            );
        }

        // Environment overrides, e.g. GOLFCAST_WEATHER__API_KEY
        builder = builder.add_source(
            Environment::with_prefix("GOLFCAST")
                .separator("__")
                .try_parsing(true),
        );

        let settings = builder
            .build()
            .with_context(|| "Failed to build configuration")?;

        let config: GolfcastConfig = settings
            .try_deserialize()
            .with_context(|| "Failed to deserialize configuration")?;

        config.validate()?;

        Ok(config)
    }

    /// Get the default configuration file path
    #[must_use]
    pub fn get_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("golfcast").join("golfcast.toml"))
    }

    /// Validate all configuration settings
    pub fn validate(&self) -> Result<()> {
        self.validate_api_keys()?;
        self.validate_numeric_ranges()?;
        self.validate_string_values()?;
        Ok(())
    }

    /// Validate API keys and credentials.
    ///
    /// Presence is checked lazily at the first forecast call; here we only
    /// reject keys that are clearly malformed.
    pub fn validate_api_keys(&self) -> Result<()> {
        if let Some(api_key) = &self.weather.api_key {
            if api_key.is_empty() {
                return Err(GolfcastError::config(
                    "Weather API key cannot be empty if provided. Either remove it or provide a valid key."
                ).into());
            }

            if api_key.len() < 8 {
                return Err(GolfcastError::config(
                    "Weather API key appears to be invalid (too short). Please check your API key."
                ).into());
            }

            if api_key.len() > 100 {
                return Err(GolfcastError::config(
                    "Weather API key appears to be invalid (too long). Please check your API key."
                ).into());
            }
        }

        Ok(())
    }

    /// Validate numeric configuration ranges
    fn validate_numeric_ranges(&self) -> Result<()> {
        if self.weather.timeout_seconds == 0 || self.weather.timeout_seconds > 300 {
            return Err(
                GolfcastError::config("Weather API timeout must be between 1 and 300 seconds")
                    .into(),
            );
        }

        if self.server.request_timeout_seconds == 0 || self.server.request_timeout_seconds > 300 {
            return Err(
                GolfcastError::config("Server request timeout must be between 1 and 300 seconds")
                    .into(),
            );
        }

        if self.history.past_days == 0 || self.history.past_days > 7 {
            return Err(
                GolfcastError::config("History past_days must be between 1 and 7").into(),
            );
        }

        if self.courses.radius_km == 0 || self.courses.radius_km > 100 {
            return Err(
                GolfcastError::config("Course search radius must be between 1 and 100 km").into(),
            );
        }

        if self.courses.max_results == 0 || self.courses.max_results > 50 {
            return Err(
                GolfcastError::config("Course max results must be between 1 and 50").into(),
            );
        }

        Ok(())
    }

    /// Validate string configuration values
    fn validate_string_values(&self) -> Result<()> {
        // Scoring thresholds are Celsius and km/h, so only metric is usable
        if self.weather.units != "metric" {
            return Err(GolfcastError::config(format!(
                "Unsupported units '{}'. Only 'metric' is supported.",
                self.weather.units
            ))
            .into());
        }

        for (name, url) in [
            ("Weather base URL", &self.weather.base_url),
            ("Weather geo URL", &self.weather.geo_url),
            ("History base URL", &self.history.base_url),
            ("Courses base URL", &self.courses.base_url),
        ] {
            if !url.starts_with("http://") && !url.starts_with("https://") {
                return Err(GolfcastError::config(format!(
                    "{name} must be a valid HTTP or HTTPS URL"
                ))
                .into());
            }
        }

        if self.server.host.is_empty() {
            return Err(GolfcastError::config("Server host cannot be empty").into());
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = GolfcastConfig::default();
        assert_eq!(
            config.weather.base_url,
            "https://api.openweathermap.org/data/2.5"
        );
        assert_eq!(config.weather.units, "metric");
        assert_eq!(config.history.base_url, "https://api.open-meteo.com/v1");
        assert_eq!(config.history.past_days, 2);
        assert_eq!(config.courses.radius_km, 25);
        assert_eq!(config.server.port, 8080);
        assert!(config.weather.api_key.is_none());
    }

    #[test]
    fn test_missing_api_key_passes_validation() {
        // Presence is enforced lazily at the first forecast call
        let config = GolfcastConfig::default();
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_short_api_key_fails_validation() {
        let mut config = GolfcastConfig::default();
        config.weather.api_key = Some("short".to_string());
        let result = config.validate_api_keys();
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("too short"));
    }

    #[test]
    fn test_non_metric_units_fail_validation() {
        let mut config = GolfcastConfig::default();
        config.weather.units = "imperial".to_string();
        let result = config.validate();
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("metric"));
    }

    #[test]
    fn test_timeout_range_validation() {
        let mut config = GolfcastConfig::default();
        config.weather.timeout_seconds = 500;
        let result = config.validate();
        assert!(result.is_err());
        assert!(
            result
                .unwrap_err()
                .to_string()
                .contains("between 1 and 300")
        );
    }

    #[test]
    fn test_bad_base_url_fails_validation() {
        let mut config = GolfcastConfig::default();
        config.courses.base_url = "overpass-api.de".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_config_path_generation() {
        let path = GolfcastConfig::get_config_path();
        assert!(path.is_some());
        let path = path.unwrap();
        assert!(path.to_string_lossy().contains("golfcast"));
        assert!(path.to_string_lossy().contains("golfcast.toml"));
    }
}
