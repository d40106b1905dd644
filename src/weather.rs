//! Weather provider clients
//!
//! Async HTTP access to OpenWeatherMap (current conditions, 5-day/3-hour
//! forecast, geocoding) and Open-Meteo (trailing hourly precipitation).
//! No retries are attempted; callers decide whether a failed signal is
//! fatal or degradable.

use crate::config::GolfcastConfig;
use crate::error::{GolfcastError, Result};
use crate::models::{MeteoHistoryResponse, OwmCurrentResponse, OwmForecastResponse, OwmGeocodeResult};
use reqwest::StatusCode;
use std::time::{Duration, Instant};
use tracing::{debug, info, warn};

/// Candidates requested from the geocoding endpoint
const GEOCODE_LIMIT: usize = 5;

/// Client for the external weather providers
pub struct WeatherService {
    client: reqwest::Client,
    config: GolfcastConfig,
}

impl WeatherService {
    /// Create a new weather service
    pub fn new(config: GolfcastConfig) -> Result<Self> {
        let timeout = Duration::from_secs(config.weather.timeout_seconds.into());

        let client = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(concat!("golfcast/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| GolfcastError::general(format!("Failed to create HTTP client: {e}")))?;

        Ok(Self { client, config })
    }

    /// Fetch the 5-day/3-hour forecast.
    ///
    /// This is the required signal: any failure here is fatal for the
    /// request.
    pub async fn fetch_forecast(&self, lat: f64, lon: f64) -> Result<OwmForecastResponse> {
        let key = self.api_key()?;
        let url = format!(
            "{}/forecast?lat={}&lon={}&units={}",
            self.config.weather.base_url, lat, lon, self.config.weather.units
        );
        debug!("OpenWeatherMap forecast URL: {url}&appid=***");
        let url = format!("{url}&appid={key}");

        let start = Instant::now();
        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| GolfcastError::forecast(format!("OpenWeatherMap unreachable: {e}")))?;

        let status = response.status();
        if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
            return Err(GolfcastError::config(
                "OpenWeatherMap rejected the API key. Please check weather.api_key.",
            ));
        }
        if !status.is_success() {
            return Err(GolfcastError::forecast(format!(
                "OpenWeatherMap returned {status}"
            )));
        }

        let forecast: OwmForecastResponse = response.json().await.map_err(|e| {
            GolfcastError::forecast(format!("Invalid forecast data from OpenWeatherMap: {e}"))
        })?;

        let elapsed = start.elapsed();
        info!(
            "Retrieved {} forecast blocks in {:.3}s",
            forecast.list.len(),
            elapsed.as_secs_f64()
        );
        if elapsed.as_secs() > 5 {
            warn!("Slow forecast response: {:.3}s", elapsed.as_secs_f64());
        }

        Ok(forecast)
    }

    /// Fetch current conditions. Failures here are degradable; the outlook
    /// just loses its current-instant view.
    pub async fn fetch_current(&self, lat: f64, lon: f64) -> Result<OwmCurrentResponse> {
        let key = self.api_key()?;
        let url = format!(
            "{}/weather?lat={}&lon={}&units={}",
            self.config.weather.base_url, lat, lon, self.config.weather.units
        );
        debug!("OpenWeatherMap current URL: {url}&appid=***");
        let url = format!("{url}&appid={key}");

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| GolfcastError::api(format!("OpenWeatherMap unreachable: {e}")))?;

        if !response.status().is_success() {
            return Err(GolfcastError::api(format!(
                "OpenWeatherMap current weather returned {}",
                response.status()
            )));
        }

        response.json().await.map_err(|e| {
            GolfcastError::api(format!("Invalid current weather data from OpenWeatherMap: {e}"))
        })
    }

    /// Resolve a place name to coordinate candidates
    pub async fn geocode(&self, query: &str) -> Result<Vec<OwmGeocodeResult>> {
        let key = self.api_key()?;
        let url = format!(
            "{}/direct?q={}&limit={}",
            self.config.weather.geo_url,
            urlencoding::encode(query),
            GEOCODE_LIMIT
        );
        debug!("OpenWeatherMap geocoding URL: {url}&appid=***");
        let url = format!("{url}&appid={key}");

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| GolfcastError::api(format!("Geocoding unreachable: {e}")))?;

        if !response.status().is_success() {
            return Err(GolfcastError::api(format!(
                "Geocoding returned {}",
                response.status()
            )));
        }

        response
            .json()
            .await
            .map_err(|e| GolfcastError::api(format!("Invalid geocoding data: {e}")))
    }

    /// Fetch the trailing hourly precipitation series.
    ///
    /// Keyless and optional: callers degrade to the forecast proxy when
    /// this fails.
    pub async fn fetch_history(&self, lat: f64, lon: f64) -> Result<MeteoHistoryResponse> {
        // timezone is pinned to UTC so the naive hourly stamps parse as UTC
        let url = format!(
            "{}/forecast?latitude={}&longitude={}&hourly=precipitation&past_days={}&forecast_days=1&timezone=UTC",
            self.config.history.base_url, lat, lon, self.config.history.past_days
        );
        debug!("Open-Meteo history URL: {url}");

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| GolfcastError::api(format!("Open-Meteo unreachable: {e}")))?;

        if !response.status().is_success() {
            return Err(GolfcastError::api(format!(
                "Open-Meteo returned {}",
                response.status()
            )));
        }

        response
            .json()
            .await
            .map_err(|e| GolfcastError::api(format!("Invalid history data from Open-Meteo: {e}")))
    }

    /// The configured API key, or a configuration error when absent
    fn api_key(&self) -> Result<&str> {
        self.config
            .weather
            .api_key
            .as_deref()
            .filter(|key| !key.is_empty())
            .ok_or_else(|| {
                GolfcastError::config(
                    "OpenWeatherMap API key is not configured. \
                     Set GOLFCAST_WEATHER__API_KEY or weather.api_key in golfcast.toml.",
                )
            })
    }
}
