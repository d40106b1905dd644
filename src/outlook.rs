//! Golf outlook orchestration
//!
//! Combines the upstream weather feeds into a single `GolfOutlook`. The
//! block forecast is required; current conditions and precipitation
//! history degrade gracefully when their feeds are unavailable.

use chrono::Utc;
use tracing::{debug, warn};

use crate::error::Result;
use crate::golf::GolfOutlook;
use crate::models::{Location, PrecipitationHistory};
use crate::weather::WeatherService;

/// Builds golf outlooks from the upstream weather feeds
pub struct OutlookService;

impl OutlookService {
    /// Fetch all weather inputs for a location and score them
    pub async fn generate(weather: &WeatherService, location: &Location) -> Result<GolfOutlook> {
        let (current, forecast, history) = tokio::join!(
            weather.fetch_current(location.latitude, location.longitude),
            weather.fetch_forecast(location.latitude, location.longitude),
            weather.fetch_history(location.latitude, location.longitude),
        );

        // The block forecast is the one feed the outlook cannot do without
        let forecast = forecast?;

        let current = match current {
            Ok(response) => Some(response),
            Err(e) => {
                warn!("Current conditions unavailable for {}: {e}", location.name);
                None
            }
        };

        let history = match history {
            Ok(response) => PrecipitationHistory::from_hourly(&response, Utc::now()),
            Err(e) => {
                warn!(
                    "Precipitation history unavailable for {}: {e}",
                    location.name
                );
                None
            }
        };

        // The current-conditions feed carries today's sunrise and sunset;
        // fall back to the forecast city block when it is missing
        let context = current
            .as_ref()
            .map(|response| response.context(location.latitude, location.longitude))
            .unwrap_or_else(|| forecast.context());

        let current_reading = current.as_ref().map(|response| response.to_reading());
        let readings = forecast.readings();

        debug!(
            "Scoring {} forecast blocks for {}",
            readings.len(),
            location.name
        );

        Ok(GolfOutlook::build(
            current_reading,
            &readings,
            &context,
            history.as_ref(),
        ))
    }
}
