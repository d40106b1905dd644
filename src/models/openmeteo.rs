//! Open-Meteo historical precipitation structures
//!
//! Hourly precipitation for the trailing two days, summed into recency
//! windows. Anything missing or malformed collapses to "history
//! unavailable" rather than an error.

use chrono::{DateTime, Duration, NaiveDateTime, Utc};
use serde::Deserialize;

/// Hourly history response (`/v1/forecast` with `past_days`)
#[derive(Debug, Deserialize)]
pub struct MeteoHistoryResponse {
    #[serde(default)]
    pub hourly: Option<MeteoHourly>,
}

#[derive(Debug, Deserialize)]
pub struct MeteoHourly {
    #[serde(default)]
    pub time: Vec<String>,
    #[serde(default)]
    pub precipitation: Option<Vec<Option<f32>>>,
}

/// Measured trailing precipitation derived from an hourly series
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PrecipitationHistory {
    pub past_24h_mm: f32,
    pub past_48h_mm: f32,
    /// Hourly samples that landed inside the trailing 48h window
    pub covered_hours: usize,
}

impl PrecipitationHistory {
    /// Sum an hourly series into trailing 24h/48h windows relative to `now`.
    ///
    /// Returns `None` when the series is missing or no sample falls in the
    /// trailing 48 hours.
    #[must_use]
    pub fn from_hourly(response: &MeteoHistoryResponse, now: DateTime<Utc>) -> Option<Self> {
        let hourly = response.hourly.as_ref()?;
        let precipitation = hourly.precipitation.as_ref()?;

        let cutoff_48h = now - Duration::hours(48);
        let cutoff_24h = now - Duration::hours(24);

        let mut past_24h_mm = 0.0;
        let mut past_48h_mm = 0.0;
        let mut covered_hours = 0;

        for (stamp, amount) in hourly.time.iter().zip(precipitation.iter()) {
            let Some(at) = parse_hour(stamp) else {
                continue;
            };
            if at < cutoff_48h || at >= now {
                continue;
            }
            covered_hours += 1;
            let amount = amount.unwrap_or(0.0);
            past_48h_mm += amount;
            if at >= cutoff_24h {
                past_24h_mm += amount;
            }
        }

        (covered_hours > 0).then_some(Self {
            past_24h_mm,
            past_48h_mm,
            covered_hours,
        })
    }
}

/// Open-Meteo returns naive ISO stamps; the request pins `timezone=UTC`, so
/// they parse straight to UTC instants
fn parse_hour(stamp: &str) -> Option<DateTime<Utc>> {
    NaiveDateTime::parse_from_str(stamp, "%Y-%m-%dT%H:%M")
        .ok()
        .map(|naive| naive.and_utc())
}
