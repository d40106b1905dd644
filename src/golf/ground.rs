//! Ground-condition estimation.
//!
//! Greens speed and fairway rollout are inferred, not measured: recent
//! precipitation (trailing history for today, a forecast-derived proxy for
//! later days) is weighed against a heat-plus-wind drying index. The
//! estimates carry a confidence tag so consumers can tell a measured signal
//! from a proxy or a guess.

use crate::golf::window::{ScoredBlock, eligible_pool};
use crate::models::PrecipitationHistory;
use chrono::{Duration, FixedOffset};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Hours of hourly history that count as a full trailing-48h series
const FULL_COVERAGE_HOURS: usize = 48;

/// Greens pace classification
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum GreensSpeed {
    Slow,
    Medium,
    Quick,
}

/// Fairway rollout classification
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum FairwayRollout {
    Low,
    Medium,
    High,
}

/// How much to trust an estimate, by data provenance
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Confidence {
    /// Forecast proxy or no data at all
    Low,
    /// Measured history with partial coverage
    Medium,
    /// Measured history covering the full trailing window
    High,
}

/// Greens speed estimate with display strings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GreensSpeedEstimate {
    pub key: GreensSpeed,
    pub label: String,
    pub detail: String,
    pub confidence: Confidence,
}

/// Fairway rollout estimate with display strings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FairwayRolloutEstimate {
    pub key: FairwayRollout,
    pub label: String,
    pub detail: String,
    pub confidence: Confidence,
}

/// Measured trailing precipitation sums
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PastPrecipitation {
    pub past_24h_mm: f32,
    pub past_48h_mm: f32,
}

/// Per-day ground conditions: the precipitation input that was actually
/// available plus the derived estimates
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GroundSignal {
    /// Measured trailing precipitation, when history was available
    pub past_precipitation: Option<PastPrecipitation>,
    /// Forecast-derived wetness substitute, when history was not
    pub forecast_wetness_proxy_mm: Option<f32>,
    pub greens_speed: GreensSpeedEstimate,
    pub fairway_rollout: FairwayRolloutEstimate,
}

/// Heat and wind averaged over the day's daylight blocks
#[derive(Debug, Clone, Copy, PartialEq)]
struct DryingIndex {
    avg_temp: f32,
    drying: f32,
}

/// Estimate ground conditions for one day.
///
/// Measured history wins when present; otherwise the forecast proxy is used
/// at low confidence; with neither, a medium default is returned.
#[must_use]
pub fn estimate_ground(
    history: Option<&PrecipitationHistory>,
    proxy_mm: Option<f32>,
    day_blocks: &[ScoredBlock],
) -> GroundSignal {
    let index = drying_index(day_blocks);

    if let Some(history) = history {
        let confidence = if history.covered_hours >= FULL_COVERAGE_HOURS {
            Confidence::High
        } else {
            Confidence::Medium
        };
        return GroundSignal {
            past_precipitation: Some(PastPrecipitation {
                past_24h_mm: history.past_24h_mm,
                past_48h_mm: history.past_48h_mm,
            }),
            forecast_wetness_proxy_mm: None,
            greens_speed: classify_greens(history.past_48h_mm, index, false, confidence),
            fairway_rollout: classify_rollout(history.past_48h_mm, index, confidence),
        };
    }

    if let Some(proxy) = proxy_mm {
        return GroundSignal {
            past_precipitation: None,
            forecast_wetness_proxy_mm: Some(proxy),
            greens_speed: classify_greens(proxy, index, true, Confidence::Low),
            fairway_rollout: classify_rollout(proxy, index, Confidence::Low),
        };
    }

    GroundSignal {
        past_precipitation: None,
        forecast_wetness_proxy_mm: None,
        greens_speed: GreensSpeedEstimate {
            key: GreensSpeed::Medium,
            label: GreensSpeed::Medium.label().to_string(),
            detail: "No recent precipitation data, assuming typical pace".to_string(),
            confidence: Confidence::Low,
        },
        fairway_rollout: FairwayRolloutEstimate {
            key: FairwayRollout::Medium,
            label: FairwayRollout::Medium.label().to_string(),
            detail: "No recent precipitation data, assuming normal run".to_string(),
            confidence: Confidence::Low,
        },
    }
}

/// Wetness substitute for days without measured history: total forecast
/// precipitation in the 48 hours before the day's midday block. `None` when
/// no forecast blocks fall in that window.
#[must_use]
pub fn forecast_wetness_proxy(
    all_blocks: &[ScoredBlock],
    day_blocks: &[ScoredBlock],
    offset: FixedOffset,
) -> Option<f32> {
    let anchor = midday_block(day_blocks, offset)?.reading.timestamp;
    let window_start = anchor - Duration::hours(48);

    let mut total = 0.0;
    let mut covered = false;
    for block in all_blocks {
        let ts = block.reading.timestamp;
        if ts >= window_start && ts < anchor {
            total += block.reading.precipitation_mm;
            covered = true;
        }
    }

    covered.then_some(total)
}

/// The day's block closest to local noon, earlier block winning ties
fn midday_block<'a>(day_blocks: &'a [ScoredBlock], offset: FixedOffset) -> Option<&'a ScoredBlock> {
    day_blocks
        .iter()
        .min_by_key(|b| (i64::from(b.reading.local_hour(offset)) - 12).abs())
}

/// Average temperature and wind over the daylight pool, combined into the
/// drying index: heat contributes up to 1.5, wind up to 1.0.
fn drying_index(day_blocks: &[ScoredBlock]) -> DryingIndex {
    let pool = eligible_pool(day_blocks);
    if pool.is_empty() {
        return DryingIndex {
            avg_temp: 0.0,
            drying: 0.0,
        };
    }

    let count = pool.len() as f32;
    let avg_temp = pool.iter().map(|b| b.reading.temperature).sum::<f32>() / count;
    let avg_wind = pool.iter().map(|b| b.reading.wind_kmh).sum::<f32>() / count;

    let heat = ((avg_temp - 8.0) / 12.0).clamp(0.0, 1.5);
    let wind = ((avg_wind - 5.0) / 20.0).clamp(0.0, 1.0);

    DryingIndex {
        avg_temp,
        drying: heat + wind,
    }
}

fn classify_greens(
    wet_48h_mm: f32,
    index: DryingIndex,
    is_proxy: bool,
    confidence: Confidence,
) -> GreensSpeedEstimate {
    let key = if wet_48h_mm >= 10.0 && index.drying < 1.0 {
        GreensSpeed::Slow
    } else if !is_proxy && wet_48h_mm >= 6.0 && index.drying < 0.8 {
        // Measured data earns a slightly more permissive wet rule
        GreensSpeed::Slow
    } else if wet_48h_mm <= 2.0 && index.avg_temp >= 14.0 && index.drying >= 1.0 {
        GreensSpeed::Quick
    } else {
        GreensSpeed::Medium
    };

    let detail = match key {
        GreensSpeed::Slow => "Recent rain is likely holding the greens back",
        GreensSpeed::Quick => "Dry, warm and breezy, expect pace on the greens",
        GreensSpeed::Medium => "Typical pace for the conditions",
    };

    GreensSpeedEstimate {
        key,
        label: key.label().to_string(),
        detail: detail.to_string(),
        confidence,
    }
}

fn classify_rollout(
    wet_48h_mm: f32,
    index: DryingIndex,
    confidence: Confidence,
) -> FairwayRolloutEstimate {
    let key = if wet_48h_mm >= 12.0 {
        FairwayRollout::Low
    } else if wet_48h_mm <= 2.0 && index.avg_temp >= 10.0 && index.drying >= 1.0 {
        FairwayRollout::High
    } else {
        FairwayRollout::Medium
    };

    let detail = match key {
        FairwayRollout::Low => "Soft fairways, expect plugged lies and little run",
        FairwayRollout::High => "Firm fairways, expect plenty of run",
        FairwayRollout::Medium => "Normal run on the fairways",
    };

    FairwayRolloutEstimate {
        key,
        label: key.label().to_string(),
        detail: detail.to_string(),
        confidence,
    }
}

impl GreensSpeed {
    #[must_use]
    pub fn label(&self) -> &'static str {
        match self {
            GreensSpeed::Slow => "Slow",
            GreensSpeed::Medium => "Medium",
            GreensSpeed::Quick => "Quick",
        }
    }
}

impl FairwayRollout {
    #[must_use]
    pub fn label(&self) -> &'static str {
        match self {
            FairwayRollout::Low => "Low",
            FairwayRollout::Medium => "Medium",
            FairwayRollout::High => "High",
        }
    }
}

impl fmt::Display for Confidence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Confidence::Low => write!(f, "Low"),
            Confidence::Medium => write!(f, "Medium"),
            Confidence::High => write!(f, "High"),
        }
    }
}
