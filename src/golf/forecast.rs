//! Golf outlook assembly.
//!
//! This module turns already-fetched provider data into the full multi-day
//! outlook: every reading is scored, blocks are grouped into local calendar
//! days, each day gets a tee-window recommendation and a ground-condition
//! estimate, and today gets a headline rating. No I/O happens here; the
//! pipeline is synchronous and deterministic.

use crate::golf::ground::{GroundSignal, estimate_ground, forecast_wetness_proxy};
use crate::golf::scoring::GolfScore;
use crate::golf::season::infer_season;
use crate::golf::window::{
    GolfDaylight, ScoredBlock, TeeWindow, day_aggregate, select_best_block, select_best_window,
};
use crate::models::{LocationContext, PrecipitationHistory, WeatherReading};
use chrono::{DateTime, FixedOffset, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Calendar days covered by one outlook
pub const FORECAST_DAYS: usize = 5;

/// Complete golf outlook for one location
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GolfOutlook {
    /// Current-instant reading, when the provider supplied one
    pub current: Option<WeatherReading>,
    /// Today's headline rating, taken from the best tee-window block rather
    /// than the literal current-moment reading
    pub golf: Option<GolfScore>,
    pub best_time: BestTime,
    pub daylight: DaylightInfo,
    /// Every scored forecast block over the horizon, chronological
    pub forecast: Vec<ScoredBlock>,
    /// Per-day summaries, ascending date, first entry is local today
    pub daily: Vec<DailySummary>,
    /// Today's ground signal
    pub ground: Option<GroundSignal>,
    /// When this outlook was generated
    pub generated_at: DateTime<Utc>,
}

/// Today's recommended tee time
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BestTime {
    pub best_block: Option<ScoredBlock>,
    pub best_window: Option<TeeWindow>,
}

/// Sunrise and sunset for the current local day
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DaylightInfo {
    pub sunrise: Option<DateTime<Utc>>,
    pub sunset: Option<DateTime<Utc>>,
    /// Local wall-clock labels, absent when sun times are unknown
    pub labels: Option<DaylightLabels>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DaylightLabels {
    pub sunrise: String,
    pub sunset: String,
}

/// One calendar day of the outlook
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DailySummary {
    /// Local date key, "YYYY-MM-DD"
    pub date: String,
    /// Display label (e.g. "Today", "Tomorrow", "Monday, June 17")
    pub label: String,
    pub min_temp: f32,
    pub max_temp: f32,
    pub max_wind_kmh: f32,
    pub max_gust_kmh: f32,
    pub total_precipitation_mm: f32,
    /// Most frequent condition text among the day's blocks
    pub conditions: String,
    /// Day-level rating from the mean over the daylight pool
    pub golf: GolfScore,
    /// Recommended window, absent on days rated RED or without an eligible block
    pub best_window: Option<TeeWindow>,
    pub ground: GroundSignal,
    /// The day's scored blocks, chronological
    pub blocks: Vec<ScoredBlock>,
}

impl GolfOutlook {
    /// Assemble the outlook from scored inputs.
    ///
    /// `history` is today's measured trailing precipitation when the
    /// historical provider delivered; days without measured history fall
    /// back to the forecast-wetness proxy.
    #[must_use]
    pub fn build(
        current: Option<WeatherReading>,
        readings: &[WeatherReading],
        context: &LocationContext,
        history: Option<&PrecipitationHistory>,
    ) -> Self {
        let offset = context.offset();
        let daylight = match (context.sunrise, context.sunset) {
            (Some(sunrise), Some(sunset)) => Some(GolfDaylight::from_sun_times(sunrise, sunset)),
            _ => None,
        };

        let forecast: Vec<ScoredBlock> = readings
            .iter()
            .map(|reading| score_block(reading, context, daylight.as_ref()))
            .collect();

        let today_key = current
            .as_ref()
            .map(|reading| reading.day_key(offset))
            .or_else(|| forecast.first().map(|block| block.day_key.clone()));

        let groups = group_by_day(&forecast);
        debug!(
            "Scored {} blocks across {} days",
            forecast.len(),
            groups.len()
        );

        let today_date = today_key
            .as_deref()
            .and_then(|key| NaiveDate::parse_from_str(key, "%Y-%m-%d").ok());

        let mut daily = Vec::with_capacity(groups.len());
        for (day_key, blocks) in groups {
            let is_today = today_key.as_deref() == Some(day_key.as_str());
            let day_daylight = if is_today { daylight.as_ref() } else { None };

            let day_history = if is_today { history } else { None };
            let proxy = if day_history.is_some() {
                None
            } else {
                forecast_wetness_proxy(&forecast, &blocks, offset)
            };
            let ground = estimate_ground(day_history, proxy, &blocks);

            let Some(golf) = day_aggregate(&blocks) else {
                continue;
            };
            let best_window = if golf.is_playable() {
                select_best_window(&blocks, offset, day_daylight)
            } else {
                None
            };

            daily.push(summarize_day(
                day_key,
                today_date,
                blocks,
                golf,
                best_window,
                ground,
            ));
        }

        let today = today_key
            .as_deref()
            .and_then(|key| daily.iter().find(|day| day.date == key));
        let (golf, best_block, best_window, ground) = match today {
            Some(day) if day.golf.is_playable() => {
                let block = select_best_block(&day.blocks, offset, daylight.as_ref()).cloned();
                let golf = block.as_ref().map(|b| b.golf.clone());
                (golf, block, day.best_window.clone(), Some(day.ground.clone()))
            }
            Some(day) => (None, None, None, Some(day.ground.clone())),
            None => (None, None, None, None),
        };

        GolfOutlook {
            current,
            golf,
            best_time: BestTime {
                best_block,
                best_window,
            },
            daylight: daylight_info(context, offset),
            forecast,
            daily,
            ground,
            generated_at: Utc::now(),
        }
    }
}

/// Score one reading and tag it with its local-day bookkeeping
fn score_block(
    reading: &WeatherReading,
    context: &LocationContext,
    daylight: Option<&GolfDaylight>,
) -> ScoredBlock {
    let offset = context.offset();
    let season = infer_season(Some(context.latitude), Some(reading.local_month(offset)));
    let golf = GolfScore::evaluate(reading, season);

    ScoredBlock {
        golf,
        day_key: reading.day_key(offset),
        time_label: reading.time_label(offset),
        in_daylight: daylight.is_some_and(|d| d.contains(reading.timestamp)),
        reading: reading.clone(),
    }
}

/// Group blocks by local day key, chronological within each group, keeping
/// the first `FORECAST_DAYS` distinct keys in encounter order.
fn group_by_day(blocks: &[ScoredBlock]) -> Vec<(String, Vec<ScoredBlock>)> {
    let mut groups: Vec<(String, Vec<ScoredBlock>)> = Vec::new();
    for block in blocks {
        if let Some((_, day_blocks)) = groups.iter_mut().find(|(key, _)| key == &block.day_key) {
            day_blocks.push(block.clone());
        } else if groups.len() < FORECAST_DAYS {
            groups.push((block.day_key.clone(), vec![block.clone()]));
        }
    }
    groups
}

fn summarize_day(
    day_key: String,
    today_date: Option<NaiveDate>,
    blocks: Vec<ScoredBlock>,
    golf: GolfScore,
    best_window: Option<TeeWindow>,
    ground: GroundSignal,
) -> DailySummary {
    let min_temp = blocks
        .iter()
        .map(|b| b.reading.temperature)
        .fold(f32::INFINITY, f32::min);
    let max_temp = blocks
        .iter()
        .map(|b| b.reading.temperature)
        .fold(f32::NEG_INFINITY, f32::max);
    let max_wind_kmh = blocks
        .iter()
        .map(|b| b.reading.wind_kmh)
        .fold(0.0f32, f32::max);
    let max_gust_kmh = blocks
        .iter()
        .map(|b| b.reading.gust_kmh)
        .fold(0.0f32, f32::max);
    let total_precipitation_mm = blocks.iter().map(|b| b.reading.precipitation_mm).sum();

    DailySummary {
        label: day_label(&day_key, today_date),
        conditions: representative_conditions(&blocks),
        date: day_key,
        min_temp,
        max_temp,
        max_wind_kmh,
        max_gust_kmh,
        total_precipitation_mm,
        golf,
        best_window,
        ground,
        blocks,
    }
}

/// Format a day label (Today, Tomorrow, day of week)
fn day_label(day_key: &str, today: Option<NaiveDate>) -> String {
    let Ok(date) = NaiveDate::parse_from_str(day_key, "%Y-%m-%d") else {
        return day_key.to_string();
    };
    match today.map(|t| (date - t).num_days()) {
        Some(0) => "Today".to_string(),
        Some(1) => "Tomorrow".to_string(),
        _ => date.format("%A, %B %d").to_string(),
    }
}

/// Most frequent condition text, first occurrence winning ties
fn representative_conditions(blocks: &[ScoredBlock]) -> String {
    let mut counts: Vec<(&str, usize)> = Vec::new();
    for block in blocks {
        if let Some(entry) = counts
            .iter_mut()
            .find(|(text, _)| *text == block.reading.conditions)
        {
            entry.1 += 1;
        } else {
            counts.push((&block.reading.conditions, 1));
        }
    }

    let mut best: Option<(&str, usize)> = None;
    for (text, count) in counts {
        match best {
            Some((_, top)) if count <= top => {}
            _ => best = Some((text, count)),
        }
    }
    best.map_or_else(|| "Unknown".to_string(), |(text, _)| text.to_string())
}

fn daylight_info(context: &LocationContext, offset: FixedOffset) -> DaylightInfo {
    let labels = match (context.sunrise, context.sunset) {
        (Some(sunrise), Some(sunset)) => Some(DaylightLabels {
            sunrise: sunrise.with_timezone(&offset).format("%H:%M").to_string(),
            sunset: sunset.with_timezone(&offset).format("%H:%M").to_string(),
        }),
        _ => None,
    };

    DaylightInfo {
        sunrise: context.sunrise,
        sunset: context.sunset,
        labels,
    }
}
