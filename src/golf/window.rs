//! Daylight filtering and tee-time window selection.
//!
//! A tee window is a 3-hour slot picked from a day's scored forecast blocks.
//! Candidates must start within conventional course hours (06:00-15:00 local)
//! and, for today, early enough to finish before golf daylight ends. The best
//! candidate is simply the highest-scoring block, earliest first on ties.

use crate::golf::scoring::GolfScore;
use crate::models::WeatherReading;
use chrono::{DateTime, Duration, FixedOffset, Utc};
use serde::{Deserialize, Serialize};

/// Earliest local hour a round may start
const FIRST_TEE_HOUR: u32 = 6;
/// Latest local hour a round may start
const LAST_TEE_HOUR: u32 = 15;
/// Length of a round
const ROUND_HOURS: i64 = 3;

/// A weather reading with its golf rating and local-time bucketing fields
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoredBlock {
    /// The underlying forecast reading
    #[serde(flatten)]
    pub reading: WeatherReading,
    /// Golfability rating for this block
    pub golf: GolfScore,
    /// Calendar date in location-local time, "YYYY-MM-DD"
    pub day_key: String,
    /// Local wall-clock label, "HH:MM"
    pub time_label: String,
    /// Whether the block falls inside today's golf daylight
    pub in_daylight: bool,
}

/// The usable part of the day: one hour after sunrise to one hour before
/// sunset. Only today has authoritative sun times from the forecast provider.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GolfDaylight {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

impl GolfDaylight {
    /// Build the golf daylight interval from provider sun times.
    #[must_use]
    pub fn from_sun_times(sunrise: DateTime<Utc>, sunset: DateTime<Utc>) -> Self {
        Self {
            start: sunrise + Duration::hours(1),
            end: sunset - Duration::hours(1),
        }
    }

    /// Whether a timestamp falls inside the interval.
    #[must_use]
    pub fn contains(&self, timestamp: DateTime<Utc>) -> bool {
        timestamp >= self.start && timestamp <= self.end
    }

    /// Latest start that still fits a full round before the interval ends.
    #[must_use]
    pub fn latest_tee_start(&self) -> DateTime<Utc> {
        self.end - Duration::hours(ROUND_HOURS)
    }
}

/// Recommended 3-hour slot for a round
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TeeWindow {
    /// Window start (the chosen block's timestamp)
    pub start: DateTime<Utc>,
    /// Window end, start plus three hours
    pub end: DateTime<Utc>,
    /// Score of the chosen block
    pub avg_score: u8,
}

impl TeeWindow {
    #[must_use]
    pub fn from_block(block: &ScoredBlock) -> Self {
        Self {
            start: block.reading.timestamp,
            end: block.reading.timestamp + Duration::hours(ROUND_HOURS),
            avg_score: block.golf.score,
        }
    }
}

/// Blocks to consider for a day: the daylight-flagged ones when any exist,
/// otherwise every block. Future days carry no daylight flags and near-polar
/// or gappy data may flag none, so the fallback keeps the day usable.
#[must_use]
pub fn eligible_pool(day_blocks: &[ScoredBlock]) -> Vec<&ScoredBlock> {
    let daylight: Vec<&ScoredBlock> = day_blocks.iter().filter(|b| b.in_daylight).collect();
    if daylight.is_empty() {
        day_blocks.iter().collect()
    } else {
        daylight
    }
}

/// Pick the best block for a tee window, or `None` when nothing qualifies.
///
/// `daylight` is supplied for today only and clamps the latest start so the
/// round finishes before dusk. Ties go to the earlier block.
#[must_use]
pub fn select_best_block<'a>(
    day_blocks: &'a [ScoredBlock],
    offset: FixedOffset,
    daylight: Option<&GolfDaylight>,
) -> Option<&'a ScoredBlock> {
    let latest_start = daylight.map(GolfDaylight::latest_tee_start);

    let mut best: Option<&ScoredBlock> = None;
    for block in eligible_pool(day_blocks) {
        let hour = block.reading.local_hour(offset);
        if !(FIRST_TEE_HOUR..=LAST_TEE_HOUR).contains(&hour) {
            continue;
        }
        if let Some(latest) = latest_start {
            if block.reading.timestamp > latest {
                continue;
            }
        }
        match best {
            Some(current) if block.golf.score <= current.golf.score => {}
            _ => best = Some(block),
        }
    }
    best
}

/// Pick the best tee window for a day's blocks.
#[must_use]
pub fn select_best_window(
    day_blocks: &[ScoredBlock],
    offset: FixedOffset,
    daylight: Option<&GolfDaylight>,
) -> Option<TeeWindow> {
    select_best_block(day_blocks, offset, daylight).map(TeeWindow::from_block)
}

/// Aggregate a day's blocks into a single rating: rounded mean score over
/// the eligible pool with the usual verdict thresholds. `None` for an empty
/// day.
#[must_use]
pub fn day_aggregate(day_blocks: &[ScoredBlock]) -> Option<GolfScore> {
    let pool = eligible_pool(day_blocks);
    if pool.is_empty() {
        return None;
    }

    let sum: u32 = pool.iter().map(|b| u32::from(b.golf.score)).sum();
    let mean = (sum as f32 / pool.len() as f32).round() as u8;
    let season = pool[0].golf.season;

    Some(GolfScore::from_mean(mean, season))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::golf::scoring::Verdict;
    use crate::golf::season::Season;
    use chrono::TimeZone;

    fn create_test_block(hour: u32, score: u8, in_daylight: bool) -> ScoredBlock {
        let timestamp = Utc.with_ymd_and_hms(2024, 6, 15, hour, 0, 0).unwrap();
        ScoredBlock {
            reading: WeatherReading {
                timestamp,
                temperature: 18.0,
                feels_like: 17.0,
                wind_kmh: 10.0,
                gust_kmh: 12.0,
                precipitation_mm: 0.0,
                precipitation_probability: 0.1,
                conditions: "Clear".to_string(),
                has_alert: false,
            },
            golf: GolfScore::from_mean(score, Season::Summer),
            day_key: "2024-06-15".to_string(),
            time_label: format!("{hour:02}:00"),
            in_daylight,
        }
    }

    fn utc_offset() -> FixedOffset {
        FixedOffset::east_opt(0).unwrap()
    }

    #[test]
    fn picks_the_highest_scoring_block() {
        let blocks = vec![
            create_test_block(8, 74, true),
            create_test_block(11, 92, true),
            create_test_block(14, 79, true),
        ];

        let window = select_best_window(&blocks, utc_offset(), None).unwrap();

        assert_eq!(window.start, blocks[1].reading.timestamp);
        assert_eq!(window.end, blocks[1].reading.timestamp + Duration::hours(3));
        assert_eq!(window.avg_score, 92);
    }

    #[test]
    fn ties_go_to_the_earlier_block() {
        let blocks = vec![
            create_test_block(9, 85, true),
            create_test_block(12, 85, true),
        ];

        let best = select_best_block(&blocks, utc_offset(), None).unwrap();

        assert_eq!(best.reading.timestamp, blocks[0].reading.timestamp);
    }

    #[test]
    fn respects_course_hours() {
        let blocks = vec![
            create_test_block(5, 99, true),
            create_test_block(16, 98, true),
            create_test_block(9, 60, true),
        ];

        let best = select_best_block(&blocks, utc_offset(), None).unwrap();

        // 05:00 is before first tee, 16:00 past last tee
        assert_eq!(best.golf.score, 60);
    }

    #[test]
    fn boundary_hours_are_inclusive() {
        let blocks = vec![
            create_test_block(6, 70, true),
            create_test_block(15, 71, true),
        ];

        let best = select_best_block(&blocks, utc_offset(), None).unwrap();

        assert_eq!(best.golf.score, 71);
    }

    #[test]
    fn today_clamps_to_fit_before_dusk() {
        let sunrise = Utc.with_ymd_and_hms(2024, 6, 15, 5, 0, 0).unwrap();
        let sunset = Utc.with_ymd_and_hms(2024, 6, 15, 17, 0, 0).unwrap();
        // Golf daylight 06:00-16:00, so the latest viable start is 13:00
        let daylight = GolfDaylight::from_sun_times(sunrise, sunset);

        let blocks = vec![
            create_test_block(14, 95, true),
            create_test_block(10, 80, true),
        ];

        let best = select_best_block(&blocks, utc_offset(), Some(&daylight)).unwrap();
        assert_eq!(best.golf.score, 80);

        // Without the clamp the 14:00 block wins
        let unclamped = select_best_block(&blocks, utc_offset(), None).unwrap();
        assert_eq!(unclamped.golf.score, 95);
    }

    #[test]
    fn daylight_blocks_are_preferred() {
        let blocks = vec![
            create_test_block(9, 65, true),
            create_test_block(12, 97, false),
        ];

        let best = select_best_block(&blocks, utc_offset(), None).unwrap();

        assert_eq!(best.golf.score, 65);
    }

    #[test]
    fn falls_back_to_all_blocks_without_daylight_flags() {
        let blocks = vec![
            create_test_block(9, 65, false),
            create_test_block(12, 97, false),
        ];

        let best = select_best_block(&blocks, utc_offset(), None).unwrap();

        assert_eq!(best.golf.score, 97);
    }

    #[test]
    fn no_candidates_means_no_window() {
        assert!(select_best_window(&[], utc_offset(), None).is_none());

        let after_hours = vec![create_test_block(17, 90, true)];
        assert!(select_best_window(&after_hours, utc_offset(), None).is_none());
    }

    #[test]
    fn local_hours_follow_the_location_offset() {
        // 04:00 UTC is 09:00 at UTC+5, well inside course hours
        let blocks = vec![create_test_block(4, 88, true)];
        let five_east = FixedOffset::east_opt(5 * 3600).unwrap();

        assert!(select_best_block(&blocks, five_east, None).is_some());
        assert!(select_best_block(&blocks, utc_offset(), None).is_none());
    }

    #[test]
    fn day_aggregate_averages_the_daylight_pool() {
        let blocks = vec![
            create_test_block(9, 80, true),
            create_test_block(12, 90, true),
            create_test_block(21, 10, false),
        ];

        let golf = day_aggregate(&blocks).unwrap();

        // The 21:00 block is outside daylight and ignored
        assert_eq!(golf.score, 85);
        assert_eq!(golf.verdict, Verdict::Green);
    }

    #[test]
    fn day_aggregate_rounds_to_nearest() {
        let blocks = vec![
            create_test_block(9, 80, true),
            create_test_block(12, 81, true),
        ];

        let golf = day_aggregate(&blocks).unwrap();

        assert_eq!(golf.score, 81);
    }

    #[test]
    fn day_aggregate_of_nothing_is_none() {
        assert!(day_aggregate(&[]).is_none());
    }
}
