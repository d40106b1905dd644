//! Golfability scoring engine.
//!
//! This module turns a single weather reading into a 0-100 golfability score
//! with a traffic-light verdict and a short human reason. Scoring is pure and
//! deterministic: hard stops are checked in a fixed order, then banded
//! penalties for precipitation, wind, and temperature are subtracted from a
//! perfect 100.

use crate::golf::season::Season;
use crate::models::WeatherReading;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Condition substrings that end the round before it starts
const THUNDER_PATTERNS: &[&str] = &["thunder"];
/// Condition substrings treated as wintry precipitation
const SNOW_PATTERNS: &[&str] = &["snow", "sleet", "blizzard"];

/// Feels-like floor below which no round is playable, any season
const HARD_COLD_FLOOR_C: f32 = -2.0;

/// Three-tier verdict derived from a golfability score
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Verdict {
    /// Score >= 80, go play
    Green,
    /// Score >= 55, playable with compromises
    Yellow,
    /// Everything else, including all hard stops
    Red,
}

/// Golfability rating for a single weather reading
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GolfScore {
    /// Final score, 0-100
    pub score: u8,
    /// Traffic-light verdict
    pub verdict: Verdict,
    /// Short human reason for the verdict
    pub reason: String,
    /// Season the thresholds were evaluated under
    pub season: Season,
}

impl GolfScore {
    /// Score a weather reading for golfability under the given season.
    #[must_use]
    pub fn evaluate(reading: &WeatherReading, season: Season) -> Self {
        if let Some(hard_stop) = check_hard_stops(reading, season) {
            return hard_stop;
        }

        let mut score = 100.0;
        score -= precipitation_probability_penalty(reading.precipitation_probability);
        score -= precipitation_amount_penalty(reading.precipitation_mm);
        score -= wind_penalty(reading.wind_kmh, reading.gust_kmh);
        score -= temperature_penalty(reading.feels_like, season);

        let score = score.clamp(0.0, 100.0).round() as u8;
        let verdict = verdict_for_score(score);

        Self {
            score,
            verdict,
            reason: verdict_reason(verdict).to_string(),
            season,
        }
    }

    /// Build a rating from an already-averaged score, e.g. a day mean.
    #[must_use]
    pub fn from_mean(score: u8, season: Season) -> Self {
        let verdict = verdict_for_score(score);
        Self {
            score,
            verdict,
            reason: verdict_reason(verdict).to_string(),
            season,
        }
    }

    /// Whether the rating is worth recommending at all
    #[must_use]
    pub fn is_playable(&self) -> bool {
        self.verdict != Verdict::Red
    }
}

/// Check the ordered hard-stop rules. The first match wins and skips all
/// remaining scoring.
fn check_hard_stops(reading: &WeatherReading, season: Season) -> Option<GolfScore> {
    let stop = |score: u8, reason: &str| {
        Some(GolfScore {
            score,
            verdict: Verdict::Red,
            reason: reason.to_string(),
            season,
        })
    };

    if reading.has_alert {
        return stop(0, "Weather alert in effect");
    }
    if matches_any(&reading.conditions, THUNDER_PATTERNS) {
        return stop(0, "Thunderstorms — hard no");
    }
    if reading.feels_like <= HARD_COLD_FLOOR_C {
        return stop(10, "Too cold to be playable");
    }
    if matches_any(&reading.conditions, SNOW_PATTERNS) {
        return stop(15, "Snowing / winter conditions");
    }
    if season == Season::Winter && reading.feels_like < 5.0 {
        return stop(25, "Winter conditions — not golf weather");
    }

    None
}

/// Case-insensitive substring match against a pattern table
fn matches_any(conditions: &str, patterns: &[&str]) -> bool {
    let lowered = conditions.to_lowercase();
    patterns.iter().any(|p| lowered.contains(p))
}

/// Penalty for the chance of rain, highest band only
fn precipitation_probability_penalty(probability: f32) -> f32 {
    match probability {
        p if p >= 0.8 => 40.0,
        p if p >= 0.6 => 30.0,
        p if p >= 0.4 => 18.0,
        p if p >= 0.2 => 8.0,
        _ => 0.0,
    }
}

/// Penalty for measured precipitation amount, additive on top of probability
fn precipitation_amount_penalty(amount_mm: f32) -> f32 {
    match amount_mm {
        mm if mm >= 5.0 => 12.0,
        mm if mm >= 1.0 => 6.0,
        _ => 0.0,
    }
}

/// Penalty for wind. Gusts count at 80% of their speed so a gusty day with
/// calm sustained wind still hurts the score.
fn wind_penalty(wind_kmh: f32, gust_kmh: f32) -> f32 {
    let effective = wind_kmh.max(gust_kmh * 0.8);
    match effective {
        w if w >= 50.0 => 28.0,
        w if w >= 40.0 => 22.0,
        w if w >= 30.0 => 14.0,
        w if w >= 20.0 => 8.0,
        w if w >= 15.0 => 3.0,
        _ => 0.0,
    }
}

/// Penalty for feels-like temperature. Cold bands are exclusive; summer is
/// forgiven a little at the low end. Heat kicks in above 32 degrees.
fn temperature_penalty(feels_like: f32, season: Season) -> f32 {
    let cold = if feels_like < 0.0 {
        if season == Season::Summer { 35.0 } else { 40.0 }
    } else if feels_like < 5.0 {
        if season == Season::Summer { 25.0 } else { 30.0 }
    } else if feels_like < 10.0 {
        10.0
    } else {
        0.0
    };

    let heat = if feels_like > 32.0 { 18.0 } else { 0.0 };

    cold + heat
}

/// Map a final score to its verdict
#[must_use]
pub fn verdict_for_score(score: u8) -> Verdict {
    match score {
        s if s >= 80 => Verdict::Green,
        s if s >= 55 => Verdict::Yellow,
        _ => Verdict::Red,
    }
}

/// Fixed reason phrase for a verdict when no hard stop fired
fn verdict_reason(verdict: Verdict) -> &'static str {
    match verdict {
        Verdict::Green => "Great day for golf",
        Verdict::Yellow => "Playable, with compromises",
        Verdict::Red => "Not a day for golf",
    }
}

impl Verdict {
    #[must_use]
    pub fn emoji(&self) -> &'static str {
        match self {
            Verdict::Green => "🟢",
            Verdict::Yellow => "🟡",
            Verdict::Red => "🔴",
        }
    }
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Verdict::Green => write!(f, "Green"),
            Verdict::Yellow => write!(f, "Yellow"),
            Verdict::Red => write!(f, "Red"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use rstest::rstest;

    fn create_test_reading() -> WeatherReading {
        WeatherReading {
            timestamp: Utc::now(),
            temperature: 18.0,
            feels_like: 17.0,
            wind_kmh: 10.0,
            gust_kmh: 15.0,
            precipitation_mm: 0.0,
            precipitation_probability: 0.1,
            conditions: "Clear".to_string(),
            has_alert: false,
        }
    }

    #[test]
    fn perfect_summer_day_scores_full_marks() {
        let reading = create_test_reading();
        let golf = GolfScore::evaluate(&reading, Season::Summer);

        assert_eq!(golf.score, 100);
        assert_eq!(golf.verdict, Verdict::Green);
        assert!(golf.is_playable());
    }

    #[test]
    fn alert_wins_over_thunderstorm() {
        let mut reading = create_test_reading();
        reading.has_alert = true;
        reading.conditions = "Thunderstorm".to_string();

        let golf = GolfScore::evaluate(&reading, Season::Summer);

        assert_eq!(golf.score, 0);
        assert_eq!(golf.verdict, Verdict::Red);
        assert_eq!(golf.reason, "Weather alert in effect");
    }

    #[test]
    fn thunderstorm_is_a_hard_no() {
        let mut reading = create_test_reading();
        reading.conditions = "Thunderstorm".to_string();

        let golf = GolfScore::evaluate(&reading, Season::Summer);

        assert_eq!(golf.score, 0);
        assert_eq!(golf.verdict, Verdict::Red);
    }

    #[test]
    fn deep_cold_overrides_clear_skies() {
        let mut reading = create_test_reading();
        reading.feels_like = -5.0;
        reading.conditions = "Clear".to_string();

        let golf = GolfScore::evaluate(&reading, Season::Summer);

        assert_eq!(golf.score, 10);
        assert_eq!(golf.verdict, Verdict::Red);
        assert_eq!(golf.reason, "Too cold to be playable");
    }

    #[test]
    fn snow_beats_mild_temperature() {
        let mut reading = create_test_reading();
        reading.conditions = "Snow".to_string();
        reading.feels_like = 1.0;

        let golf = GolfScore::evaluate(&reading, Season::Shoulder);

        assert_eq!(golf.score, 15);
        assert_eq!(golf.verdict, Verdict::Red);
        assert!(golf.reason.contains("Snow"));
    }

    #[test]
    fn cold_winter_morning_is_not_golf_weather() {
        let mut reading = create_test_reading();
        reading.feels_like = 4.0;

        let golf = GolfScore::evaluate(&reading, Season::Winter);

        assert_eq!(golf.score, 25);
        assert_eq!(golf.verdict, Verdict::Red);
        assert!(golf.reason.contains("Winter"));
    }

    #[test]
    fn same_reading_in_shoulder_season_stays_playable() {
        let mut reading = create_test_reading();
        reading.feels_like = 4.0;

        let golf = GolfScore::evaluate(&reading, Season::Shoulder);

        // Cold band penalty only, no winter hard stop
        assert_eq!(golf.score, 70);
        assert_eq!(golf.verdict, Verdict::Yellow);
    }

    #[rstest]
    #[case(0.1, 0.0)]
    #[case(0.2, 8.0)]
    #[case(0.4, 18.0)]
    #[case(0.6, 30.0)]
    #[case(0.8, 40.0)]
    #[case(0.95, 40.0)]
    fn probability_penalty_bands(#[case] probability: f32, #[case] expected: f32) {
        assert_eq!(precipitation_probability_penalty(probability), expected);
    }

    #[rstest]
    #[case(0.0, 0.0)]
    #[case(0.9, 0.0)]
    #[case(1.0, 6.0)]
    #[case(4.9, 6.0)]
    #[case(5.0, 12.0)]
    #[case(22.0, 12.0)]
    fn amount_penalty_bands(#[case] amount_mm: f32, #[case] expected: f32) {
        assert_eq!(precipitation_amount_penalty(amount_mm), expected);
    }

    #[rstest]
    #[case(10.0, 10.0, 0.0)]
    #[case(15.0, 15.0, 3.0)]
    #[case(20.0, 20.0, 8.0)]
    #[case(30.0, 30.0, 14.0)]
    #[case(40.0, 40.0, 22.0)]
    #[case(50.0, 55.0, 28.0)]
    fn wind_penalty_bands(#[case] wind: f32, #[case] gust: f32, #[case] expected: f32) {
        assert_eq!(wind_penalty(wind, gust), expected);
    }

    #[test]
    fn gusts_drive_effective_wind() {
        // 70 km/h gusts count as 56 km/h effective even with calm wind
        assert_eq!(wind_penalty(10.0, 70.0), 28.0);
    }

    #[test]
    fn summer_cold_bands_are_gentler() {
        assert_eq!(temperature_penalty(-1.0, Season::Summer), 35.0);
        assert_eq!(temperature_penalty(-1.0, Season::Shoulder), 40.0);
        assert_eq!(temperature_penalty(3.0, Season::Summer), 25.0);
        assert_eq!(temperature_penalty(3.0, Season::Winter), 30.0);
        assert_eq!(temperature_penalty(8.0, Season::Summer), 10.0);
        assert_eq!(temperature_penalty(35.0, Season::Summer), 18.0);
    }

    #[test]
    fn colder_never_scores_higher() {
        let season = Season::Shoulder;
        let mut previous = u8::MAX;
        // Sample both sides of every cold threshold, descending
        for feels_like in [12.0, 9.9, 5.0, 4.9, 0.0, -0.1, -1.9] {
            let mut reading = create_test_reading();
            reading.feels_like = feels_like;
            let golf = GolfScore::evaluate(&reading, season);
            assert!(
                golf.score <= previous,
                "score rose to {} at feels-like {}",
                golf.score,
                feels_like
            );
            previous = golf.score;
        }
    }

    #[test]
    fn windier_never_scores_higher() {
        let mut previous = u8::MAX;
        for wind in [10.0, 15.0, 20.0, 30.0, 40.0, 50.0, 65.0] {
            let mut reading = create_test_reading();
            reading.wind_kmh = wind;
            reading.gust_kmh = wind;
            let golf = GolfScore::evaluate(&reading, Season::Summer);
            assert!(
                golf.score <= previous,
                "score rose to {} at wind {}",
                golf.score,
                wind
            );
            previous = golf.score;
        }
    }

    #[test]
    fn penalties_accumulate_and_clamp() {
        let mut reading = create_test_reading();
        reading.precipitation_probability = 0.9;
        reading.precipitation_mm = 6.0;
        reading.wind_kmh = 55.0;
        reading.gust_kmh = 60.0;
        reading.feels_like = 7.0;

        let golf = GolfScore::evaluate(&reading, Season::Shoulder);

        // 100 - 40 - 12 - 28 - 10 = 10
        assert_eq!(golf.score, 10);
        assert_eq!(golf.verdict, Verdict::Red);

        reading.feels_like = 9.0;
        reading.precipitation_mm = 30.0;
        reading.precipitation_probability = 1.0;
        let floored = GolfScore::evaluate(&reading, Season::Shoulder);
        assert!(floored.score <= 10);
    }

    #[test]
    fn drizzle_forecast_lands_in_yellow() {
        let mut reading = create_test_reading();
        reading.precipitation_probability = 0.5;
        reading.precipitation_mm = 1.2;

        let golf = GolfScore::evaluate(&reading, Season::Summer);

        // 100 - 18 - 6 = 76
        assert_eq!(golf.score, 76);
        assert_eq!(golf.verdict, Verdict::Yellow);
        assert_eq!(golf.reason, "Playable, with compromises");
    }
}
