//! Golfability module
//!
//! This module provides the core golf-weather logic:
//! - Per-reading golfability scoring with seasonal context
//! - Season inference from latitude and month
//! - Daylight handling and tee-window selection
//! - Ground-condition estimation (greens speed, fairway rollout)
//! - Multi-day outlook assembly

pub mod forecast;
pub mod ground;
pub mod scoring;
pub mod season;
pub mod window;

// Re-export commonly used types from submodules
pub use forecast::{
    BestTime, DailySummary, DaylightInfo, DaylightLabels, FORECAST_DAYS, GolfOutlook,
};
pub use ground::{
    Confidence, FairwayRollout, FairwayRolloutEstimate, GreensSpeed, GreensSpeedEstimate,
    GroundSignal, PastPrecipitation, estimate_ground, forecast_wetness_proxy,
};
pub use scoring::{GolfScore, Verdict};
pub use season::{Season, infer_season};
pub use window::{
    GolfDaylight, ScoredBlock, TeeWindow, day_aggregate, select_best_block, select_best_window,
};
