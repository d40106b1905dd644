//! Season inference for golfability scoring.
//!
//! Maps latitude and calendar month to a coarse season bucket so the scorer
//! can apply stricter cold thresholds in winter and gentler ones in summer.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Coarse season bucket used to adjust scoring thresholds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Season {
    /// Meteorological winter for the hemisphere
    Winter,
    /// Spring and autumn, and the default when the month is unknown
    Shoulder,
    /// Meteorological summer for the hemisphere
    Summer,
}

/// Infer the season from latitude and calendar month (1-12).
///
/// An absent month yields `Shoulder`. An absent latitude assumes the
/// northern hemisphere, as does any latitude >= 0. Southern latitudes get
/// the winter and summer triples swapped.
#[must_use]
pub fn infer_season(latitude: Option<f64>, month: Option<u32>) -> Season {
    let Some(month) = month else {
        return Season::Shoulder;
    };

    let northern = latitude.map_or(true, |lat| lat >= 0.0);

    match (northern, month) {
        (true, 12 | 1 | 2) => Season::Winter,
        (true, 6..=8) => Season::Summer,
        (false, 12 | 1 | 2) => Season::Summer,
        (false, 6..=8) => Season::Winter,
        _ => Season::Shoulder,
    }
}

impl fmt::Display for Season {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Season::Winter => write!(f, "Winter"),
            Season::Shoulder => write!(f, "Shoulder"),
            Season::Summer => write!(f, "Summer"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(Some(45.0), Some(1), Season::Winter)]
    #[case(Some(45.0), Some(7), Season::Summer)]
    #[case(Some(45.0), Some(4), Season::Shoulder)]
    #[case(Some(-45.0), Some(1), Season::Summer)]
    #[case(Some(-45.0), Some(7), Season::Winter)]
    #[case(Some(-45.0), Some(10), Season::Shoulder)]
    #[case(None, Some(7), Season::Summer)]
    #[case(Some(0.0), Some(4), Season::Shoulder)]
    fn infers_by_hemisphere_and_month(
        #[case] latitude: Option<f64>,
        #[case] month: Option<u32>,
        #[case] expected: Season,
    ) {
        assert_eq!(infer_season(latitude, month), expected);
    }

    #[test]
    fn missing_month_defaults_to_shoulder() {
        assert_eq!(infer_season(Some(45.0), None), Season::Shoulder);
        assert_eq!(infer_season(None, None), Season::Shoulder);
    }

    #[test]
    fn december_wraps_into_winter() {
        assert_eq!(infer_season(Some(52.0), Some(12)), Season::Winter);
        assert_eq!(infer_season(Some(-33.0), Some(12)), Season::Summer);
    }
}
