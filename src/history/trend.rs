//! Rating trend from a least-squares slope over recent samples

use super::merger::CanonicalHistory;
use serde::Serialize;

pub const TREND_MIN_SAMPLES: usize = 5;
pub const TREND_MAX_SAMPLES: usize = 100;
pub const TREND_STRONG_SLOPE: f64 = 1.5;
pub const TREND_MILD_SLOPE: f64 = 0.4;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Trend {
    StrongRising,
    Rising,
    Flat,
    Falling,
    StrongFalling,
    Unknown,
}

impl Trend {
    pub fn as_str(&self) -> &'static str {
        match self {
            Trend::StrongRising => "strong rising",
            Trend::Rising => "rising",
            Trend::Flat => "flat",
            Trend::Falling => "falling",
            Trend::StrongFalling => "strong falling",
            Trend::Unknown => "unknown",
        }
    }

    pub fn symbol(&self) -> &'static str {
        match self {
            Trend::StrongRising => "▲▲",
            Trend::Rising => "▲",
            Trend::Flat => "→",
            Trend::Falling => "▼",
            Trend::StrongFalling => "▼▼",
            Trend::Unknown => "?",
        }
    }
}

impl std::fmt::Display for Trend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Slope cutoffs and sample bounds
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrendThresholds {
    pub min_samples: usize,
    pub max_samples: usize,
    pub strong_slope: f64,
    pub mild_slope: f64,
}

impl Default for TrendThresholds {
    fn default() -> Self {
        Self {
            min_samples: TREND_MIN_SAMPLES,
            max_samples: TREND_MAX_SAMPLES,
            strong_slope: TREND_STRONG_SLOPE,
            mild_slope: TREND_MILD_SLOPE,
        }
    }
}

pub struct TrendEstimator {
    thresholds: TrendThresholds,
}

impl TrendEstimator {
    pub fn new(thresholds: TrendThresholds) -> Self {
        Self { thresholds }
    }

    pub fn with_defaults() -> Self {
        Self::new(TrendThresholds::default())
    }

    /// Classify the last `max_samples` ratings.
    ///
    /// The independent variable is the sample index, so the slope is rating
    /// change per game rather than per unit of time.
    pub fn estimate(&self, history: &CanonicalHistory) -> Trend {
        let ratings: Vec<i64> = history.ratings().collect();
        let recent = &ratings[ratings.len().saturating_sub(self.thresholds.max_samples)..];

        if recent.len() < self.thresholds.min_samples {
            return Trend::Unknown;
        }

        match least_squares_slope(recent) {
            Some(slope) => self.classify(slope),
            None => Trend::Unknown,
        }
    }

    pub fn classify(&self, slope: f64) -> Trend {
        let t = &self.thresholds;
        if slope > t.strong_slope {
            Trend::StrongRising
        } else if slope > t.mild_slope {
            Trend::Rising
        } else if slope < -t.strong_slope {
            Trend::StrongFalling
        } else if slope < -t.mild_slope {
            Trend::Falling
        } else {
            Trend::Flat
        }
    }
}

/// OLS slope of `values` against 0..n; `None` when the denominator is zero
pub fn least_squares_slope(values: &[i64]) -> Option<f64> {
    let n = values.len();
    if n == 0 {
        return None;
    }

    let mean_x = (n - 1) as f64 / 2.0;
    let mean_y = values.iter().map(|&v| v as f64).sum::<f64>() / n as f64;

    let (num, den) = values
        .iter()
        .enumerate()
        .fold((0.0, 0.0), |(num, den), (i, &y)| {
            let dx = i as f64 - mean_x;
            (num + dx * (y as f64 - mean_y), den + dx * dx)
        });

    if den == 0.0 {
        return None;
    }
    Some(num / den)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::history::{RawSeries, SeriesMerger};

    fn create_test_history(ratings: &[i64]) -> CanonicalHistory {
        let timestamps = (0..ratings.len() as i64).map(|i| 1_000 + i * 60).collect();
        SeriesMerger::new()
            .merge(&[RawSeries::new(timestamps, ratings.to_vec())])
            .unwrap()
    }

    #[test]
    fn test_strong_rising() {
        let history = create_test_history(&[1000, 1002, 1004, 1006, 1008]);
        assert_eq!(TrendEstimator::with_defaults().estimate(&history), Trend::StrongRising);
    }

    #[test]
    fn test_flat() {
        let history = create_test_history(&[1000; 5]);
        assert_eq!(TrendEstimator::with_defaults().estimate(&history), Trend::Flat);
    }

    #[test]
    fn test_too_few_samples() {
        let history = create_test_history(&[1000, 1100, 1200, 1300]);
        assert_eq!(TrendEstimator::with_defaults().estimate(&history), Trend::Unknown);
        assert_eq!(
            TrendEstimator::with_defaults().estimate(&CanonicalHistory::empty()),
            Trend::Unknown
        );
    }

    #[test]
    fn test_falling_labels() {
        let strong = create_test_history(&[1008, 1006, 1004, 1002, 1000]);
        assert_eq!(TrendEstimator::with_defaults().estimate(&strong), Trend::StrongFalling);

        let mild = create_test_history(&[1004, 1003, 1002, 1001, 1000]);
        assert_eq!(TrendEstimator::with_defaults().estimate(&mild), Trend::Falling);

        let rising = create_test_history(&[1000, 1001, 1002, 1003, 1004]);
        assert_eq!(TrendEstimator::with_defaults().estimate(&rising), Trend::Rising);
    }

    #[test]
    fn test_only_last_samples_used() {
        // 100 flat samples after a steep climb
        let mut ratings: Vec<i64> = (0..50).map(|i| 1000 + i * 20).collect();
        ratings.extend(std::iter::repeat(2000).take(100));

        let history = create_test_history(&ratings);
        assert_eq!(TrendEstimator::with_defaults().estimate(&history), Trend::Flat);
    }

    #[test]
    fn test_threshold_boundaries() {
        let estimator = TrendEstimator::with_defaults();
        assert_eq!(estimator.classify(1.5), Trend::Rising);
        assert_eq!(estimator.classify(0.4), Trend::Flat);
        assert_eq!(estimator.classify(-0.4), Trend::Flat);
        assert_eq!(estimator.classify(-1.5), Trend::Falling);
    }

    #[test]
    fn test_custom_thresholds() {
        let estimator = TrendEstimator::new(TrendThresholds {
            min_samples: 2,
            ..TrendThresholds::default()
        });
        let history = create_test_history(&[1000, 1010]);
        assert_eq!(estimator.estimate(&history), Trend::StrongRising);
    }

    #[test]
    fn test_slope_value() {
        assert_eq!(least_squares_slope(&[1000, 1002, 1004, 1006, 1008]), Some(2.0));
        assert_eq!(least_squares_slope(&[5]), None);
        assert_eq!(least_squares_slope(&[]), None);
    }
}
