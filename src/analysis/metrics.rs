//! History-derived metrics shared by player and team analyses

use super::smurf::{SmurfFlag, SmurfHeuristic, SmurfThresholds};
use crate::history::{
    CanonicalHistory, FormSparkline, OutcomeCounts, OutcomeWindow, OutcomeWindowCounts, Sparkline,
    Trend, TrendEstimator, TrendThresholds, WindowedOutcomeCounter,
};
use chrono::{DateTime, Utc};
use serde::Serialize;

pub const DEFAULT_SPARKLINE_DAYS: i64 = 7;

/// Tunables for one analysis
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AnalysisOptions {
    pub trend: TrendThresholds,
    pub smurf: SmurfThresholds,
    pub sparkline_days: i64,
}

impl Default for AnalysisOptions {
    fn default() -> Self {
        Self {
            trend: TrendThresholds::default(),
            smurf: SmurfThresholds::default(),
            sparkline_days: DEFAULT_SPARKLINE_DAYS,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HistoryMetrics {
    pub trend: Trend,
    pub sparkline: Sparkline,
    pub outcomes: OutcomeWindowCounts,
    pub smurf_flag: Option<SmurfFlag>,
    pub first_played: Option<DateTime<Utc>>,
    pub last_played: Option<DateTime<Utc>>,
    pub latest_rating: Option<i64>,
    pub samples: usize,
}

impl HistoryMetrics {
    /// Derive every metric from `history`; an absent history counts as empty
    pub fn derive(
        history: Option<&CanonicalHistory>,
        now: DateTime<Utc>,
        options: &AnalysisOptions,
    ) -> Self {
        let empty = CanonicalHistory::empty();
        let history = history.unwrap_or(&empty);

        let outcomes = WindowedOutcomeCounter::new().count(history, now);

        Self {
            trend: TrendEstimator::new(options.trend).estimate(history),
            sparkline: FormSparkline::with_defaults().render(history, options.sparkline_days, now),
            smurf_flag: SmurfHeuristic::new(options.smurf).evaluate(&outcomes),
            outcomes,
            first_played: history.first_played(),
            last_played: history.last_played(),
            latest_rating: history.current_rating(),
            samples: history.len(),
        }
    }

    pub fn outcome(&self, window: OutcomeWindow) -> OutcomeCounts {
        self.outcomes.get(window)
    }

    /// One-line `1d 2W/1L   3d ...` performance strip
    pub fn performance_line(&self) -> String {
        self.outcomes
            .iter()
            .map(|(window, c)| {
                let label = match window {
                    OutcomeWindow::Lifetime => "LFT",
                    other => other.as_str(),
                };
                format!("{} {}W/{}L", label, c.wins, c.losses)
            })
            .collect::<Vec<_>>()
            .join("   ")
    }
}
