//! Compact glyph rendering of recent form

use super::merger::CanonicalHistory;
use chrono::{DateTime, Duration, Utc};
use serde::Serialize;

pub const SPARKLINE_GLYPHS: [char; 8] = ['▁', '▂', '▃', '▄', '▅', '▆', '▇', '█'];
pub const SPARKLINE_MIN_POINTS: usize = 3;
pub const SPARKLINE_FALLBACK_POINTS: usize = 20;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Sparkline {
    Glyphs(String),
    InsufficientData,
}

impl Sparkline {
    pub fn glyphs(&self) -> Option<&str> {
        match self {
            Sparkline::Glyphs(s) => Some(s),
            Sparkline::InsufficientData => None,
        }
    }
}

impl std::fmt::Display for Sparkline {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Sparkline::Glyphs(s) => f.write_str(s),
            Sparkline::InsufficientData => f.write_str("(insufficient data)"),
        }
    }
}

pub struct FormSparkline {
    min_points: usize,
    fallback_points: usize,
}

impl FormSparkline {
    pub fn new(min_points: usize, fallback_points: usize) -> Self {
        Self {
            min_points,
            fallback_points,
        }
    }

    pub fn with_defaults() -> Self {
        Self::new(SPARKLINE_MIN_POINTS, SPARKLINE_FALLBACK_POINTS)
    }

    /// Render ratings from the last `days` days.
    ///
    /// With too few points in the window, the last `fallback_points` ratings
    /// are used regardless of age. A window reaching past the representable
    /// range covers the whole history.
    pub fn render(&self, history: &CanonicalHistory, days: i64, now: DateTime<Utc>) -> Sparkline {
        let cutoff = Duration::try_days(days).and_then(|d| now.checked_sub_signed(d));

        let mut points: Vec<i64> = history
            .samples()
            .iter()
            .filter(|s| cutoff.map_or(true, |c| s.timestamp >= c))
            .map(|s| s.rating)
            .collect();

        if points.len() < self.min_points {
            let all: Vec<i64> = history.ratings().collect();
            points = all[all.len().saturating_sub(self.fallback_points)..].to_vec();
        }

        if points.len() < self.min_points {
            return Sparkline::InsufficientData;
        }

        Sparkline::Glyphs(render_glyphs(&points))
    }
}

fn render_glyphs(points: &[i64]) -> String {
    let (min, max) = points
        .iter()
        .fold((i64::MAX, i64::MIN), |(lo, hi), &p| (lo.min(p), hi.max(p)));
    let span = (max as i128 - min as i128).max(1) as f64;
    let top = (SPARKLINE_GLYPHS.len() - 1) as f64;

    points
        .iter()
        .map(|&p| {
            let level = ((p as i128 - min as i128) as f64 / span * top).floor() as usize;
            SPARKLINE_GLYPHS[level.min(SPARKLINE_GLYPHS.len() - 1)]
        })
        .collect()
}
