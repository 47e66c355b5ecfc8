//! Trailing-window win/loss counts derived from rating deltas

use super::merger::CanonicalHistory;
use chrono::{DateTime, Duration, Utc};
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum OutcomeWindow {
    Day1,
    Day3,
    Day7,
    Day30,
    Lifetime,
}

impl OutcomeWindow {
    pub fn as_str(&self) -> &'static str {
        match self {
            OutcomeWindow::Day1 => "1d",
            OutcomeWindow::Day3 => "3d",
            OutcomeWindow::Day7 => "7d",
            OutcomeWindow::Day30 => "30d",
            OutcomeWindow::Lifetime => "lifetime",
        }
    }

    /// Window length in days, `None` for lifetime
    pub fn days(&self) -> Option<i64> {
        match self {
            OutcomeWindow::Day1 => Some(1),
            OutcomeWindow::Day3 => Some(3),
            OutcomeWindow::Day7 => Some(7),
            OutcomeWindow::Day30 => Some(30),
            OutcomeWindow::Lifetime => None,
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "1d" => Some(OutcomeWindow::Day1),
            "3d" => Some(OutcomeWindow::Day3),
            "7d" => Some(OutcomeWindow::Day7),
            "30d" => Some(OutcomeWindow::Day30),
            "lifetime" => Some(OutcomeWindow::Lifetime),
            _ => None,
        }
    }

    /// Smallest to largest
    pub fn all() -> [OutcomeWindow; 5] {
        [
            OutcomeWindow::Day1,
            OutcomeWindow::Day3,
            OutcomeWindow::Day7,
            OutcomeWindow::Day30,
            OutcomeWindow::Lifetime,
        ]
    }

    fn index(&self) -> usize {
        match self {
            OutcomeWindow::Day1 => 0,
            OutcomeWindow::Day3 => 1,
            OutcomeWindow::Day7 => 2,
            OutcomeWindow::Day30 => 3,
            OutcomeWindow::Lifetime => 4,
        }
    }

    /// Earliest instant still inside the window
    pub fn cutoff(&self, now: DateTime<Utc>) -> Option<DateTime<Utc>> {
        self.days().map(|d| now - Duration::days(d))
    }

    pub fn contains(&self, timestamp: DateTime<Utc>, now: DateTime<Utc>) -> bool {
        match self.cutoff(now) {
            Some(cutoff) => timestamp >= cutoff,
            None => true,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct OutcomeCounts {
    pub wins: u32,
    pub losses: u32,
}

impl OutcomeCounts {
    pub fn new(wins: u32, losses: u32) -> Self {
        Self { wins, losses }
    }

    pub fn games(&self) -> u32 {
        self.wins + self.losses
    }

    /// Fraction of decided games won; `None` with no games
    pub fn winrate(&self) -> Option<f64> {
        match self.games() {
            0 => None,
            games => Some(self.wins as f64 / games as f64),
        }
    }

    fn record(&mut self, delta: i64) {
        if delta > 0 {
            self.wins += 1;
        } else if delta < 0 {
            self.losses += 1;
        }
    }
}

impl std::ops::Add for OutcomeCounts {
    type Output = OutcomeCounts;

    fn add(self, other: OutcomeCounts) -> OutcomeCounts {
        OutcomeCounts::new(self.wins + other.wins, self.losses + other.losses)
    }
}

/// Counts for every [`OutcomeWindow`]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct OutcomeWindowCounts {
    counts: [OutcomeCounts; 5],
}

impl OutcomeWindowCounts {
    pub fn get(&self, window: OutcomeWindow) -> OutcomeCounts {
        self.counts[window.index()]
    }

    pub fn set(&mut self, window: OutcomeWindow, counts: OutcomeCounts) {
        self.counts[window.index()] = counts;
    }

    pub fn iter(&self) -> impl Iterator<Item = (OutcomeWindow, OutcomeCounts)> + '_ {
        OutcomeWindow::all().into_iter().map(move |w| (w, self.get(w)))
    }

    pub fn lifetime(&self) -> OutcomeCounts {
        self.get(OutcomeWindow::Lifetime)
    }
}

impl std::ops::Add for OutcomeWindowCounts {
    type Output = OutcomeWindowCounts;

    fn add(self, other: OutcomeWindowCounts) -> OutcomeWindowCounts {
        let mut sum = OutcomeWindowCounts::default();
        for window in OutcomeWindow::all() {
            sum.set(window, self.get(window) + other.get(window));
        }
        sum
    }
}

impl Serialize for OutcomeWindowCounts {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        use serde::ser::SerializeMap;

        let mut map = serializer.serialize_map(Some(self.counts.len()))?;
        for (window, counts) in self.iter() {
            map.serialize_entry(window.as_str(), &counts)?;
        }
        map.end()
    }
}

/// Derives wins/losses from consecutive rating deltas.
///
/// A positive delta is a win, a negative delta a loss, zero is ignored. A
/// transition belongs to a window when its later sample is inside it.
pub struct WindowedOutcomeCounter;

impl WindowedOutcomeCounter {
    pub fn new() -> Self {
        Self
    }

    pub fn count(&self, history: &CanonicalHistory, now: DateTime<Utc>) -> OutcomeWindowCounts {
        let mut result = OutcomeWindowCounts::default();

        for (timestamp, delta) in history.transitions() {
            for window in OutcomeWindow::all() {
                if window.contains(timestamp, now) {
                    result.counts[window.index()].record(delta);
                }
            }
        }

        result
    }
}

impl Default for WindowedOutcomeCounter {
    fn default() -> Self {
        Self::new()
    }
}
