//! Winrate-based smurf heuristic

use crate::history::{OutcomeCounts, OutcomeWindow, OutcomeWindowCounts};
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SmurfFlag {
    LikelySmurf,
    PossibleSmurf,
    StrongLifetimeWinrate,
}

impl SmurfFlag {
    pub fn label(&self) -> &'static str {
        match self {
            SmurfFlag::LikelySmurf => "Likely Smurf",
            SmurfFlag::PossibleSmurf => "Possible Smurf",
            SmurfFlag::StrongLifetimeWinrate => "Suspiciously strong lifetime winrate",
        }
    }
}

impl std::fmt::Display for SmurfFlag {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SmurfFlag::LikelySmurf => write!(f, "{} (3d winrate ≥ 80%)", self.label()),
            SmurfFlag::PossibleSmurf => write!(f, "{} (7d winrate ≥ 75%)", self.label()),
            SmurfFlag::StrongLifetimeWinrate => f.write_str(self.label()),
        }
    }
}

/// Minimum decided games and winrate for one rule to fire
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SmurfRule {
    pub window: OutcomeWindow,
    pub min_games: u32,
    pub min_winrate: f64,
}

impl SmurfRule {
    pub fn matches(&self, counts: OutcomeCounts) -> bool {
        counts.games() >= self.min_games
            && counts.winrate().map_or(false, |rate| rate >= self.min_winrate)
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SmurfThresholds {
    pub likely: SmurfRule,
    pub possible: SmurfRule,
    pub lifetime: SmurfRule,
}

impl Default for SmurfThresholds {
    fn default() -> Self {
        Self {
            likely: SmurfRule {
                window: OutcomeWindow::Day3,
                min_games: 5,
                min_winrate: 0.80,
            },
            possible: SmurfRule {
                window: OutcomeWindow::Day7,
                min_games: 8,
                min_winrate: 0.75,
            },
            lifetime: SmurfRule {
                window: OutcomeWindow::Lifetime,
                min_games: 30,
                min_winrate: 0.70,
            },
        }
    }
}

pub struct SmurfHeuristic {
    thresholds: SmurfThresholds,
}

impl SmurfHeuristic {
    pub fn new(thresholds: SmurfThresholds) -> Self {
        Self { thresholds }
    }

    pub fn with_defaults() -> Self {
        Self::new(SmurfThresholds::default())
    }

    /// First matching rule in priority order: 3-day, 7-day, lifetime
    pub fn evaluate(&self, counts: &OutcomeWindowCounts) -> Option<SmurfFlag> {
        let t = &self.thresholds;
        let rules = [
            (t.likely, SmurfFlag::LikelySmurf),
            (t.possible, SmurfFlag::PossibleSmurf),
            (t.lifetime, SmurfFlag::StrongLifetimeWinrate),
        ];

        rules
            .into_iter()
            .find(|(rule, _)| rule.matches(counts.get(rule.window)))
            .map(|(_, flag)| flag)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PlayerFlag {
    pub player: String,
    pub flag: SmurfFlag,
}

/// Escalated flag for a two-player team
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TeamSmurfFlag {
    Both(PlayerFlag, PlayerFlag),
    Single(PlayerFlag),
}

impl TeamSmurfFlag {
    pub fn from_pair(first: (&str, Option<SmurfFlag>), second: (&str, Option<SmurfFlag>)) -> Option<Self> {
        let flag_of = |(player, flag): (&str, Option<SmurfFlag>)| {
            flag.map(|flag| PlayerFlag {
                player: player.to_string(),
                flag,
            })
        };

        match (flag_of(first), flag_of(second)) {
            (Some(a), Some(b)) => Some(TeamSmurfFlag::Both(a, b)),
            (Some(one), None) | (None, Some(one)) => Some(TeamSmurfFlag::Single(one)),
            (None, None) => None,
        }
    }
}

impl std::fmt::Display for TeamSmurfFlag {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TeamSmurfFlag::Both(a, b) => write!(
                f,
                "BOTH players exhibit smurf indicators\n  - {}: {}\n  - {}: {}",
                a.player, a.flag, b.player, b.flag
            ),
            TeamSmurfFlag::Single(one) => write!(f, "{}: {}", one.player, one.flag),
        }
    }
}
