//! Single-player summary

use super::metrics::{AnalysisOptions, HistoryMetrics};
use super::teammates::{aggregate_teammates, ranked_teammates, TeammateRecord};
use crate::history::CanonicalHistory;
use crate::roster::{League, PlayerStats, Race, Team};
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::collections::HashMap;

/// Read-only summary of one player, built once per lookup
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlayerAnalysis {
    pub name: String,
    pub max_league: Option<League>,
    pub current_rating: Option<i64>,
    pub previous_rating: Option<i64>,
    pub total_games: u32,
    /// Race reported by the game lobby, when known
    pub current_race: Option<Race>,
    pub most_played_race: Option<Race>,
    #[serde(flatten)]
    pub metrics: HistoryMetrics,
    pub teammates: HashMap<String, TeammateRecord>,
}

impl PlayerAnalysis {
    pub fn build(
        stats: &PlayerStats,
        current_race: Option<Race>,
        history: Option<&CanonicalHistory>,
        appearances: &[Team],
        now: DateTime<Utc>,
        options: &AnalysisOptions,
    ) -> Self {
        let name = stats.name().to_string();
        let teammates = aggregate_teammates(&name, appearances);

        Self {
            max_league: stats.max_league(),
            current_rating: stats.current_rating(),
            previous_rating: stats.previous_stats.rating,
            total_games: stats.total_games_played,
            current_race,
            most_played_race: stats.members.primary_race(),
            metrics: HistoryMetrics::derive(history, now, options),
            teammates,
            name,
        }
    }

    pub fn most_played_race_label(&self) -> &'static str {
        self.most_played_race.map_or("unknown", |r| r.as_str())
    }

    /// Up to `limit` partners, most frequent first
    pub fn top_teammates(&self, limit: usize) -> Vec<(&str, TeammateRecord)> {
        ranked_teammates(&self.teammates).into_iter().take(limit).collect()
    }
}

impl std::fmt::Display for PlayerAnalysis {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let league = self.max_league.map_or("UNKNOWN", |l| l.as_str());
        let rating = self
            .current_rating
            .map_or_else(|| "?".to_string(), |r| r.to_string());

        writeln!(f, "{}   {}", self.name, league)?;
        writeln!(
            f,
            "MMR {} {}   {}",
            rating,
            self.metrics.trend.symbol(),
            self.metrics.sparkline
        )?;

        let current = self.current_race.map_or("Unknown", |r| r.as_str());
        let mut race_line = format!("Race {}", current);
        if let Some(main) = self.most_played_race {
            if self.current_race != Some(main) {
                race_line.push_str(&format!(" (→ {})", main));
            }
        }
        writeln!(f, "{}", race_line)?;

        if let Some(first) = self.metrics.first_played {
            writeln!(f, "First played {}", first.format("%Y-%m-%d"))?;
        }
        if let Some(flag) = self.metrics.smurf_flag {
            writeln!(f, "⚠ {}", flag)?;
        }
        writeln!(f, "{}", self.metrics.performance_line())?;

        for (name, record) in self.top_teammates(3) {
            let last = record
                .last_played
                .map_or_else(|| "unknown".to_string(), |t| t.format("%Y-%m-%d").to_string());
            writeln!(f, "  {:<12} {:>2}g  {}", name, record.count, last)?;
        }
        Ok(())
    }
}
