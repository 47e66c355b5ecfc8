//! Merged-team summary

use super::metrics::{AnalysisOptions, HistoryMetrics};
use crate::history::CanonicalHistory;
use crate::roster::{League, Race, Team, TeamMember};
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::collections::BTreeMap;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MemberRaces {
    pub name: String,
    pub primary_race: Option<Race>,
    pub protoss: u32,
    pub terran: u32,
    pub zerg: u32,
    pub random: u32,
    pub total_games: u32,
}

impl MemberRaces {
    fn from_member(member: &TeamMember) -> Self {
        Self {
            name: member.character.name.clone(),
            primary_race: member.primary_race(),
            protoss: member.protoss_games_played,
            terran: member.terran_games_played,
            zerg: member.zerg_games_played,
            random: member.random_games_played,
            total_games: member.total_games_played(),
        }
    }
}

/// Read-only summary of one merged team
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TeamAnalysis {
    pub name: String,
    pub members: Vec<MemberRaces>,
    /// Race with the most games summed over every member
    pub most_played_race: Option<Race>,
    pub rating: i64,
    pub league: Option<League>,
    pub wins: u32,
    pub losses: u32,
    pub ties: u32,
    pub joined: Option<DateTime<Utc>>,
    pub region: String,
    pub division_id: Option<i64>,
    pub legacy_id: String,
    pub legacy_uid: String,
    pub season: i32,
    #[serde(flatten)]
    pub metrics: HistoryMetrics,
}

impl TeamAnalysis {
    pub fn build(
        team: &Team,
        history: Option<&CanonicalHistory>,
        now: DateTime<Utc>,
        options: &AnalysisOptions,
    ) -> Self {
        let names: Vec<&str> = team.members.iter().map(|m| m.character.name.as_str()).collect();

        let mut race_totals: BTreeMap<Race, u32> = BTreeMap::new();
        for member in &team.members {
            for (&race, &games) in &member.race_games {
                *race_totals.entry(race).or_insert(0) += games;
            }
        }
        let most_played_race = race_totals
            .iter()
            .fold(None, |best: Option<(Race, u32)>, (&race, &games)| match best {
                Some((_, most)) if games <= most => best,
                _ => Some((race, games)),
            })
            .map(|(race, _)| race);

        Self {
            name: team_name(&names),
            members: team.members.iter().map(MemberRaces::from_member).collect(),
            most_played_race,
            rating: team.rating,
            league: team.league(),
            wins: team.wins,
            losses: team.losses,
            ties: team.ties,
            joined: team.joined,
            region: team.region.clone(),
            division_id: team.division_id,
            legacy_id: team.legacy_id.clone(),
            legacy_uid: team.legacy_uid.clone(),
            season: team.season,
            metrics: HistoryMetrics::derive(history, now, options),
        }
    }
}

/// `A`, `A and B`, `A, B, and C`
pub fn team_name(names: &[&str]) -> String {
    match names {
        [] => String::new(),
        [one] => one.to_string(),
        [a, b] => format!("{} and {}", a, b),
        [rest @ .., last] => format!("{}, and {}", rest.join(", "), last),
    }
}

impl std::fmt::Display for TeamAnalysis {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let league = self.league.map_or("UNKNOWN", |l| l.as_str());
        writeln!(f, "{}   {}", self.name, league)?;
        writeln!(
            f,
            "MMR {} {}   {}",
            self.rating,
            self.metrics.trend.symbol(),
            self.metrics.sparkline
        )?;
        for member in &self.members {
            let race = member.primary_race.map_or("unknown", |r| r.as_str());
            writeln!(f, "  {:<14} {:<8} {:>4}g", member.name, race, member.total_games)?;
        }
        if let Some(flag) = self.metrics.smurf_flag {
            writeln!(f, "⚠ {}", flag)?;
        }
        if let (Some(first), Some(last)) = (self.metrics.first_played, self.metrics.last_played) {
            writeln!(
                f,
                "Playing for {} to {}",
                first.format("%Y-%m-%d"),
                last.format("%Y-%m-%d")
            )?;
        }
        writeln!(f, "{}", self.metrics.performance_line())
    }
}
