//! Merging of roster records that describe one real identity

use super::types::{Race, Team, TeamMember};
use chrono::{DateTime, Utc};
use std::collections::{BTreeMap, HashMap};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MergeError {
    /// Empty input
    NoRecords,
    /// Records were merged but none carried a joined date
    MissingJoinedDate,
}

impl std::fmt::Display for MergeError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MergeError::NoRecords => write!(f, "No records provided for merge"),
            MergeError::MissingJoinedDate => write!(f, "No merged record has a joined date"),
        }
    }
}

impl std::error::Error for MergeError {}

/// Combines per-queue/per-season team records into one.
///
/// - representative record: latest activity instant (see [`Team::activity_instant`]);
///   records without any date never win, and the first record is kept on ties
///   or when no record has a date
/// - wins, losses and ties are summed
/// - joined is the earliest joined date of any record
/// - members are grouped by battlenet id and their game counts summed
/// - every other field is copied from the representative
pub struct IdentityMerger;

impl IdentityMerger {
    pub fn new() -> Self {
        Self
    }

    pub fn merge_teams(&self, teams: &[Team]) -> Result<Team, MergeError> {
        let representative = select_representative(teams).ok_or(MergeError::NoRecords)?;

        let joined = teams.iter().filter_map(|t| t.joined).min();

        let mut groups: Vec<Vec<&TeamMember>> = Vec::new();
        let mut index_by_id: HashMap<i64, usize> = HashMap::new();
        for member in teams.iter().flat_map(|t| &t.members) {
            let idx = *index_by_id
                .entry(member.character.battlenet_id)
                .or_insert_with(|| {
                    groups.push(Vec::new());
                    groups.len() - 1
                });
            groups[idx].push(member);
        }

        let members = groups
            .iter()
            .map(|group| self.merge_members(group))
            .collect::<Result<Vec<_>, _>>()?;

        log::debug!(
            "Merged {} team records into {} ({} members)",
            teams.len(),
            representative.legacy_uid,
            members.len()
        );

        Ok(Team {
            wins: teams.iter().map(|t| t.wins).sum(),
            losses: teams.iter().map(|t| t.losses).sum(),
            ties: teams.iter().map(|t| t.ties).sum(),
            joined,
            members,
            ..representative.clone()
        })
    }

    /// Same as [`merge_teams`](Self::merge_teams) but fails when the merged
    /// record has no joined date
    pub fn merge_teams_with_joined(&self, teams: &[Team]) -> Result<Team, MergeError> {
        let merged = self.merge_teams(teams)?;
        require_joined(&merged)?;
        Ok(merged)
    }

    /// Sum game counts of one character's member entries.
    ///
    /// Profile fields (character, account, clan) come from the first entry.
    pub fn merge_members(&self, members: &[&TeamMember]) -> Result<TeamMember, MergeError> {
        let first = members.first().ok_or(MergeError::NoRecords)?;

        let mut race_games: BTreeMap<Race, u32> = BTreeMap::new();
        for member in members {
            for (&race, &games) in &member.race_games {
                *race_games.entry(race).or_insert(0) += games;
            }
        }

        Ok(TeamMember {
            protoss_games_played: members.iter().map(|m| m.protoss_games_played).sum(),
            terran_games_played: members.iter().map(|m| m.terran_games_played).sum(),
            zerg_games_played: members.iter().map(|m| m.zerg_games_played).sum(),
            random_games_played: members.iter().map(|m| m.random_games_played).sum(),
            character: first.character.clone(),
            account: first.account.clone(),
            clan: first.clan.clone(),
            race_games,
        })
    }
}

impl Default for IdentityMerger {
    fn default() -> Self {
        Self::new()
    }
}

pub fn require_joined(team: &Team) -> Result<DateTime<Utc>, MergeError> {
    team.joined.ok_or(MergeError::MissingJoinedDate)
}

fn select_representative(teams: &[Team]) -> Option<&Team> {
    let mut best = teams.first()?;
    let mut best_instant = best.activity_instant();

    for team in &teams[1..] {
        let instant = team.activity_instant();
        // None < Some(_), so an undated record never replaces a dated one
        if instant > best_instant {
            best = team;
            best_instant = instant;
        }
    }

    Some(best)
}
