//! Picking the right character among search results, and finding shared teams

use super::types::{Candidate, Team};
use chrono::{DateTime, Utc};
use std::collections::HashSet;

/// Choose the search result most likely to be the player in the lobby.
///
/// Candidates whose current rating lies in `[min_rating, max_rating]` are
/// preferred; if none does, every candidate is considered. Among those, the one
/// owning the most recently played team wins, defaulting to the first.
pub fn select_candidate(
    candidates: &[Candidate],
    min_rating: i64,
    max_rating: i64,
) -> Option<&Candidate> {
    let in_band: Vec<&Candidate> = candidates
        .iter()
        .filter(|c| {
            c.stats
                .current_stats
                .rating
                .map_or(false, |r| (min_rating..=max_rating).contains(&r))
        })
        .collect();

    let pool: Vec<&Candidate> = if in_band.is_empty() {
        if !candidates.is_empty() {
            log::warn!(
                "No candidate within rating range {}-{}, falling back to all {} candidates",
                min_rating,
                max_rating,
                candidates.len()
            );
        }
        candidates.iter().collect()
    } else {
        in_band
    };

    let mut best = *pool.first()?;
    let mut newest: Option<DateTime<Utc>> = None;

    for candidate in pool {
        log::debug!(
            "Evaluating {} candidate with rating {:?}",
            candidate.stats.name(),
            candidate.stats.current_stats.rating
        );

        let latest = candidate.teams.iter().filter_map(|t| t.last_played).max();
        if latest > newest {
            newest = latest;
            best = candidate;
        }
    }

    Some(best)
}

/// Every team (across all candidates) whose roster is exactly `battlenet_ids`.
///
/// A team listed by several members is returned once, first occurrence kept.
pub fn teams_with_roster(candidates: &[Candidate], battlenet_ids: &[i64]) -> Vec<Team> {
    let mut wanted = battlenet_ids.to_vec();
    wanted.sort_unstable();

    let mut seen = HashSet::new();
    candidates
        .iter()
        .flat_map(|c| &c.teams)
        .filter(|t| t.roster_ids() == wanted && seen.insert(t.id))
        .cloned()
        .collect()
}
