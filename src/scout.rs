//! Scout - lookups that tie providers to the analysis core
//!
//! ```text
//! name → RosterProvider (characters, character-teams) → select_candidate
//!      → PlayerLookup ── history() ──→ HistoryProvider → SeriesMerger (memoized)
//!                     └─ analyze(now) → PlayerAnalysis
//! names → PlayerLookup × N → teams_with_roster → IdentityMerger → TeamAnalysis
//! (a, b) → PlayerAnalysis × 2 → DuoAnalysis
//! ```
//!
//! A lookup object lives for one request. Its canonical history is fetched on
//! first use and reused for every later read within that lookup; nothing is
//! cached across lookups.

use crate::analysis::{AnalysisOptions, DuoAnalysis, PlayerAnalysis, TeamAnalysis};
use crate::config::ScoutConfig;
use crate::history::{CanonicalHistory, SeriesError, SeriesMerger};
use crate::provider::{HistoryProvider, ProviderError, PulseClient, RosterProvider};
use crate::roster::{select_candidate, teams_with_roster, Candidate, IdentityMerger, MergeError, Race, Team};
use chrono::{DateTime, Utc};
use std::collections::BTreeSet;
use tokio::sync::OnceCell;

#[derive(Debug)]
pub enum ScoutError {
    Provider(ProviderError),
    Merge(MergeError),
    /// No character matched the name
    NotFound(String),
    /// The named players never played on one team together
    NoSharedTeam(Vec<String>),
}

impl From<ProviderError> for ScoutError {
    fn from(err: ProviderError) -> Self {
        ScoutError::Provider(err)
    }
}

impl From<SeriesError> for ScoutError {
    fn from(err: SeriesError) -> Self {
        ScoutError::Provider(ProviderError::Series(err))
    }
}

impl From<MergeError> for ScoutError {
    fn from(err: MergeError) -> Self {
        ScoutError::Merge(err)
    }
}

impl std::fmt::Display for ScoutError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ScoutError::Provider(e) => write!(f, "Provider error: {}", e),
            ScoutError::Merge(e) => write!(f, "Merge error: {}", e),
            ScoutError::NotFound(name) => write!(f, "No character found for '{}'", name),
            ScoutError::NoSharedTeam(names) => {
                write!(f, "No team found with exactly: {}", names.join(", "))
            }
        }
    }
}

impl std::error::Error for ScoutError {}

/// Distinct, non-empty legacy uids of `teams`, capped at `limit` (lowest first)
pub fn history_keys(teams: &[Team], limit: usize) -> BTreeSet<String> {
    let keys: BTreeSet<String> = teams
        .iter()
        .map(|t| t.legacy_uid.trim())
        .filter(|uid| !uid.is_empty())
        .map(str::to_string)
        .collect();

    if keys.len() > limit {
        log::warn!(
            "{} history keys exceed the limit of {}, dropping {}",
            keys.len(),
            limit,
            keys.len() - limit
        );
        return keys.into_iter().take(limit).collect();
    }

    keys
}

pub struct Scout<P> {
    provider: P,
    config: ScoutConfig,
    options: AnalysisOptions,
}

impl Scout<PulseClient> {
    /// Scout backed by the SC2 Pulse HTTP API
    pub fn pulse(config: ScoutConfig) -> Result<Self, ScoutError> {
        let client = PulseClient::from_config(&config)?;
        Ok(Self::new(client, config))
    }
}

impl<P> Scout<P>
where
    P: HistoryProvider + RosterProvider,
{
    pub fn new(provider: P, config: ScoutConfig) -> Self {
        let options = AnalysisOptions {
            sparkline_days: config.sparkline_days,
            ..AnalysisOptions::default()
        };

        Self {
            provider,
            config,
            options,
        }
    }

    pub fn with_options(mut self, options: AnalysisOptions) -> Self {
        self.options = options;
        self
    }

    pub fn provider(&self) -> &P {
        &self.provider
    }

    pub fn config(&self) -> &ScoutConfig {
        &self.config
    }

    pub fn options(&self) -> &AnalysisOptions {
        &self.options
    }

    /// Every character matching `name`, each with its full team list
    pub async fn search(&self, name: &str) -> Result<Vec<Candidate>, ScoutError> {
        let results = self.provider.fetch_characters(name).await?;
        log::debug!("Search '{}' returned {} characters", name, results.len());

        let mut candidates = Vec::with_capacity(results.len());
        for stats in results {
            let teams = self
                .provider
                .fetch_character_teams(stats.members.character.id)
                .await?;
            candidates.push(Candidate { stats, teams });
        }

        Ok(candidates)
    }

    /// Resolve `name` to one character. History is not fetched yet.
    pub async fn lookup_player(
        &self,
        name: &str,
        current_race: Option<Race>,
    ) -> Result<PlayerLookup<'_, P>, ScoutError> {
        let name = name.trim();
        let candidates = self.search(name).await?;

        let candidate = select_candidate(&candidates, self.config.min_rating, self.config.max_rating)
            .cloned()
            .ok_or_else(|| ScoutError::NotFound(name.to_string()))?;

        log::info!(
            "Resolved '{}' to character {} ({} teams)",
            name,
            candidate.stats.members.character.id,
            candidate.teams.len()
        );

        Ok(PlayerLookup {
            scout: self,
            candidate,
            current_race,
            history: OnceCell::new(),
        })
    }

    /// Merged summary of the team made of exactly these players
    pub async fn lookup_team(&self, names: &[&str], now: DateTime<Utc>) -> Result<TeamAnalysis, ScoutError> {
        let owned_names = || names.iter().map(|n| n.trim().to_string()).collect::<Vec<_>>();

        let mut candidates = Vec::with_capacity(names.len());
        for name in names {
            candidates.push(self.lookup_player(name, None).await?.into_candidate());
        }

        let ids: Vec<i64> = candidates
            .iter()
            .map(|c| c.stats.members.character.battlenet_id)
            .collect();

        let teams = teams_with_roster(&candidates, &ids);
        if teams.is_empty() {
            return Err(ScoutError::NoSharedTeam(owned_names()));
        }

        let merged = IdentityMerger::new().merge_teams_with_joined(&teams)?;
        let keys = history_keys(std::slice::from_ref(&merged), self.config.history_key_limit);
        let history = self.fetch_history(&keys).await?;

        Ok(TeamAnalysis::build(&merged, Some(&history), now, &self.options))
    }

    /// Side-by-side summary of two 2v2 opponents
    pub async fn lookup_duo(&self, first: &str, second: &str, now: DateTime<Utc>) -> Result<DuoAnalysis, ScoutError> {
        let (first, second) = tokio::try_join!(
            self.lookup_player(first, None),
            self.lookup_player(second, None)
        )?;
        let (first, second) = tokio::try_join!(first.analyze(now), second.analyze(now))?;

        Ok(DuoAnalysis::build(first, second))
    }

    async fn fetch_history(&self, keys: &BTreeSet<String>) -> Result<CanonicalHistory, ScoutError> {
        if keys.is_empty() {
            return Ok(CanonicalHistory::empty());
        }

        let series = self.provider.fetch_histories(keys).await?;
        Ok(SeriesMerger::new().merge(&series)?)
    }
}

/// One resolved player, alive for one request
pub struct PlayerLookup<'a, P> {
    scout: &'a Scout<P>,
    candidate: Candidate,
    current_race: Option<Race>,
    history: OnceCell<CanonicalHistory>,
}

impl<'a, P> PlayerLookup<'a, P>
where
    P: HistoryProvider + RosterProvider,
{
    pub fn candidate(&self) -> &Candidate {
        &self.candidate
    }

    pub fn into_candidate(self) -> Candidate {
        self.candidate
    }

    pub fn current_race(&self) -> Option<Race> {
        self.current_race
    }

    pub fn history_keys(&self) -> BTreeSet<String> {
        history_keys(&self.candidate.teams, self.scout.config.history_key_limit)
    }

    /// Canonical history, fetched on the first call only
    pub async fn history(&self) -> Result<&CanonicalHistory, ScoutError> {
        self.history
            .get_or_try_init(|| async {
                let keys = self.history_keys();
                self.scout.fetch_history(&keys).await
            })
            .await
    }

    pub async fn analyze(&self, now: DateTime<Utc>) -> Result<PlayerAnalysis, ScoutError> {
        let history = self.history().await?;

        Ok(PlayerAnalysis::build(
            &self.candidate.stats,
            self.current_race,
            Some(history),
            &self.candidate.teams,
            now,
            &self.scout.options,
        ))
    }
}
