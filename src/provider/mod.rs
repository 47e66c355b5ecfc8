//! External collaborators: rating-history and roster sources
//!
//! The analysis core never performs I/O. Everything it consumes comes through
//! these two traits, so any backend (HTTP, fixtures, a cache) can be plugged in.

pub mod pulse;

use crate::history::{RawSeries, SeriesError};
use crate::roster::{PlayerStats, Team};
use async_trait::async_trait;
use std::collections::BTreeSet;

pub use pulse::PulseClient;

#[derive(Debug)]
pub enum ProviderError {
    Http(reqwest::Error),
    Status(u16),
    Decode(serde_json::Error),
    Series(SeriesError),
}

impl From<reqwest::Error> for ProviderError {
    fn from(err: reqwest::Error) -> Self {
        ProviderError::Http(err)
    }
}

impl From<serde_json::Error> for ProviderError {
    fn from(err: serde_json::Error) -> Self {
        ProviderError::Decode(err)
    }
}

impl From<SeriesError> for ProviderError {
    fn from(err: SeriesError) -> Self {
        ProviderError::Series(err)
    }
}

impl std::fmt::Display for ProviderError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ProviderError::Http(e) => write!(f, "HTTP error: {}", e),
            ProviderError::Status(code) => write!(f, "Unexpected HTTP status: {}", code),
            ProviderError::Decode(e) => write!(f, "Decode error: {}", e),
            ProviderError::Series(e) => write!(f, "Invalid history series: {}", e),
        }
    }
}

impl std::error::Error for ProviderError {}

/// Source of raw rating series
#[async_trait]
pub trait HistoryProvider: Send + Sync {
    /// Zero or more raw series for the given identity keys (team legacy uids)
    async fn fetch_histories(
        &self,
        identity_keys: &BTreeSet<String>,
    ) -> Result<Vec<RawSeries>, ProviderError>;
}

/// Source of roster records
#[async_trait]
pub trait RosterProvider: Send + Sync {
    /// Character search by name
    async fn fetch_characters(&self, query: &str) -> Result<Vec<PlayerStats>, ProviderError>;

    /// Every team the character has appeared in
    async fn fetch_character_teams(&self, character_id: i64) -> Result<Vec<Team>, ProviderError>;
}
