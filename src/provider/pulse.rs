//! SC2 Pulse API client
//!
//! Endpoints used:
//! - `GET {base}/characters?query={name}` → character search results
//! - `GET {base}/character-teams?characterId={id}` → every team of a character
//! - `GET {base}/team-histories?teamLegacyUid=...&groupBy=LEGACY_UID&history=TIMESTAMP&history=RATING`
//!   → one `(TIMESTAMP[], RATING[])` column pair per legacy uid

use super::{HistoryProvider, ProviderError, RosterProvider};
use crate::config::ScoutConfig;
use crate::history::RawSeries;
use crate::roster::{PlayerStats, Team};
use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::collections::BTreeSet;
use std::time::Duration;

#[derive(Debug, Deserialize)]
struct TeamHistoryEntry {
    #[serde(default)]
    history: TeamHistoryColumns,
}

#[derive(Debug, Default, Deserialize)]
struct TeamHistoryColumns {
    #[serde(rename = "TIMESTAMP", default)]
    timestamps: Vec<i64>,
    #[serde(rename = "RATING", default)]
    ratings: Vec<i64>,
}

/// Decode a team-histories response body into validated raw series
pub fn parse_team_histories(body: &str) -> Result<Vec<RawSeries>, ProviderError> {
    let entries: Vec<TeamHistoryEntry> = serde_json::from_str(body)?;

    entries
        .into_iter()
        .enumerate()
        .map(|(index, entry)| {
            let series = RawSeries::new(entry.history.timestamps, entry.history.ratings);
            series.validate(index)?;
            Ok(series)
        })
        .collect()
}

pub struct PulseClient {
    client: reqwest::Client,
    base_url: String,
}

impl PulseClient {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, ProviderError> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn from_config(config: &ScoutConfig) -> Result<Self, ProviderError> {
        Self::new(&config.api_url, Duration::from_secs(config.timeout_secs))
    }

    async fn get_text(&self, path: &str, query: &[(&str, String)]) -> Result<String, ProviderError> {
        let url = format!("{}/{}", self.base_url, path);
        log::debug!("GET {} ({} params)", url, query.len());

        let response = self.client.get(&url).query(query).send().await?;

        if !response.status().is_success() {
            return Err(ProviderError::Status(response.status().as_u16()));
        }

        Ok(response.text().await?)
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> Result<T, ProviderError> {
        let body = self.get_text(path, query).await?;
        Ok(serde_json::from_str(&body)?)
    }
}

#[async_trait]
impl HistoryProvider for PulseClient {
    async fn fetch_histories(
        &self,
        identity_keys: &BTreeSet<String>,
    ) -> Result<Vec<RawSeries>, ProviderError> {
        if identity_keys.is_empty() {
            return Ok(Vec::new());
        }

        let mut query: Vec<(&str, String)> = identity_keys
            .iter()
            .map(|key| ("teamLegacyUid", key.clone()))
            .collect();
        query.extend([
            ("groupBy", "LEGACY_UID".to_string()),
            ("static", "LEGACY_ID".to_string()),
            ("history", "TIMESTAMP".to_string()),
            ("history", "RATING".to_string()),
        ]);

        let body = self.get_text("team-histories", &query).await?;
        parse_team_histories(&body)
    }
}

#[async_trait]
impl RosterProvider for PulseClient {
    async fn fetch_characters(&self, query: &str) -> Result<Vec<PlayerStats>, ProviderError> {
        self.get_json("characters", &[("query", query.trim().to_string())])
            .await
    }

    async fn fetch_character_teams(&self, character_id: i64) -> Result<Vec<Team>, ProviderError> {
        self.get_json("character-teams", &[("characterId", character_id.to_string())])
            .await
    }
}
