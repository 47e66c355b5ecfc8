//! Typed roster records as returned by the roster provider
//!
//! Field names follow the provider's camelCase JSON. Date fields are parsed to
//! instants at ingestion so that "most recent" comparisons never touch text.

use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use std::collections::BTreeMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Race {
    Terran,
    Protoss,
    Zerg,
    Random,
}

impl Race {
    pub fn as_str(&self) -> &'static str {
        match self {
            Race::Terran => "Terran",
            Race::Protoss => "Protoss",
            Race::Zerg => "Zerg",
            Race::Random => "Random",
        }
    }

    /// Parse lobby-style aliases (`terr`, `prot`, `rand`, full names), case-insensitive
    pub fn from_alias(alias: &str) -> Option<Self> {
        match alias.trim().to_lowercase().as_str() {
            "terr" | "terran" => Some(Race::Terran),
            "prot" | "protoss" => Some(Race::Protoss),
            "zerg" => Some(Race::Zerg),
            "rand" | "random" => Some(Race::Random),
            _ => None,
        }
    }

    pub fn all() -> [Race; 4] {
        [Race::Terran, Race::Protoss, Race::Zerg, Race::Random]
    }
}

impl std::fmt::Display for Race {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum League {
    Bronze,
    Silver,
    Gold,
    Platinum,
    Diamond,
    Master,
    Grandmaster,
}

impl League {
    pub fn from_int(value: i32) -> Option<Self> {
        match value {
            0 => Some(League::Bronze),
            1 => Some(League::Silver),
            2 => Some(League::Gold),
            3 => Some(League::Platinum),
            4 => Some(League::Diamond),
            5 => Some(League::Master),
            6 => Some(League::Grandmaster),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            League::Bronze => "BRONZE",
            League::Silver => "SILVER",
            League::Gold => "GOLD",
            League::Platinum => "PLATINUM",
            League::Diamond => "DIAMOND",
            League::Master => "MASTER",
            League::Grandmaster => "GRANDMASTER",
        }
    }
}

impl std::fmt::Display for League {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Character {
    pub realm: i32,
    pub name: String,
    pub id: i64,
    pub account_id: i64,
    pub region: String,
    pub battlenet_id: i64,
    #[serde(default)]
    pub tag: Option<String>,
    #[serde(default)]
    pub discriminator: Option<i32>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Account {
    pub battle_tag: String,
    pub id: i64,
    pub partition: String,
    #[serde(default)]
    pub hidden: Option<bool>,
    #[serde(default)]
    pub tag: Option<String>,
    #[serde(default)]
    pub discriminator: Option<i32>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Clan {
    #[serde(default)]
    pub tag: Option<String>,
    #[serde(default)]
    pub id: Option<i64>,
    #[serde(default)]
    pub region: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub members: Option<i32>,
    #[serde(default)]
    pub active_members: Option<i32>,
    #[serde(default)]
    pub avg_rating: Option<i32>,
    #[serde(default)]
    pub avg_league_type: Option<i32>,
    #[serde(default)]
    pub games: Option<i32>,
}

/// One character's slot in a team (or the character block of a search result)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TeamMember {
    #[serde(default, deserialize_with = "null_as_zero")]
    pub protoss_games_played: u32,
    #[serde(default, deserialize_with = "null_as_zero")]
    pub terran_games_played: u32,
    #[serde(default, deserialize_with = "null_as_zero")]
    pub zerg_games_played: u32,
    #[serde(default, deserialize_with = "null_as_zero")]
    pub random_games_played: u32,

    pub character: Character,
    pub account: Account,
    #[serde(default)]
    pub clan: Option<Clan>,

    #[serde(default)]
    pub race_games: BTreeMap<Race, u32>,
}

impl TeamMember {
    pub fn games_played(&self, race: Race) -> u32 {
        match race {
            Race::Terran => self.terran_games_played,
            Race::Protoss => self.protoss_games_played,
            Race::Zerg => self.zerg_games_played,
            Race::Random => self.random_games_played,
        }
    }

    pub fn total_games_played(&self) -> u32 {
        Race::all().iter().map(|&r| self.games_played(r)).sum()
    }

    /// Race with the highest game count; the first race in enum order wins ties
    pub fn primary_race(&self) -> Option<Race> {
        let mut best: Option<(Race, u32)> = None;
        for (&race, &games) in &self.race_games {
            if best.map_or(true, |(_, most)| games > most) {
                best = Some((race, games));
            }
        }
        best.map(|(race, _)| race)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TeamLeague {
    #[serde(rename = "type")]
    pub league_type: i32,
    pub queue_type: i32,
    pub team_type: i32,
}

/// One team record for one queue/season
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Team {
    pub id: i64,
    pub rating: i64,
    pub wins: u32,
    pub losses: u32,
    pub ties: u32,

    pub legacy_id: String,
    #[serde(default)]
    pub division_id: Option<i64>,
    pub season: i32,
    pub region: String,

    pub league: TeamLeague,

    #[serde(default)]
    pub global_rank: Option<i64>,
    #[serde(default)]
    pub region_rank: Option<i64>,
    #[serde(default)]
    pub league_rank: Option<i64>,

    #[serde(default, deserialize_with = "optional_instant")]
    pub last_played: Option<DateTime<Utc>>,
    #[serde(default, deserialize_with = "optional_instant")]
    pub joined: Option<DateTime<Utc>>,
    #[serde(default, deserialize_with = "optional_instant")]
    pub primary_data_updated: Option<DateTime<Utc>>,

    pub members: Vec<TeamMember>,

    #[serde(default)]
    pub global_team_count: Option<i64>,
    #[serde(default)]
    pub region_team_count: Option<i64>,
    #[serde(default)]
    pub league_team_count: Option<i64>,

    pub queue_type: i32,
    pub team_type: i32,
    pub league_type: i32,

    pub legacy_uid: String,
}

impl Team {
    pub fn league(&self) -> Option<League> {
        League::from_int(self.league_type)
    }

    /// Activity instant used to pick the freshest record: last played,
    /// else last updated, else joined
    pub fn activity_instant(&self) -> Option<DateTime<Utc>> {
        self.last_played
            .or(self.primary_data_updated)
            .or(self.joined)
    }

    /// Sorted battlenet ids of all members
    pub fn roster_ids(&self) -> Vec<i64> {
        let mut ids: Vec<i64> = self.members.iter().map(|m| m.character.battlenet_id).collect();
        ids.sort_unstable();
        ids
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RatingStats {
    #[serde(default)]
    pub rating: Option<i64>,
    #[serde(default)]
    pub games_played: Option<u32>,
    #[serde(default)]
    pub rank: Option<i64>,
}

/// Character search result
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerStats {
    pub league_max: i32,
    pub rating_max: i64,
    pub total_games_played: u32,

    #[serde(default)]
    pub previous_stats: RatingStats,
    #[serde(default)]
    pub current_stats: RatingStats,
    pub members: TeamMember,
}

impl PlayerStats {
    pub fn name(&self) -> &str {
        &self.members.character.name
    }

    pub fn max_league(&self) -> Option<League> {
        League::from_int(self.league_max)
    }

    /// Current season rating, else last season's
    pub fn current_rating(&self) -> Option<i64> {
        self.current_stats.rating.or(self.previous_stats.rating)
    }
}

/// A search result together with every team the character has appeared in
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Candidate {
    pub stats: PlayerStats,
    pub teams: Vec<Team>,
}

fn null_as_zero<'de, D>(deserializer: D) -> Result<u32, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<u32>::deserialize(deserializer)?.unwrap_or(0))
}

/// Accepts RFC 3339 text, or an offset-less ISO-8601 timestamp taken as UTC
fn optional_instant<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = match Option::<String>::deserialize(deserializer)? {
        Some(raw) if !raw.is_empty() => raw,
        _ => return Ok(None),
    };

    if let Ok(dt) = DateTime::parse_from_rfc3339(&raw) {
        return Ok(Some(dt.with_timezone(&Utc)));
    }

    NaiveDateTime::parse_from_str(&raw, "%Y-%m-%dT%H:%M:%S%.f")
        .map(|naive| Some(naive.and_utc()))
        .map_err(serde::de::Error::custom)
}
