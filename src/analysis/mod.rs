//! Analysis Facade - Read-Only Summaries
//!
//! Composes the canonical history metrics, the merged roster identity and the
//! team-appearance list into immutable summaries for one player, one team, or
//! a pair of 2v2 opponents.
//!
//! ```text
//! CanonicalHistory → HistoryMetrics (trend, sparkline, windows, SmurfHeuristic)
//! PlayerStats + appearances → PlayerAnalysis (+ teammates)
//! merged Team → TeamAnalysis
//! PlayerAnalysis × 2 → DuoAnalysis (+ TeamSmurfFlag)
//! ```
//!
//! All builders are pure: they take already-fetched data and an explicit `now`.

pub mod duo;
pub mod metrics;
pub mod player;
pub mod smurf;
pub mod team;
pub mod teammates;

pub use duo::DuoAnalysis;
pub use metrics::{AnalysisOptions, HistoryMetrics};
pub use player::PlayerAnalysis;
pub use smurf::{PlayerFlag, SmurfFlag, SmurfHeuristic, SmurfRule, SmurfThresholds, TeamSmurfFlag};
pub use team::{team_name, MemberRaces, TeamAnalysis};
pub use teammates::{aggregate_teammates, ranked_teammates, TeammateRecord};
