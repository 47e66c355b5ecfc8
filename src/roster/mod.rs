//! Roster records and identity reconciliation
//!
//! One real player or team shows up as several records, one per queue type
//! and season. This module types those records and reduces them to a single
//! merged identity.
//!
//! ```text
//! RosterProvider → Candidate × N → select_candidate
//!     ↓
//! teams_with_roster (exact member set)
//!     ↓
//! IdentityMerger → merged Team
//! ```

pub mod candidate;
pub mod merger;
pub mod types;

pub use candidate::{select_candidate, teams_with_roster};
pub use merger::{require_joined, IdentityMerger, MergeError};
pub use types::{
    Account, Candidate, Character, Clan, League, PlayerStats, Race, RatingStats, Team, TeamLeague,
    TeamMember,
};
