//! ladderscout - match-history aggregation and form analytics for SC2 ladder players
//!
//! ```text
//! provider (HTTP / fixtures)
//!     ↓ RawSeries, Team, PlayerStats
//! history  (SeriesMerger, windows, trend, sparkline)
//! roster   (candidate selection, IdentityMerger)
//!     ↓
//! analysis (SmurfHeuristic, PlayerAnalysis, TeamAnalysis, DuoAnalysis)
//!     ↑
//! scout    (per-request lookups, memoized history)
//! ```

pub mod analysis;
pub mod config;
pub mod history;
pub mod provider;
pub mod roster;
pub mod scout;

pub use config::{ConfigError, ScoutConfig};
pub use scout::{PlayerLookup, Scout, ScoutError};
