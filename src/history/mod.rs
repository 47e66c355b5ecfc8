//! Rating History - Canonical Timeline and Derived Metrics
//!
//! Raw rating series arrive from several queue/season sources for one identity.
//! They are merged into a single canonical timeline, from which every form
//! metric is derived.
//!
//! # Architecture
//!
//! ```text
//! RawSeries × N → SeriesMerger → CanonicalHistory
//!     ↓
//! WindowedOutcomeCounter (1d/3d/7d/30d/lifetime wins & losses)
//! TrendEstimator (OLS slope over last 100 ratings)
//! FormSparkline (8-level glyph strip)
//! ```
//!
//! Nothing here performs I/O, and no derived metric fails on a well-formed
//! history. An empty history yields `Trend::Unknown`, zero counts and
//! `Sparkline::InsufficientData`.

pub mod merger;
pub mod sample;
pub mod sparkline;
pub mod trend;
pub mod window;

pub use merger::{CanonicalHistory, SeriesMerger};
pub use sample::{RatingSample, RawSeries, SeriesError};
pub use sparkline::{FormSparkline, Sparkline};
pub use trend::{Trend, TrendEstimator, TrendThresholds};
pub use window::{OutcomeCounts, OutcomeWindow, OutcomeWindowCounts, WindowedOutcomeCounter};
