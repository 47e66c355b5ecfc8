//! Rating samples and raw history series as delivered by a history provider

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One observed rating at one instant
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RatingSample {
    pub timestamp: DateTime<Utc>,
    pub rating: i64,
}

impl RatingSample {
    pub fn new(timestamp: DateTime<Utc>, rating: i64) -> Self {
        Self { timestamp, rating }
    }

    /// Build a sample from unix seconds
    pub fn from_unix(secs: i64, rating: i64) -> Option<Self> {
        DateTime::from_timestamp(secs, 0).map(|timestamp| Self { timestamp, rating })
    }
}

/// A raw `(timestamps, ratings)` pair for one queue/season source.
///
/// The two columns arrive separately and must have equal length.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawSeries {
    pub timestamps: Vec<i64>,
    pub ratings: Vec<i64>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SeriesError {
    /// Column lengths differ for the series at `series` (input position)
    LengthMismatch {
        series: usize,
        timestamps: usize,
        ratings: usize,
    },
    /// Timestamp outside the representable range
    InvalidTimestamp { series: usize, timestamp: i64 },
}

impl std::fmt::Display for SeriesError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SeriesError::LengthMismatch {
                series,
                timestamps,
                ratings,
            } => write!(
                f,
                "Series {}: {} timestamps but {} ratings",
                series, timestamps, ratings
            ),
            SeriesError::InvalidTimestamp { series, timestamp } => {
                write!(f, "Series {}: invalid timestamp {}", series, timestamp)
            }
        }
    }
}

impl std::error::Error for SeriesError {}

impl RawSeries {
    pub fn new(timestamps: Vec<i64>, ratings: Vec<i64>) -> Self {
        Self {
            timestamps,
            ratings,
        }
    }

    pub fn len(&self) -> usize {
        self.timestamps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.timestamps.is_empty()
    }

    /// Check column lengths. `index` is only used to label the error.
    pub fn validate(&self, index: usize) -> Result<(), SeriesError> {
        if self.timestamps.len() != self.ratings.len() {
            return Err(SeriesError::LengthMismatch {
                series: index,
                timestamps: self.timestamps.len(),
                ratings: self.ratings.len(),
            });
        }
        Ok(())
    }

    /// Convert to samples in source order
    pub fn to_samples(&self, index: usize) -> Result<Vec<RatingSample>, SeriesError> {
        self.validate(index)?;

        self.timestamps
            .iter()
            .zip(&self.ratings)
            .map(|(&ts, &rating)| {
                RatingSample::from_unix(ts, rating).ok_or(SeriesError::InvalidTimestamp {
                    series: index,
                    timestamp: ts,
                })
            })
            .collect()
    }
}
