//! Merging of raw rating series into one canonical timeline

use super::sample::{RatingSample, RawSeries, SeriesError};
use chrono::{DateTime, Utc};

/// Deduplicated, time-ordered rating history for one identity.
///
/// Timestamps are strictly increasing. Only [`SeriesMerger`] builds one.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CanonicalHistory {
    samples: Vec<RatingSample>,
}

impl CanonicalHistory {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn samples(&self) -> &[RatingSample] {
        &self.samples
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn ratings(&self) -> impl Iterator<Item = i64> + '_ {
        self.samples.iter().map(|s| s.rating)
    }

    pub fn first_played(&self) -> Option<DateTime<Utc>> {
        self.samples.first().map(|s| s.timestamp)
    }

    pub fn last_played(&self) -> Option<DateTime<Utc>> {
        self.samples.last().map(|s| s.timestamp)
    }

    pub fn current_rating(&self) -> Option<i64> {
        self.samples.last().map(|s| s.rating)
    }

    pub fn highest_rating(&self) -> Option<i64> {
        self.ratings().max()
    }

    /// Rating change of every consecutive pair, paired with the later sample's timestamp.
    ///
    /// Saturates at the `i64` bounds; the sign is always exact.
    pub fn transitions(&self) -> impl Iterator<Item = (DateTime<Utc>, i64)> + '_ {
        self.samples
            .windows(2)
            .map(|pair| (pair[1].timestamp, pair[1].rating.saturating_sub(pair[0].rating)))
    }

    /// Back to the raw column shape (unix seconds)
    pub fn to_raw_series(&self) -> RawSeries {
        RawSeries::new(
            self.samples.iter().map(|s| s.timestamp.timestamp()).collect(),
            self.ratings().collect(),
        )
    }
}

/// Merges N raw series into a [`CanonicalHistory`].
///
/// # Tie-break
/// When several samples share a timestamp, the one from the series supplied
/// first wins (and within one series, the earlier entry). Later duplicates are
/// dropped even when their rating differs.
pub struct SeriesMerger;

impl SeriesMerger {
    pub fn new() -> Self {
        Self
    }

    pub fn merge(&self, series: &[RawSeries]) -> Result<CanonicalHistory, SeriesError> {
        for (index, raw) in series.iter().enumerate() {
            raw.validate(index)?;
        }

        let mut flattened = Vec::with_capacity(series.iter().map(RawSeries::len).sum());
        for (index, raw) in series.iter().enumerate() {
            flattened.extend(raw.to_samples(index)?);
        }

        // Stable: equal timestamps keep concatenation order
        flattened.sort_by_key(|s| s.timestamp);

        let mut samples: Vec<RatingSample> = Vec::with_capacity(flattened.len());
        for sample in flattened {
            match samples.last() {
                Some(kept) if kept.timestamp == sample.timestamp => {
                    if kept.rating != sample.rating {
                        log::debug!(
                            "Dropping rating {} at {} (kept {} from earlier source)",
                            sample.rating,
                            sample.timestamp,
                            kept.rating
                        );
                    }
                }
                _ => samples.push(sample),
            }
        }

        Ok(CanonicalHistory { samples })
    }
}

impl Default for SeriesMerger {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn secs(history: &CanonicalHistory) -> Vec<i64> {
        history.samples().iter().map(|s| s.timestamp.timestamp()).collect()
    }

    #[test]
    fn test_merge_overlapping_series() {
        let a = RawSeries::new(vec![100, 200, 300], vec![1000, 1010, 1005]);
        let b = RawSeries::new(vec![150, 300, 400], vec![1005, 1005, 1020]);

        let history = SeriesMerger::new().merge(&[a, b]).unwrap();

        assert_eq!(secs(&history), vec![100, 150, 200, 300, 400]);
        assert_eq!(
            history.ratings().collect::<Vec<_>>(),
            vec![1000, 1005, 1010, 1005, 1020]
        );
    }

    #[test]
    fn test_first_source_wins_tie() {
        let a = RawSeries::new(vec![100, 200], vec![1000, 1111]);
        let b = RawSeries::new(vec![200], vec![2222]);

        let history = SeriesMerger::new().merge(&[a.clone(), b.clone()]).unwrap();
        assert_eq!(history.current_rating(), Some(1111));

        let swapped = SeriesMerger::new().merge(&[b, a]).unwrap();
        assert_eq!(swapped.current_rating(), Some(2222));
    }

    #[test]
    fn test_duplicate_within_series_keeps_first() {
        let a = RawSeries::new(vec![100, 100, 50], vec![1, 2, 3]);
        let history = SeriesMerger::new().merge(&[a]).unwrap();

        assert_eq!(secs(&history), vec![50, 100]);
        assert_eq!(history.ratings().collect::<Vec<_>>(), vec![3, 1]);
    }

    #[test]
    fn test_empty_input() {
        let history = SeriesMerger::new().merge(&[]).unwrap();
        assert!(history.is_empty());
        assert_eq!(history.first_played(), None);

        let history = SeriesMerger::new().merge(&[RawSeries::default()]).unwrap();
        assert!(history.is_empty());
    }

    #[test]
    fn test_mismatched_series_rejected() {
        let good = RawSeries::new(vec![100], vec![1000]);
        let bad = RawSeries::new(vec![100, 200], vec![1000]);

        let err = SeriesMerger::new().merge(&[good, bad]).unwrap_err();
        assert_eq!(
            err,
            SeriesError::LengthMismatch {
                series: 1,
                timestamps: 2,
                ratings: 1
            }
        );
    }

    #[test]
    fn test_transitions() {
        let a = RawSeries::new(vec![100, 200, 300], vec![1000, 1010, 1010]);
        let history = SeriesMerger::new().merge(&[a]).unwrap();

        let deltas: Vec<(i64, i64)> = history
            .transitions()
            .map(|(ts, d)| (ts.timestamp(), d))
            .collect();
        assert_eq!(deltas, vec![(200, 10), (300, 0)]);
        assert_eq!(history.highest_rating(), Some(1010));
    }

    #[test]
    fn test_transitions_at_rating_bounds() {
        let a = RawSeries::new(vec![100, 200, 300], vec![i64::MIN, i64::MAX, i64::MIN]);
        let history = SeriesMerger::new().merge(&[a]).unwrap();

        let deltas: Vec<i64> = history.transitions().map(|(_, d)| d).collect();
        assert_eq!(deltas, vec![i64::MAX, i64::MIN]);
    }
}
