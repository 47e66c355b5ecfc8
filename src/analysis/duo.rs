//! Two-opponent (2v2) summary built from two player analyses

use super::player::PlayerAnalysis;
use super::smurf::TeamSmurfFlag;
use crate::history::OutcomeWindowCounts;
use chrono::{DateTime, Utc};
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DuoAnalysis {
    pub first: PlayerAnalysis,
    pub second: PlayerAnalysis,
    pub combined_outcomes: OutcomeWindowCounts,
    pub average_rating: Option<i64>,
    pub most_recent_match: Option<DateTime<Utc>>,
    pub team_smurf_flag: Option<TeamSmurfFlag>,
}

impl DuoAnalysis {
    pub fn build(first: PlayerAnalysis, second: PlayerAnalysis) -> Self {
        let combined_outcomes = first.metrics.outcomes + second.metrics.outcomes;

        let average_rating = match (first.current_rating, second.current_rating) {
            (Some(a), Some(b)) => Some(((a + b) as f64 / 2.0).round() as i64),
            _ => None,
        };

        let most_recent_match = first.metrics.last_played.max(second.metrics.last_played);

        let team_smurf_flag = TeamSmurfFlag::from_pair(
            (&first.name, first.metrics.smurf_flag),
            (&second.name, second.metrics.smurf_flag),
        );

        Self {
            first,
            second,
            combined_outcomes,
            average_rating,
            most_recent_match,
            team_smurf_flag,
        }
    }

    pub fn players(&self) -> [&PlayerAnalysis; 2] {
        [&self.first, &self.second]
    }
}

impl std::fmt::Display for DuoAnalysis {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.first)?;
        writeln!(f)?;
        write!(f, "{}", self.second)?;
        if let Some(avg) = self.average_rating {
            writeln!(f, "Avg MMR {}", avg)?;
        }
        if let Some(flag) = &self.team_smurf_flag {
            writeln!(f, "⚠ {}", flag)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::metrics::AnalysisOptions;
    use crate::analysis::smurf::{PlayerFlag, SmurfFlag};
    use crate::history::{OutcomeCounts, OutcomeWindow, RawSeries, SeriesMerger};
    use crate::roster::test_support::{at_day, create_test_stats};

    fn create_test_player(name: &str, id: i64, rating: Option<i64>, ratings: &[i64]) -> PlayerAnalysis {
        let base = at_day(30).timestamp();
        let timestamps = (0..ratings.len() as i64).map(|i| base - 3_600 * (ratings.len() as i64 - i)).collect();
        let history = SeriesMerger::new()
            .merge(&[RawSeries::new(timestamps, ratings.to_vec())])
            .unwrap();
        PlayerAnalysis::build(
            &create_test_stats(name, id, rating),
            None,
            Some(&history),
            &[],
            at_day(30),
            &AnalysisOptions::default(),
        )
    }

    #[test]
    fn test_combined_counts_and_average() {
        let p1 = create_test_player("A", 1, Some(3001), &[1000, 1010, 1000]);
        let p2 = create_test_player("B", 2, Some(3000), &[1000, 1010, 1020, 1030, 1040, 1050]);

        let duo = DuoAnalysis::build(p1, p2);
        assert_eq!(
            duo.combined_outcomes.get(OutcomeWindow::Day1),
            OutcomeCounts::new(6, 1)
        );
        assert_eq!(duo.average_rating, Some(3001));
        assert_eq!(
            duo.team_smurf_flag,
            Some(TeamSmurfFlag::Single(PlayerFlag {
                player: "B".to_string(),
                flag: SmurfFlag::LikelySmurf
            }))
        );
        assert_eq!(duo.most_recent_match, Some(at_day(30) - chrono::Duration::hours(1)));
    }

    #[test]
    fn test_average_needs_both_ratings() {
        let p1 = create_test_player("A", 1, None, &[1000]);
        let p2 = create_test_player("B", 2, Some(3000), &[1000]);
        let duo = DuoAnalysis::build(p1, p2);
        assert_eq!(duo.average_rating, None);
        assert_eq!(duo.team_smurf_flag, None);
    }
}
