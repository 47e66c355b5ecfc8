//! Frequent-partner aggregation over team appearances

use crate::roster::Team;
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::collections::HashMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TeammateRecord {
    pub count: u32,
    pub last_played: Option<DateTime<Utc>>,
}

/// Count co-members across `appearances`, excluding `self_name`.
///
/// Appearances without a last-played instant are skipped entirely.
pub fn aggregate_teammates(self_name: &str, appearances: &[Team]) -> HashMap<String, TeammateRecord> {
    let mut result: HashMap<String, TeammateRecord> = HashMap::new();

    for team in appearances {
        let Some(played) = team.last_played else {
            continue;
        };

        for member in &team.members {
            let name = &member.character.name;
            if name == self_name {
                continue;
            }

            let entry = result.entry(name.clone()).or_insert(TeammateRecord {
                count: 0,
                last_played: None,
            });
            entry.count += 1;
            if entry.last_played.map_or(true, |seen| played > seen) {
                entry.last_played = Some(played);
            }
        }
    }

    result
}

/// Most frequent partners first, then most recent, then name
pub fn ranked_teammates(teammates: &HashMap<String, TeammateRecord>) -> Vec<(&str, TeammateRecord)> {
    let mut ranked: Vec<(&str, TeammateRecord)> =
        teammates.iter().map(|(name, rec)| (name.as_str(), *rec)).collect();
    ranked.sort_by(|a, b| {
        b.1.count
            .cmp(&a.1.count)
            .then(b.1.last_played.cmp(&a.1.last_played))
            .then(a.0.cmp(b.0))
    });
    ranked
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::roster::test_support::{at_day, create_test_member, create_test_team};

    fn create_test_appearance(id: i64, names: &[&str], day: Option<i64>) -> Team {
        let members = names
            .iter()
            .enumerate()
            .map(|(i, n)| create_test_member(n, i as i64 + 1))
            .collect();
        let mut team = create_test_team(id, 3000, members);
        team.last_played = day.map(at_day);
        team
    }

    #[test]
    fn test_counts_and_latest() {
        let teams = vec![
            create_test_appearance(1, &["Me", "X"], Some(10)),
            create_test_appearance(2, &["X", "Me"], Some(20)),
            create_test_appearance(3, &["Me", "Y", "X"], Some(15)),
        ];

        let mates = aggregate_teammates("Me", &teams);
        assert_eq!(mates.len(), 2);
        assert_eq!(
            mates["X"],
            TeammateRecord {
                count: 3,
                last_played: Some(at_day(20))
            }
        );
        assert_eq!(mates["Y"].count, 1);
        assert!(!mates.contains_key("Me"));
    }

    #[test]
    fn test_undated_appearances_skipped() {
        let teams = vec![
            create_test_appearance(1, &["Me", "X"], None),
            create_test_appearance(2, &["Me", "Z"], None),
            create_test_appearance(3, &["Me", "X"], Some(4)),
        ];

        let mates = aggregate_teammates("Me", &teams);
        assert_eq!(mates.len(), 1);
        assert_eq!(mates["X"].count, 1);
    }

    #[test]
    fn test_ranking() {
        let teams = vec![
            create_test_appearance(1, &["Me", "A"], Some(1)),
            create_test_appearance(2, &["Me", "B"], Some(5)),
            create_test_appearance(3, &["Me", "B"], Some(6)),
            create_test_appearance(4, &["Me", "C"], Some(9)),
        ];

        let mates = aggregate_teammates("Me", &teams);
        let names: Vec<&str> = ranked_teammates(&mates).into_iter().map(|(n, _)| n).collect();
        assert_eq!(names, vec!["B", "C", "A"]);
    }
}
