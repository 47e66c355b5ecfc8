//! Property checks for the history layer over seeded random inputs
//!
//! Each case draws several overlapping raw series from a fixed-seed RNG, so
//! failures are reproducible. Checked properties:
//! - merged timestamps are strictly increasing and cover every input timestamp
//! - merging a canonical history again is the identity
//! - windowed counts are monotone in window length
//! - zero rating changes never count as a win or a loss

#[cfg(test)]
mod history_property_tests {
    use chrono::{DateTime, TimeZone, Utc};
    use ladderscout::history::{
        CanonicalHistory, FormSparkline, OutcomeWindow, RawSeries, SeriesMerger, Sparkline, Trend,
        TrendEstimator, WindowedOutcomeCounter,
    };
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};
    use std::collections::BTreeSet;

    const DAY: i64 = 86_400;
    const CASES: u64 = 50;

    fn now() -> DateTime<Utc> {
        Utc.timestamp_opt(400 * DAY, 0).unwrap()
    }

    /// 1-4 series of up to 60 samples within the 60 days before `now`.
    /// Timestamps are drawn from a coarse grid so series collide often.
    fn create_test_series(rng: &mut StdRng) -> Vec<RawSeries> {
        let base = now().timestamp() - 60 * DAY;
        let count = rng.gen_range(1..=4);

        (0..count)
            .map(|_| {
                let len = rng.gen_range(0..=60);
                let mut rating = rng.gen_range(1500..4500);
                let mut timestamps = Vec::with_capacity(len);
                let mut ratings = Vec::with_capacity(len);
                for _ in 0..len {
                    timestamps.push(base + rng.gen_range(0..720) * 7_200);
                    rating += rng.gen_range(-30..=30);
                    ratings.push(rating);
                }
                RawSeries::new(timestamps, ratings)
            })
            .collect()
    }

    fn merge(series: &[RawSeries]) -> CanonicalHistory {
        SeriesMerger::new().merge(series).unwrap()
    }

    #[test]
    fn test_merged_timestamps_strictly_increase() {
        let mut rng = StdRng::seed_from_u64(7);

        for case in 0..CASES {
            let series = create_test_series(&mut rng);
            let history = merge(&series);

            let times: Vec<i64> = history.samples().iter().map(|s| s.timestamp.timestamp()).collect();
            assert!(
                times.windows(2).all(|w| w[0] < w[1]),
                "case {}: timestamps not strictly increasing",
                case
            );

            let distinct: BTreeSet<i64> = series.iter().flat_map(|s| s.timestamps.iter().copied()).collect();
            assert_eq!(
                times,
                distinct.into_iter().collect::<Vec<_>>(),
                "case {}: every input timestamp appears exactly once",
                case
            );
        }
    }

    #[test]
    fn test_first_supplied_series_wins_ties() {
        let mut rng = StdRng::seed_from_u64(11);

        for case in 0..CASES {
            let series = create_test_series(&mut rng);
            let history = merge(&series);

            for sample in history.samples() {
                let ts = sample.timestamp.timestamp();
                let expected = series
                    .iter()
                    .flat_map(|s| s.timestamps.iter().zip(&s.ratings))
                    .find(|(&t, _)| t == ts)
                    .map(|(_, &r)| r);
                assert_eq!(Some(sample.rating), expected, "case {} at {}", case, ts);
            }
        }
    }

    #[test]
    fn test_merge_is_idempotent() {
        let mut rng = StdRng::seed_from_u64(23);

        for case in 0..CASES {
            let history = merge(&create_test_series(&mut rng));

            assert_eq!(merge(&[history.to_raw_series()]), history, "case {}", case);
            assert_eq!(
                merge(&[history.to_raw_series(), history.to_raw_series()]),
                history,
                "case {}: merging a history with itself",
                case
            );
        }
    }

    #[test]
    fn test_window_counts_are_monotone() {
        let mut rng = StdRng::seed_from_u64(31);

        for case in 0..CASES {
            let history = merge(&create_test_series(&mut rng));
            let counts = WindowedOutcomeCounter::new().count(&history, now());

            let windows = OutcomeWindow::all();
            for pair in windows.windows(2) {
                let (shorter, longer) = (counts.get(pair[0]), counts.get(pair[1]));
                assert!(
                    shorter.wins <= longer.wins && shorter.losses <= longer.losses,
                    "case {}: {} exceeds {}",
                    case,
                    pair[0].as_str(),
                    pair[1].as_str()
                );
            }
        }
    }

    #[test]
    fn test_zero_deltas_are_neutral() {
        let mut rng = StdRng::seed_from_u64(43);

        for case in 0..CASES {
            let history = merge(&create_test_series(&mut rng));
            let lifetime = WindowedOutcomeCounter::new().count(&history, now()).lifetime();

            let wins = history.transitions().filter(|(_, d)| *d > 0).count() as u32;
            let losses = history.transitions().filter(|(_, d)| *d < 0).count() as u32;
            assert_eq!(lifetime.wins, wins, "case {}", case);
            assert_eq!(lifetime.losses, losses, "case {}", case);
            assert!(lifetime.games() as usize <= history.len().saturating_sub(1));
        }
    }

    #[test]
    fn test_sparkline_width_bounded() {
        let mut rng = StdRng::seed_from_u64(59);
        let sparkline = FormSparkline::with_defaults();

        for case in 0..CASES {
            let history = merge(&create_test_series(&mut rng));

            match sparkline.render(&history, 7, now()) {
                Sparkline::Glyphs(glyphs) => {
                    let width = glyphs.chars().count();
                    assert!(width >= 3, "case {}: too narrow", case);
                    assert!(width <= history.len(), "case {}: wider than history", case);
                }
                Sparkline::InsufficientData => assert!(history.len() < 3, "case {}", case),
            }
        }
    }

    #[test]
    fn test_merge_example_from_two_sources() {
        let series = vec![
            RawSeries::new(vec![100, 200, 300], vec![1000, 1010, 1005]),
            RawSeries::new(vec![150, 300, 400], vec![1005, 1005, 1020]),
        ];

        let history = merge(&series);
        let raw = history.to_raw_series();
        assert_eq!(raw.timestamps, vec![100, 150, 200, 300, 400]);
        assert_eq!(raw.ratings, vec![1000, 1005, 1010, 1005, 1020]);

        let counts = WindowedOutcomeCounter::new().count(&history, Utc.timestamp_opt(400, 0).unwrap());
        assert_eq!(counts.lifetime().wins, 3);
        assert_eq!(counts.lifetime().losses, 1);
    }

    #[test]
    fn test_trend_on_steady_climb() {
        let timestamps: Vec<i64> = (0..30).map(|i| i * 3_600).collect();
        let climbing: Vec<i64> = (0..30).map(|i| 3000 + i * 12).collect();
        let falling: Vec<i64> = climbing.iter().rev().copied().collect();

        let estimator = TrendEstimator::with_defaults();
        assert_eq!(
            estimator.estimate(&merge(&[RawSeries::new(timestamps.clone(), climbing)])),
            Trend::StrongRising
        );
        assert_eq!(
            estimator.estimate(&merge(&[RawSeries::new(timestamps, falling)])),
            Trend::StrongFalling
        );
    }
}
