//! Integration tests for the batch evaluation pipeline.
//!
//! Tests cover:
//! - Full batch with a mock data port (no filesystem)
//! - Entry resolution, earliest-hit selection, and window exhaustion
//! - Partial coverage (missing symbols, truncated series)
//! - Input order and duplicate observations
//! - Batch-level failure when the provider is completely unavailable

mod common;

use common::*;
use rallyscan::domain::batch::{batch_span, evaluate};
use rallyscan::domain::error::RallyscanError;
use rallyscan::domain::scan::ScanOutcome;
use rallyscan::domain::stats::BatchStats;

mod batch_pipeline {
    use super::*;

    #[test]
    fn mixed_batch_classifies_each_row() {
        let entry = date(2024, 3, 4);
        let port = MockPricePort::new()
            .with_points(
                "HIT",
                points_with_highs(entry, 100.0, &[101.0, 102.5, 103.5, 99.0]),
            )
            .with_points(
                "MISS",
                points_with_highs(entry, 100.0, &[101.0, 102.0, 102.9]),
            );

        let observations = vec![
            obs("HIT", entry),
            obs("MISS", entry),
            obs("ABSENT", entry),
        ];

        let results = evaluate(&port, &observations, &params(3.0, 0, 6)).unwrap();

        assert_eq!(results.len(), 3);

        assert!(results[0].target_met());
        assert_eq!(results[0].hit_date(), Some(date(2024, 3, 6)));
        assert_eq!(results[0].days_taken(), Some(2));
        assert!((results[0].return_pct().unwrap() - 3.5).abs() < 1e-9);

        assert!(!results[1].target_met());
        assert!((results[1].entry_price().unwrap() - 100.0).abs() < 1e-9);
        assert!((results[1].target_price().unwrap() - 103.0).abs() < 1e-9);
        assert_eq!(results[1].hit_date(), None);

        assert_eq!(results[2].outcome, ScanOutcome::Unresolved);
        assert_eq!(results[2].entry_price(), None);
    }

    #[test]
    fn results_come_back_in_input_order() {
        let entry = date(2024, 3, 4);
        let port = MockPricePort::new()
            .with_points("A", points_with_highs(entry, 100.0, &[110.0]))
            .with_points("B", points_with_highs(entry, 100.0, &[110.0]));

        let observations = vec![
            obs("B", entry),
            obs("A", entry),
            obs("B", entry),
            obs("A", entry),
        ];

        let results = evaluate(&port, &observations, &params(3.0, 0, 6)).unwrap();
        let symbols: Vec<&str> = results.iter().map(|r| r.symbol.as_str()).collect();
        assert_eq!(symbols, vec!["B", "A", "B", "A"]);
    }

    #[test]
    fn duplicate_observations_yield_identical_rows() {
        let entry = date(2024, 3, 4);
        let port = MockPricePort::new().with_points(
            "TCS",
            points_with_highs(entry, 100.0, &[101.0, 104.0]),
        );

        let observations = vec![obs("TCS", entry), obs("TCS", entry)];
        let results = evaluate(&port, &observations, &params(3.0, 0, 6)).unwrap();

        assert_eq!(results[0], results[1]);
    }

    #[test]
    fn entry_on_non_trading_day_is_unresolved() {
        // Series starts Monday the 4th; the observation lands on Sunday.
        let port = MockPricePort::new().with_points(
            "RELIANCE",
            points_with_highs(date(2024, 3, 4), 100.0, &[110.0, 110.0]),
        );

        let results = evaluate(
            &port,
            &[obs("RELIANCE", date(2024, 3, 3))],
            &params(3.0, 0, 6),
        )
        .unwrap();

        assert_eq!(results[0].outcome, ScanOutcome::Unresolved);
        assert!(!results[0].target_met());
    }

    #[test]
    fn truncated_series_scans_available_prefix_only() {
        let entry = date(2024, 3, 4);
        // max_days is 10 but the series ends after three bars; the third
        // would have hit on day 5 of a longer series.
        let port = MockPricePort::new().with_points(
            "SHORT",
            points_with_highs(entry, 100.0, &[101.0, 102.0, 102.5]),
        );

        let results = evaluate(&port, &[obs("SHORT", entry)], &params(3.0, 0, 10)).unwrap();

        assert!(!results[0].target_met());
        assert!((results[0].entry_price().unwrap() - 100.0).abs() < 1e-9);
    }

    #[test]
    fn provider_failure_aborts_before_scanning() {
        let port = MockPricePort::failing("feed down");
        let err = evaluate(
            &port,
            &[obs("ANY", date(2024, 3, 4))],
            &params(3.0, 0, 6),
        )
        .unwrap_err();

        assert!(matches!(err, RallyscanError::DataUnavailable { .. }));
    }

    #[test]
    fn empty_batch_is_empty_result() {
        let port = MockPricePort::new();
        let results = evaluate(&port, &[], &params(3.0, 0, 6)).unwrap();
        assert!(results.is_empty());
    }

    #[test]
    fn hit_beyond_max_days_does_not_count() {
        let entry = date(2024, 3, 4);
        // The qualifying high sits on day 7, one past the window.
        let port = MockPricePort::new().with_points(
            "LATE",
            points_with_highs(
                entry,
                100.0,
                &[100.5, 100.5, 100.5, 100.5, 100.5, 100.5, 100.5, 110.0],
            ),
        );

        let results = evaluate(&port, &[obs("LATE", entry)], &params(3.0, 0, 6)).unwrap();
        assert!(!results[0].target_met());
    }

    #[test]
    fn min_days_gates_eligible_hits_across_batch() {
        let entry = date(2024, 3, 4);
        let port = MockPricePort::new().with_points(
            "EARLY",
            points_with_highs(entry, 100.0, &[104.0, 104.0, 104.0, 99.0]),
        );

        let gated = evaluate(&port, &[obs("EARLY", entry)], &params(3.0, 2, 6)).unwrap();
        let ungated = evaluate(&port, &[obs("EARLY", entry)], &params(3.0, 0, 6)).unwrap();

        assert_eq!(gated[0].days_taken(), Some(2));
        assert_eq!(ungated[0].days_taken(), Some(0));
    }

    #[test]
    fn span_requested_covers_every_window() {
        let observations = vec![
            obs("A", date(2024, 3, 10)),
            obs("B", date(2024, 3, 4)),
            obs("C", date(2024, 3, 8)),
        ];

        let span = batch_span(&observations, 6).unwrap();
        assert_eq!(span.start, date(2024, 3, 4));
        assert_eq!(span.end, date(2024, 3, 16));
    }
}

mod batch_stats {
    use super::*;

    #[test]
    fn stats_over_evaluated_batch() {
        let entry = date(2024, 3, 4);
        let port = MockPricePort::new()
            .with_points(
                "HIT",
                points_with_highs(entry, 100.0, &[101.0, 103.5]),
            )
            .with_points(
                "MISS",
                points_with_highs(entry, 100.0, &[101.0, 102.0]),
            );

        let observations = vec![
            obs("HIT", entry),
            obs("MISS", entry),
            obs("ABSENT", entry),
        ];
        let results = evaluate(&port, &observations, &params(3.0, 0, 6)).unwrap();
        let stats = BatchStats::compute(&results);

        assert_eq!(stats.total, 3);
        assert_eq!(stats.met, 1);
        assert_eq!(stats.unmet, 1);
        assert_eq!(stats.unresolved, 1);
        assert!((stats.success_rate.unwrap() - 50.0).abs() < 1e-9);
        assert!((stats.avg_return_pct.unwrap() - 3.5).abs() < 1e-9);
        assert!((stats.avg_days_taken.unwrap() - 1.0).abs() < 1e-9);
    }
}
