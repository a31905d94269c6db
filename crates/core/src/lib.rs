// Copyright 2025 h-matched Contributors
// SPDX-License-Identifier: Apache-2.0

//! Benchmark dataset and derived metrics for the h-matched tracker.
//!
//! The tracker measures how long it takes AI systems to reach human-level
//! performance ("h-matched") on a benchmark after its release. This crate
//! holds the dataset model and every computation the page needs. All
//! functions are pure and take the dataset by reference.
//!
//! # Quick Start
//!
//! ```no_run
//! use hmatch_core::{calculate_global_stats, fit_trend_line, Dataset, MetricsConfig, SystemClock};
//!
//! let dataset = Dataset::embedded()?;
//! let config = MetricsConfig::default();
//!
//! let stats = calculate_global_stats(dataset.records(), &SystemClock, &config);
//! let trend = fit_trend_line(dataset.records(), &config.viewport);
//! println!("{} solved, trend endpoints: {:?}", stats.solved_count, trend.points);
//! # Ok::<(), hmatch_core::DatasetError>(())
//! ```
//!
//! # Modules
//!
//! - [`dataset`] - Records, raw-shape normalization and the immutable dataset
//! - [`duration`] - Time-to-solve and its display breakdown
//! - [`calendar`] - Decimal-year chart coordinates
//! - [`trend`] - Least-squares fit and viewport clipping
//! - [`stats`] - Dataset-wide statistics
//! - [`color`] - Deterministic pastel colors
//! - [`sort`] - Table sort state machine
//! - [`clock`] - Injected wall clock
//! - [`config`] - Metric constants

#![warn(rust_2018_idioms)]
#![deny(unsafe_code)]

pub mod calendar;
pub mod clock;
pub mod color;
pub mod config;
pub mod dataset;
pub mod duration;
pub mod error;
pub mod sort;
pub mod stats;
pub mod trend;

pub use calendar::{decimal_year, placement_year};
pub use clock::{Clock, FixedClock, SystemClock};
pub use color::{pastel_color, HslColor};
pub use config::{MetricsConfig, Viewport};
pub use dataset::{Achievement, BenchmarkRecord, Dataset, DateAnomaly, HumanBaseline};
pub use duration::{format_duration, round2, time_to_solve, FormattedDuration, TimeToSolve};
pub use error::{ConfigError, DatasetError, SortParseError};
pub use sort::{sort_records, SortColumn, SortDirection, SortState};
pub use stats::{calculate_global_stats, GlobalStats, LongestUnsolved};
pub use trend::{fit_trend_line, LinearFit, TrendLine, TrendPoint};

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn two_record_dataset() -> Dataset {
        Dataset::from_json_str(
            r#"[
                {"name": "A", "release": "2016-06-16", "solved": "2017-06-15"},
                {"name": "B", "release": "2018-06-11", "solved": null}
            ]"#,
        )
        .unwrap()
    }

    #[test]
    fn test_end_to_end_sort_and_stats() {
        let dataset = two_record_dataset();

        let state = SortState::default().click(SortColumn::TimeToSolve);
        let sorted: Vec<_> = sort_records(dataset.records(), state)
            .into_iter()
            .map(|r| r.name.as_str())
            .collect();
        assert_eq!(sorted, vec!["A", "B"]);

        let clock = FixedClock(NaiveDate::from_ymd_opt(2025, 1, 1).unwrap());
        let stats = calculate_global_stats(dataset.records(), &clock, &MetricsConfig::default());
        assert_eq!(stats.solved_count, 1);
        assert_eq!(stats.unsolved_count, 1);
        assert_eq!(stats.solved_fraction, Some(0.5));
        assert_eq!(stats.mean_years, Some(1.0));
        assert!(stats.regression.is_none());
        assert_eq!(stats.longest_unsolved.unwrap().name, "B");
    }

    #[test]
    fn test_end_to_end_trend_is_empty_with_one_solved() {
        let dataset = two_record_dataset();
        let trend = fit_trend_line(dataset.records(), &Viewport::default());
        assert!(trend.is_empty());
    }

    #[test]
    fn test_embedded_dataset_metrics() {
        let dataset = Dataset::embedded().unwrap();
        let config = MetricsConfig::default();
        let trend = fit_trend_line(dataset.records(), &config.viewport);
        assert!(trend.fit.is_some());
        assert_eq!(trend.points.len(), 2);
        for point in &trend.points {
            assert!(config.viewport.contains(point.x, point.y));
        }
    }
}
