// Copyright 2025 h-matched Contributors
// SPDX-License-Identifier: Apache-2.0

//! Aggregate statistics over a dataset.
//!
//! Averages and ratios come back as `Option<f64>`. When there is no data to
//! divide by, the field is `None`; the renderers show that as "n/a".

use crate::calendar::decimal_year;
use crate::clock::Clock;
use crate::config::MetricsConfig;
use crate::dataset::BenchmarkRecord;
use crate::duration::{elapsed_years, round2};
use crate::trend::{least_squares, LinearFit};
use chrono::Months;
use serde::Serialize;

/// Unsolved benchmark that has been open the longest.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LongestUnsolved {
    pub name: String,
    /// Years from release until today.
    pub years: f64,
}

/// Dataset-wide statistics.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GlobalStats {
    pub total: usize,
    pub solved_count: usize,
    pub unsolved_count: usize,
    pub solved_fraction: Option<f64>,
    pub mean_years: Option<f64>,
    pub median_years: Option<f64>,
    pub min_years: Option<f64>,
    pub max_years: Option<f64>,
    /// Fraction of solved benchmarks h-matched within one year.
    pub within_one_year: Option<f64>,
    pub within_two_years: Option<f64>,
    pub within_three_years: Option<f64>,
    /// Mean time-to-solve of benchmarks released inside the recent window.
    pub recent_average_years: Option<f64>,
    pub longest_unsolved: Option<LongestUnsolved>,
    /// Time-to-solve regressed on release year.
    pub regression: Option<LinearFit>,
}

fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    Some(values.iter().sum::<f64>() / values.len() as f64)
}

/// Median of an ascending slice.
fn median(sorted: &[f64]) -> Option<f64> {
    let n = sorted.len();
    match n {
        0 => None,
        _ if n % 2 == 1 => Some(sorted[n / 2]),
        _ => Some((sorted[n / 2 - 1] + sorted[n / 2]) / 2.0),
    }
}

fn fraction_within(values: &[f64], limit_years: f64) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    let hits = values.iter().filter(|v| **v <= limit_years).count();
    Some(hits as f64 / values.len() as f64)
}

/// Compute [`GlobalStats`] for `records` as of `clock.today()`.
pub fn calculate_global_stats(
    records: &[BenchmarkRecord],
    clock: &dyn Clock,
    config: &MetricsConfig,
) -> GlobalStats {
    let today = clock.today();

    let solved: Vec<(&BenchmarkRecord, f64)> = records
        .iter()
        .filter_map(|r| r.time_to_solve().years().map(|years| (r, years)))
        .collect();

    let mut years: Vec<f64> = solved.iter().map(|(_, y)| *y).collect();
    years.sort_by(f64::total_cmp);

    let total = records.len();
    let solved_count = solved.len();
    let unsolved_count = total - solved_count;

    let window_months = u32::try_from(config.recent_window_years.max(0).saturating_mul(12))
        .unwrap_or(u32::MAX);
    let recent: Vec<f64> = match today.checked_sub_months(Months::new(window_months)) {
        Some(cutoff) => solved
            .iter()
            .filter(|(r, _)| r.release_date >= cutoff)
            .map(|(_, y)| *y)
            .collect(),
        None => years.clone(),
    };

    let longest_unsolved = records
        .iter()
        .filter(|r| !r.is_solved())
        .map(|r| LongestUnsolved {
            name: r.name.clone(),
            years: elapsed_years(r.release_date, today),
        })
        .max_by(|a, b| a.years.total_cmp(&b.years));

    let points: Vec<(f64, f64)> = solved
        .iter()
        .map(|(r, y)| (decimal_year(r.release_date), *y))
        .collect();

    GlobalStats {
        total,
        solved_count,
        unsolved_count,
        solved_fraction: (total > 0).then(|| solved_count as f64 / total as f64),
        mean_years: mean(&years).map(round2),
        median_years: median(&years).map(round2),
        min_years: years.first().copied(),
        max_years: years.last().copied(),
        within_one_year: fraction_within(&years, 1.0),
        within_two_years: fraction_within(&years, 2.0),
        within_three_years: fraction_within(&years, 3.0),
        recent_average_years: mean(&recent).map(round2),
        longest_unsolved,
        regression: least_squares(&points),
    }
}
