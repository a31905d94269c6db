// Copyright 2025 h-matched Contributors
// SPDX-License-Identifier: Apache-2.0

//! Calendar dates as chart coordinates.

use chrono::{Datelike, NaiveDate};

/// Fractional year used as a chart x-coordinate: `year + month0/12 + day/365`.
pub fn decimal_year(date: NaiveDate) -> f64 {
    date.year() as f64 + date.month0() as f64 / 12.0 + date.day() as f64 / 365.0
}

/// Solved position on the year axis. Unsolved records sit at `today.year() + offset_years`.
pub fn placement_year(solved: Option<NaiveDate>, today: NaiveDate, offset_years: i32) -> f64 {
    match solved {
        Some(date) => decimal_year(date),
        None => (today.year() + offset_years) as f64,
    }
}
