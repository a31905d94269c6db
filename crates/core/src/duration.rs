// Copyright 2025 h-matched Contributors
// SPDX-License-Identifier: Apache-2.0

//! Time-to-solve computation and its display breakdown.
//!
//! A negative duration (solved before release) keeps its sign. It is shown
//! as such and flagged by [`crate::Dataset::anomalies`] instead of being
//! folded into a positive value.

use chrono::NaiveDate;
use serde::Serialize;
use std::cmp::Ordering;
use std::fmt;

/// Average days per year, accounting for leap years.
pub const DAYS_PER_YEAR: f64 = 365.25;

const MONTHS_PER_YEAR: f64 = 12.0;
const DAYS_PER_MONTH: f64 = DAYS_PER_YEAR / MONTHS_PER_YEAR;

/// Elapsed years between release and h-matched.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "status", content = "years", rename_all = "snake_case")]
pub enum TimeToSolve {
    /// Fractional years, rounded to two decimals. May be negative.
    Solved(f64),
    /// Not yet at human level.
    Unsolved,
}

impl TimeToSolve {
    /// Finite year count, if solved.
    pub fn years(&self) -> Option<f64> {
        match self {
            Self::Solved(years) => Some(*years),
            Self::Unsolved => None,
        }
    }

    pub fn is_unsolved(&self) -> bool {
        matches!(self, Self::Unsolved)
    }

    /// Solved before it was released.
    pub fn is_negative(&self) -> bool {
        matches!(self, Self::Solved(years) if *years < 0.0)
    }

    /// Total order: finite values ascending, then `Unsolved`.
    pub fn total_cmp(&self, other: &Self) -> Ordering {
        match (self, other) {
            (Self::Solved(a), Self::Solved(b)) => a.total_cmp(b),
            (Self::Solved(_), Self::Unsolved) => Ordering::Less,
            (Self::Unsolved, Self::Solved(_)) => Ordering::Greater,
            (Self::Unsolved, Self::Unsolved) => Ordering::Equal,
        }
    }
}

impl fmt::Display for TimeToSolve {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Solved(years) => write!(f, "{:.2} years", years),
            Self::Unsolved => write!(f, "Unsolved"),
        }
    }
}

/// Round to two decimals, normalizing negative zero.
pub fn round2(value: f64) -> f64 {
    let rounded = (value * 100.0).round() / 100.0;
    if rounded == 0.0 {
        0.0
    } else {
        rounded
    }
}

/// Fractional years from `from` to `to`, rounded to two decimals.
pub fn elapsed_years(from: NaiveDate, to: NaiveDate) -> f64 {
    let days = to.signed_duration_since(from).num_days() as f64;
    round2(days / DAYS_PER_YEAR)
}

/// Time from release to h-matched. `None` yields [`TimeToSolve::Unsolved`].
pub fn time_to_solve(release: NaiveDate, solved: Option<NaiveDate>) -> TimeToSolve {
    match solved {
        Some(solved) => TimeToSolve::Solved(elapsed_years(release, solved)),
        None => TimeToSolve::Unsolved,
    }
}

/// Whole years, months and days of a duration magnitude.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DurationParts {
    pub years: u32,
    pub months: u32,
    pub days: u32,
}

impl DurationParts {
    /// Break a non-negative fractional year count into parts.
    pub fn from_years(years: f64) -> Self {
        let years = years.abs();
        let whole_years = years.floor();
        let months = (years - whole_years) * MONTHS_PER_YEAR;
        let whole_months = months.floor();
        let days = ((months - whole_months) * DAYS_PER_MONTH).floor();
        Self {
            years: whole_years as u32,
            months: (whole_months as u32).min(11),
            days: days as u32,
        }
    }
}

impl fmt::Display for DurationParts {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}y {}m {}d", self.years, self.months, self.days)
    }
}

/// Display form of a [`TimeToSolve`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "parts", rename_all = "snake_case")]
pub enum FormattedDuration {
    Unsolved,
    Elapsed(DurationParts),
    Negative(DurationParts),
}

impl FormattedDuration {
    pub fn is_unsolved(&self) -> bool {
        matches!(self, Self::Unsolved)
    }

    pub fn is_negative(&self) -> bool {
        matches!(self, Self::Negative(_))
    }
}

impl fmt::Display for FormattedDuration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unsolved => write!(f, "Not yet h-matched"),
            Self::Elapsed(parts) => write!(f, "{}", parts),
            Self::Negative(parts) => write!(f, "-{}", parts),
        }
    }
}

/// Decompose a time-to-solve for display.
pub fn format_duration(value: TimeToSolve) -> FormattedDuration {
    match value {
        TimeToSolve::Unsolved => FormattedDuration::Unsolved,
        TimeToSolve::Solved(years) if years < 0.0 => {
            FormattedDuration::Negative(DurationParts::from_years(years))
        }
        TimeToSolve::Solved(years) => FormattedDuration::Elapsed(DurationParts::from_years(years)),
    }
}
