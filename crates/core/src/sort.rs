// Copyright 2025 h-matched Contributors
// SPDX-License-Identifier: Apache-2.0

//! Table sort state and per-column orderings.
//!
//! The state machine mirrors clicking a column header: the first click on a
//! column sorts ascending, clicking it again flips the direction, and a click
//! on another column starts over at ascending.
//!
//! Missing solved dates always sort last in the solved column. In the
//! time-to-solve column "unsolved" counts as larger than any finite value, so
//! it lands last ascending and first descending. Ties fall back to the name.

use crate::dataset::BenchmarkRecord;
use crate::error::SortParseError;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

/// Sortable table column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SortColumn {
    Name,
    Release,
    Solved,
    TimeToSolve,
}

impl SortColumn {
    pub const ALL: [SortColumn; 4] = [
        SortColumn::Name,
        SortColumn::Release,
        SortColumn::Solved,
        SortColumn::TimeToSolve,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Name => "name",
            Self::Release => "release",
            Self::Solved => "solved",
            Self::TimeToSolve => "time-to-solve",
        }
    }

    /// Column header label.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Name => "Benchmark",
            Self::Release => "Released",
            Self::Solved => "Solved",
            Self::TimeToSolve => "Time to Human Level",
        }
    }

    fn compare(&self, a: &BenchmarkRecord, b: &BenchmarkRecord, direction: SortDirection) -> Ordering {
        match self {
            Self::Name => direction.apply(a.name.cmp(&b.name)),
            Self::Release => direction.apply(a.release_date.cmp(&b.release_date)),
            Self::Solved => match (a.solved_date, b.solved_date) {
                (Some(x), Some(y)) => direction.apply(x.cmp(&y)),
                (Some(_), None) => Ordering::Less,
                (None, Some(_)) => Ordering::Greater,
                (None, None) => Ordering::Equal,
            },
            Self::TimeToSolve => direction.apply(a.time_to_solve().total_cmp(&b.time_to_solve())),
        }
    }
}

impl fmt::Display for SortColumn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SortColumn {
    type Err = SortParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "name" | "benchmark" => Ok(Self::Name),
            "release" | "released" => Ok(Self::Release),
            "solved" => Ok(Self::Solved),
            "time-to-solve" | "time_to_solve" | "tts" => Ok(Self::TimeToSolve),
            _ => Err(SortParseError {
                kind: "column",
                value: s.to_string(),
                expected: "name, release, solved, time-to-solve",
            }),
        }
    }
}

/// Sort direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    #[default]
    Ascending,
    Descending,
}

impl SortDirection {
    pub fn toggled(self) -> Self {
        match self {
            Self::Ascending => Self::Descending,
            Self::Descending => Self::Ascending,
        }
    }

    fn apply(self, ordering: Ordering) -> Ordering {
        match self {
            Self::Ascending => ordering,
            Self::Descending => ordering.reverse(),
        }
    }
}

impl FromStr for SortDirection {
    type Err = SortParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "asc" | "ascending" => Ok(Self::Ascending),
            "desc" | "descending" => Ok(Self::Descending),
            _ => Err(SortParseError {
                kind: "direction",
                value: s.to_string(),
                expected: "asc, desc",
            }),
        }
    }
}

/// View-local sort state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum SortState {
    #[default]
    Unsorted,
    Sorted {
        column: SortColumn,
        direction: SortDirection,
    },
}

impl SortState {
    pub fn by(column: SortColumn, direction: SortDirection) -> Self {
        Self::Sorted { column, direction }
    }

    /// Next state after clicking `column`'s header.
    pub fn click(self, column: SortColumn) -> Self {
        let direction = match self {
            Self::Sorted {
                column: current,
                direction,
            } if current == column => direction.toggled(),
            _ => SortDirection::Ascending,
        };
        Self::Sorted { column, direction }
    }

    /// Sorted column, if any.
    pub fn column(&self) -> Option<SortColumn> {
        match self {
            Self::Unsorted => None,
            Self::Sorted { column, .. } => Some(*column),
        }
    }

    pub fn direction(&self) -> Option<SortDirection> {
        match self {
            Self::Unsorted => None,
            Self::Sorted { direction, .. } => Some(*direction),
        }
    }
}

impl FromStr for SortState {
    type Err = SortParseError;

    /// Parse `column` or `column:direction`; `none` means unsorted.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.eq_ignore_ascii_case("none") || s.is_empty() {
            return Ok(Self::Unsorted);
        }
        let (column, direction) = match s.split_once(':') {
            Some((column, direction)) => (column.parse()?, direction.parse()?),
            None => (s.parse()?, SortDirection::Ascending),
        };
        Ok(Self::Sorted { column, direction })
    }
}

/// Sorted view of `records`. The input order is kept when unsorted.
pub fn sort_records(records: &[BenchmarkRecord], state: SortState) -> Vec<&BenchmarkRecord> {
    let mut sorted: Vec<&BenchmarkRecord> = records.iter().collect();
    if let SortState::Sorted { column, direction } = state {
        sorted.sort_by(|a, b| column.compare(a, b, direction).then_with(|| a.name.cmp(&b.name)));
    }
    sorted
}
