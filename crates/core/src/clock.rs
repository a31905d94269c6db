// Copyright 2025 h-matched Contributors
// SPDX-License-Identifier: Apache-2.0

//! Wall-clock access for the metrics that depend on "today".

use chrono::{NaiveDate, Utc};

/// Source of the current date.
#[cfg_attr(test, mockall::automock)]
pub trait Clock {
    /// Today's date in UTC.
    fn today(&self) -> NaiveDate;
}

/// Reads the system clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn today(&self) -> NaiveDate {
        Utc::now().date_naive()
    }
}

/// Always returns the same date.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedClock(pub NaiveDate);

impl Clock for FixedClock {
    fn today(&self) -> NaiveDate {
        self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixed_clock() {
        let d = NaiveDate::from_ymd_opt(2025, 1, 23).unwrap();
        assert_eq!(FixedClock(d).today(), d);
    }

    #[test]
    fn test_system_clock_is_recent() {
        let floor = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        assert!(SystemClock.today() > floor);
    }

    #[test]
    fn test_mock_clock() {
        let d = NaiveDate::from_ymd_opt(2030, 6, 1).unwrap();
        let mut clock = MockClock::new();
        clock.expect_today().times(1).return_const(d);
        assert_eq!(clock.today(), d);
    }
}
