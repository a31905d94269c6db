// Copyright 2025 h-matched Contributors
// SPDX-License-Identifier: Apache-2.0

//! Tunable constants for the derived metrics.
//!
//! The chart viewport, the placement offset for unsolved benchmarks and the
//! "recent" window are presentation choices, so they live here instead of
//! being baked into the metric functions. Every field has a default, so a
//! partially filled settings file deserializes cleanly.

use crate::error::ConfigError;
use serde::{Deserialize, Serialize};

/// Visible chart rectangle in data coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Viewport {
    /// Earliest release year shown
    pub x_min: f64,
    /// Latest release year shown
    pub x_max: f64,
    /// Lowest time-to-solve shown
    pub y_min: f64,
    /// Highest time-to-solve shown
    pub y_max: f64,
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            x_min: 2005.0,
            x_max: 2035.0,
            y_min: -1.0,
            y_max: 10.0,
        }
    }
}

impl Viewport {
    pub fn width(&self) -> f64 {
        self.x_max - self.x_min
    }

    pub fn height(&self) -> f64 {
        self.y_max - self.y_min
    }

    /// Whether `(x, y)` is inside or on the edge, with a small tolerance.
    pub fn contains(&self, x: f64, y: f64) -> bool {
        const TOLERANCE: f64 = 1e-9;
        x >= self.x_min - TOLERANCE
            && x <= self.x_max + TOLERANCE
            && y >= self.y_min - TOLERANCE
            && y <= self.y_max + TOLERANCE
    }

    /// Clamp a y value into the visible range.
    pub fn clamp_y(&self, y: f64) -> f64 {
        y.clamp(self.y_min, self.y_max)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let bounds = [self.x_min, self.x_max, self.y_min, self.y_max];
        if bounds.iter().any(|v| !v.is_finite()) {
            return Err(ConfigError::InvalidViewport(format!(
                "bounds must be finite, got {:?}",
                bounds
            )));
        }
        if self.x_min >= self.x_max {
            return Err(ConfigError::InvalidViewport(format!(
                "x_min {} must be below x_max {}",
                self.x_min, self.x_max
            )));
        }
        if self.y_min >= self.y_max {
            return Err(ConfigError::InvalidViewport(format!(
                "y_min {} must be below y_max {}",
                self.y_min, self.y_max
            )));
        }
        Ok(())
    }
}

/// Configuration for the metric functions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MetricsConfig {
    /// Chart rectangle used for trend clipping and point placement.
    pub viewport: Viewport,
    /// Years past the current year where unsolved benchmarks are placed.
    pub unsolved_offset_years: i32,
    /// Length of the window for the recent-average statistic.
    pub recent_window_years: i64,
}

impl Default for MetricsConfig {
    fn default() -> Self {
        Self {
            viewport: Viewport::default(),
            unsolved_offset_years: 10,
            recent_window_years: 3,
        }
    }
}

impl MetricsConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.viewport.validate()?;
        if self.recent_window_years < 0 {
            return Err(ConfigError::InvalidRecentWindow(self.recent_window_years));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = MetricsConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.viewport.width(), 30.0);
        assert_eq!(config.viewport.height(), 11.0);
    }

    #[test]
    fn test_inverted_viewport_rejected() {
        let config = MetricsConfig {
            viewport: Viewport {
                x_min: 2030.0,
                x_max: 2010.0,
                ..Viewport::default()
            },
            ..MetricsConfig::default()
        };
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("x_min"));
    }

    #[test]
    fn test_non_finite_viewport_rejected() {
        let viewport = Viewport {
            y_max: f64::INFINITY,
            ..Viewport::default()
        };
        assert!(viewport.validate().is_err());
    }

    #[test]
    fn test_negative_window_rejected() {
        let config = MetricsConfig {
            recent_window_years: -1,
            ..MetricsConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidRecentWindow(-1))
        ));
    }

    #[test]
    fn test_partial_config_uses_defaults() {
        let config: MetricsConfig =
            serde_json::from_str(r#"{"viewport": {"y_max": 12.0}}"#).unwrap();
        assert_eq!(config.viewport.y_max, 12.0);
        assert_eq!(config.viewport.x_min, 2005.0);
        assert_eq!(config.unsolved_offset_years, 10);
    }

    #[test]
    fn test_contains_and_clamp() {
        let viewport = Viewport::default();
        assert!(viewport.contains(2005.0, -1.0));
        assert!(!viewport.contains(2004.0, 0.0));
        assert_eq!(viewport.clamp_y(42.0), 10.0);
        assert_eq!(viewport.clamp_y(-3.0), -1.0);
    }
}
