// Copyright 2025 h-matched Contributors
// SPDX-License-Identifier: Apache-2.0

//! Least-squares trend of time-to-solve against release year.
//!
//! Only solved records take part in the fit. The fitted line is clipped to
//! the chart [`Viewport`] and reduced to its two endpoints. If the line never
//! crosses the rectangle, or there is nothing to fit, the trend is empty.

use crate::calendar::decimal_year;
use crate::config::Viewport;
use crate::dataset::BenchmarkRecord;
use serde::Serialize;
use tracing::debug;

/// Slopes closer to zero than this are treated as horizontal.
const SLOPE_EPSILON: f64 = 1e-12;

/// Below this, a sum of squares counts as zero.
const VARIANCE_EPSILON: f64 = 1e-12;

/// Ordinary least-squares fit `y = slope * x + intercept`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct LinearFit {
    pub slope: f64,
    pub intercept: f64,
    /// Coefficient of determination, 1.0 when `y` has no variance.
    pub r_squared: f64,
}

impl LinearFit {
    pub fn predict(&self, x: f64) -> f64 {
        self.slope * x + self.intercept
    }
}

/// Fit a line through `(x, y)` points.
///
/// Returns `None` for fewer than two points or when every `x` is the same.
pub fn least_squares(points: &[(f64, f64)]) -> Option<LinearFit> {
    if points.len() < 2 {
        return None;
    }

    let n = points.len() as f64;
    let mean_x = points.iter().map(|(x, _)| x).sum::<f64>() / n;
    let mean_y = points.iter().map(|(_, y)| y).sum::<f64>() / n;

    let (sxx, sxy) = points.iter().fold((0.0, 0.0), |(sxx, sxy), (x, y)| {
        let dx = x - mean_x;
        (sxx + dx * dx, sxy + dx * (y - mean_y))
    });
    if sxx < VARIANCE_EPSILON {
        return None;
    }

    let slope = sxy / sxx;
    let intercept = mean_y - slope * mean_x;

    let (ss_tot, ss_res) = points.iter().fold((0.0, 0.0), |(tot, res), (x, y)| {
        let residual = y - (slope * x + intercept);
        (tot + (y - mean_y).powi(2), res + residual * residual)
    });
    let r_squared = if ss_tot < VARIANCE_EPSILON {
        1.0
    } else {
        1.0 - ss_res / ss_tot
    };

    if !(slope.is_finite() && intercept.is_finite() && r_squared.is_finite()) {
        return None;
    }

    Some(LinearFit {
        slope,
        intercept,
        r_squared,
    })
}

/// `(release decimal year, time-to-solve)` for every solved record.
pub fn solved_points(records: &[BenchmarkRecord]) -> Vec<(f64, f64)> {
    records
        .iter()
        .filter_map(|r| {
            r.time_to_solve()
                .years()
                .map(|years| (decimal_year(r.release_date), years))
        })
        .collect()
}

/// A trend endpoint in data coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TrendPoint {
    pub x: f64,
    pub y: f64,
}

/// Clipped trend line: empty, or exactly two endpoints ordered by `x`.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct TrendLine {
    pub fit: Option<LinearFit>,
    pub points: Vec<TrendPoint>,
}

impl TrendLine {
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}

/// Clip `y = slope * x + intercept` to the viewport.
pub fn clip_to_viewport(slope: f64, intercept: f64, viewport: &Viewport) -> Vec<TrendPoint> {
    if !slope.is_finite() || !intercept.is_finite() {
        return Vec::new();
    }

    if slope.abs() < SLOPE_EPSILON {
        return if viewport.contains(viewport.x_min, intercept) {
            vec![
                TrendPoint { x: viewport.x_min, y: intercept },
                TrendPoint { x: viewport.x_max, y: intercept },
            ]
        } else {
            Vec::new()
        };
    }

    let y_at = |x: f64| slope * x + intercept;
    let x_at = |y: f64| (y - intercept) / slope;

    // Positive slopes enter left/bottom and leave top/right; negative slopes
    // enter left/top and leave bottom/right. Collecting every in-bounds edge
    // crossing and ordering by x covers both.
    let mut crossings: Vec<TrendPoint> = [
        TrendPoint { x: viewport.x_min, y: y_at(viewport.x_min) },
        TrendPoint { x: viewport.x_max, y: y_at(viewport.x_max) },
        TrendPoint { x: x_at(viewport.y_min), y: viewport.y_min },
        TrendPoint { x: x_at(viewport.y_max), y: viewport.y_max },
    ]
    .into_iter()
    .filter(|p| viewport.contains(p.x, p.y))
    .collect();

    crossings.sort_by(|a, b| a.x.total_cmp(&b.x));
    crossings.dedup_by(|a, b| (a.x - b.x).abs() < 1e-9 && (a.y - b.y).abs() < 1e-9);

    match (crossings.first(), crossings.last()) {
        (Some(first), Some(last)) if crossings.len() >= 2 => vec![*first, *last],
        _ => Vec::new(),
    }
}

/// Fit and clip the trend over the solved subset of `records`.
pub fn fit_trend_line(records: &[BenchmarkRecord], viewport: &Viewport) -> TrendLine {
    let points = solved_points(records);
    let Some(fit) = least_squares(&points) else {
        debug!(solved = points.len(), "Not enough solved benchmarks for a trend line");
        return TrendLine::default();
    };

    let clipped = clip_to_viewport(fit.slope, fit.intercept, viewport);
    debug!(
        slope = fit.slope,
        intercept = fit.intercept,
        r_squared = fit.r_squared,
        endpoints = clipped.len(),
        "Fitted trend line"
    );

    TrendLine {
        fit: Some(fit),
        points: clipped,
    }
}
