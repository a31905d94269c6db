//! Render-scoped view model.
//!
//! A [`PageModel`] is built from scratch for every render out of the dataset,
//! the current sort state and the metric outputs. Nothing in it is cached.

use chrono::NaiveDate;
use hmatch_core::{
    calculate_global_stats, decimal_year, fit_trend_line, format_duration, pastel_color,
    placement_year, round2, sort_records, Achievement, BenchmarkRecord, Clock, Dataset,
    DateAnomaly, FormattedDuration, GlobalStats, HslColor, MetricsConfig, SortState,
    TimeToSolve, TrendLine, Viewport,
};
use serde::{Deserialize, Serialize};

/// Report-level presentation settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReportConfig {
    /// Page and summary title.
    pub title: String,
    /// Directory the rendered files are written to.
    pub output_dir: String,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            title: "h-matched Tracker".to_string(),
            output_dir: "site".to_string(),
        }
    }
}

/// Format a date the way the table shows it, e.g. `Jun 16, 2016`.
pub fn format_date(date: NaiveDate) -> String {
    date.format("%b %-d, %Y").to_string()
}

/// One table row.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TableRow {
    pub name: String,
    pub release_display: String,
    pub solved_display: Option<String>,
    pub time_to_solve: TimeToSolve,
    /// e.g. `1.00 years` or `Unsolved`
    pub time_to_solve_label: String,
    pub duration: FormattedDuration,
    pub color: HslColor,
    pub website_url: Option<String>,
    pub paper_url: Option<String>,
    pub achievement: Option<Achievement>,
}

impl TableRow {
    fn from_record(record: &BenchmarkRecord) -> Self {
        let time_to_solve = record.time_to_solve();
        Self {
            name: record.name.clone(),
            release_display: format_date(record.release_date),
            solved_display: record.solved_date.map(format_date),
            time_to_solve,
            time_to_solve_label: time_to_solve.to_string(),
            duration: format_duration(time_to_solve),
            color: pastel_color(&record.name),
            website_url: record.website_url.clone(),
            paper_url: record.paper_url.clone(),
            achievement: record.achievement.clone(),
        }
    }
}

/// One scatter point in data coordinates.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartPoint {
    pub name: String,
    /// Release decimal year, two decimals.
    pub x: f64,
    /// Time-to-solve, or the clamped placement for unsolved benchmarks.
    pub y: f64,
    pub color: HslColor,
    pub unsolved: bool,
}

impl ChartPoint {
    fn from_record(record: &BenchmarkRecord, today: NaiveDate, metrics: &MetricsConfig) -> Self {
        let release_year = decimal_year(record.release_date);
        let (y, unsolved) = match record.time_to_solve() {
            TimeToSolve::Solved(years) => (years, false),
            TimeToSolve::Unsolved => {
                let placed = placement_year(None, today, metrics.unsolved_offset_years);
                (metrics.viewport.clamp_y(round2(placed - release_year)), true)
            }
        };
        Self {
            name: record.name.clone(),
            x: round2(release_year),
            y,
            color: pastel_color(&record.name),
            unsolved,
        }
    }
}

/// Everything a renderer needs for one page.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PageModel {
    pub title: String,
    pub generated_on: NaiveDate,
    pub sort: SortState,
    pub viewport: Viewport,
    pub rows: Vec<TableRow>,
    /// Ordered by release date.
    pub points: Vec<ChartPoint>,
    pub trend: TrendLine,
    pub stats: GlobalStats,
    pub anomalies: Vec<DateAnomaly>,
}

impl PageModel {
    /// Build the model for `dataset` as of `clock.today()`.
    pub fn build(
        dataset: &Dataset,
        sort: SortState,
        clock: &dyn Clock,
        metrics: &MetricsConfig,
        report: &ReportConfig,
    ) -> Self {
        let today = clock.today();
        let records = dataset.records();

        let rows = sort_records(records, sort)
            .into_iter()
            .map(TableRow::from_record)
            .collect();

        let mut by_release: Vec<&BenchmarkRecord> = records.iter().collect();
        by_release.sort_by_key(|r| r.release_date);
        let points = by_release
            .into_iter()
            .map(|r| ChartPoint::from_record(r, today, metrics))
            .collect();

        Self {
            title: report.title.clone(),
            generated_on: today,
            sort,
            viewport: metrics.viewport,
            rows,
            points,
            trend: fit_trend_line(records, &metrics.viewport),
            stats: calculate_global_stats(records, clock, metrics),
            anomalies: dataset.anomalies(),
        }
    }
}
