//! Static rendering for the h-matched tracker.
//!
//! This crate turns a [`Dataset`] plus the metric outputs from
//! `hmatch-core` into the files that make up the public page.
//!
//! # Quick Start
//!
//! ```no_run
//! use hmatch_core::{Dataset, MetricsConfig, SortState, SystemClock};
//! use hmatch_report::{render_and_write, ReportConfig};
//!
//! let dataset = Dataset::embedded()?;
//! let written = render_and_write(
//!     &dataset,
//!     SortState::Unsorted,
//!     &SystemClock,
//!     &MetricsConfig::default(),
//!     &ReportConfig::default(),
//! )?;
//! println!("wrote {} files", written.len());
//! # Ok::<(), hmatch_report::ReportError>(())
//! ```
//!
//! # Modules
//!
//! - [`model`] - Render-scoped view model
//! - [`svg`] - Scatter chart with trend line
//! - [`html`] - Self-contained HTML page
//! - [`markdown`] - Markdown table and statistics
//! - [`io`] - Reading datasets and writing output files

#![warn(rust_2018_idioms)]
#![deny(unsafe_code)]

pub mod error;
pub mod html;
pub mod io;
pub mod markdown;
pub mod model;
pub mod svg;

pub use error::{ReportError, Result};
pub use model::{ChartPoint, PageModel, ReportConfig, TableRow};

use hmatch_core::{Clock, Dataset, MetricsConfig, SortState};
use std::path::PathBuf;

/// All rendered artifacts for one page build.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderedSite {
    pub html: String,
    pub svg: String,
    pub markdown: String,
    pub stats_json: String,
}

/// Render every artifact for `dataset`.
///
/// # Errors
///
/// Returns an error if the statistics cannot be serialized.
pub fn render_site(
    dataset: &Dataset,
    sort: SortState,
    clock: &dyn Clock,
    metrics: &MetricsConfig,
    report: &ReportConfig,
) -> Result<RenderedSite> {
    let model = PageModel::build(dataset, sort, clock, metrics, report);

    Ok(RenderedSite {
        html: html::render_page(&model),
        svg: svg::render_chart(&model),
        markdown: markdown::generate_summary(&model),
        stats_json: serde_json::to_string_pretty(&model.stats)?,
    })
}

/// Render every artifact and write it to `report.output_dir`.
///
/// Writes `index.html`, `chart.svg`, `summary.md` and `stats.json`.
///
/// # Errors
///
/// Returns an error if serialization or writing output files fails.
pub fn render_and_write(
    dataset: &Dataset,
    sort: SortState,
    clock: &dyn Clock,
    metrics: &MetricsConfig,
    report: &ReportConfig,
) -> Result<Vec<PathBuf>> {
    let site = render_site(dataset, sort, clock, metrics, report)?;
    io::write_site(&site, &report.output_dir)
}
