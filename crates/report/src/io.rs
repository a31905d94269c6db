//! I/O operations for datasets and rendered output.
//!
//! This module reads dataset documents from disk and writes the rendered
//! page, chart, markdown summary and statistics into an output directory.

use crate::error::{ReportError, Result};
use crate::RenderedSite;
use hmatch_core::Dataset;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;

/// Rendered page file name.
pub const INDEX_FILE: &str = "index.html";

/// Standalone chart file name.
pub const CHART_FILE: &str = "chart.svg";

/// Markdown summary file name.
pub const SUMMARY_FILE: &str = "summary.md";

/// Statistics JSON file name.
pub const STATS_FILE: &str = "stats.json";

/// Ensure the output directory exists.
pub fn ensure_output_dir(dir: impl AsRef<Path>) -> Result<()> {
    let dir = dir.as_ref();
    fs::create_dir_all(dir).map_err(|e| ReportError::io(dir, e))
}

fn write_file(path: PathBuf, contents: &str) -> Result<PathBuf> {
    fs::write(&path, contents).map_err(|e| ReportError::io(&path, e))?;
    Ok(path)
}

/// Write every rendered artifact into `dir`, returning the written paths.
pub fn write_site(site: &RenderedSite, dir: impl AsRef<Path>) -> Result<Vec<PathBuf>> {
    let dir = dir.as_ref();
    ensure_output_dir(dir)?;

    let written = vec![
        write_file(dir.join(INDEX_FILE), &site.html)?,
        write_file(dir.join(CHART_FILE), &site.svg)?,
        write_file(dir.join(SUMMARY_FILE), &site.markdown)?,
        write_file(dir.join(STATS_FILE), &site.stats_json)?,
    ];

    info!(dir = %dir.display(), files = written.len(), "Site written");
    Ok(written)
}

/// Read and validate a dataset from a JSON file.
pub fn read_dataset(path: impl AsRef<Path>) -> Result<Dataset> {
    let path = path.as_ref();
    let content = fs::read_to_string(path).map_err(|e| ReportError::io(path, e))?;
    let dataset = Dataset::from_json_str(&content)?;
    info!(path = %path.display(), records = dataset.len(), "Dataset loaded");
    Ok(dataset)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_read_dataset_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("data.json");
        fs::write(&path, r#"[{"name": "A", "release": "2016-06-16", "solved": "2017-06-15"}]"#).unwrap();

        let dataset = read_dataset(&path).unwrap();
        assert_eq!(dataset.len(), 1);
    }

    #[test]
    fn test_read_missing_dataset() {
        let dir = tempfile::tempdir().unwrap();
        let err = read_dataset(dir.path().join("missing.json")).unwrap_err();
        assert!(matches!(err, ReportError::Io { .. }));
        assert!(err.to_string().contains("missing.json"));
    }

    #[test]
    fn test_read_invalid_dataset() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("data.json");
        fs::write(&path, r#"[{"name": "A", "release": "yesterday"}]"#).unwrap();
        assert!(matches!(read_dataset(&path).unwrap_err(), ReportError::Dataset(_)));
    }

    #[test]
    fn test_write_site_creates_nested_dir() {
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("nested").join("site");
        let site = RenderedSite {
            html: "<html></html>".to_string(),
            svg: "<svg></svg>".to_string(),
            markdown: "# t".to_string(),
            stats_json: "{}".to_string(),
        };

        let written = write_site(&site, &out).unwrap();
        assert_eq!(written.len(), 4);
        assert_eq!(fs::read_to_string(out.join(INDEX_FILE)).unwrap(), "<html></html>");
        assert_eq!(fs::read_to_string(out.join(STATS_FILE)).unwrap(), "{}");
    }
}
