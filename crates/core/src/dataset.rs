// Copyright 2025 h-matched Contributors
// SPDX-License-Identifier: Apache-2.0

//! Benchmark records and the immutable dataset they live in.
//!
//! Records arrive in a loose "raw" shape (string dates, legacy field names,
//! optional achievement details) and are normalized once by
//! [`Dataset::from_raw`]. After that the dataset is read-only: metric
//! functions and the view take `&Dataset` or `&[BenchmarkRecord]`.
//!
//! # Normalization rules
//!
//! - A blank name, a duplicate name or an unparseable release date rejects
//!   the whole dataset.
//! - An unparseable solved date degrades the record to unsolved.
//! - A solved date before the release date is kept and reported through
//!   [`Dataset::anomalies`].

use crate::duration::{time_to_solve, TimeToSolve};
use crate::error::{DatasetError, Result};
use chrono::{DateTime, NaiveDate};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use tracing::warn;

/// Dataset compiled into the crate.
const EMBEDDED_DATASET: &str = include_str!("../data/benchmarks.json");

/// Human baseline reported alongside an achievement.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HumanBaseline {
    /// Reported human score, as displayed.
    pub score: Option<String>,
    /// Citation for the human score.
    pub source: Option<String>,
}

/// Details about the result that matched human performance.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Achievement {
    /// Score reached by the AI system, as displayed.
    pub score: Option<String>,
    /// Citation for the achievement.
    pub source: Option<String>,
    /// Human baseline the score was compared against.
    pub human_performance: Option<HumanBaseline>,
}

impl Achievement {
    /// Whether there is anything worth showing.
    pub fn is_empty(&self) -> bool {
        self.score.is_none() && self.source.is_none() && self.human_performance.is_none()
    }
}

/// One tracked benchmark.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BenchmarkRecord {
    /// Unique benchmark name.
    pub name: String,
    /// Date the benchmark was published.
    pub release_date: NaiveDate,
    /// Date AI reached human level, if it has.
    pub solved_date: Option<NaiveDate>,
    /// Free-text note on where the dates come from.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source_text: Option<String>,
    /// Supporting URLs.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub source_references: Vec<String>,
    /// Benchmark homepage.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub website_url: Option<String>,
    /// Benchmark paper.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub paper_url: Option<String>,
    /// Achievement details.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub achievement: Option<Achievement>,
}

impl BenchmarkRecord {
    /// Create an unsolved record with no citation metadata.
    pub fn new(name: impl Into<String>, release_date: NaiveDate) -> Self {
        Self {
            name: name.into(),
            release_date,
            solved_date: None,
            source_text: None,
            source_references: Vec::new(),
            website_url: None,
            paper_url: None,
            achievement: None,
        }
    }

    /// Set the solved date.
    pub fn solved_on(mut self, date: NaiveDate) -> Self {
        self.solved_date = Some(date);
        self
    }

    /// Set the benchmark homepage.
    pub fn with_website(mut self, url: impl Into<String>) -> Self {
        self.website_url = Some(url.into());
        self
    }

    /// Set the paper link.
    pub fn with_paper(mut self, url: impl Into<String>) -> Self {
        self.paper_url = Some(url.into());
        self
    }

    /// Whether the benchmark has been h-matched.
    pub fn is_solved(&self) -> bool {
        self.solved_date.is_some()
    }

    /// Elapsed years from release to h-matched.
    pub fn time_to_solve(&self) -> TimeToSolve {
        time_to_solve(self.release_date, self.solved_date)
    }
}

/// Raw `solved` field: a bare date string or a detailed object.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum RawSolved {
    /// `"2024-06-15"`
    Date(String),
    /// `{ "date": "2024-06-15", "score": "85%", ... }`
    Detailed(RawSolvedDetail),
    /// Anything else; treated as a malformed date.
    Other(serde_json::Value),
}

/// Detailed raw `solved` object.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawSolvedDetail {
    #[serde(default)]
    pub date: Option<serde_json::Value>,
    #[serde(default)]
    pub score: Option<serde_json::Value>,
    #[serde(default)]
    pub source: Option<String>,
    #[serde(default, alias = "achievementSource")]
    pub achievement_source: Option<String>,
    #[serde(default, alias = "humanPerformance")]
    pub human_performance: Option<RawHumanBaseline>,
}

/// Raw human-baseline object.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawHumanBaseline {
    #[serde(default)]
    pub score: Option<serde_json::Value>,
    #[serde(default)]
    pub source: Option<String>,
}

/// A record as it appears in a dataset document, before validation.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawBenchmarkRecord {
    #[serde(default, alias = "benchmark")]
    pub name: Option<String>,
    #[serde(default, alias = "releaseDate")]
    pub release: Option<String>,
    #[serde(default, alias = "solvedDate")]
    pub solved: Option<RawSolved>,
    #[serde(default, alias = "url", alias = "websiteUrl")]
    pub website_url: Option<String>,
    #[serde(default, alias = "paperUrl")]
    pub paper_url: Option<String>,
    #[serde(default, alias = "sourceText", alias = "source")]
    pub source_text: Option<String>,
    #[serde(default, alias = "sourceReferences")]
    pub source_references: Vec<String>,
}

/// A record whose solved date precedes its release date.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DateAnomaly {
    pub name: String,
    pub release_date: NaiveDate,
    pub solved_date: NaiveDate,
    pub years: f64,
}

/// Validated, immutable list of benchmark records in source order.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Dataset {
    records: Vec<BenchmarkRecord>,
}

impl Dataset {
    /// Load the dataset compiled into this crate.
    pub fn embedded() -> Result<Self> {
        Self::from_json_str(EMBEDDED_DATASET)
    }

    /// Parse and normalize a JSON array of raw records.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let raw: Vec<RawBenchmarkRecord> = serde_json::from_str(json)?;
        Self::from_raw(raw)
    }

    /// Normalize raw records.
    pub fn from_raw(raw: Vec<RawBenchmarkRecord>) -> Result<Self> {
        let records = raw
            .into_iter()
            .enumerate()
            .map(|(index, record)| normalize(index, record))
            .collect::<Result<Vec<_>>>()?;
        Self::from_records(records)
    }

    /// Build a dataset from already-typed records, checking name uniqueness.
    pub fn from_records(records: Vec<BenchmarkRecord>) -> Result<Self> {
        let mut seen = HashSet::with_capacity(records.len());
        for (index, record) in records.iter().enumerate() {
            if record.name.trim().is_empty() {
                return Err(DatasetError::MissingName { index });
            }
            if !seen.insert(record.name.as_str()) {
                return Err(DatasetError::DuplicateName(record.name.clone()));
            }
        }

        let dataset = Self { records };
        for anomaly in dataset.anomalies() {
            warn!(
                benchmark = %anomaly.name,
                release = %anomaly.release_date,
                solved = %anomaly.solved_date,
                years = anomaly.years,
                "Solved date precedes release date"
            );
        }
        Ok(dataset)
    }

    /// All records in source order.
    pub fn records(&self) -> &[BenchmarkRecord] {
        &self.records
    }

    /// Number of records.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the dataset has no records.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Iterate records in source order.
    pub fn iter(&self) -> std::slice::Iter<'_, BenchmarkRecord> {
        self.records.iter()
    }

    /// Look up a record by name.
    pub fn get(&self, name: &str) -> Option<&BenchmarkRecord> {
        self.records.iter().find(|r| r.name == name)
    }

    /// Records with a known solved date.
    pub fn solved(&self) -> impl Iterator<Item = &BenchmarkRecord> {
        self.records.iter().filter(|r| r.is_solved())
    }

    /// Records still waiting for human-level performance.
    pub fn unsolved(&self) -> impl Iterator<Item = &BenchmarkRecord> {
        self.records.iter().filter(|r| !r.is_solved())
    }

    /// Records whose time-to-solve comes out negative.
    pub fn anomalies(&self) -> Vec<DateAnomaly> {
        self.records
            .iter()
            .filter_map(|r| match (r.solved_date, r.time_to_solve()) {
                (Some(solved_date), TimeToSolve::Solved(years)) if solved_date < r.release_date => {
                    Some(DateAnomaly {
                        name: r.name.clone(),
                        release_date: r.release_date,
                        solved_date,
                        years,
                    })
                }
                _ => None,
            })
            .collect()
    }
}

impl<'a> IntoIterator for &'a Dataset {
    type Item = &'a BenchmarkRecord;
    type IntoIter = std::slice::Iter<'a, BenchmarkRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}

/// Parse `YYYY-MM-DD`, falling back to the date part of an RFC 3339 timestamp.
pub fn parse_date(value: &str) -> Option<NaiveDate> {
    let value = value.trim();
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .ok()
        .or_else(|| DateTime::parse_from_rfc3339(value).ok().map(|dt| dt.date_naive()))
}

/// Display text for a loosely-typed JSON scalar; `null` becomes `None`.
fn score_to_string(value: serde_json::Value) -> Option<String> {
    match value {
        serde_json::Value::Null => None,
        serde_json::Value::String(s) => Some(s),
        other => Some(other.to_string()),
    }
}

fn normalize(index: usize, raw: RawBenchmarkRecord) -> Result<BenchmarkRecord> {
    let name = raw
        .name
        .map(|n| n.trim().to_string())
        .filter(|n| !n.is_empty())
        .ok_or(DatasetError::MissingName { index })?;

    let release_date = raw
        .release
        .as_deref()
        .and_then(parse_date)
        .ok_or_else(|| DatasetError::InvalidReleaseDate {
            name: name.clone(),
            value: raw.release.clone(),
        })?;

    let (solved_text, detail) = match raw.solved {
        None => (None, None),
        Some(RawSolved::Date(date)) => (Some(date), None),
        Some(RawSolved::Detailed(detail)) => (detail.date.clone().and_then(score_to_string), Some(detail)),
        Some(RawSolved::Other(value)) => (score_to_string(value), None),
    };

    let solved_date = match solved_text.as_deref().map(str::trim) {
        None | Some("") => None,
        Some(text) => {
            let parsed = parse_date(text);
            if parsed.is_none() {
                warn!(benchmark = %name, value = %text, "Unparseable solved date, treating as unsolved");
            }
            parsed
        }
    };

    let achievement = detail
        .map(|d| Achievement {
            score: d.score.and_then(score_to_string),
            source: d.source.or(d.achievement_source),
            human_performance: d.human_performance.map(|h| HumanBaseline {
                score: h.score.and_then(score_to_string),
                source: h.source,
            }),
        })
        .filter(|a| !a.is_empty());

    Ok(BenchmarkRecord {
        name,
        release_date,
        solved_date,
        source_text: raw.source_text,
        source_references: raw.source_references,
        website_url: raw.website_url,
        paper_url: raw.paper_url,
        achievement,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    #[test]
    fn test_embedded_dataset_loads() {
        let dataset = Dataset::embedded().unwrap();
        assert!(!dataset.is_empty());
        assert!(dataset.get("SQuAD 1.1").is_some());
        assert!(dataset.anomalies().is_empty());
    }

    #[test]
    fn test_parse_canonical_record() {
        let dataset = Dataset::from_json_str(
            r#"[{"name": "A", "release": "2016-06-16", "solved": "2017-06-15", "website_url": "https://a.example"}]"#,
        )
        .unwrap();
        let a = dataset.get("A").unwrap();
        assert_eq!(a.release_date, date("2016-06-16"));
        assert_eq!(a.solved_date, Some(date("2017-06-15")));
        assert_eq!(a.website_url.as_deref(), Some("https://a.example"));
        assert!(a.achievement.is_none());
    }

    #[test]
    fn test_parse_legacy_record_shape() {
        let dataset = Dataset::from_json_str(
            r#"[{
                "benchmark": "MMLU",
                "release": "2020-09-07",
                "solved": {
                    "date": "2024-12-05",
                    "score": 90.1,
                    "achievementSource": "https://example.org/result",
                    "humanPerformance": {"score": "89.8%", "source": "https://example.org/human"}
                },
                "timeToSolve": 4.24,
                "url": "https://example.org",
                "paperUrl": "https://arxiv.org/pdf/2009.03300"
            }]"#,
        )
        .unwrap();
        let mmlu = dataset.get("MMLU").unwrap();
        assert_eq!(mmlu.solved_date, Some(date("2024-12-05")));
        assert_eq!(mmlu.paper_url.as_deref(), Some("https://arxiv.org/pdf/2009.03300"));
        let achievement = mmlu.achievement.as_ref().unwrap();
        assert_eq!(achievement.score.as_deref(), Some("90.1"));
        assert_eq!(achievement.source.as_deref(), Some("https://example.org/result"));
        assert_eq!(
            achievement.human_performance.as_ref().unwrap().score.as_deref(),
            Some("89.8%")
        );
    }

    #[test]
    fn test_legacy_source_field_kept_as_source_text() {
        let dataset = Dataset::from_json_str(
            r#"[{"name": "A", "release": "2016-06-16", "solved": "2017-06-15", "source": "Paper table 3"}]"#,
        )
        .unwrap();
        assert_eq!(dataset.get("A").unwrap().source_text.as_deref(), Some("Paper table 3"));
    }

    #[test]
    fn test_null_solved_is_unsolved() {
        let dataset =
            Dataset::from_json_str(r#"[{"name": "B", "release": "2018-06-11", "solved": null}]"#)
                .unwrap();
        assert!(!dataset.get("B").unwrap().is_solved());
        assert_eq!(dataset.unsolved().count(), 1);
    }

    #[test]
    fn test_malformed_solved_date_degrades_to_unsolved() {
        let dataset =
            Dataset::from_json_str(r#"[{"name": "B", "release": "2018-06-11", "solved": "soon"}]"#)
                .unwrap();
        assert_eq!(dataset.get("B").unwrap().solved_date, None);
    }

    #[test]
    fn test_non_string_solved_date_degrades_to_unsolved() {
        let dataset = Dataset::from_json_str(
            r#"[
                {"name": "A", "release": "2016-06-16", "solved": "2017-06-15"},
                {"name": "B", "release": "2018-06-11", "solved": 20190315},
                {"name": "C", "release": "2018-06-11", "solved": {"date": 2019, "score": "90%"}},
                {"name": "D", "release": "2018-06-11", "solved": true}
            ]"#,
        )
        .unwrap();
        assert_eq!(dataset.len(), 4);
        assert!(dataset.get("A").unwrap().is_solved());
        assert_eq!(dataset.get("B").unwrap().solved_date, None);
        assert_eq!(dataset.get("C").unwrap().solved_date, None);
        assert_eq!(
            dataset.get("C").unwrap().achievement.as_ref().unwrap().score.as_deref(),
            Some("90%")
        );
        assert_eq!(dataset.get("D").unwrap().solved_date, None);
        assert_eq!(dataset.unsolved().count(), 3);
    }

    #[test]
    fn test_rfc3339_dates_are_accepted() {
        assert_eq!(parse_date("2024-12-21T10:00:00Z"), Some(date("2024-12-21")));
        assert_eq!(parse_date(" 2024-12-21 "), Some(date("2024-12-21")));
        assert_eq!(parse_date("21/12/2024"), None);
    }

    #[test]
    fn test_missing_name_rejected() {
        let err = Dataset::from_json_str(r#"[{"release": "2018-06-11"}]"#).unwrap_err();
        assert!(matches!(err, DatasetError::MissingName { index: 0 }));

        let err = Dataset::from_json_str(r#"[{"name": "  ", "release": "2018-06-11"}]"#).unwrap_err();
        assert!(matches!(err, DatasetError::MissingName { index: 0 }));
    }

    #[test]
    fn test_duplicate_name_rejected() {
        let err = Dataset::from_json_str(
            r#"[{"name": "A", "release": "2018-06-11"}, {"name": "A", "release": "2019-01-01"}]"#,
        )
        .unwrap_err();
        assert!(err.to_string().contains("Duplicate benchmark name: A"));
    }

    #[test]
    fn test_invalid_release_rejected() {
        let err = Dataset::from_json_str(r#"[{"name": "A", "release": "June 2018"}]"#).unwrap_err();
        assert!(matches!(err, DatasetError::InvalidReleaseDate { .. }));

        let err = Dataset::from_json_str(r#"[{"name": "A"}]"#).unwrap_err();
        assert!(matches!(err, DatasetError::InvalidReleaseDate { value: None, .. }));
    }

    #[test]
    fn test_not_json_rejected() {
        assert!(matches!(
            Dataset::from_json_str("not json").unwrap_err(),
            DatasetError::Parse(_)
        ));
    }

    #[test]
    fn test_negative_duration_reported_as_anomaly() {
        let dataset = Dataset::from_records(vec![
            BenchmarkRecord::new("Backwards", date("2020-01-01")).solved_on(date("2019-07-01")),
            BenchmarkRecord::new("Forwards", date("2020-01-01")).solved_on(date("2021-01-01")),
        ])
        .unwrap();
        let anomalies = dataset.anomalies();
        assert_eq!(anomalies.len(), 1);
        assert_eq!(anomalies[0].name, "Backwards");
        assert!(anomalies[0].years < 0.0);
    }

    #[test]
    fn test_dataset_preserves_source_order() {
        let dataset = Dataset::from_records(vec![
            BenchmarkRecord::new("Z", date("2020-01-01")),
            BenchmarkRecord::new("A", date("2010-01-01")),
        ])
        .unwrap();
        let names: Vec<_> = dataset.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, vec!["Z", "A"]);
    }
}
