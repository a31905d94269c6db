// Copyright 2025 h-matched Contributors
// SPDX-License-Identifier: Apache-2.0

//! Error types for dataset loading and metric configuration.

use thiserror::Error;

/// Errors raised while normalizing raw benchmark records into a [`crate::Dataset`].
#[derive(Debug, Error)]
pub enum DatasetError {
    /// Record at the given position has no usable name
    #[error("Record #{index} is missing a benchmark name")]
    MissingName { index: usize },

    /// Two records share the same name
    #[error("Duplicate benchmark name: {0}")]
    DuplicateName(String),

    /// Release date is absent or cannot be parsed
    #[error("Invalid release date for {name}: {value:?}")]
    InvalidReleaseDate { name: String, value: Option<String> },

    /// Dataset document is not valid JSON or does not match the record shape
    #[error("Dataset parse error: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Errors raised when validating [`crate::MetricsConfig`].
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Viewport bounds are empty, inverted or not finite
    #[error("Invalid chart viewport: {0}")]
    InvalidViewport(String),

    /// Recent-window length is negative
    #[error("Invalid recent window: {0} years")]
    InvalidRecentWindow(i64),
}

/// Error raised when parsing a sort column or direction.
#[derive(Debug, Error)]
#[error("Unknown sort {kind}: {value} (expected one of {expected})")]
pub struct SortParseError {
    pub kind: &'static str,
    pub value: String,
    pub expected: &'static str,
}

/// Result type for dataset operations.
pub type Result<T> = std::result::Result<T, DatasetError>;
