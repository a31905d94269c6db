//! Layered settings for the CLI.
//!
//! Sources, lowest to highest precedence: built-in defaults, an optional
//! `hmatch.toml` (or the file passed with `--config`), then `HMATCH_`
//! environment variables using `__` as the nesting separator.

use anyhow::{Context, Result};
use config::{Config, Environment, File, Map};
use hmatch_core::MetricsConfig;
use hmatch_report::ReportConfig;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Default settings file looked up in the working directory.
pub const DEFAULT_CONFIG_FILE: &str = "hmatch.toml";

/// Environment variable prefix.
pub const ENV_PREFIX: &str = "HMATCH";

/// Complete CLI settings.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Metric constants and chart viewport.
    pub metrics: MetricsConfig,
    /// Page title and output directory.
    pub report: ReportConfig,
}

impl Settings {
    /// Load settings from defaults, file and the process environment.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        Self::load_from(path, None)
    }

    /// Load settings with an explicit environment map in place of the
    /// process environment.
    pub fn load_from(path: Option<&Path>, env: Option<Map<String, String>>) -> Result<Self> {
        let defaults = Config::try_from(&Settings::default()).context("Failed to encode default settings")?;

        let file = match path {
            Some(path) => File::from(path).required(true),
            None => File::from(Path::new(DEFAULT_CONFIG_FILE)).required(false),
        };

        let environment = Environment::with_prefix(ENV_PREFIX)
            .prefix_separator("_")
            .separator("__")
            .try_parsing(true)
            .source(env);

        let settings: Settings = Config::builder()
            .add_source(defaults)
            .add_source(file)
            .add_source(environment)
            .build()
            .context("Failed to load settings")?
            .try_deserialize()
            .context("Invalid settings")?;

        settings.metrics.validate()?;
        Ok(settings)
    }
}
