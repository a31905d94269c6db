//! CLI for the h-matched tracker.
//!
//! This crate provides the `hmatch` command-line interface: rendering the
//! static page, printing statistics and the benchmark table, and
//! validating dataset files.

#![warn(missing_docs, rust_2018_idioms)]
#![deny(unsafe_code)]

pub mod settings;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;
use hmatch_core::{calculate_global_stats, Dataset, GlobalStats, SortState, SystemClock};
use hmatch_report::{markdown, PageModel};
use settings::Settings;
use std::path::{Path, PathBuf};
use tracing::debug;
use tracing_subscriber::EnvFilter;

/// h-matched tracker CLI.
#[derive(Parser, Debug)]
#[command(name = "hmatch")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Settings file (defaults to ./hmatch.toml when present).
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Log output format.
    #[arg(long, global = true, value_enum, default_value_t = LogFormat::Text)]
    pub log_format: LogFormat,

    /// Verbose logging.
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Subcommand to run.
    #[command(subcommand)]
    pub command: Commands,
}

/// Log line format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogFormat {
    /// Human-readable lines.
    Text,
    /// One JSON object per line.
    Json,
}

/// Available CLI commands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Render the page and write it to the output directory.
    ///
    /// Writes index.html, chart.svg, summary.md and stats.json.
    Render {
        /// Dataset file (defaults to the embedded dataset).
        #[arg(short, long)]
        data: Option<PathBuf>,

        /// Output directory override.
        #[arg(short, long)]
        output: Option<String>,

        /// Table sort: `none`, `column` or `column:asc|desc`.
        #[arg(short, long, default_value = "none")]
        sort: SortState,
    },

    /// Print global statistics.
    Stats {
        /// Dataset file (defaults to the embedded dataset).
        #[arg(short, long)]
        data: Option<PathBuf>,

        /// Print as JSON.
        #[arg(long)]
        json: bool,
    },

    /// Print the benchmark table as Markdown.
    Table {
        /// Dataset file (defaults to the embedded dataset).
        #[arg(short, long)]
        data: Option<PathBuf>,

        /// Table sort: `none`, `column` or `column:asc|desc`.
        #[arg(short, long, default_value = "none")]
        sort: SortState,
    },

    /// Load a dataset and report date anomalies.
    Validate {
        /// Dataset file (defaults to the embedded dataset).
        #[arg(short, long)]
        data: Option<PathBuf>,
    },
}

/// Install the global tracing subscriber. `RUST_LOG` overrides the level.
pub fn init_tracing(verbose: bool, format: LogFormat) {
    let level = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr);

    let _ = match format {
        LogFormat::Text => builder.try_init(),
        LogFormat::Json => builder.json().try_init(),
    };
}

fn load_dataset(path: Option<&Path>) -> Result<Dataset> {
    match path {
        Some(path) => hmatch_report::io::read_dataset(path)
            .with_context(|| format!("Failed to load dataset from {}", path.display())),
        None => Dataset::embedded().context("Embedded dataset is invalid"),
    }
}

fn years(value: Option<f64>) -> String {
    value.map_or_else(|| "n/a".to_string(), |v| format!("{:.2} years", v))
}

fn percent(value: Option<f64>) -> String {
    value.map_or_else(|| "n/a".to_string(), |v| format!("{:.0}%", v * 100.0))
}

fn print_stats(stats: &GlobalStats) {
    println!("{}", "h-matched statistics".bold());
    println!(
        "  {:<20} {} of {} ({})",
        "h-matched:",
        stats.solved_count.to_string().green(),
        stats.total,
        percent(stats.solved_fraction)
    );
    println!("  {:<20} {}", "Unsolved:", stats.unsolved_count.to_string().yellow());
    println!("  {:<20} {}", "Mean:", years(stats.mean_years));
    println!("  {:<20} {}", "Median:", years(stats.median_years));
    println!(
        "  {:<20} {} to {}",
        "Range:",
        years(stats.min_years),
        years(stats.max_years)
    );
    println!(
        "  {:<20} {} / {} / {}",
        "Within 1/2/3 years:",
        percent(stats.within_one_year),
        percent(stats.within_two_years),
        percent(stats.within_three_years)
    );
    println!("  {:<20} {}", "Recent average:", years(stats.recent_average_years));
    if let Some(longest) = &stats.longest_unsolved {
        println!(
            "  {:<20} {} ({:.2} years)",
            "Longest unsolved:",
            longest.name.cyan(),
            longest.years
        );
    }
    match &stats.regression {
        Some(fit) => println!(
            "  {:<20} {:+.3} years per release year (R\u{b2} = {:.3})",
            "Trend:", fit.slope, fit.r_squared
        ),
        None => println!("  {:<20} n/a", "Trend:"),
    }
}

/// Execute a parsed command.
pub fn execute(cli: Cli) -> Result<()> {
    let mut settings = Settings::load(cli.config.as_deref())?;
    debug!(?settings, "Settings loaded");

    match cli.command {
        Commands::Render { data, output, sort } => {
            let dataset = load_dataset(data.as_deref())?;
            if let Some(output) = output {
                settings.report.output_dir = output;
            }

            let written = hmatch_report::render_and_write(
                &dataset,
                sort,
                &SystemClock,
                &settings.metrics,
                &settings.report,
            )
            .with_context(|| format!("Failed to render site to {}", settings.report.output_dir))?;

            println!(
                "{} Wrote {} files to {}",
                "✓".green(),
                written.len(),
                settings.report.output_dir
            );
            if cli.verbose {
                for path in &written {
                    println!("  - {}", path.display());
                }
            }
        }
        Commands::Stats { data, json } => {
            let dataset = load_dataset(data.as_deref())?;
            let stats = calculate_global_stats(dataset.records(), &SystemClock, &settings.metrics);
            if json {
                println!("{}", serde_json::to_string_pretty(&stats)?);
            } else {
                print_stats(&stats);
            }
        }
        Commands::Table { data, sort } => {
            let dataset = load_dataset(data.as_deref())?;
            let model = PageModel::build(&dataset, sort, &SystemClock, &settings.metrics, &settings.report);
            print!("{}", markdown::generate_table(&model));
        }
        Commands::Validate { data } => {
            let dataset = load_dataset(data.as_deref())?;
            let anomalies = dataset.anomalies();
            println!(
                "{} {} records loaded ({} h-matched, {} unsolved)",
                "✓".green(),
                dataset.len(),
                dataset.solved().count(),
                dataset.unsolved().count()
            );
            if anomalies.is_empty() {
                println!("No date anomalies");
            } else {
                println!("{}", format!("{} date anomalies:", anomalies.len()).yellow());
                for anomaly in &anomalies {
                    println!(
                        "  - {}: solved {} before release {} ({:.2} years)",
                        anomaly.name, anomaly.solved_date, anomaly.release_date, anomaly.years
                    );
                }
            }
        }
    }

    Ok(())
}

/// Parse arguments, set up logging and run the CLI.
///
/// # Returns
///
/// Returns `Ok(())` on success, or an error if the command fails.
pub fn run() -> Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();
    init_tracing(cli.verbose, cli.log_format);
    execute(cli)
}

#[cfg(test)]
mod tests {
    use super::*;
    use hmatch_core::{SortColumn, SortDirection};

    #[test]
    fn test_parse_render() {
        let cli = Cli::try_parse_from([
            "hmatch",
            "render",
            "--data",
            "data.json",
            "--output",
            "public",
            "--sort",
            "time-to-solve:desc",
        ])
        .unwrap();

        match cli.command {
            Commands::Render { data, output, sort } => {
                assert_eq!(data, Some(PathBuf::from("data.json")));
                assert_eq!(output.as_deref(), Some("public"));
                assert_eq!(sort, SortState::by(SortColumn::TimeToSolve, SortDirection::Descending));
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_parse_global_flags_after_subcommand() {
        let cli = Cli::try_parse_from(["hmatch", "stats", "--json", "-v", "--log-format", "json"]).unwrap();
        assert!(cli.verbose);
        assert_eq!(cli.log_format, LogFormat::Json);
        assert!(matches!(cli.command, Commands::Stats { data: None, json: true }));
    }

    #[test]
    fn test_default_sort_is_unsorted() {
        let cli = Cli::try_parse_from(["hmatch", "table"]).unwrap();
        assert!(matches!(cli.command, Commands::Table { sort: SortState::Unsorted, .. }));
    }

    #[test]
    fn test_rejects_unknown_sort() {
        assert!(Cli::try_parse_from(["hmatch", "table", "--sort", "color"]).is_err());
        assert!(Cli::try_parse_from(["hmatch", "table", "--sort", "name:up"]).is_err());
    }

    #[test]
    fn test_load_dataset_reports_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing.json");
        let err = load_dataset(Some(path.as_path())).unwrap_err();
        assert!(err.to_string().contains("missing.json"));
        assert!(load_dataset(None).unwrap().len() > 0);
    }

    #[test]
    fn test_formatting_helpers() {
        assert_eq!(years(Some(1.234)), "1.23 years");
        assert_eq!(years(None), "n/a");
        assert_eq!(percent(Some(0.5)), "50%");
    }
}
