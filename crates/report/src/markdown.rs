//! Markdown output generation for the tracker.
//!
//! This module renders the benchmark table and the headline statistics as
//! Markdown, for the `summary.md` output and the CLI `table` command.

use crate::model::{format_date, PageModel};
use hmatch_core::GlobalStats;
use std::fmt::Write;

fn cell(text: &str) -> String {
    text.replace('|', "\\|")
}

fn opt(value: Option<f64>, fmt: impl Fn(f64) -> String) -> String {
    value.map(fmt).unwrap_or_else(|| "n/a".to_string())
}

/// Generate the benchmark table in the model's row order.
pub fn generate_table(model: &PageModel) -> String {
    let mut output = String::new();

    writeln!(output, "| Benchmark | Released | Solved | Time to Human Level |").unwrap();
    writeln!(output, "|-----------|----------|--------|---------------------|").unwrap();

    for row in &model.rows {
        let name = match &row.website_url {
            Some(url) => format!("[{}]({})", cell(&row.name), url),
            None => cell(&row.name),
        };
        writeln!(
            output,
            "| {} | {} | {} | {} ({}) |",
            name,
            row.release_display,
            row.solved_display.as_deref().unwrap_or("-"),
            row.time_to_solve_label,
            row.duration
        )
        .unwrap();
    }

    output
}

/// Generate the statistics section.
pub fn generate_stats(stats: &GlobalStats) -> String {
    let mut output = String::new();
    let years = |v: f64| format!("{:.2} years", v);
    let percent = |v: f64| format!("{:.0}%", v * 100.0);

    writeln!(
        output,
        "- **h-matched:** {} of {} ({})",
        stats.solved_count,
        stats.total,
        opt(stats.solved_fraction, percent)
    )
    .unwrap();
    writeln!(output, "- **Unsolved:** {}", stats.unsolved_count).unwrap();
    writeln!(output, "- **Mean:** {}", opt(stats.mean_years, years)).unwrap();
    writeln!(output, "- **Median:** {}", opt(stats.median_years, years)).unwrap();
    writeln!(
        output,
        "- **Range:** {} to {}",
        opt(stats.min_years, years),
        opt(stats.max_years, years)
    )
    .unwrap();
    writeln!(
        output,
        "- **Within 1 / 2 / 3 years:** {} / {} / {}",
        opt(stats.within_one_year, percent),
        opt(stats.within_two_years, percent),
        opt(stats.within_three_years, percent)
    )
    .unwrap();
    writeln!(output, "- **Recent average:** {}", opt(stats.recent_average_years, years)).unwrap();
    match &stats.longest_unsolved {
        Some(longest) => writeln!(
            output,
            "- **Longest unsolved:** {} ({:.2} years)",
            cell(&longest.name),
            longest.years
        )
        .unwrap(),
        None => writeln!(output, "- **Longest unsolved:** none").unwrap(),
    }
    match &stats.regression {
        Some(fit) => writeln!(
            output,
            "- **Trend:** {:+.3} years per release year (R\u{b2} = {:.3})",
            fit.slope, fit.r_squared
        )
        .unwrap(),
        None => writeln!(output, "- **Trend:** n/a").unwrap(),
    }

    output
}

/// Generate a markdown summary from the page model.
pub fn generate_summary(model: &PageModel) -> String {
    let mut output = String::new();

    writeln!(output, "# {}", model.title).unwrap();
    writeln!(output).unwrap();
    writeln!(output, "Generated: {}", format_date(model.generated_on)).unwrap();
    writeln!(output).unwrap();
    writeln!(output, "## Statistics").unwrap();
    writeln!(output).unwrap();
    output.push_str(&generate_stats(&model.stats));
    writeln!(output).unwrap();
    writeln!(output, "## Benchmarks").unwrap();
    writeln!(output).unwrap();
    output.push_str(&generate_table(model));

    if !model.anomalies.is_empty() {
        writeln!(output).unwrap();
        writeln!(output, "## Data Warnings").unwrap();
        writeln!(output).unwrap();
        for anomaly in &model.anomalies {
            writeln!(
                output,
                "- {}: solved {} before release {}",
                cell(&anomaly.name),
                anomaly.solved_date,
                anomaly.release_date
            )
            .unwrap();
        }
    }

    writeln!(output).unwrap();
    writeln!(output, "---").unwrap();
    writeln!(output, "Total benchmarks: {}", model.rows.len()).unwrap();

    output
}
