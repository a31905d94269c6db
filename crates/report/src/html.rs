//! Static HTML page generation.
//!
//! The page is a single self-contained document: inline styles, the chart
//! embedded as inline SVG, a statistics strip and the benchmark table.

use crate::model::{format_date, PageModel, TableRow};
use crate::svg::render_chart;
use hmatch_core::{GlobalStats, SortColumn, SortDirection, SortState};

const STYLE: &str = r#"
    body { margin: 0; font-family: system-ui, -apple-system, Arial, sans-serif; color: #111827; background: #F9FAFB; }
    main { width: 90%; max-width: 1400px; margin: 0 auto; padding: 4rem 0 2rem; }
    .hero { text-align: center; margin-bottom: 3rem; }
    .hero h1 { font-size: 3rem; margin: 0; }
    .hero h1 span { color: #0EA5E9; }
    .muted { color: #6B7280; font-size: 0.875rem; }
    .card { background: #FFF; border: 1px solid #E5E7EB; border-radius: 0.75rem; padding: 1.5rem; margin-bottom: 2rem; box-shadow: 0 1px 3px rgba(0,0,0,0.06); }
    .stats { display: grid; grid-template-columns: repeat(auto-fit, minmax(180px, 1fr)); gap: 1rem; }
    .stat .value { font-size: 1.5rem; font-weight: 600; }
    table { width: 100%; border-collapse: collapse; }
    th, td { text-align: left; padding: 0.6rem 0.75rem; border-bottom: 1px solid #E5E7EB; }
    th.sorted { color: #0EA5E9; }
    .date { display: inline-block; min-width: 110px; text-align: center; background: #F3F4F6; padding: 0.25rem 0.5rem; border-radius: 0.375rem; font-family: ui-monospace, monospace; font-size: 0.875rem; }
    .badge { display: inline-block; padding: 0.1rem 0.6rem; border-radius: 999px; font-size: 0.75rem; font-weight: 500; background: #E0F2FE; color: #0369A1; }
    .badge.unsolved { background: #FEF3C7; color: #92400E; }
    .badge.negative { background: #FEE2E2; color: #991B1B; }
    .swatch { display: inline-block; width: 0.7rem; height: 0.7rem; border-radius: 50%; margin-right: 0.5rem; }
    a { color: inherit; }
    footer { text-align: center; }
"#;

/// Escape text for HTML and SVG content and attribute values.
pub fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

fn percent(value: Option<f64>) -> String {
    value
        .map(|v| format!("{:.0}%", v * 100.0))
        .unwrap_or_else(|| "n/a".to_string())
}

fn years(value: Option<f64>) -> String {
    value
        .map(|v| format!("{:.2} years", v))
        .unwrap_or_else(|| "n/a".to_string())
}

fn stat_card(label: &str, value: &str) -> String {
    format!(
        "<div class=\"stat\"><div class=\"muted\">{}</div><div class=\"value\">{}</div></div>\n",
        escape(label),
        escape(value)
    )
}

fn render_stats(stats: &GlobalStats) -> String {
    let mut html = String::from("<section class=\"card\"><h2>At a Glance</h2><div class=\"stats\">\n");
    html.push_str(&stat_card(
        "h-matched",
        &format!("{} of {} ({})", stats.solved_count, stats.total, percent(stats.solved_fraction)),
    ));
    html.push_str(&stat_card("Median time to human level", &years(stats.median_years)));
    html.push_str(&stat_card("Mean time to human level", &years(stats.mean_years)));
    html.push_str(&stat_card("Fastest", &years(stats.min_years)));
    html.push_str(&stat_card("Slowest", &years(stats.max_years)));
    html.push_str(&stat_card("Within 1 year", &percent(stats.within_one_year)));
    html.push_str(&stat_card("Within 2 years", &percent(stats.within_two_years)));
    html.push_str(&stat_card("Within 3 years", &percent(stats.within_three_years)));
    html.push_str(&stat_card("Recent average", &years(stats.recent_average_years)));
    let longest = stats
        .longest_unsolved
        .as_ref()
        .map(|l| format!("{} ({:.2} years)", l.name, l.years))
        .unwrap_or_else(|| "none".to_string());
    html.push_str(&stat_card("Longest unsolved", &longest));
    let (slope, r_squared) = match &stats.regression {
        Some(fit) => (format!("{:+.2} years/year", fit.slope), format!("{:.2}", fit.r_squared)),
        None => ("n/a".to_string(), "n/a".to_string()),
    };
    html.push_str(&stat_card("Trend slope", &slope));
    html.push_str(&stat_card("Trend R\u{b2}", &r_squared));
    html.push_str("</div></section>\n");
    html
}

fn header_cell(column: SortColumn, sort: SortState) -> String {
    let (class, arrow) = match (sort.column(), sort.direction()) {
        (Some(sorted), Some(direction)) if sorted == column => (
            " class=\"sorted\"",
            match direction {
                SortDirection::Ascending => " \u{25B2}",
                SortDirection::Descending => " \u{25BC}",
            },
        ),
        _ => ("", ""),
    };
    format!(
        "<th{} data-column=\"{}\">{}{}</th>",
        class,
        column.as_str(),
        column.label(),
        arrow
    )
}

fn link(url: &str, label: &str) -> String {
    format!(
        "<a href=\"{}\" target=\"_blank\" rel=\"noopener noreferrer\">{}</a>",
        escape(url),
        label
    )
}

fn achievement_note(row: &TableRow) -> String {
    let Some(achievement) = &row.achievement else {
        return String::new();
    };
    let mut parts = Vec::new();
    if let Some(score) = &achievement.score {
        parts.push(format!("Score: {}", escape(score)));
    }
    if let Some(source) = &achievement.source {
        parts.push(link(source, "Source"));
    }
    if let Some(human) = &achievement.human_performance {
        let score = human.score.as_deref().map(escape).unwrap_or_else(|| "?".to_string());
        match &human.source {
            Some(source) => parts.push(format!("Human: {} ({})", score, link(source, "source"))),
            None => parts.push(format!("Human: {}", score)),
        }
    }
    format!("<div class=\"muted\">{}</div>", parts.join(" &middot; "))
}

fn render_row(row: &TableRow) -> String {
    let mut links = Vec::new();
    if let Some(url) = &row.website_url {
        links.push(link(url, "website"));
    }
    if let Some(url) = &row.paper_url {
        links.push(link(url, "paper"));
    }
    let links = if links.is_empty() {
        String::new()
    } else {
        format!(" <span class=\"muted\">{}</span>", links.join(" "))
    };

    let solved = row
        .solved_display
        .as_deref()
        .map(escape)
        .unwrap_or_else(|| "&mdash;".to_string());

    let badge_class = if row.duration.is_unsolved() {
        "badge unsolved"
    } else if row.duration.is_negative() {
        "badge negative"
    } else {
        "badge"
    };

    format!(
        "<tr><td><span class=\"swatch\" style=\"background: {color}\"></span><strong>{name}</strong>{links}</td>\
<td><span class=\"date\">{release}</span></td>\
<td><span class=\"date\">{solved}</span>{note}</td>\
<td><span class=\"{badge_class}\" title=\"{duration}\">{label}</span></td></tr>\n",
        color = row.color,
        name = escape(&row.name),
        links = links,
        release = escape(&row.release_display),
        solved = solved,
        note = achievement_note(row),
        badge_class = badge_class,
        duration = escape(&row.duration.to_string()),
        label = escape(&row.time_to_solve_label),
    )
}

fn render_table(model: &PageModel) -> String {
    let mut html = String::from(
        "<section class=\"card\"><h2>Benchmark Timeline</h2>\
<p class=\"muted\">AI benchmarks and the dates they became h-matched</p>\n<table>\n<thead><tr>",
    );
    for column in SortColumn::ALL {
        html.push_str(&header_cell(column, model.sort));
    }
    html.push_str("</tr></thead>\n<tbody>\n");
    for row in &model.rows {
        html.push_str(&render_row(row));
    }
    html.push_str("</tbody>\n</table>\n</section>\n");
    html
}

/// Render the complete page for `model`.
pub fn render_page(model: &PageModel) -> String {
    let title = escape(&model.title);
    let mut html = String::new();

    html.push_str(&format!(
        "<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n\
<meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">\n\
<title>{title}</title>\n<style>{STYLE}</style>\n</head>\n<body>\n<main>\n"
    ));

    html.push_str(&format!(
        "<header class=\"hero\"><h1>{title}</h1>\
<p class=\"muted\">h = human-level performance | Tracking time from release to h-matched</p></header>\n"
    ));

    html.push_str(&render_stats(&model.stats));

    html.push_str(
        "<section class=\"card\"><h2>Time to Human Level Trend</h2>\
<p class=\"muted\">Duration between benchmark release and reaching human level</p>\n",
    );
    html.push_str(&render_chart(model));
    html.push_str("</section>\n");

    html.push_str(&render_table(model));

    if !model.anomalies.is_empty() {
        html.push_str("<section class=\"card\"><h2>Data Warnings</h2><ul>\n");
        for anomaly in &model.anomalies {
            html.push_str(&format!(
                "<li>{}: solved {} before release {} ({:.2} years)</li>\n",
                escape(&anomaly.name),
                format_date(anomaly.solved_date),
                format_date(anomaly.release_date),
                anomaly.years
            ));
        }
        html.push_str("</ul></section>\n");
    }

    html.push_str(&format!(
        "<footer class=\"muted\"><p>Data last updated {}</p></footer>\n</main>\n</body>\n</html>\n",
        format_date(model.generated_on)
    ));

    html
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::ReportConfig;
    use chrono::NaiveDate;
    use hmatch_core::{Achievement, BenchmarkRecord, Dataset, FixedClock, HumanBaseline, MetricsConfig};

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    fn model(records: Vec<BenchmarkRecord>, sort: SortState) -> PageModel {
        PageModel::build(
            &Dataset::from_records(records).unwrap(),
            sort,
            &FixedClock(date("2025-01-01")),
            &MetricsConfig::default(),
            &ReportConfig::default(),
        )
    }

    #[test]
    fn test_escape() {
        assert_eq!(escape("<a href=\"x\">Tom & Jerry's</a>"), "&lt;a href=&quot;x&quot;&gt;Tom &amp; Jerry&#39;s&lt;/a&gt;");
        assert_eq!(escape("plain"), "plain");
    }

    #[test]
    fn test_page_structure() {
        let html = render_page(&model(
            vec![
                BenchmarkRecord::new("A", date("2016-06-16"))
                    .solved_on(date("2017-06-15"))
                    .with_paper("https://arxiv.org/abs/0000.00000"),
                BenchmarkRecord::new("B", date("2018-06-11")),
            ],
            SortState::Unsorted,
        ));
        assert!(html.starts_with("<!DOCTYPE html>"));
        assert!(html.contains("<title>h-matched Tracker</title>"));
        assert!(html.contains("<svg"));
        assert_eq!(html.matches("<tr><td>").count(), 2);
        assert!(html.contains("Jun 16, 2016"));
        assert!(html.contains("1.00 years"));
        assert!(html.contains("badge unsolved"));
        assert!(html.contains("https://arxiv.org/abs/0000.00000"));
        assert!(html.contains("Data last updated Jan 1, 2025"));
        assert!(html.contains("1 of 2 (50%)"));
        assert!(!html.contains("Data Warnings"));
    }

    #[test]
    fn test_sorted_header_marked() {
        let html = render_page(&model(
            vec![BenchmarkRecord::new("A", date("2016-06-16"))],
            SortState::by(SortColumn::Release, SortDirection::Descending),
        ));
        assert!(html.contains("<th class=\"sorted\" data-column=\"release\">Released \u{25BC}</th>"));
        assert!(html.contains("<th data-column=\"name\">Benchmark</th>"));
    }

    #[test]
    fn test_negative_duration_warning() {
        let html = render_page(&model(
            vec![BenchmarkRecord::new("Backwards", date("2020-01-01")).solved_on(date("2019-01-01"))],
            SortState::Unsorted,
        ));
        assert!(html.contains("badge negative"));
        assert!(html.contains("Data Warnings"));
        assert!(html.contains("-1y 0m 0d"));
    }

    #[test]
    fn test_names_are_escaped() {
        let html = render_page(&model(
            vec![BenchmarkRecord::new("<script>", date("2020-01-01"))],
            SortState::Unsorted,
        ));
        assert!(!html.contains("<script>"));
        assert!(html.contains("&lt;script&gt;"));
    }

    #[test]
    fn test_achievement_details_rendered() {
        let mut record = BenchmarkRecord::new("MMLU", date("2020-09-07")).solved_on(date("2024-12-05"));
        record.achievement = Some(Achievement {
            score: Some("90.1%".to_string()),
            source: Some("https://example.org/result".to_string()),
            human_performance: Some(HumanBaseline {
                score: Some("89.8%".to_string()),
                source: None,
            }),
        });
        let html = render_page(&model(vec![record], SortState::Unsorted));
        assert!(html.contains("Score: 90.1%"));
        assert!(html.contains("Human: 89.8%"));
        assert!(html.contains("https://example.org/result"));
    }

    #[test]
    fn test_empty_stats_render_na() {
        let html = render_page(&model(vec![BenchmarkRecord::new("B", date("2018-06-11"))], SortState::Unsorted));
        assert!(html.contains("n/a"));
        assert!(!html.contains("NaN"));
    }
}
