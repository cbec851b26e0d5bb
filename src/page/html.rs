//! Dashboard Page Assembly
//! Builds the single static HTML page from the aggregate tables, the chart
//! images, and the conclusions.

use std::fmt::Write;

use polars::prelude::*;

use crate::analysis::ColumnSummary;
use crate::report::Conclusions;

/// Chart image files (relative to the page) that made it to disk.
/// A missing entry renders as a warning block in its section.
#[derive(Debug, Clone, Default)]
pub struct ChartSet {
    pub availability: Option<String>,
    pub satisfaction: Option<String>,
    pub challenges: Option<String>,
}

const PAGE_HEAD: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<title>Availability Survey Dashboard</title>
<style>
body { font-family: sans-serif; max-width: 60rem; margin: 2rem auto; color: #222; }
h1 { border-bottom: 2px solid #1f77b4; padding-bottom: .3rem; }
.columns { display: flex; gap: 2rem; flex-wrap: wrap; }
.columns > div { flex: 1 1 20rem; }
.warning { background: #fff3cd; border: 1px solid #e0c868; padding: .7rem 1rem; }
.error { background: #f8d7da; border: 1px solid #d9534f; padding: .7rem 1rem; }
.info { background: #e7f1fb; border: 1px solid #9ec5e8; padding: .7rem 1rem; }
table { border-collapse: collapse; }
th, td { border: 1px solid #bbb; padding: .25rem .6rem; text-align: left; }
img { max-width: 100%; }
footer { margin-top: 2rem; }
</style>
</head>
<body>
"#;

/// Tutoring-session details shown between the charts and the raw data.
const SESSION_INFO: &str = "<p><strong>Format:</strong> the tutoring sessions focus on solving \
exercises and answering questions about the covered material.</p>\n\
<p><strong>Mode:</strong> online meetings take priority, for flexibility and access.</p>\n\
<p><strong>Resources:</strong> the questions solved during each session are shared afterwards \
for review.</p>";

/// Render the whole dashboard page.
pub fn render_page(
    table: &DataFrame,
    satisfaction: &ColumnSummary,
    challenges: &ColumnSummary,
    conclusions: &anyhow::Result<Conclusions>,
    charts: &ChartSet,
    logo: Option<&str>,
) -> String {
    let mut html = String::from(PAGE_HEAD);

    html.push_str("<h1>Availability Survey Dashboard</h1>\n");
    html.push_str("<p>Student availability across the week and quiz feedback.</p>\n");

    html.push_str("<h2>Student availability</h2>\n");
    html.push_str(
        "<p>How many students are available in each period (Morning, Afternoon, Evening) \
         for each day of the week.</p>\n",
    );
    html.push_str(&chart_or_warning(
        charts.availability.as_deref(),
        "availability chart",
    ));
    html.push('\n');

    html.push_str("<h2>Quiz analysis</h2>\n");
    html.push_str(&quiz_section(satisfaction, challenges, charts));
    html.push('\n');

    html.push_str("<h2>Tutoring sessions</h2>\n");
    let _ = write!(html, "<div class=\"info\">\n{SESSION_INFO}\n</div>\n");

    html.push_str("<h2>Raw data</h2>\n");
    html.push_str("<p>The loaded survey table, after normalization.</p>\n");
    html.push_str(&table_html(table));
    html.push('\n');

    html.push_str("<h2>Preliminary conclusions</h2>\n");
    html.push_str(&conclusions_section(conclusions));
    html.push('\n');

    html.push_str("<footer>\n");
    if let Some(logo) = logo {
        let _ = write!(html, "<img src=\"{}\" alt=\"logo\" width=\"250\">\n", escape(logo));
    }
    html.push_str("</footer>\n</body>\n</html>\n");
    html
}

fn quiz_section(
    satisfaction: &ColumnSummary,
    challenges: &ColumnSummary,
    charts: &ChartSet,
) -> String {
    if matches!(satisfaction, ColumnSummary::MissingColumn)
        || matches!(challenges, ColumnSummary::MissingColumn)
    {
        return warning(
            "The satisfaction and/or challenge columns were not found in the data. \
             The quiz analysis cannot be generated.",
        );
    }

    let mut html = String::from("<div class=\"columns\">\n<div>\n<h3>Grade satisfaction</h3>\n");
    html.push_str("<p>Share of students who considered their quiz grade satisfactory.</p>\n");
    html.push_str(&chart_or_warning(
        charts.satisfaction.as_deref(),
        "satisfaction chart",
    ));
    html.push_str("\n</div>\n<div>\n<h3>Biggest challenges</h3>\n");
    html.push_str("<p>Main difficulties the students reported for the quiz.</p>\n");
    html.push_str(&chart_or_warning(
        charts.challenges.as_deref(),
        "challenge chart",
    ));
    html.push_str("\n</div>\n</div>");
    html
}

fn conclusions_section(conclusions: &anyhow::Result<Conclusions>) -> String {
    match conclusions {
        Ok(conclusions) => format!(
            "<p>{}</p>\n<p>{}</p>\n<p>{}</p>",
            markup(&conclusions.availability),
            markup(&conclusions.satisfaction),
            markup(&conclusions.challenges),
        ),
        Err(err) => format!(
            "<div class=\"error\">Failed to derive the conclusions: {}</div>",
            escape(&format!("{err:#}"))
        ),
    }
}

fn chart_or_warning(file: Option<&str>, what: &str) -> String {
    match file {
        Some(file) => format!("<img src=\"{}\" alt=\"{}\">", escape(file), escape(what)),
        None => warning(&format!("The {what} could not be generated.")),
    }
}

fn warning(text: &str) -> String {
    format!("<div class=\"warning\">{}</div>", escape(text))
}

fn table_html(df: &DataFrame) -> String {
    let mut html = String::from("<table>\n<tr>");
    for name in df.get_column_names() {
        let _ = write!(html, "<th>{}</th>", escape(name.as_str()));
    }
    html.push_str("</tr>\n");

    for row in 0..df.height() {
        html.push_str("<tr>");
        for column in df.get_columns() {
            let cell = column
                .get(row)
                .map(|value| cell_text(&value))
                .unwrap_or_default();
            let _ = write!(html, "<td>{}</td>", escape(&cell));
        }
        html.push_str("</tr>\n");
    }
    html.push_str("</table>");
    html
}

fn cell_text(value: &AnyValue) -> String {
    match value {
        AnyValue::Null => String::new(),
        AnyValue::String(text) => (*text).to_string(),
        AnyValue::StringOwned(text) => text.to_string(),
        other => other.to_string(),
    }
}

fn escape(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            _ => escaped.push(ch),
        }
    }
    escaped
}

/// Escape, then turn `**bold**` pairs and newlines into markup.
fn markup(text: &str) -> String {
    let escaped = escape(text);
    let mut html = String::with_capacity(escaped.len());
    let mut bold_open = false;
    let mut rest = escaped.as_str();
    while let Some(pos) = rest.find("**") {
        html.push_str(&rest[..pos]);
        html.push_str(if bold_open { "</strong>" } else { "<strong>" });
        bold_open = !bold_open;
        rest = &rest[pos + 2..];
    }
    html.push_str(rest);
    if bold_open {
        html.push_str("</strong>");
    }
    html.replace('\n', "<br>\n")
}
