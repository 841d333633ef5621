use chrono::{DateTime, Utc};
use std::fmt::Display;
use tally_common::types::MetricsSnapshot;

/// Renders the `/` page: one table per namespace, rows in name order.
pub fn render_index(snapshot: &MetricsSnapshot, started_at: DateTime<Utc>) -> String {
    let template = include_str!("templates/index.html");

    template
        .replace("{{gauge_count}}", &snapshot.gauges.len().to_string())
        .replace("{{counter_count}}", &snapshot.counters.len().to_string())
        .replace(
            "{{gauges}}",
            &render_table(&snapshot.gauges, "No gauge metrics"),
        )
        .replace(
            "{{counters}}",
            &render_table(&snapshot.counters, "No counter metrics"),
        )
        .replace("{{started_at}}", &started_at.to_rfc3339())
}

fn render_table<'a, V, I>(rows: I, empty: &str) -> String
where
    V: Display + 'a,
    I: IntoIterator<Item = (&'a String, &'a V)>,
{
    let mut html = String::new();
    for (name, value) in rows {
        html.push_str(&format!(
            "<tr><td>{name}</td><td class=\"num\">{value}</td></tr>",
            name = html_escape(name),
            value = value,
        ));
    }
    if html.is_empty() {
        return format!("<p>{empty}</p>");
    }
    format!("<table><tr><th>Name</th><th>Value</th></tr>{html}</table>")
}

fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('{', "&#123;")
}
