//! HTML report rendering.

use std::fmt::Write;

use crate::models::DomainOutcome;

const NOT_AVAILABLE: &str = "N/A";

const HEADER: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <title>Domain Status Report</title>
    <style>
        body { font-family: Arial, sans-serif; margin: 20px; }
        table { width: 100%; border-collapse: collapse; }
        th, td { border: 1px solid #ddd; padding: 8px; text-align: left; }
        th { background-color: #f2f2f2; }
        .healthy { background-color: #d4edda; }
        .mismatched { background-color: #f8d7da; }
        .direct { background-color: #d1ecf1; }
        .no-ping { background-color: #fff3cd; }
    </style>
</head>
<body>
    <h1>Domain Status Report</h1>
    <table>
        <tr>
            <th>Domain</th>
            <th>Status</th>
            <th>IP</th>
            <th>HTTP Status</th>
        </tr>
"#;

const FOOTER: &str = "    </table>\n</body>\n</html>\n";

/// Escapes text for use in HTML element content and quoted attributes.
pub fn escape_html(text: &str) -> String {
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

/// Renders the report table, one row per outcome in the given order.
pub fn render_html(outcomes: &[DomainOutcome]) -> String {
    let mut html = String::from(HEADER);
    for outcome in outcomes {
        let ip = outcome
            .resolved_ip
            .map(|ip| ip.to_string())
            .unwrap_or_else(|| NOT_AVAILABLE.to_string());
        let http_status = outcome.http_status.as_deref().unwrap_or(NOT_AVAILABLE);
        // Writing to a String cannot fail
        let _ = write!(
            html,
            "        <tr class=\"{}\">\n            <td>{}</td>\n            <td>{}</td>\n            <td>{}</td>\n            <td>{}</td>\n        </tr>\n",
            outcome.classification.css_class(),
            escape_html(&outcome.domain),
            escape_html(outcome.classification.label()),
            escape_html(&ip),
            escape_html(http_status),
        );
    }
    html.push_str(FOOTER);
    html
}
