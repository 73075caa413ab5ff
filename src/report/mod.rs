//! Comparison reports

use crate::compare::ComparisonResult;
use crate::core::error::{GitparatorError, Result};
use std::fmt::Write as _;
use std::path::Path;

const STYLE: &str = r#"
        body { font-family: Arial, sans-serif; background-color: #f8f9fa; margin: 20px; }
        h1 { color: #343a40; }
        h2 { color: #495057; }
        ul { list-style-type: none; padding: 0; }
        li { padding: 5px; }
        .identical { color: #28a745; }
        .different { color: #dc3545; }
        .source-only { color: #007bff; }
        .target-only { color: #fd7e14; }
        .excluded { color: #6c757d; }
        .summary td { padding: 2px 12px 2px 0; }
"#;

/// Render the comparison as a standalone HTML page
pub fn render_html(result: &ComparisonResult) -> String {
    let summary = result.summary();
    let mut html = String::new();

    html.push_str("<!DOCTYPE html>\n<html>\n<head>\n    <meta charset=\"utf-8\">\n");
    html.push_str("    <title>Gitparator Report</title>\n    <style>");
    html.push_str(STYLE);
    html.push_str("    </style>\n</head>\n<body>\n    <h1>Gitparator Comparison Report</h1>\n");

    html.push_str("    <table class=\"summary\">\n");
    for (label, count) in [
        ("Identical", summary.identical),
        ("Different", summary.different),
        ("Source only", summary.source_only),
        ("Target only", summary.target_only),
        ("Excluded", summary.excluded),
    ] {
        let _ = writeln!(html, "        <tr><td>{label}</td><td>{count}</td></tr>");
    }
    html.push_str("    </table>\n");

    push_section(&mut html, "Identical Files", "identical", &result.identical_files);
    push_section(&mut html, "Different Files", "different", &result.different_files);
    push_section(
        &mut html,
        "Files Only in Source Repository",
        "source-only",
        &result.source_only_files,
    );
    push_section(
        &mut html,
        "Files Only in Target Repository",
        "target-only",
        &result.target_only_files,
    );

    html.push_str("</body>\n</html>\n");
    html
}

fn push_section(html: &mut String, title: &str, class: &str, files: &[String]) {
    let _ = writeln!(html, "    <h2>{title}</h2>\n    <ul>");
    for file in files {
        let _ = writeln!(html, "        <li class=\"{class}\">{}</li>", escape_html(file));
    }
    html.push_str("    </ul>\n");
}

/// Write the HTML report to `path`
pub fn write_html(result: &ComparisonResult, path: &Path) -> Result<()> {
    std::fs::write(path, render_html(result)).map_err(|e| GitparatorError::ReportFailed {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })
}

/// Render the comparison as pretty-printed JSON
pub fn render_json(result: &ComparisonResult) -> Result<String> {
    Ok(serde_json::to_string_pretty(result)?)
}

fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            other => escaped.push(other),
        }
    }
    escaped
}
