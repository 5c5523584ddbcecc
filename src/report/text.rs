//! Plain-text report.

use chrono::NaiveDateTime;

use super::{ReportSections, REPORT_TITLE};

/// Render the plain-text report.
pub fn render_text(sections: &ReportSections<'_>, project: &str, generated: NaiveDateTime) -> String {
    let mut out = String::new();
    out.push_str(REPORT_TITLE);
    out.push('\n');
    out.push_str(&format!("Generated: {}\n", generated.format("%B %d, %Y at %I:%M %p")));
    out.push_str(&format!("Project: {}\n", project));
    out.push_str(&"=".repeat(80));
    out.push_str("\n\n");

    let bodies: Vec<String> =
        sections.iter().map(|s| format!("## {}\n\n{}\n", s.title, s.body)).collect();
    out.push_str(&bodies.join("\n"));

    out
}
