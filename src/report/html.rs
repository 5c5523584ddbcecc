//! HTML report.

use std::fmt::{self, Write};

use pulldown_cmark::{html, Options, Parser};
use pulldown_cmark_escape::escape_html;

use super::{ReportSections, REPORT_TITLE};

const STYLE: &str = "body{font-family:sans-serif;line-height:1.6;color:#333;max-width:960px;\
margin:0 auto;padding:24px}h1{border-bottom:2px solid #1a73e8}.timestamp{color:#666}\
section{border:1px solid #e0e0e0;border-radius:6px;margin:24px 0;padding:0 20px 12px}\
.badge{font-size:12px;background:#667eea;color:#fff;border-radius:4px;padding:2px 8px;\
margin-left:8px;vertical-align:middle}section.incomplete{opacity:.6}\
table{border-collapse:collapse}th,td{border:1px solid #ddd;padding:6px 10px}\
pre{background:#f5f5f5;padding:10px;overflow-x:auto}";

/// Convert Markdown to an HTML fragment.
pub fn markdown_to_html(markdown: &str) -> String {
    let mut options = Options::empty();
    options.insert(Options::ENABLE_TABLES);
    options.insert(Options::ENABLE_STRIKETHROUGH);

    let parser = Parser::new_ext(markdown, options);
    let mut out = String::with_capacity(markdown.len() * 3 / 2);
    html::push_html(&mut out, parser);
    out
}

/// Render a standalone HTML document with one `<section>` per role.
pub fn render_html(
    sections: &ReportSections<'_>,
    project: &str,
    timestamp: &str,
) -> Result<String, fmt::Error> {
    let mut out = String::new();

    writeln!(out, "<!DOCTYPE html>")?;
    writeln!(out, "<html lang=\"en\">")?;
    writeln!(out, "<head>")?;
    writeln!(out, "<meta charset=\"UTF-8\">")?;
    write!(out, "<title>{REPORT_TITLE} - ")?;
    escape_html(&mut out, timestamp)?;
    writeln!(out, "</title>")?;
    writeln!(out, "<style>{STYLE}</style>")?;
    writeln!(out, "</head>")?;
    writeln!(out, "<body>")?;
    writeln!(out, "<h1>{REPORT_TITLE}</h1>")?;
    write!(out, "<p class=\"timestamp\">Generated: ")?;
    escape_html(&mut out, timestamp)?;
    writeln!(out, "</p>")?;
    write!(out, "<p class=\"project\"><strong>Project:</strong> ")?;
    escape_html(&mut out, project)?;
    writeln!(out, "</p>")?;

    for section in sections.iter() {
        let class = if section.complete { "" } else { " incomplete" };
        writeln!(out, "<section id=\"{}\" class=\"role{class}\">", section.role.key())?;
        write!(out, "<h2>")?;
        escape_html(&mut out, section.title)?;
        writeln!(out, "<span class=\"badge\">{}</span></h2>", section.badge)?;
        out.push_str(&markdown_to_html(section.body));
        writeln!(out, "</section>")?;
    }

    writeln!(out, "</body>")?;
    writeln!(out, "</html>")?;
    Ok(out)
}
