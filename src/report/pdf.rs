//! PDF report.
//!
//! Built with `printpdf` using the standard Helvetica fonts, so no font
//! files are needed. Markdown is laid out as plain wrapped lines.

use chrono::NaiveDateTime;

use super::ReportSections;

/// Render the PDF report. Returns `Ok(None)` when built without the `pdf` feature.
#[cfg(feature = "pdf")]
pub fn render_pdf(
    sections: &ReportSections<'_>,
    project: &str,
    generated: NaiveDateTime,
) -> anyhow::Result<Option<Vec<u8>>> {
    layout::render(sections, project, generated).map(Some)
}

/// Render the PDF report. Returns `Ok(None)` when built without the `pdf` feature.
#[cfg(not(feature = "pdf"))]
pub fn render_pdf(
    _sections: &ReportSections<'_>,
    _project: &str,
    _generated: NaiveDateTime,
) -> anyhow::Result<Option<Vec<u8>>> {
    Ok(None)
}

/// Greedy word wrap to at most `width` characters per line.
#[cfg_attr(not(feature = "pdf"), allow(dead_code))]
fn wrap(text: &str, width: usize) -> Vec<String> {
    let mut lines = Vec::new();

    for raw in text.lines() {
        let indent: String = raw.chars().take_while(|c| c.is_whitespace()).collect();
        let indent_width = indent.chars().count();
        let mut line = indent.clone();

        for word in raw.split_whitespace() {
            let len = line.chars().count();
            if len > indent_width && len + 1 + word.chars().count() > width {
                lines.push(std::mem::replace(&mut line, indent.clone()));
            }
            if line.chars().count() > indent_width {
                line.push(' ');
            }
            line.push_str(word);
        }

        lines.push(line);
    }

    lines
}

/// Built-in PDF fonts only cover Latin-1; everything else becomes `?`.
#[cfg_attr(not(feature = "pdf"), allow(dead_code))]
fn latin1(text: &str) -> String {
    text.chars().map(|c| if (c as u32) < 0x100 { c } else { '?' }).collect()
}

#[cfg(feature = "pdf")]
mod layout {
    use chrono::NaiveDateTime;
    use printpdf::{
        BuiltinFont, IndirectFontRef, Mm, PdfDocument, PdfDocumentReference, PdfLayerReference,
    };

    use super::{latin1, wrap};
    use crate::report::{ReportSections, REPORT_TITLE};

    const PAGE_WIDTH: f32 = 210.0;
    const PAGE_HEIGHT: f32 = 297.0;
    const MARGIN: f32 = 20.0;
    const BODY_SIZE: f32 = 10.0;
    const HEADING_SIZE: f32 = 14.0;
    const LINE_HEIGHT: f32 = 5.0;
    const WRAP_COLUMNS: usize = 95;

    struct Cursor {
        doc: PdfDocumentReference,
        layer: PdfLayerReference,
        y: f32,
        pages: usize,
    }

    impl Cursor {
        fn line(&mut self, text: &str, size: f32, font: &IndirectFontRef) {
            if self.y < MARGIN {
                self.pages += 1;
                let name = format!("Page {}", self.pages);
                let (page, layer) = self.doc.add_page(Mm(PAGE_WIDTH), Mm(PAGE_HEIGHT), name);
                self.layer = self.doc.get_page(page).get_layer(layer);
                self.y = PAGE_HEIGHT - MARGIN;
            }
            self.layer.use_text(latin1(text), size, Mm(MARGIN), Mm(self.y), font);
            self.y -= LINE_HEIGHT * size / BODY_SIZE;
        }

        fn gap(&mut self) {
            self.y -= LINE_HEIGHT;
        }
    }

    pub(super) fn render(
        sections: &ReportSections<'_>,
        project: &str,
        generated: NaiveDateTime,
    ) -> anyhow::Result<Vec<u8>> {
        let (doc, page, layer) =
            PdfDocument::new(REPORT_TITLE, Mm(PAGE_WIDTH), Mm(PAGE_HEIGHT), "Page 1");
        let regular = doc.add_builtin_font(BuiltinFont::Helvetica)?;
        let bold = doc.add_builtin_font(BuiltinFont::HelveticaBold)?;
        let layer = doc.get_page(page).get_layer(layer);

        let mut cursor = Cursor { doc, layer, y: PAGE_HEIGHT - MARGIN, pages: 1 };

        cursor.line(REPORT_TITLE, 18.0, &bold);
        cursor.gap();
        let generated = format!("Generated: {}", generated.format("%B %d, %Y at %I:%M %p"));
        cursor.line(&generated, BODY_SIZE, &regular);
        for line in wrap(&format!("Project: {project}"), WRAP_COLUMNS) {
            cursor.line(&line, BODY_SIZE, &regular);
        }

        for section in sections.iter() {
            cursor.gap();
            cursor.line(&format!("{} [{}]", section.title, section.badge), HEADING_SIZE, &bold);
            cursor.gap();
            for line in wrap(section.body, WRAP_COLUMNS) {
                cursor.line(&line, BODY_SIZE, &regular);
            }
        }

        tracing::debug!(pages = cursor.pages, "PDF laid out");
        Ok(cursor.doc.save_to_bytes()?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wrap_respects_width() {
        let lines = wrap("alpha beta gamma delta epsilon", 11);
        assert_eq!(lines, ["alpha beta", "gamma delta", "epsilon"]);
    }

    #[test]
    fn test_wrap_keeps_indent_and_blank_lines() {
        let lines = wrap("- item\n\n  - nested item here", 12);
        assert_eq!(lines, ["- item", "", "  - nested", "  item here"]);
    }

    #[test]
    fn test_wrap_counts_wide_indent_in_chars() {
        let lines = wrap("\u{3000}\u{3000}ab cd", 5);
        assert_eq!(lines, ["\u{3000}\u{3000}ab", "\u{3000}\u{3000}cd"]);
    }

    #[test]
    fn test_latin1_replaces_unsupported() {
        assert_eq!(latin1("café → done"), "café ? done");
    }

    #[cfg(feature = "pdf")]
    #[test]
    fn test_render_pdf_produces_document() {
        use chrono::NaiveDate;

        use crate::core::{RoleMap, RoleOutput};

        let long = "word ".repeat(4000);
        let outputs = RoleMap::from_fn(|_| RoleOutput::Text(long.clone()));
        let sections = ReportSections::new(&outputs, "");
        let generated = NaiveDate::from_ymd_opt(2025, 1, 1).unwrap().and_hms_opt(9, 0, 0).unwrap();

        let bytes = render_pdf(&sections, "Big project", generated).unwrap().unwrap();
        assert!(bytes.starts_with(b"%PDF"));
    }
}
