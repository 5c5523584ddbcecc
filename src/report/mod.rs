//! Report rendering.
//!
//! Turns the per-role outputs of a run into plain text, HTML and PDF
//! reports. [`ReportSections`] is the single place where an absent role is
//! replaced with the placeholder text; the renderers only ever see text.

pub mod export;
pub mod html;
pub mod pdf;
pub mod text;

pub use export::{save_reports, SavedReports};
pub use html::{markdown_to_html, render_html};
pub use pdf::render_pdf;
pub use text::render_text;

use crate::core::{Role, RoleMap, RoleOutput};

/// Report title shared by all formats.
pub const REPORT_TITLE: &str = "ProjectForge Analysis";

/// One role's section of a report.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Section<'a> {
    pub role: Role,
    pub title: &'static str,
    pub badge: &'static str,
    pub body: &'a str,
    /// False when `body` is the placeholder
    pub complete: bool,
}

/// The five report sections in pipeline order.
#[derive(Debug, Clone)]
pub struct ReportSections<'a> {
    sections: Vec<Section<'a>>,
}

impl<'a> ReportSections<'a> {
    pub fn new(outputs: &'a RoleMap<RoleOutput>, placeholder: &'a str) -> Self {
        let sections = outputs
            .iter()
            .map(|(role, output)| Section {
                role,
                title: section_title(role),
                badge: section_badge(role),
                body: output.text_or(placeholder),
                complete: !output.is_absent(),
            })
            .collect();

        Self { sections }
    }

    pub fn iter(&self) -> impl Iterator<Item = &Section<'a>> {
        self.sections.iter()
    }

    /// Roles whose section shows the placeholder.
    pub fn incomplete(&self) -> Vec<Role> {
        self.sections.iter().filter(|s| !s.complete).map(|s| s.role).collect()
    }
}

/// Heading used for a role's section.
pub fn section_title(role: Role) -> &'static str {
    match role {
        Role::Intake => "Business Requirements",
        Role::Architect => "Technical Design",
        Role::Quality => "Risk Assessment",
        Role::Synthesis => "Technical Synthesis",
        Role::Manager => "Executive Summary & Roadmap",
    }
}

/// Short label shown next to a section heading.
pub fn section_badge(role: Role) -> &'static str {
    match role {
        Role::Intake => "BA",
        Role::Architect => "Architect",
        Role::Quality => "QA",
        Role::Synthesis => "Synthesis",
        Role::Manager => "PM",
    }
}
