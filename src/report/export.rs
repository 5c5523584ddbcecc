//! Writing reports to disk.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Context;

use super::{render_pdf, render_text, ReportSections};
use crate::core::OutputConfig;
use crate::workflow::AnalysisResult;

/// Paths of the reports that were written.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SavedReports {
    pub text: Option<PathBuf>,
    pub html: Option<PathBuf>,
    /// `None` when PDF output is disabled, unavailable or failed
    pub pdf: Option<PathBuf>,
}

impl SavedReports {
    /// All written paths, text first.
    pub fn paths(&self) -> impl Iterator<Item = &Path> {
        [&self.text, &self.html, &self.pdf].into_iter().flatten().map(PathBuf::as_path)
    }
}

/// Write the enabled report formats for `result` into `output.directory`.
///
/// Files are named `output_<timestamp>.<ext>`. Text and HTML failures are
/// errors; a PDF failure is logged and leaves `pdf` unset.
pub fn save_reports(
    output: &OutputConfig,
    result: &AnalysisResult,
    project: &str,
) -> anyhow::Result<SavedReports> {
    let dir = &output.directory;
    fs::create_dir_all(dir)
        .with_context(|| format!("Failed to create output directory {}", dir.display()))?;

    let sections = ReportSections::new(&result.outputs, &output.placeholder);
    let path_for = |ext: &str| dir.join(format!("output_{}.{ext}", result.timestamp));
    let mut saved = SavedReports::default();

    if output.write_text {
        let path = path_for("txt");
        write(&path, render_text(&sections, project, result.generated_at).as_bytes())?;
        saved.text = Some(path);
    }

    if output.write_html {
        match &result.html {
            Some(html) => {
                let path = path_for("html");
                write(&path, html.as_bytes())?;
                saved.html = Some(path);
            }
            None => tracing::warn!("HTML report was not rendered, skipping"),
        }
    }

    if output.write_pdf {
        match render_pdf(&sections, project, result.generated_at) {
            Ok(Some(bytes)) => {
                let path = path_for("pdf");
                match fs::write(&path, bytes) {
                    Ok(()) => saved.pdf = Some(path),
                    Err(e) => tracing::warn!(path = %path.display(), "Failed to write PDF: {e}"),
                }
            }
            Ok(None) => tracing::info!("PDF support not compiled in, skipping"),
            Err(e) => tracing::warn!("PDF generation failed: {e:#}"),
        }
    }

    for path in saved.paths() {
        tracing::info!(path = %path.display(), "report saved");
    }
    Ok(saved)
}

fn write(path: &Path, contents: &[u8]) -> anyhow::Result<()> {
    fs::write(path, contents).with_context(|| format!("Failed to write {}", path.display()))
}
