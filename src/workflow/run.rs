//! End-to-end analysis: run the pipeline, extract outputs, render HTML.

use chrono::{Local, NaiveDateTime};
use serde::Serialize;

use super::coordinator::{PipelineCoordinator, StageExecutor};
use crate::core::{extract_safe, Config, Role, RoleMap, RoleOutput};
use crate::report::{render_html, ReportSections};

/// Outcome of one analysis.
#[derive(Debug, Clone, Serialize)]
pub struct AnalysisResult {
    /// True when every stage completed
    pub success: bool,
    pub outputs: RoleMap<RoleOutput>,
    /// Rendered HTML report, `None` if rendering failed
    pub html: Option<String>,
    /// `%Y%m%d_%H%M%S`, used in report file names
    pub timestamp: String,
    pub generated_at: NaiveDateTime,
    pub error: Option<String>,
    /// The roadmap from the project manager stage
    pub final_output: Option<String>,
}

impl AnalysisResult {
    /// Roles that produced no output.
    pub fn missing_roles(&self) -> Vec<Role> {
        self.outputs.iter().filter(|(_, o)| o.is_absent()).map(|(role, _)| role).collect()
    }
}

/// Run the full analysis for one project description.
///
/// A failed stage does not fail the call: completed outputs are returned
/// with `success == false` and the failure in `error`. An agent name that
/// does not belong to any role is returned as an error.
pub async fn run_analysis(
    executor: &dyn StageExecutor,
    user_input: &str,
    config: &Config,
) -> anyhow::Result<AnalysisResult> {
    let now = Local::now();
    let timestamp = now.format("%Y%m%d_%H%M%S").to_string();
    tracing::info!(%timestamp, "starting analysis");

    let run = PipelineCoordinator::new(executor).run(user_input).await;
    let outputs = extract_safe(&run.records)?;

    let mut error = run.failure.as_ref().map(ToString::to_string);
    if let Some(err) = &error {
        tracing::warn!("{err}");
    }

    let sections = ReportSections::new(&outputs, &config.output.placeholder);
    let html = match render_html(&sections, user_input, &timestamp) {
        Ok(html) => Some(html),
        Err(e) => {
            tracing::error!("HTML generation failed: {e}");
            error = Some(format!("HTML generation failed: {e}"));
            None
        }
    };

    let final_output = outputs.get(Role::Manager).as_text().map(String::from);

    Ok(AnalysisResult {
        success: run.is_success(),
        outputs,
        html,
        timestamp,
        generated_at: now.naive_local(),
        error,
        final_output,
    })
}

#[cfg(test)]
mod tests {
    use async_trait::async_trait;

    use super::*;
    use crate::workflow::StageRequest;

    struct FailAt(Option<Role>);

    #[async_trait]
    impl StageExecutor for FailAt {
        async fn execute(&self, request: &StageRequest<'_>) -> anyhow::Result<String> {
            if self.0 == Some(request.stage.role) {
                anyhow::bail!("quota exceeded");
            }
            Ok(format!("**{}**", request.stage.role.key()))
        }
    }

    #[tokio::test]
    async fn test_successful_analysis() {
        let result = run_analysis(&FailAt(None), "Todo app", &Config::default()).await.unwrap();

        assert!(result.success);
        assert!(result.error.is_none());
        assert!(result.missing_roles().is_empty());
        assert_eq!(result.final_output.as_deref(), Some("**manager**"));
        assert!(result.html.unwrap().contains("<strong>intake</strong>"));
        assert_eq!(result.timestamp.len(), "20250101_090000".len());
    }

    #[tokio::test]
    async fn test_partial_analysis() {
        let result =
            run_analysis(&FailAt(Some(Role::Quality)), "Todo app", &Config::default()).await.unwrap();

        assert!(!result.success);
        assert_eq!(
            result.error.as_deref(),
            Some("Senior Quality Auditor stage failed: quota exceeded")
        );
        assert_eq!(result.outputs.get(Role::Intake).as_text(), Some("**intake**"));
        assert_eq!(result.missing_roles(), [Role::Quality, Role::Synthesis, Role::Manager]);
        assert!(result.final_output.is_none());
        assert!(result.html.unwrap().contains("[Task did not complete]"));
    }
}
