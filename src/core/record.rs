//! Step execution records.
//!
//! One record is produced per pipeline stage attempted or abandoned. The
//! record carries the display name of the agent that ran the stage; the
//! extractor resolves it to a [`Role`](super::Role) later.

use std::time::Duration;

use serde::Serialize;

/// Completion status of a pipeline step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum StepStatus {
    /// The step produced text
    Completed,
    /// The step ran and failed
    Failed,
    /// The step was abandoned before it ran
    NotRun,
}

/// Outcome of a pipeline step. Text exists only for completed steps.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum StepOutcome {
    /// Step completed with produced text (possibly empty)
    Completed { text: String },
    /// Step failed with an error description
    Failed { error: String },
    /// Step never ran
    NotRun,
}

/// Immutable result of one pipeline stage.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StepRecord {
    stage: usize,
    agent_role: String,
    #[serde(flatten)]
    outcome: StepOutcome,
    #[serde(skip)]
    duration: Duration,
}

impl StepRecord {
    /// Record a completed stage.
    pub fn completed(
        stage: usize,
        agent_role: impl Into<String>,
        text: impl Into<String>,
        duration: Duration,
    ) -> Self {
        Self {
            stage,
            agent_role: agent_role.into(),
            outcome: StepOutcome::Completed { text: text.into() },
            duration,
        }
    }

    /// Record a stage that ran and failed.
    pub fn failed(
        stage: usize,
        agent_role: impl Into<String>,
        error: impl Into<String>,
        duration: Duration,
    ) -> Self {
        Self {
            stage,
            agent_role: agent_role.into(),
            outcome: StepOutcome::Failed { error: error.into() },
            duration,
        }
    }

    /// Record a stage that was abandoned without running.
    pub fn not_run(stage: usize, agent_role: impl Into<String>) -> Self {
        Self {
            stage,
            agent_role: agent_role.into(),
            outcome: StepOutcome::NotRun,
            duration: Duration::ZERO,
        }
    }

    /// Zero-based stage position in the pipeline.
    pub fn stage(&self) -> usize {
        self.stage
    }

    /// Display name of the agent that produced (or would have produced) this record.
    pub fn agent_role(&self) -> &str {
        &self.agent_role
    }

    pub fn outcome(&self) -> &StepOutcome {
        &self.outcome
    }

    pub fn status(&self) -> StepStatus {
        match self.outcome {
            StepOutcome::Completed { .. } => StepStatus::Completed,
            StepOutcome::Failed { .. } => StepStatus::Failed,
            StepOutcome::NotRun => StepStatus::NotRun,
        }
    }

    /// Produced text, only for completed records.
    pub fn text(&self) -> Option<&str> {
        match &self.outcome {
            StepOutcome::Completed { text } => Some(text),
            _ => None,
        }
    }

    /// Failure description, only for failed records.
    pub fn error(&self) -> Option<&str> {
        match &self.outcome {
            StepOutcome::Failed { error } => Some(error),
            _ => None,
        }
    }

    /// Wall time spent running the stage.
    pub fn duration(&self) -> Duration {
        self.duration
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_text_only_for_completed() {
        let done = StepRecord::completed(0, "Technical Architect", "schema", Duration::ZERO);
        assert_eq!(done.status(), StepStatus::Completed);
        assert_eq!(done.text(), Some("schema"));
        assert_eq!(done.error(), None);

        let failed = StepRecord::failed(1, "Technical Architect", "timeout", Duration::ZERO);
        assert_eq!(failed.status(), StepStatus::Failed);
        assert_eq!(failed.text(), None);
        assert_eq!(failed.error(), Some("timeout"));

        let skipped = StepRecord::not_run(2, "Senior Quality Auditor");
        assert_eq!(skipped.status(), StepStatus::NotRun);
        assert_eq!(skipped.text(), None);
        assert_eq!(skipped.duration(), Duration::ZERO);
    }

    #[test]
    fn test_empty_text_is_still_completed() {
        let record = StepRecord::completed(0, "Project Manager", "", Duration::ZERO);
        assert_eq!(record.text(), Some(""));
    }

    #[test]
    fn test_record_serializes_status_tag() {
        let record = StepRecord::failed(3, "Technical Synthesizer", "boom", Duration::ZERO);
        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json["status"], "failed");
        assert_eq!(json["agent_role"], "Technical Synthesizer");
        assert_eq!(json["stage"], 3);
    }

    #[test]
    fn test_outcome_carries_payload() {
        let record = StepRecord::completed(4, "Project Manager", "roadmap", Duration::ZERO);
        assert_eq!(record.outcome(), &StepOutcome::Completed { text: "roadmap".to_string() });

        let skipped = StepRecord::not_run(4, "Project Manager");
        assert!(matches!(skipped.outcome(), StepOutcome::NotRun));
    }
}
