//! The five-stage analysis workflow.
//!
//! ## Stages
//!
//! 1. Requirements intake - priority features from the raw idea
//! 2. Technical architecture - schema, APIs, integrations
//! 3. Quality audit - risks the architecture missed
//! 4. Technical synthesis - condensed architecture and risks
//! 5. Project management - executive summary and roadmap
//!
//! Stages run sequentially through a [`StageExecutor`], normally an
//! [`LlmStageExecutor`] over the configured provider.

mod agents;
mod coordinator;
mod run;
mod tasks;

pub use agents::AgentProfile;
pub use coordinator::{
    LlmStageExecutor, PipelineCoordinator, PipelineRun, StageContext, StageExecutor,
    StageFailure, StageRequest, StageState,
};
pub use run::{run_analysis, AnalysisResult};
pub use tasks::{dependencies, standard_stages, StageSpec, STAGE_GRAPH};
