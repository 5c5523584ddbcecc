//! Pipeline coordinator.
//!
//! Runs the stages one at a time in table order. A stage starts only when
//! every stage it depends on has completed; the first failure stops the
//! pipeline, and everything recorded up to that point is kept so partial
//! output can still be extracted.

use std::fmt;
use std::time::{Duration, Instant};

use async_trait::async_trait;
use serde::Serialize;
use tracing::Instrument;

use super::agents::AgentProfile;
use super::tasks::{standard_stages, StageSpec};
use crate::ai::LlmProvider;
use crate::core::{Role, RoleMap, StepRecord};

/// Lifecycle of a single stage.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum StageState {
    #[default]
    Pending,
    Running,
    Completed,
    Failed,
}

/// Output of an earlier stage handed to a dependent stage.
#[derive(Debug, Clone, Copy)]
pub struct StageContext<'a> {
    pub role: Role,
    pub text: &'a str,
}

/// Everything an executor needs to run one stage.
#[derive(Debug, Clone)]
pub struct StageRequest<'a> {
    /// Zero-based position in the pipeline
    pub index: usize,
    pub agent: &'a AgentProfile,
    pub stage: &'a StageSpec,
    /// Dependency outputs, in declaration order
    pub context: Vec<StageContext<'a>>,
}

impl StageRequest<'_> {
    /// User prompt for the stage: instructions, deliverable and context.
    pub fn prompt(&self) -> String {
        let mut prompt = format!(
            "{}\n\nExpected output: {}",
            self.stage.description, self.stage.expected_output
        );

        for ctx in &self.context {
            prompt.push_str(&format!(
                "\n\n--- Output from the {} ---\n{}",
                ctx.role.display_name(),
                ctx.text
            ));
        }

        prompt
    }
}

/// Runs a single stage and returns the text it produced.
#[async_trait]
pub trait StageExecutor: Send + Sync {
    async fn execute(&self, request: &StageRequest<'_>) -> anyhow::Result<String>;
}

/// Stage executor backed by an LLM provider.
pub struct LlmStageExecutor {
    provider: Box<dyn LlmProvider>,
}

impl LlmStageExecutor {
    pub fn new(provider: Box<dyn LlmProvider>) -> Self {
        Self { provider }
    }

    /// The underlying provider.
    pub fn provider(&self) -> &dyn LlmProvider {
        self.provider.as_ref()
    }
}

#[async_trait]
impl StageExecutor for LlmStageExecutor {
    async fn execute(&self, request: &StageRequest<'_>) -> anyhow::Result<String> {
        self.provider.complete(&request.agent.system_prompt(), &request.prompt()).await
    }
}

/// The stage that stopped the pipeline.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StageFailure {
    pub role: Role,
    pub index: usize,
    pub message: String,
}

impl fmt::Display for StageFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} stage failed: {}", self.role.display_name(), self.message)
    }
}

/// Result of one pipeline run.
#[derive(Debug, Clone, Serialize)]
pub struct PipelineRun {
    /// One record per stage, in pipeline order
    pub records: Vec<StepRecord>,
    pub states: RoleMap<StageState>,
    pub failure: Option<StageFailure>,
}

impl PipelineRun {
    /// Whether every stage completed.
    pub fn is_success(&self) -> bool {
        self.failure.is_none() && self.states.iter().all(|(_, s)| *s == StageState::Completed)
    }

    /// Text of the last completed manager stage.
    pub fn final_output(&self) -> Option<&str> {
        if *self.states.get(Role::Manager) != StageState::Completed {
            return None;
        }
        self.records
            .iter()
            .rev()
            .filter(|r| Role::from_display_name(r.agent_role()) == Ok(Role::Manager))
            .find_map(StepRecord::text)
    }
}

enum StagePlan {
    Standard,
    Custom(Vec<StageSpec>),
}

/// Drives the stages through an executor.
pub struct PipelineCoordinator<'a> {
    executor: &'a dyn StageExecutor,
    plan: StagePlan,
    agents: RoleMap<AgentProfile>,
}

impl<'a> PipelineCoordinator<'a> {
    /// Coordinator for the standard five stages and built-in agents.
    pub fn new(executor: &'a dyn StageExecutor) -> Self {
        Self {
            executor,
            plan: StagePlan::Standard,
            agents: RoleMap::from_fn(AgentProfile::for_role),
        }
    }

    /// Coordinator over an explicit stage list and agent set.
    ///
    /// Stages run in the order given; the user input passed to
    /// [`run`](Self::run) is ignored since descriptions are already fixed.
    pub fn with_stages(
        executor: &'a dyn StageExecutor,
        stages: Vec<StageSpec>,
        agents: RoleMap<AgentProfile>,
    ) -> Self {
        Self { executor, plan: StagePlan::Custom(stages), agents }
    }

    /// Run the pipeline to completion or first failure.
    pub async fn run(&self, user_input: &str) -> PipelineRun {
        let standard;
        let stages: &[StageSpec] = match &self.plan {
            StagePlan::Standard => {
                standard = standard_stages(user_input);
                &standard
            }
            StagePlan::Custom(stages) => stages,
        };

        let mut states = RoleMap::<StageState>::default();
        let mut outputs = RoleMap::<Option<String>>::default();
        let mut records = Vec::with_capacity(stages.len());
        let mut failure: Option<StageFailure> = None;

        for (index, stage) in stages.iter().enumerate() {
            let agent = self.agents.get(stage.role);

            let failed_dep =
                stage.depends_on.iter().find(|dep| *states.get(**dep) == StageState::Failed);
            if let Some(dep) = failed_dep {
                tracing::debug!(
                    role = stage.role.key(),
                    dependency = dep.key(),
                    "dependency failed, skipping"
                );
                states.insert(stage.role, StageState::Failed);
                records.push(StepRecord::not_run(index, agent.display_name.as_str()));
                continue;
            }

            if failure.is_some() {
                records.push(StepRecord::not_run(index, agent.display_name.as_str()));
                continue;
            }

            let context: Option<Vec<StageContext<'_>>> = stage
                .depends_on
                .iter()
                .map(|dep| {
                    let text = outputs.get(*dep).as_deref()?;
                    Some(StageContext { role: *dep, text })
                })
                .collect();

            let Some(context) = context else {
                let message = format!(
                    "dependencies not completed: {}",
                    pending_keys(stage.depends_on, &states)
                );
                tracing::error!(role = stage.role.key(), "{message}");
                states.insert(stage.role, StageState::Failed);
                records.push(StepRecord::failed(
                    index,
                    agent.display_name.as_str(),
                    message.as_str(),
                    Duration::ZERO,
                ));
                failure = Some(StageFailure { role: stage.role, index, message });
                continue;
            };

            *states.get_mut(stage.role) = StageState::Running;
            let request = StageRequest { index, agent, stage, context };

            let span = tracing::info_span!("stage", role = stage.role.key(), index);
            let started = Instant::now();
            let result = async {
                tracing::info!(agent = %agent.display_name, "stage started");
                let result = self.executor.execute(&request).await;
                let elapsed_ms = started.elapsed().as_millis() as u64;
                match &result {
                    Ok(text) => tracing::info!(elapsed_ms, chars = text.len(), "stage completed"),
                    Err(err) => {
                        tracing::error!(elapsed_ms, error = %format!("{err:#}"), "stage failed");
                    }
                }
                result
            }
            .instrument(span)
            .await;
            let elapsed = started.elapsed();

            match result {
                Ok(text) => {
                    states.insert(stage.role, StageState::Completed);
                    records.push(StepRecord::completed(
                        index,
                        agent.display_name.as_str(),
                        text.as_str(),
                        elapsed,
                    ));
                    outputs.insert(stage.role, Some(text));
                }
                Err(err) => {
                    let message = format!("{err:#}");
                    states.insert(stage.role, StageState::Failed);
                    records.push(StepRecord::failed(
                        index,
                        agent.display_name.as_str(),
                        message.as_str(),
                        elapsed,
                    ));
                    failure = Some(StageFailure { role: stage.role, index, message });
                }
            }
        }

        PipelineRun { records, states, failure }
    }
}

fn pending_keys(deps: &[Role], states: &RoleMap<StageState>) -> String {
    deps.iter()
        .filter(|dep| *states.get(**dep) != StageState::Completed)
        .map(|dep| dep.key())
        .collect::<Vec<_>>()
        .join(", ")
}
