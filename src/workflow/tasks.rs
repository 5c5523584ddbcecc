//! Stage definitions and the dependency graph between them.

use serde::Serialize;

use crate::core::Role;

/// Stage dependency table, in pipeline order.
///
/// A stage may only run once every role it lists has completed.
pub const STAGE_GRAPH: [(Role, &[Role]); Role::COUNT] = [
    (Role::Intake, &[]),
    (Role::Architect, &[Role::Intake]),
    (Role::Quality, &[Role::Architect]),
    (Role::Synthesis, &[Role::Architect, Role::Quality]),
    (Role::Manager, &[Role::Intake, Role::Synthesis]),
];

/// One unit of work in the pipeline.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StageSpec {
    /// Role that executes the stage and owns its output
    pub role: Role,
    /// Instructions for the agent
    pub description: String,
    /// Description of the expected deliverable
    pub expected_output: String,
    /// Roles whose output is fed in as context
    pub depends_on: &'static [Role],
}

/// Dependencies of `role` as declared in [`STAGE_GRAPH`].
pub fn dependencies(role: Role) -> &'static [Role] {
    STAGE_GRAPH[role.index()].1
}

/// Build the five standard stages for a project description.
pub fn standard_stages(user_input: &str) -> Vec<StageSpec> {
    Role::ALL
        .into_iter()
        .map(|role| {
            let (description, expected_output) = match role {
                Role::Intake => (
                    format!("Analyze this project idea: '{user_input}'"),
                    "A list of 3 priority features with business justifications. Use standard \
                     Markdown formatting. Do not use tables.",
                ),
                Role::Architect => (
                    "Create the technical requirements (Schema, APIs) for the features \
                     identified."
                        .to_string(),
                    "A technical brief with Database Schema, API Endpoints, and Integrations. \
                     Format the database schema using nested markdown bullet points. Format API \
                     endpoints using bold text and code blocks (```json) for payloads. Do not \
                     use markdown tables.",
                ),
                Role::Quality => (
                    "Review the technical brief from the Architect. Find 3 potential 'Edge \
                     Cases' or 'Risks' the Architect missed (e.g., Privacy, Offline Mode, Data \
                     Validation)."
                        .to_string(),
                    "A 'Risk Assessment' report with 3 critical gaps and suggested fixes.",
                ),
                Role::Synthesis => (
                    "Synthesize the technical architecture and risk assessment into a concise \
                     1-page executive summary. Extract only the most critical technical \
                     decisions, architecture choices, and risk mitigation strategies. Focus on \
                     business-relevant information that a PM needs to create a roadmap."
                        .to_string(),
                    "A strict 1-page summary with: (1) Key technical architecture decisions in \
                     bullet points, (2) Top 3 critical risks with mitigation strategies, (3) \
                     Integration dependencies. Use clear, non-technical language.",
                ),
                Role::Manager => (
                    "Create an executive summary with:\n\
                     1. Project overview (1 paragraph)\n\
                     2. Key features prioritized by effort vs impact\n\
                     3. Critical risks and mitigation strategies\n\
                     4. Recommended sprint breakdown (2-week sprints)\n\
                     5. Success metrics"
                        .to_string(),
                    "Executive summary with sprint plan and success criteria. Output the roadmap \
                     using standard H2 and H3 markdown headers. If comparing features, use a \
                     markdown table.",
                ),
            };

            StageSpec {
                role,
                description,
                expected_output: expected_output.to_string(),
                depends_on: dependencies(role),
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_graph_is_in_pipeline_order() {
        let order: Vec<Role> = STAGE_GRAPH.iter().map(|(role, _)| *role).collect();
        assert_eq!(order, Role::ALL);

        // Every dependency precedes its dependent.
        for (role, deps) in STAGE_GRAPH {
            assert!(deps.iter().all(|dep| *dep < role), "{role} depends on a later stage");
        }
    }

    #[test]
    fn test_declared_dependencies() {
        assert!(dependencies(Role::Intake).is_empty());
        assert_eq!(dependencies(Role::Synthesis), &[Role::Architect, Role::Quality]);
        assert_eq!(dependencies(Role::Manager), &[Role::Intake, Role::Synthesis]);
    }

    #[test]
    fn test_only_intake_embeds_project() {
        let stages = standard_stages("carbon tracker");
        assert_eq!(stages.len(), Role::COUNT);
        assert!(stages[0].description.contains("'carbon tracker'"));
        assert!(stages[1..].iter().all(|s| !s.description.contains("carbon tracker")));
    }
}
