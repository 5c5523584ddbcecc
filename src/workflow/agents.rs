//! Built-in agent personas.

use serde::{Deserialize, Serialize};

use crate::core::Role;

/// The persona a stage is executed under.
///
/// `display_name` is what the executing agent reports on its step records,
/// so it must match the role registry for extraction to resolve it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AgentProfile {
    pub display_name: String,
    pub goal: String,
    pub backstory: String,
}

impl AgentProfile {
    /// The built-in persona for `role`.
    pub fn for_role(role: Role) -> Self {
        let (goal, backstory) = match role {
            Role::Intake => (
                "Identify core features from messy notes.",
                "You are a veteran Business Analyst expert at identifying user needs.",
            ),
            Role::Architect => (
                "Create a high-level technical implementation plan.",
                "You are a Senior Systems Engineer who designs scalable, secure backends.",
            ),
            Role::Quality => (
                "Identify gaps, security risks, and edge cases in the technical plan.",
                "You are a cynical Senior QA Lead. You look for what could go wrong. \
                 You check for data privacy, missing error states, and logic gaps.",
            ),
            Role::Synthesis => (
                "Condense complex technical and QA reports into brief, actionable executive \
                 bullet points.",
                "You are a Staff Engineer who translates technical jargon into business-ready \
                 summaries.",
            ),
            Role::Manager => (
                "Create executive summary and next steps from the audit.",
                "You are an experienced PM who synthesizes technical details into actionable \
                 roadmaps with clear priorities and timelines.",
            ),
        };

        Self {
            display_name: role.display_name().to_string(),
            goal: goal.to_string(),
            backstory: backstory.to_string(),
        }
    }

    /// System prompt for a model acting as this agent.
    pub fn system_prompt(&self) -> String {
        format!("You are the {}. {}\n\nYour goal: {}", self.display_name, self.backstory, self.goal)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_profiles_use_registered_names() {
        for role in Role::ALL {
            let profile = AgentProfile::for_role(role);
            assert_eq!(Role::from_display_name(&profile.display_name), Ok(role));
            assert!(!profile.goal.is_empty());
        }
    }

    #[test]
    fn test_system_prompt_mentions_goal() {
        let prompt = AgentProfile::for_role(Role::Quality).system_prompt();
        assert!(prompt.starts_with("You are the Senior Quality Auditor."));
        assert!(prompt.contains("edge cases"));
    }
}
