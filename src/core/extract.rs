//! Role-keyed output extraction.
//!
//! Two entry points share one algorithm:
//!
//! - [`extract_strict`] is all-or-nothing and reports exactly which roles
//!   never completed.
//! - [`extract_safe`] never fails on missing output. It marks missing roles
//!   as [`RoleOutput::Absent`] but still surfaces [`UnknownRole`], because
//!   an unregistered agent means the pipeline wiring is broken rather than
//!   a step merely not finishing.

use std::fmt;

use serde::Serialize;

use super::record::StepRecord;
use super::role::{Role, RoleMap, UnknownRole};

/// Errors from strict extraction.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ExtractError {
    /// A record names an agent outside the role registry.
    #[error(transparent)]
    UnknownRole(#[from] UnknownRole),

    /// One or more roles have no completed record.
    #[error("missing outputs for roles: {}", MissingList(.missing))]
    MissingRoles {
        /// Absent roles in canonical pipeline order
        missing: Vec<Role>,
    },
}

struct MissingList<'a>(&'a [Role]);

impl fmt::Display for MissingList<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let keys: Vec<_> = self.0.iter().map(|role| role.key()).collect();
        f.write_str(&keys.join(", "))
    }
}

/// Output of one role after graceful extraction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum RoleOutput {
    /// The role completed with this text
    Text(String),
    /// The role never completed
    Absent,
}

impl RoleOutput {
    pub fn is_absent(&self) -> bool {
        matches!(self, Self::Absent)
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(text) => Some(text),
            Self::Absent => None,
        }
    }

    /// Text of the role, or `placeholder` when absent.
    pub fn text_or<'a>(&'a self, placeholder: &'a str) -> &'a str {
        self.as_text().unwrap_or(placeholder)
    }
}

/// Extract a complete role to text mapping.
///
/// Records are processed in order. Every record's agent name must resolve
/// through the registry; completed records bind their text, with later
/// records replacing earlier ones for the same role. Empty text counts as
/// present.
pub fn extract_strict(records: &[StepRecord]) -> Result<RoleMap<String>, ExtractError> {
    let found = collect_outputs(records)?;

    let missing: Vec<Role> =
        found.iter().filter(|(_, text)| text.is_none()).map(|(role, _)| role).collect();
    if !missing.is_empty() {
        return Err(ExtractError::MissingRoles { missing });
    }

    Ok(found.map(|_, text| text.unwrap_or_default()))
}

/// Extract every role's output, marking roles without a completed record
/// as [`RoleOutput::Absent`].
pub fn extract_safe(records: &[StepRecord]) -> Result<RoleMap<RoleOutput>, UnknownRole> {
    match extract_strict(records) {
        Ok(outputs) => Ok(outputs.map(|_, text| RoleOutput::Text(text))),
        Err(ExtractError::UnknownRole(err)) => Err(err),
        Err(ExtractError::MissingRoles { missing }) => {
            let keys: Vec<_> = missing.iter().map(|role| role.key()).collect();
            tracing::warn!(missing = %keys.join(", "), "Degrading to partial outputs");

            let found = collect_outputs(records)?;
            Ok(found.map(|role, text| match text {
                Some(text) if !missing.contains(&role) => RoleOutput::Text(text),
                _ => RoleOutput::Absent,
            }))
        }
    }
}

/// Resolve each record and bind completed text, last write wins.
fn collect_outputs(records: &[StepRecord]) -> Result<RoleMap<Option<String>>, UnknownRole> {
    let mut outputs: RoleMap<Option<String>> = RoleMap::default();

    for record in records {
        let role = Role::from_display_name(record.agent_role())?;
        tracing::debug!(stage = record.stage(), role = %role, status = ?record.status(), "Resolved step record");

        if let Some(text) = record.text() {
            if outputs.insert(role, Some(text.to_string())).is_some() {
                tracing::debug!(role = %role, "Later record supersedes earlier output");
            }
        }
    }

    Ok(outputs)
}
