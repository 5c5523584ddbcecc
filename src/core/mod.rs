//! Core types and functionality for ProjectForge.
//!
//! This module contains the fundamental data structures used throughout
//! the application: the role registry, step records, output extraction,
//! and configuration.

mod config;
mod extract;
mod record;
mod role;

pub use config::{Config, LlmConfig, OutputConfig, DEFAULT_MODEL, DEFAULT_PLACEHOLDER};
pub use extract::{extract_safe, extract_strict, ExtractError, RoleOutput};
pub use record::{StepOutcome, StepRecord, StepStatus};
pub use role::{Role, RoleMap, UnknownRole};
