//! # ProjectForge
//!
//! AI business analyst - turns a rough project idea into a set of planning
//! documents produced by five specialised LLM agents.
//!
//! ## Pipeline
//!
//! - **Requirements intake** picks the priority features
//! - **Technical architect** designs schema, APIs and integrations
//! - **Quality auditor** finds risks the design missed
//! - **Technical synthesizer** condenses design and risks
//! - **Project manager** writes the executive summary and roadmap
//!
//! A failed stage never throws away finished work: outputs are extracted
//! per role, and missing sections are rendered with a placeholder.
//!
//! ## Quick Start
//!
//! ```bash
//! export GOOGLE_API_KEY=...
//! echo "A carbon tracking app with trip logging" | projectforge
//! ```

#![forbid(unsafe_code)]
#![warn(clippy::all, clippy::pedantic, clippy::nursery)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_const_for_fn)]
#![allow(clippy::doc_markdown)]
#![allow(clippy::return_self_not_must_use)]
#![allow(clippy::struct_excessive_bools)]
#![allow(clippy::option_if_let_else)]
#![allow(clippy::format_push_string)]
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::uninlined_format_args)]
#![allow(clippy::missing_panics_doc)]

pub mod ai;
pub mod core;
pub mod report;
pub mod workflow;

// Re-export commonly used types
pub use ai::{create_provider, LlmProvider};
pub use crate::core::{
    extract_safe, extract_strict, Config, ExtractError, Role, RoleMap, RoleOutput, StepRecord,
    UnknownRole,
};
pub use workflow::{
    run_analysis, AnalysisResult, LlmStageExecutor, PipelineCoordinator, StageExecutor,
};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Application name
pub const APP_NAME: &str = "projectforge";

/// Project used when the user enters no description.
pub const DEFAULT_DESCRIPTION: &str =
    "We need a carbon tracking app with car trip logging and Google Login.";
