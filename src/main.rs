//! ProjectForge - AI business analyst.
//!
//! Reads a project description from stdin, runs the five-stage analysis
//! and saves the text, HTML and PDF reports.

use std::io::{self, BufRead, Write};

use anyhow::Result;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use projectforge::report::save_reports;
use projectforge::{
    create_provider, run_analysis, Config, LlmStageExecutor, DEFAULT_DESCRIPTION, VERSION,
};

const RULE_WIDTH: usize = 60;

fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    // Setup logging
    let filter =
        EnvFilter::try_from_env("PROJECTFORGE_LOG").unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::registry()
        .with(fmt::layer().with_target(false).with_writer(io::stderr))
        .with(filter)
        .init();

    let config = Config::load()?;
    let user_input = read_description()?;

    let executor = LlmStageExecutor::new(create_provider(&config.llm)?);
    let provider = executor.provider();
    println!("\nUsing {} ({})", provider.model(), provider.name());

    println!("\n### ProjectForge: Initiating Full Analysis Workflow ###\n");

    let rt = tokio::runtime::Runtime::new()?;
    let result = rt.block_on(run_analysis(&executor, &user_input, &config))?;

    if let (true, Some(plan)) = (result.success, &result.final_output) {
        print_banner("FINAL PROJECT PLAN");
        println!("{plan}\n");
    } else if let Some(error) = &result.error {
        println!("\nWARNING: WORKFLOW ERROR: {error}");
        println!("Attempting to save partial results...\n");
    }

    let saved = save_reports(&config.output, &result, &user_input)?;

    let banner =
        if result.error.is_some() { "WARNING: PARTIAL OUTPUT SAVED" } else { "OUTPUT SAVED" };
    print_banner(banner);
    if let Some(path) = &saved.text {
        println!("   Plain text: {}", path.display());
    }
    if let Some(path) = &saved.html {
        println!("   HTML: {}", path.display());
    }
    if let Some(path) = &saved.pdf {
        println!("   PDF: {}", path.display());
    }
    println!("{}\n", "=".repeat(RULE_WIDTH));

    if result.error.is_some() {
        println!("WARNING: Workflow did not complete successfully.");
        println!("Partial results have been saved to output files.\n");
    }

    Ok(())
}

/// Prompt for a project description, falling back to the default.
fn read_description() -> Result<String> {
    print_banner(&format!("PROJECTFORGE v{VERSION} - AI Business Analyst"));
    println!("Describe your project idea:");
    println!("(You can include features, constraints, or just a general concept)\n");
    print!("> ");
    io::stdout().flush()?;

    let mut line = String::new();
    io::stdin().lock().read_line(&mut line)?;

    let input = line.trim();
    if input.is_empty() {
        println!("Using default: {DEFAULT_DESCRIPTION}");
        return Ok(DEFAULT_DESCRIPTION.to_string());
    }
    Ok(input.to_string())
}

fn print_banner(title: &str) {
    let rule = "=".repeat(RULE_WIDTH);
    println!("\n{rule}");
    println!("  {title}");
    println!("{rule}\n");
}
