//! CLI entry points for the analysis commands.
//!
//! Each command prints the same JSON body the matching HTTP route returns.

use anyhow::Result;
use serde::Serialize;

use edublog_core::analysis::responder::AutoResponder;
use edublog_core::analysis::suggest::ContentSuggester;
use edublog_core::analysis::{AnalysisOrchestrator, ContentInput};

use crate::config::Config;

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn orchestrator(config: &Config) -> Result<AnalysisOrchestrator> {
    let tables = config.analysis.tables()?;
    tracing::debug!(version = %tables.version, "loaded analysis tables");
    Ok(AnalysisOrchestrator::new(&tables))
}

pub fn run_analyze(config: &Config, title: &str, body: &str) -> Result<()> {
    let input = ContentInput::new(Some(title.to_string()), Some(body.to_string()))?;
    let analysis = orchestrator(config)?.analyze(&input)?;
    print_json(&serde_json::json!({ "analysis": analysis }))
}

pub fn run_moderate(config: &Config, content: &str) -> Result<()> {
    let moderation = orchestrator(config)?.moderate(content);
    print_json(&serde_json::json!({ "moderation": moderation }))
}

pub fn run_respond(comment: &str) -> Result<()> {
    let response = AutoResponder::default().respond(comment)?;
    print_json(&serde_json::json!({ "response": response }))
}

pub fn run_generate(title: &str) -> Result<()> {
    let suggestion = ContentSuggester::default().suggest(title)?;
    print_json(&suggestion)
}
