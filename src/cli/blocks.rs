//! Blocks command handler.
//!
//! Implements the `blocks` subcommand: read one or two profile collections,
//! run the configured blocking method and report the blocks.

use super::output::{OutputTarget, write_output};
use crate::config::{AppConfig, OutputFormat};
use crate::model::{Block, BlockStats, EntityProfile};
use crate::pipeline::{EntityReader, JsonEntityReader, Workflow, WorkflowResult};
use anyhow::{Context, Result};
use serde::Serialize;
use std::fmt::Write as _;
use std::path::Path;

/// JSON document written by `blocks -o json`.
#[derive(Debug, Serialize)]
struct BlocksReport<'a> {
    method: &'a str,
    configuration: &'a str,
    clean_clean: bool,
    stats: &'a BlockStats,
    blocks: &'a [Block],
}

/// Run the blocks command.
pub fn run_blocks(config: &AppConfig, profiles: &Path, second: Option<&Path>) -> Result<()> {
    let method = config
        .blocking
        .resolve()
        .context("Invalid blocking configuration")?;

    let (profiles1, profiles2) = read_collections(profiles, second)?;
    let result = Workflow::new(method)
        .run(&profiles1, profiles2.as_deref())
        .context("Block building failed")?;

    let content = match config.output.format {
        OutputFormat::Summary => render_summary(&result, profiles1.len(), profiles2.as_deref())
            .context("Failed to render summary")?,
        OutputFormat::Json => render_json(&result, profiles2.is_some())?,
    };
    write_output(&content, &OutputTarget::from_option(config.output.file.clone()))
}

/// Read the first collection and, for clean-clean ER, the second.
pub(super) fn read_collections(
    profiles: &Path,
    second: Option<&Path>,
) -> Result<(Vec<EntityProfile>, Option<Vec<EntityProfile>>)> {
    let profiles1 = JsonEntityReader::new(profiles)
        .entity_profiles()
        .with_context(|| format!("Failed to read {}", profiles.display()))?;
    let profiles2 = second
        .map(|path| {
            JsonEntityReader::new(path)
                .entity_profiles()
                .with_context(|| format!("Failed to read {}", path.display()))
        })
        .transpose()?;

    tracing::info!(
        profiles1 = profiles1.len(),
        profiles2 = profiles2.as_ref().map_or(0, Vec::len),
        "read entity collections"
    );
    Ok((profiles1, profiles2))
}

fn render_summary(
    result: &WorkflowResult,
    profiles1: usize,
    profiles2: Option<&[EntityProfile]>,
) -> Result<String, std::fmt::Error> {
    let mut out = String::new();
    writeln!(out, "Workflow:       {}", result.workflow_name)?;
    writeln!(out, "Configuration:  {}", result.workflow_configuration())?;
    match profiles2 {
        Some(second) => {
            writeln!(out, "Profiles:       {profiles1} + {} (clean-clean)", second.len())?;
        }
        None => writeln!(out, "Profiles:       {profiles1} (dirty)")?,
    }
    writeln!(out, "Blocks:         {}", result.stats.blocks)?;
    writeln!(out, "Comparisons:    {}", result.stats.comparisons)?;
    writeln!(out, "Largest block:  {}", result.stats.largest_block)?;
    write!(out, "Elapsed:        {:.3?}", result.elapsed)?;
    Ok(out)
}

fn render_json(result: &WorkflowResult, clean_clean: bool) -> Result<String> {
    let configuration = result.workflow_configuration();
    let report = BlocksReport {
        method: &result.workflow_name,
        configuration: &configuration,
        clean_clean,
        stats: &result.stats,
        blocks: &result.blocks,
    };
    serde_json::to_string_pretty(&report).context("Failed to serialize blocks")
}
