//! Sweep command handler.
//!
//! Runs every grid configuration of a blocking method over the same input
//! and reports how block count and comparisons respond to the parameters.

use super::blocks::read_collections;
use super::output::{OutputTarget, write_output};
use crate::blocking::BlockingMethodKind;
use crate::config::{AppConfig, OutputFormat};
use crate::model::EntityProfile;
use crate::pipeline::{ConfigurationSearch, MethodDescription, Workflow};
use anyhow::{Context, Result};
use serde::Serialize;
use std::fmt::Write as _;
use std::path::Path;
use std::time::Duration;

/// Outcome of one grid configuration.
#[derive(Debug, Clone, Serialize)]
pub struct SweepRow {
    /// Grid iteration
    pub iteration: usize,
    /// Method configuration at this iteration
    pub configuration: String,
    /// Number of blocks
    pub blocks: usize,
    /// Total candidate comparisons
    pub comparisons: u64,
    /// Block-building time
    pub elapsed: Duration,
}

/// Run every grid configuration of `kind` over the given collections.
pub fn sweep(
    kind: BlockingMethodKind,
    profiles1: &[EntityProfile],
    profiles2: Option<&[EntityProfile]>,
) -> Result<Vec<SweepRow>> {
    let search = kind.search()?;
    let count = search.number_of_grid_configurations();
    tracing::info!(method = %kind, configurations = count, "starting grid sweep");

    (0..count)
        .map(|iteration| {
            let method = search.numbered_grid_configuration(iteration)?;
            let configuration = method.method_configuration();
            let result = Workflow::new(method)
                .run(profiles1, profiles2)
                .with_context(|| format!("Grid iteration {iteration} ({configuration}) failed"))?;
            Ok(SweepRow {
                iteration,
                configuration,
                blocks: result.stats.blocks,
                comparisons: result.stats.comparisons,
                elapsed: result.elapsed,
            })
        })
        .collect()
}

/// Run the sweep command.
pub fn run_sweep(config: &AppConfig, profiles: &Path, second: Option<&Path>) -> Result<()> {
    let (profiles1, profiles2) = read_collections(profiles, second)?;
    let rows = sweep(config.blocking.method, &profiles1, profiles2.as_deref())?;

    let content = match config.output.format {
        OutputFormat::Summary => render_table(&rows).context("Failed to render sweep table")?,
        OutputFormat::Json => {
            serde_json::to_string_pretty(&rows).context("Failed to serialize sweep")?
        }
    };
    write_output(&content, &OutputTarget::from_option(config.output.file.clone()))
}

fn render_table(rows: &[SweepRow]) -> Result<String, std::fmt::Error> {
    let mut out = String::new();
    writeln!(
        out,
        "{:>4}  {:<48}  {:>8}  {:>14}  {:>10}",
        "#", "Configuration", "Blocks", "Comparisons", "Elapsed"
    )?;
    for row in rows {
        writeln!(
            out,
            "{:>4}  {:<48}  {:>8}  {:>14}  {:>10}",
            row.iteration,
            row.configuration.replace('\t', " "),
            row.blocks,
            row.comparisons,
            format!("{:.2?}", row.elapsed)
        )?;
    }
    Ok(out.trim_end().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sweep_covers_every_grid_configuration() {
        let profiles = vec![
            EntityProfile::new("1").with_attribute("name", "robertson"),
            EntityProfile::new("2").with_attribute("name", "robertsen"),
            EntityProfile::new("3").with_attribute("name", "smith"),
        ];
        let rows = sweep(BlockingMethodKind::QGrams, &profiles, None).unwrap();
        assert_eq!(rows.len(), 5);
        assert_eq!(rows[0].configuration, "Q-gram Size=2");
        // Shorter q-grams never produce fewer shared keys between these two names
        assert!(rows[0].blocks >= rows[4].blocks);
        assert!(rows.iter().all(|row| row.blocks > 0));
    }

    #[test]
    fn test_table_has_header_and_rows() {
        let profiles = vec![
            EntityProfile::new("1").with_attribute("name", "abc"),
            EntityProfile::new("2").with_attribute("name", "abc"),
        ];
        let rows = sweep(BlockingMethodKind::Standard, &profiles, None).unwrap();
        let table = render_table(&rows).unwrap();
        assert_eq!(table.lines().count(), 2);
        assert!(table.contains("Parameter-free method"));
    }
}
