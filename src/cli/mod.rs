//! CLI command handlers.
//!
//! This module provides testable command handlers that are invoked by main.rs.
//! Each handler implements the business logic for a specific CLI subcommand.

mod blocks;
mod output;
mod params;
mod sweep;

pub use blocks::run_blocks;
pub use output::{OutputTarget, write_output};
pub use params::{parameters_document, run_params};
pub use sweep::{SweepRow, run_sweep, sweep};
