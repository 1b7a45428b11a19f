//! **Blocking for entity resolution.**
//!
//! Entity resolution finds the profiles that describe the same real-world
//! entity, within one collection (dirty ER) or across two (clean-clean ER).
//! Comparing every pair is quadratic, so `er-blocking` first groups profiles
//! into small, possibly overlapping blocks of likely matches; downstream
//! stages only compare profiles that share a block.
//!
//! ## Key Features
//!
//! - **Extended Q-Grams Blocking**: keys are order-preserving combinations of
//!   a token's q-grams, down to a length set by a combination threshold, which
//!   tolerates small spelling differences.
//! - **Q-Grams and Standard Blocking**: simpler methods sharing the same
//!   interface, for comparison and for parameter-free runs.
//! - **Parameter Spaces**: every tunable parameter is described by fixed,
//!   grid or random search, addressable by a single iteration index for
//!   automated sweeps.
//! - **Configurable Workflows**: a blocking method plus block-processing
//!   stages, driven by a YAML configuration.
//!
//! ## Core Concepts & Modules
//!
//! - **[`model`]**: [`EntityProfile`] inputs and [`Block`] outputs.
//! - **[`blocking`]**: tokenization, q-gram combination, the blocking methods
//!   and the block assembler.
//! - **[`parameters`]**: [`FixedValue`], [`GridSearch`] and [`RandomSearch`].
//! - **[`pipeline`]**: stage traits, readers and the [`Workflow`] orchestrator.
//! - **[`config`]**: configuration files, presets and validation.
//!
//! ## Getting Started
//!
//! ```
//! use er_blocking::{BlockBuilding, EntityProfile, ExtendedQGramsBlocking};
//!
//! let profiles = vec![
//!     EntityProfile::new("p1").with_attribute("name", "roberts"),
//!     EntityProfile::new("p2").with_attribute("name", "robert"),
//!     EntityProfile::new("p3").with_attribute("name", "smith"),
//! ];
//!
//! let method = ExtendedQGramsBlocking::new(6, 0.95)?;
//! let blocks = method.build_blocks(&profiles, None)?;
//!
//! // "roberts" and "robert" share the key "robert"
//! assert_eq!(blocks.len(), 1);
//! assert_eq!(blocks[0].profile_indices_side1(), &[0, 1]);
//! # Ok::<(), er_blocking::BlockingError>(())
//! ```
//!
//! ### Sweeping Configurations
//!
//! ```
//! use er_blocking::blocking::BlockingMethodKind;
//! use er_blocking::{ConfigurationSearch, MethodDescription};
//!
//! let search = BlockingMethodKind::ExtendedQGrams.search()?;
//! for i in 0..search.number_of_grid_configurations() {
//!     let method = search.numbered_grid_configuration(i)?;
//!     println!("{i}: {}", method.method_configuration());
//! }
//! # Ok::<(), er_blocking::BlockingError>(())
//! ```

// Lint to discourage unwrap() in production code - prefer explicit error handling
#![warn(clippy::unwrap_used)]
#![allow(
    // Counts and indices are converted to f64 for thresholds and back
    clippy::cast_precision_loss,
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    clippy::missing_errors_doc,
    clippy::missing_panics_doc,
    clippy::module_name_repetitions
)]

pub mod blocking;
pub mod cli;
pub mod config;
pub mod error;
pub mod model;
pub mod parameters;
pub mod pipeline;

// Re-export main types for convenience
pub use blocking::{
    BlockingMethod, BlockingMethodKind, BlockingSearch, ExtendedQGramsBlocking, KeyGenerator,
    QGramsBlocking, StandardBlocking,
};
pub use config::{AppConfig, AppConfigBuilder, BlockingConfig, ConfigPreset};
pub use config::{ConfigError, Validatable};
pub use error::{BlockingError, ErrorContext, OptionContext, Result};
pub use model::{Attribute, Block, BlockKind, BlockStats, EntityProfile};
pub use parameters::{FixedValue, GridSearch, ParameterDescriptor, ParameterSpace, RandomSearch};
pub use pipeline::{
    BlockBuilding, BlockProcessing, ConfigurationSearch, EntityReader, JsonEntityReader,
    MethodDescription, Workflow, WorkflowResult,
};
