//! Configuration module for er-blocking.
//!
//! This module provides a unified configuration system with:
//! - Type-safe configuration structures
//! - Validation for all configuration values
//! - Named presets for common use cases
//! - YAML config file loading and discovery
//! - CLI argument merging
//!
//! # Quick Start
//!
//! ```rust
//! use er_blocking::config::{AppConfig, ConfigPreset, ConfigurationSelection};
//!
//! // Use a preset
//! let config = AppConfig::from_preset(ConfigPreset::Strict);
//! assert!(config.blocking.resolve().is_ok());
//!
//! // Pick a grid configuration
//! let config = AppConfig::builder()
//!     .selection(ConfigurationSelection::Grid { iteration: 7 })
//!     .build();
//! let method = config.blocking.resolve().unwrap();
//! ```
//!
//! # Configuration File
//!
//! Place a `.er-blocking.yaml` file in the working directory or `~/.config/er-blocking/`:
//!
//! ```yaml
//! blocking:
//!   method: extended-q-grams
//!   q_gram_size: 4
//!   threshold: 0.9
//! output:
//!   format: json
//! ```

mod defaults;
pub mod file;
mod types;
mod validation;

pub use defaults::ConfigPreset;
pub use types::{
    AppConfig, AppConfigBuilder, BlockingConfig, ConfigurationSelection, ExecutionConfig,
    OutputConfig, OutputFormat,
};
pub use validation::{ConfigError, Validatable};

pub use file::{
    ConfigFileError, discover_config_file, generate_example_config, load_config_file,
    load_or_default,
};

use crate::error::{BlockingError, Result};

/// Generate a JSON Schema for the `AppConfig` configuration format.
///
/// This schema documents all configuration options that can be set in
/// `.er-blocking.yaml` config files.
pub fn generate_json_schema() -> Result<String> {
    let schema = schemars::schema_for!(AppConfig);
    serde_json::to_string_pretty(&schema)
        .map_err(|e| BlockingError::config(format!("serializing schema: {e}")))
}
