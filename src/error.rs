//! Unified error types for er-blocking.
//!
//! Configuration failures and reader failures are kept as distinct variants so
//! that a workflow driver can decide whether to abort the whole pipeline or
//! skip a single stage.

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for er-blocking operations.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum BlockingError {
    /// A tunable parameter was given a value outside its admissible domain
    #[error("Invalid value for parameter '{parameter}': {message}")]
    InvalidParameter { parameter: String, message: String },

    /// A grid or random search was asked for an iteration it does not hold
    #[error("Iteration {iteration} is out of range (configurations: {count})")]
    IterationOutOfRange { iteration: usize, count: usize },

    /// Errors raised while reading entity profiles
    #[error("Failed to read entity profiles: {context}")]
    Read {
        context: String,
        #[source]
        source: ReadErrorKind,
    },

    /// A downstream pipeline stage reported a failure
    #[error("Stage '{stage}' failed: {message}")]
    Stage { stage: String, message: String },

    /// Configuration errors
    #[error("Invalid configuration: {0}")]
    Config(String),

    /// Validation errors
    #[error("Validation failed: {0}")]
    Validation(String),
}

/// Specific reader error kinds
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum ReadErrorKind {
    #[error("IO error at {path:?}: {source}")]
    Io {
        path: Option<PathBuf>,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid JSON structure: {0}")]
    InvalidJson(String),
}

// ============================================================================
// Result type alias
// ============================================================================

/// Convenient Result type for er-blocking operations
pub type Result<T> = std::result::Result<T, BlockingError>;

// ============================================================================
// Error construction helpers
// ============================================================================

impl BlockingError {
    /// Create an invalid-parameter error
    pub fn invalid_parameter(parameter: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidParameter {
            parameter: parameter.into(),
            message: message.into(),
        }
    }

    /// Create an out-of-range error for a search space lookup
    #[must_use]
    pub const fn out_of_range(iteration: usize, count: usize) -> Self {
        Self::IterationOutOfRange { iteration, count }
    }

    /// Create a read error with context
    pub fn read(context: impl Into<String>, source: ReadErrorKind) -> Self {
        Self::Read {
            context: context.into(),
            source,
        }
    }

    /// Create a read error for an IO failure at a path
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        let path = path.into();
        Self::read(
            format!("reading {}", path.display()),
            ReadErrorKind::Io {
                path: Some(path),
                source,
            },
        )
    }

    /// Create a stage failure
    pub fn stage(stage: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Stage {
            stage: stage.into(),
            message: message.into(),
        }
    }

    /// Create a config error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Create a validation error
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    /// Whether this error originates from configuration rather than input data.
    #[must_use]
    pub const fn is_configuration_error(&self) -> bool {
        matches!(
            self,
            Self::InvalidParameter { .. } | Self::IterationOutOfRange { .. } | Self::Config(_)
        )
    }
}

// ============================================================================
// Conversions from existing error types
// ============================================================================

impl From<std::io::Error> for BlockingError {
    fn from(err: std::io::Error) -> Self {
        Self::read(
            "IO",
            ReadErrorKind::Io {
                path: None,
                source: err,
            },
        )
    }
}

impl From<serde_json::Error> for BlockingError {
    fn from(err: serde_json::Error) -> Self {
        Self::read(
            "JSON deserialization",
            ReadErrorKind::InvalidJson(err.to_string()),
        )
    }
}

// ============================================================================
// Error context extension trait
// ============================================================================

/// Extension trait for adding context to errors.
///
/// Context strings are chained outermost first, so a failure deep inside a
/// reader surfaces as `"loading side 2: reading profiles.json: ..."`.
pub trait ErrorContext<T> {
    /// Add context to an error.
    fn context(self, context: impl Into<String>) -> Result<T>;

    /// Add context from a closure, evaluated only on error.
    fn with_context<F, C>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> C,
        C: Into<String>;
}

impl<T, E: Into<BlockingError>> ErrorContext<T> for std::result::Result<T, E> {
    fn context(self, context: impl Into<String>) -> Result<T> {
        let ctx: String = context.into();
        self.map_err(|e| add_context_to_error(e.into(), &ctx))
    }

    fn with_context<F, C>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> C,
        C: Into<String>,
    {
        self.map_err(|e| {
            let ctx: String = f().into();
            add_context_to_error(e.into(), &ctx)
        })
    }
}

/// Add context to an error, chaining with any existing context.
fn add_context_to_error(err: BlockingError, new_ctx: &str) -> BlockingError {
    match err {
        BlockingError::Read {
            context: existing,
            source,
        } => BlockingError::Read {
            context: chain_context(new_ctx, &existing),
            source,
        },
        BlockingError::Stage { stage, message } => BlockingError::Stage {
            stage,
            message: chain_context(new_ctx, &message),
        },
        BlockingError::InvalidParameter { parameter, message } => {
            BlockingError::InvalidParameter {
                parameter,
                message: chain_context(new_ctx, &message),
            }
        }
        BlockingError::Config(msg) => BlockingError::Config(chain_context(new_ctx, &msg)),
        BlockingError::Validation(msg) => BlockingError::Validation(chain_context(new_ctx, &msg)),
        other @ BlockingError::IterationOutOfRange { .. } => other,
    }
}

/// Chain two context strings together.
///
/// If the existing context is empty, returns just the new context.
/// Otherwise, returns "`new_context`: `existing_context`".
fn chain_context(new: &str, existing: &str) -> String {
    if existing.is_empty() {
        new.to_string()
    } else {
        format!("{new}: {existing}")
    }
}

/// Extension trait for Option types to convert to errors with context.
pub trait OptionContext<T> {
    /// Convert None to an error with the given context.
    fn context_none(self, context: impl Into<String>) -> Result<T>;
}

impl<T> OptionContext<T> for Option<T> {
    fn context_none(self, context: impl Into<String>) -> Result<T> {
        self.ok_or_else(|| BlockingError::Validation(context.into()))
    }
}
