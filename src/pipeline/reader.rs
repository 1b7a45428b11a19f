//! Entity profile readers.

use crate::error::{BlockingError, ErrorContext, Result};
use crate::model::EntityProfile;
use std::path::{Path, PathBuf};

/// Supplies the profiles of one collection, in index order.
pub trait EntityReader {
    /// Read every profile of the collection.
    fn entity_profiles(&self) -> Result<Vec<EntityProfile>>;
}

/// Reads a JSON array of profiles:
///
/// ```json
/// [{"entity_url": "e1", "attributes": [{"name": "title", "value": "abc"}]}]
/// ```
#[derive(Debug, Clone)]
pub struct JsonEntityReader {
    path: PathBuf,
}

impl JsonEntityReader {
    /// Reader for the file at `path`
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Source file
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl EntityReader for JsonEntityReader {
    fn entity_profiles(&self) -> Result<Vec<EntityProfile>> {
        let content = std::fs::read_to_string(&self.path)
            .map_err(|e| BlockingError::io(&self.path, e))?;
        let profiles: Vec<EntityProfile> = serde_json::from_str(&content)
            .with_context(|| format!("parsing {}", self.path.display()))?;

        tracing::debug!(
            path = %self.path.display(),
            profiles = profiles.len(),
            "read entity profiles"
        );
        Ok(profiles)
    }
}
