use std::path::{Path, PathBuf};

use serde_json::Value;

use crate::{FetchError, TemplateProvider};

/// Reads the raw template from a JSON file on disk.
#[derive(Debug, Clone)]
pub struct FileTemplateProvider {
    path: PathBuf,
}

impl FileTemplateProvider {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl TemplateProvider for FileTemplateProvider {
    async fn fetch_template(&self) -> Result<Value, FetchError> {
        let content =
            tokio::fs::read_to_string(&self.path)
                .await
                .map_err(|source| FetchError::Read {
                    path: self.path.clone(),
                    source,
                })?;
        tracing::debug!(path = %self.path.display(), bytes = content.len(), "Read local template");
        serde_json::from_str(&content).map_err(|source| FetchError::Parse {
            path: self.path.clone(),
            source,
        })
    }
}
