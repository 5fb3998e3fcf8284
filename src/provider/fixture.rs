use std::path::{Path, PathBuf};

use log::info;

use crate::VelocityError;
use crate::model::ProviderPayload;

use super::DataProvider;

/// Offline provider that reads a payload JSON file, in the same shape the
/// live provider produces: `{"data": {...}, "sources": [...]}`.
#[derive(Debug, Clone)]
pub struct FixtureProvider {
    path: PathBuf,
}

impl FixtureProvider {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_payload(&self) -> Result<ProviderPayload, VelocityError> {
        let content =
            std::fs::read_to_string(&self.path).map_err(|e| VelocityError::FixtureIOError {
                path: format!("{:?}", self.path),
                source: e,
            })?;
        let payload = serde_json::from_str(&content)
            .map_err(|e| VelocityError::PayloadDecodeError { source: e })?;
        info!("Loaded fixture payload from {:?}", self.path);
        Ok(payload)
    }
}

impl DataProvider for FixtureProvider {
    fn fetch(
        &self,
    ) -> impl std::future::Future<Output = Result<ProviderPayload, VelocityError>> + Send {
        let result = self.read_payload();
        async move { result }
    }
}
