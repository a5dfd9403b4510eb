//! Source fetching, kept apart from the output so a slow download never
//! holds the output handle

use async_trait::async_trait;

use super::output::AudioSource;
use crate::error::{PlayerError, Result};

#[async_trait]
pub trait SourceFetcher: Send + Sync {
    async fn fetch(&self, source: &AudioSource) -> Result<Vec<u8>>;
}

/// Reads files with tokio and remote URLs with reqwest
#[derive(Clone, Default)]
pub struct StandardFetcher {
    http: reqwest::Client,
}

impl StandardFetcher {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl SourceFetcher for StandardFetcher {
    async fn fetch(&self, source: &AudioSource) -> Result<Vec<u8>> {
        match source {
            AudioSource::File(path) => tokio::fs::read(path)
                .await
                .map_err(|e| PlayerError::load(source, e)),
            AudioSource::Remote(url) => {
                let response = self
                    .http
                    .get(url)
                    .send()
                    .await
                    .and_then(|r| r.error_for_status())
                    .map_err(|e| PlayerError::load(source, e))?;
                let bytes = response
                    .bytes()
                    .await
                    .map_err(|e| PlayerError::load(source, e))?;
                tracing::debug!(url = %url, bytes = bytes.len(), "Remote source downloaded");
                Ok(bytes.to_vec())
            }
        }
    }
}
