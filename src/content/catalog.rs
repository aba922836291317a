//! Catalog loader - reads the JSON list of post metadata from the bucket

use super::PostMetadata;
use crate::storage::{ObjectStoreClient, StoreError};

/// Loads `posts.json` (or the configured catalog key)
pub struct CatalogLoader<'a> {
    client: &'a ObjectStoreClient,
    key: &'a str,
}

impl<'a> CatalogLoader<'a> {
    pub fn new(client: &'a ObjectStoreClient, key: &'a str) -> Self {
        Self { client, key }
    }

    /// Load every catalog entry.
    ///
    /// An absent, empty or malformed catalog yields an empty list; callers
    /// read that as "serve the sample posts instead".
    pub async fn load(&self) -> Vec<PostMetadata> {
        match self.try_load().await {
            Ok(entries) => entries,
            Err(e) if e.is_not_found() => {
                tracing::info!("Catalog {} not found in bucket {}", self.key, self.client.bucket());
                Vec::new()
            }
            Err(e) => {
                tracing::warn!("Error fetching posts metadata from {}: {}", self.key, e);
                Vec::new()
            }
        }
    }

    async fn try_load(&self) -> Result<Vec<PostMetadata>, StoreError> {
        let text = self.client.fetch_text(self.key).await?;
        if text.trim().is_empty() {
            tracing::info!("Catalog {} is empty", self.key);
            return Ok(Vec::new());
        }

        let entries: Vec<PostMetadata> =
            serde_json::from_str(&text).map_err(|e| StoreError::Decode {
                key: self.key.to_string(),
                reason: e.to_string(),
            })?;

        let total = entries.len();
        let entries: Vec<_> = entries
            .into_iter()
            .filter(|entry| !entry.slug.trim().is_empty())
            .collect();
        if entries.len() < total {
            tracing::warn!(
                "Skipped {} catalog entries without a slug in {}",
                total - entries.len(),
                self.key
            );
        }

        tracing::debug!("Loaded {} catalog entries from {}", entries.len(), self.key);
        Ok(entries)
    }
}
