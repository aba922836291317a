//! Post body fetcher

use crate::storage::ObjectStoreClient;

/// Resolves storage keys to Markdown bodies
pub struct ContentFetcher<'a> {
    client: &'a ObjectStoreClient,
}

impl<'a> ContentFetcher<'a> {
    pub fn new(client: &'a ObjectStoreClient) -> Self {
        Self { client }
    }

    /// Fetch the full text stored under `key`.
    ///
    /// Every failure is logged and reported as `None`.
    pub async fn fetch_body(&self, key: &str) -> Option<String> {
        match self.client.fetch_text(key).await {
            Ok(text) if text.is_empty() => {
                tracing::info!("Content object {} is empty", key);
                None
            }
            Ok(text) => Some(text),
            Err(e) if e.is_not_found() => {
                tracing::info!("Content object {} not found", key);
                None
            }
            Err(e) => {
                tracing::warn!("Error fetching post content from {}: {}", key, e);
                None
            }
        }
    }
}
