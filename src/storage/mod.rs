//! Object storage access
//!
//! A thin wrapper over [`object_store`] bound to a single bucket. Missing
//! objects surface as [`StoreError::NotFound`] so callers can tell them apart
//! from transport or credential failures. There are no retries: the first
//! failure is returned as-is.

mod content_type;

pub use content_type::{content_type_for, is_textual};

use bytes::Bytes;
use object_store::aws::AmazonS3Builder;
use object_store::path::Path as ObjectPath;
use object_store::ObjectStore;
use std::sync::Arc;
use thiserror::Error;

use crate::config::StorageConfig;

/// Object storage failures
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("object storage credentials are not configured")]
    NotConfigured,

    #[error("object not found: {key}")]
    NotFound { key: String },

    #[error("invalid object key {key:?}: {source}")]
    InvalidKey {
        key: String,
        #[source]
        source: object_store::path::Error,
    },

    #[error("failed to decode {key}: {reason}")]
    Decode { key: String, reason: String },

    #[error("failed to create client for bucket {bucket}: {source}")]
    Client {
        bucket: String,
        #[source]
        source: object_store::Error,
    },

    #[error("error fetching {key}: {source}")]
    Transport {
        key: String,
        #[source]
        source: object_store::Error,
    },
}

impl StoreError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, StoreError::NotFound { .. })
    }
}

/// Read-only client for one bucket
#[derive(Clone)]
pub struct ObjectStoreClient {
    bucket: String,
    store: Arc<dyn ObjectStore>,
}

impl std::fmt::Debug for ObjectStoreClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ObjectStoreClient")
            .field("bucket", &self.bucket)
            .field("store", &self.store.to_string())
            .finish()
    }
}

impl ObjectStoreClient {
    /// Build an S3 client from the storage settings
    pub fn new(config: &StorageConfig) -> Result<Self, StoreError> {
        if !config.is_configured() {
            return Err(StoreError::NotConfigured);
        }

        let mut builder = AmazonS3Builder::new()
            .with_bucket_name(&config.bucket)
            .with_region(&config.region)
            .with_access_key_id(&config.access_key_id)
            .with_secret_access_key(&config.secret_access_key);

        if let Some(endpoint) = &config.endpoint {
            builder = builder.with_endpoint(endpoint).with_allow_http(true);
        }

        let store = builder.build().map_err(|source| StoreError::Client {
            bucket: config.bucket.clone(),
            source,
        })?;

        tracing::debug!("Created S3 client for bucket {}", config.bucket);
        Ok(Self::with_store(config.bucket.clone(), Arc::new(store)))
    }

    /// Wrap an existing store (in-memory stores in tests, or any other backend)
    pub fn with_store(bucket: impl Into<String>, store: Arc<dyn ObjectStore>) -> Self {
        Self {
            bucket: bucket.into(),
            store,
        }
    }

    /// Bucket this client reads from
    pub fn bucket(&self) -> &str {
        &self.bucket
    }

    /// Fetch the raw bytes stored under `key`
    pub async fn fetch(&self, key: &str) -> Result<Bytes, StoreError> {
        let path = ObjectPath::parse(key).map_err(|source| StoreError::InvalidKey {
            key: key.to_string(),
            source,
        })?;

        let map_err = |source: object_store::Error| match source {
            object_store::Error::NotFound { .. } => StoreError::NotFound {
                key: key.to_string(),
            },
            source => StoreError::Transport {
                key: key.to_string(),
                source,
            },
        };

        let result = self.store.get(&path).await.map_err(map_err)?;
        let bytes = result.bytes().await.map_err(map_err)?;

        tracing::debug!("Fetched {}/{} ({} bytes)", self.bucket, key, bytes.len());
        Ok(bytes)
    }

    /// Fetch an object and decode it as UTF-8 text
    pub async fn fetch_text(&self, key: &str) -> Result<String, StoreError> {
        let bytes = self.fetch(key).await?;
        String::from_utf8(bytes.to_vec()).map_err(|e| StoreError::Decode {
            key: key.to_string(),
            reason: e.to_string(),
        })
    }
}
