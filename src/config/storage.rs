//! Object storage settings

use serde::{Deserialize, Serialize};

/// Connection settings for the bucket holding the catalog and post bodies
#[derive(Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    pub access_key_id: String,
    pub secret_access_key: String,
    pub region: String,
    pub bucket: String,

    /// Custom endpoint for S3-compatible stores (MinIO, R2, ...)
    pub endpoint: Option<String>,

    /// Key of the JSON catalog listing every post
    pub posts_json_path: String,

    /// Prefix used to derive `<prefix><slug>.md` when a post has no explicit file path
    pub content_path: String,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            access_key_id: String::new(),
            secret_access_key: String::new(),
            region: String::new(),
            bucket: String::new(),
            endpoint: None,
            posts_json_path: "posts.json".to_string(),
            content_path: "content/".to_string(),
        }
    }
}

impl std::fmt::Debug for StorageConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StorageConfig")
            .field("access_key_id", &redact(&self.access_key_id))
            .field("secret_access_key", &redact(&self.secret_access_key))
            .field("region", &self.region)
            .field("bucket", &self.bucket)
            .field("endpoint", &self.endpoint)
            .field("posts_json_path", &self.posts_json_path)
            .field("content_path", &self.content_path)
            .finish()
    }
}

fn redact(value: &str) -> &'static str {
    if value.is_empty() {
        "<unset>"
    } else {
        "<redacted>"
    }
}

impl StorageConfig {
    /// Whether all four credentials needed for remote mode are present.
    ///
    /// When this returns false every lookup is served from the built-in
    /// sample posts and the store is never contacted.
    pub fn is_configured(&self) -> bool {
        !self.access_key_id.is_empty()
            && !self.secret_access_key.is_empty()
            && !self.region.is_empty()
            && !self.bucket.is_empty()
    }

    /// Override fields from the process environment
    pub fn apply_env(&mut self) {
        self.apply_env_from(|name| std::env::var(name).ok());
    }

    /// Override fields from an arbitrary variable lookup; empty values are ignored
    pub fn apply_env_from<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |name: &str| lookup(name).filter(|v| !v.is_empty());

        if let Some(v) = get("AWS_ACCESS_KEY_ID") {
            self.access_key_id = v;
        }
        if let Some(v) = get("AWS_SECRET_ACCESS_KEY") {
            self.secret_access_key = v;
        }
        if let Some(v) = get("AWS_REGION") {
            self.region = v;
        }
        if let Some(v) = get("AWS_S3_BUCKET_NAME") {
            self.bucket = v;
        }
        if let Some(v) = get("AWS_ENDPOINT_URL") {
            self.endpoint = Some(v);
        }
        if let Some(v) = get("POSTS_JSON_PATH") {
            self.posts_json_path = v;
        }
        if let Some(v) = get("S3_CONTENT_PATH") {
            self.content_path = v;
        }
    }

    /// Storage key for a post body that has no explicit `filePath`
    pub fn default_content_key(&self, slug: &str) -> String {
        format!("{}{}.md", self.content_path, slug)
    }
}
