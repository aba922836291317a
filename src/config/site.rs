//! Site configuration (_config.yml)

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use super::StorageConfig;

/// Main site configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    // Site
    pub title: String,
    pub description: String,
    pub author: String,

    /// Moment.js style format used when a post header supplies its own date
    pub date_format: String,

    #[serde(default)]
    pub server: ServerConfig,

    #[serde(default)]
    pub storage: StorageConfig,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            title: "My Blog".to_string(),
            description: String::new(),
            author: "John Doe".to_string(),
            date_format: "YYYY-MM-DD".to_string(),
            server: ServerConfig::default(),
            storage: StorageConfig::default(),
        }
    }
}

impl SiteConfig {
    /// Load configuration from a file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path.as_ref())?;
        let config: SiteConfig = serde_yaml::from_str(&content)?;
        Ok(config)
    }

    /// Build the effective configuration: file (when present) then environment
    pub fn resolve<P: AsRef<Path>>(path: Option<P>) -> Result<Self> {
        let mut config = match path {
            Some(path) if path.as_ref().exists() => {
                tracing::debug!("Loading config from {:?}", path.as_ref());
                Self::load(path)?
            }
            Some(path) => {
                tracing::debug!("No config file at {:?}, using defaults", path.as_ref());
                Self::default()
            }
            None => Self::default(),
        };

        config.storage.apply_env();
        Ok(config)
    }
}

/// HTTP listener settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub ip: String,
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            ip: "localhost".to_string(),
            port: 3000,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_default_config() {
        let config = SiteConfig::default();
        assert_eq!(config.title, "My Blog");
        assert_eq!(config.date_format, "YYYY-MM-DD");
        assert_eq!(config.server.port, 3000);
        assert!(!config.storage.is_configured());
    }

    #[test]
    fn test_parse_config() {
        let yaml = r#"
title: Notes
author: Test User
server:
  port: 8080
storage:
  region: eu-central-1
  bucket: notes
  content_path: posts/
"#;
        let config: SiteConfig = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(config.title, "Notes");
        assert_eq!(config.author, "Test User");
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.server.ip, "localhost");
        assert_eq!(config.storage.bucket, "notes");
        assert_eq!(config.storage.content_path, "posts/");
        assert_eq!(config.storage.posts_json_path, "posts.json");
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "title: From File\ndate_format: MMMM DD, YYYY").unwrap();

        let config = SiteConfig::load(file.path()).unwrap();
        assert_eq!(config.title, "From File");
        assert_eq!(config.date_format, "MMMM DD, YYYY");
    }

    #[test]
    fn test_resolve_missing_file_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = SiteConfig::resolve(Some(dir.path().join("_config.yml"))).unwrap();
        assert_eq!(config.title, "My Blog");
    }
}
