//! bucket-blog: a Markdown blog served from S3-compatible object storage
//!
//! Posts are listed in a JSON catalog and stored as Markdown objects in a
//! bucket. When the bucket is not configured, or cannot provide a post, a
//! built-in set of sample posts is served instead so pages never break.

pub mod commands;
pub mod config;
pub mod content;
pub mod helpers;
pub mod server;
pub mod storage;

use anyhow::Result;
use std::path::Path;

/// The blog application
#[derive(Clone)]
pub struct Blog {
    /// Site configuration
    pub config: config::SiteConfig,
    /// Post retrieval with sample fallback
    pub posts: content::PostService,
}

impl Blog {
    /// Create a blog from an optional config file plus the environment
    pub fn new<P: AsRef<Path>>(config_path: Option<P>) -> Result<Self> {
        let config = config::SiteConfig::resolve(config_path)?;
        Ok(Self::from_config(config))
    }

    /// Create a blog from an already-resolved configuration
    pub fn from_config(config: config::SiteConfig) -> Self {
        let posts = content::PostService::new(&config);
        Self { config, posts }
    }

    /// Print all posts
    pub async fn list(&self) -> Result<()> {
        commands::list::run(self).await
    }

    /// Print a single post
    pub async fn show(&self, slug: &str, html: bool) -> Result<()> {
        commands::show::run(self, slug, html).await
    }

    /// Serve the HTTP API
    pub async fn serve(&self, ip: &str, port: u16) -> Result<()> {
        server::start(self, ip, port).await
    }
}
