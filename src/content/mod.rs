//! Content module - post retrieval, front-matter, fallback samples and rendering

mod catalog;
pub mod fallback;
mod fetcher;
mod frontmatter;
mod markdown;
mod post;
mod service;

pub use catalog::CatalogLoader;
pub use fetcher::ContentFetcher;
pub use frontmatter::FrontMatter;
pub use markdown::MarkdownRenderer;
pub use post::{Post, PostMetadata};
pub use service::{ContentSource, FallbackReason, PostService, Retrieval};
