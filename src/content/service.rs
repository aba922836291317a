//! Post service - assembles posts from the bucket, falling back to samples
//!
//! Remote lookups never fail the caller. Each stage reports either a ready
//! value or the reason the sample posts should be used instead, and the
//! public entry points resolve that reason against [`fallback`].

use std::fmt;

use super::{fallback, CatalogLoader, ContentFetcher, FrontMatter, Post, PostMetadata};
use crate::config::{SiteConfig, StorageConfig};
use crate::helpers::compare_newest_first;
use crate::storage::ObjectStoreClient;

/// Why a lookup is being served from the sample posts
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FallbackReason {
    /// No usable credentials, or the client could not be built
    NotConfigured,
    /// The catalog is missing, empty, or unreadable
    EmptyCatalog,
    /// The catalog does not list the requested slug
    NotInCatalog,
    /// The body for a catalog entry could not be fetched
    ContentUnavailable { key: String },
}

impl fmt::Display for FallbackReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotConfigured => write!(f, "object storage is not configured"),
            Self::EmptyCatalog => write!(f, "no posts metadata found"),
            Self::NotInCatalog => write!(f, "slug not listed in the catalog"),
            Self::ContentUnavailable { key } => write!(f, "content {} unavailable", key),
        }
    }
}

/// Outcome of one remote retrieval stage
#[derive(Debug, Clone, PartialEq)]
pub enum Retrieval<T> {
    Ready(T),
    UseFallback(FallbackReason),
}

/// Where posts are currently served from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContentSource {
    Remote,
    Demo,
}

/// Lists and resolves posts
#[derive(Debug, Clone)]
pub struct PostService {
    storage: StorageConfig,
    date_format: String,
    client: Option<ObjectStoreClient>,
}

impl PostService {
    /// Build a service, connecting to the bucket when credentials are present
    pub fn new(config: &SiteConfig) -> Self {
        let client = if config.storage.is_configured() {
            match ObjectStoreClient::new(&config.storage) {
                Ok(client) => Some(client),
                Err(e) => {
                    tracing::warn!("{}. Using dummy data.", e);
                    None
                }
            }
        } else {
            tracing::info!("No AWS credentials found. Using dummy data.");
            None
        };

        Self {
            storage: config.storage.clone(),
            date_format: config.date_format.clone(),
            client,
        }
    }

    /// Build a service around an existing client
    pub fn with_client(config: &SiteConfig, client: ObjectStoreClient) -> Self {
        Self {
            storage: config.storage.clone(),
            date_format: config.date_format.clone(),
            client: Some(client),
        }
    }

    pub fn source(&self) -> ContentSource {
        if self.client.is_some() {
            ContentSource::Remote
        } else {
            ContentSource::Demo
        }
    }

    pub fn is_using_fallback(&self) -> bool {
        self.source() == ContentSource::Demo
    }

    /// The bucket client, when running against remote storage
    pub fn client(&self) -> Option<&ObjectStoreClient> {
        self.client.as_ref()
    }

    /// All posts, newest first, without bodies.
    ///
    /// Sample posts are returned as-is, in their fixed order.
    pub async fn list_posts(&self) -> Vec<Post> {
        match self.remote_posts().await {
            Retrieval::Ready(posts) => posts,
            Retrieval::UseFallback(reason) => {
                tracing::info!("Listing sample posts: {}", reason);
                fallback::posts().to_vec()
            }
        }
    }

    /// One post with its body, or `None` if neither the bucket nor the
    /// samples know the slug
    pub async fn get_post(&self, slug: &str) -> Option<Post> {
        match self.remote_post(slug).await {
            Retrieval::Ready(post) => Some(post),
            Retrieval::UseFallback(reason) => {
                tracing::info!("Looking up {} in sample posts: {}", slug, reason);
                fallback::find(slug)
            }
        }
    }

    async fn catalog(&self) -> Retrieval<(&ObjectStoreClient, Vec<PostMetadata>)> {
        let Some(client) = &self.client else {
            return Retrieval::UseFallback(FallbackReason::NotConfigured);
        };

        let entries = CatalogLoader::new(client, &self.storage.posts_json_path)
            .load()
            .await;
        if entries.is_empty() {
            return Retrieval::UseFallback(FallbackReason::EmptyCatalog);
        }

        Retrieval::Ready((client, entries))
    }

    async fn remote_posts(&self) -> Retrieval<Vec<Post>> {
        let mut entries = match self.catalog().await {
            Retrieval::Ready((_, entries)) => entries,
            Retrieval::UseFallback(reason) => return Retrieval::UseFallback(reason),
        };

        // stable: undated entries keep their catalog order at the end
        entries.sort_by(|a, b| compare_newest_first(&a.date, &b.date));

        Retrieval::Ready(entries.into_iter().map(Post::summary).collect())
    }

    async fn remote_post(&self, slug: &str) -> Retrieval<Post> {
        let (client, entries) = match self.catalog().await {
            Retrieval::Ready(found) => found,
            Retrieval::UseFallback(reason) => return Retrieval::UseFallback(reason),
        };

        let Some(metadata) = entries.into_iter().find(|entry| entry.slug == slug) else {
            return Retrieval::UseFallback(FallbackReason::NotInCatalog);
        };

        let key = self.content_key(&metadata);
        let Some(raw) = ContentFetcher::new(client).fetch_body(&key).await else {
            return Retrieval::UseFallback(FallbackReason::ContentUnavailable { key });
        };

        Retrieval::Ready(self.assemble(metadata, &raw))
    }

    fn content_key(&self, metadata: &PostMetadata) -> String {
        match &metadata.file_path {
            Some(path) if !path.is_empty() => path.clone(),
            _ => self.storage.default_content_key(&metadata.slug),
        }
    }

    /// Merge catalog metadata with a fetched body and its header
    fn assemble(&self, metadata: PostMetadata, raw: &str) -> Post {
        let (fm, body) = FrontMatter::parse(raw);
        let mut post = Post::with_content(metadata, body.to_string());
        post.apply_front_matter(fm, &self.date_format);
        post
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::testing::client_with;

    async fn service_with(objects: &[(&str, &str)]) -> PostService {
        let client = client_with(objects).await;
        PostService::with_client(&SiteConfig::default(), client)
    }

    fn fallback_slugs() -> Vec<String> {
        fallback::posts().iter().map(|p| p.slug.clone()).collect()
    }

    fn slugs(posts: &[Post]) -> Vec<String> {
        posts.iter().map(|p| p.slug.clone()).collect()
    }

    #[tokio::test]
    async fn test_unconfigured_uses_samples() {
        let service = PostService::new(&SiteConfig::default());
        assert!(service.is_using_fallback());

        let posts = service.list_posts().await;
        assert_eq!(slugs(&posts), fallback_slugs());

        let post = service.get_post("working-with-aws-s3").await.unwrap();
        assert!(!post.content.is_empty());
        assert!(service.get_post("unknown").await.is_none());
    }

    #[tokio::test]
    async fn test_incomplete_credentials_use_samples() {
        let mut config = SiteConfig::default();
        config.storage.access_key_id = "AKIA".to_string();
        config.storage.secret_access_key = "secret".to_string();
        config.storage.region = "us-east-1".to_string();

        let service = PostService::new(&config);
        assert!(service.client().is_none());
        assert_eq!(service.source(), ContentSource::Demo);
        assert_eq!(slugs(&service.list_posts().await), fallback_slugs());
        assert_eq!(
            service.get_post("getting-started-with-nextjs").await,
            fallback::find("getting-started-with-nextjs")
        );
    }

    #[tokio::test]
    async fn test_missing_catalog_behaves_like_unconfigured() {
        let service = service_with(&[]).await;
        assert_eq!(service.source(), ContentSource::Remote);

        assert_eq!(slugs(&service.list_posts().await), fallback_slugs());
        assert_eq!(
            service.get_post("markdown-blog-with-nextjs").await,
            fallback::find("markdown-blog-with-nextjs")
        );
        assert!(service.get_post("unknown").await.is_none());
    }

    #[tokio::test]
    async fn test_empty_catalog_behaves_like_unconfigured() {
        let service = service_with(&[("posts.json", "[]")]).await;
        assert_eq!(slugs(&service.list_posts().await), fallback_slugs());
    }

    #[tokio::test]
    async fn test_list_sorted_newest_first() {
        let catalog = r#"[
            {"slug": "p1", "title": "One", "date": "2023-01-01", "excerpt": ""},
            {"slug": "undated", "title": "?", "date": "whenever", "excerpt": ""},
            {"slug": "p2", "title": "Two", "date": "2023-06-01", "excerpt": ""}
        ]"#;
        let service = service_with(&[("posts.json", catalog)]).await;

        let posts = service.list_posts().await;
        assert_eq!(slugs(&posts), vec!["p2", "p1", "undated"]);
        assert!(posts.iter().all(|p| p.content.is_empty()));
    }

    #[tokio::test]
    async fn test_get_post_merges_header() {
        let catalog = r#"[{
            "slug": "hello",
            "title": "Catalog title",
            "date": "2023-01-01",
            "excerpt": "Catalog excerpt",
            "tags": ["catalog"]
        }]"#;
        let body = "---\ntitle: Header title\ndate: 2024-03-05 09:00:00\ntags: header\n---\n\n# Hello\n";
        let service = service_with(&[("posts.json", catalog), ("content/hello.md", body)]).await;

        let post = service.get_post("hello").await.unwrap();
        assert_eq!(post.slug, "hello");
        assert_eq!(post.title, "Header title");
        assert_eq!(post.date, "2024-03-05");
        assert_eq!(post.excerpt, "Catalog excerpt");
        assert_eq!(post.tags, Some(vec!["header".to_string()]));
        assert_eq!(post.content, "# Hello\n");
    }

    #[tokio::test]
    async fn test_percent_in_date_format() {
        let config = SiteConfig {
            date_format: "YYYY-MM-DD 100%".to_string(),
            ..SiteConfig::default()
        };
        let catalog = r#"[{"slug": "p", "title": "P", "date": "2023-01-01", "excerpt": ""}]"#;
        let client = client_with(&[
            ("posts.json", catalog),
            ("content/p.md", "---\ndate: 2024-01-02\n---\nbody"),
        ])
        .await;
        let service = PostService::with_client(&config, client);

        let post = service.get_post("p").await.unwrap();
        assert_eq!(post.date, "2024-01-02 100%");
        assert_eq!(post.content, "body");
    }

    #[tokio::test]
    async fn test_get_post_without_header_keeps_body() {
        let catalog = r#"[{"slug": "plain", "title": "A", "date": "2023-01-01", "excerpt": ""}]"#;
        let body = "\nJust text.\n";
        let service = service_with(&[("posts.json", catalog), ("content/plain.md", body)]).await;

        let post = service.get_post("plain").await.unwrap();
        assert_eq!(post.title, "A");
        assert_eq!(post.date, "2023-01-01");
        assert_eq!(post.content, "\nJust text.\n");
    }

    #[tokio::test]
    async fn test_explicit_file_path() {
        let catalog = r#"[{"slug": "custom", "title": "C", "date": "2023-01-01", "excerpt": "", "filePath": "drafts/2023/custom.markdown"}]"#;
        let service = service_with(&[
            ("posts.json", catalog),
            ("drafts/2023/custom.markdown", "custom body"),
        ])
        .await;

        let post = service.get_post("custom").await.unwrap();
        assert_eq!(post.content, "custom body");
    }

    #[tokio::test]
    async fn test_missing_body_falls_back() {
        let catalog = r#"[
            {"slug": "working-with-aws-s3", "title": "Remote", "date": "2023-01-01", "excerpt": ""},
            {"slug": "orphan", "title": "Orphan", "date": "2023-01-01", "excerpt": ""}
        ]"#;
        let service = service_with(&[("posts.json", catalog)]).await;

        let post = service.get_post("working-with-aws-s3").await.unwrap();
        assert_eq!(post.title, "Working with AWS S3 in Node.js");
        assert!(service.get_post("orphan").await.is_none());
    }

    #[tokio::test]
    async fn test_slug_not_in_catalog_falls_back() {
        let catalog = r#"[{"slug": "only", "title": "Only", "date": "2023-01-01", "excerpt": ""}]"#;
        let service = service_with(&[("posts.json", catalog)]).await;

        let post = service.get_post("tailwind-css-tips-and-tricks").await.unwrap();
        assert_eq!(post.slug, "tailwind-css-tips-and-tricks");
    }

    #[tokio::test]
    async fn test_remote_post_reports_reason() {
        let catalog = r#"[{"slug": "p", "title": "P", "date": "2023-01-01", "excerpt": ""}]"#;
        let service = service_with(&[("posts.json", catalog)]).await;

        assert_eq!(
            service.remote_post("p").await,
            Retrieval::UseFallback(FallbackReason::ContentUnavailable {
                key: "content/p.md".to_string()
            })
        );
        assert_eq!(
            service.remote_post("q").await,
            Retrieval::UseFallback(FallbackReason::NotInCatalog)
        );
    }
}
