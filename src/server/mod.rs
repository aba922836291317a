//! HTTP server exposing posts and the bucket read endpoint

mod files;

pub use files::ReturnMode;

use anyhow::Result;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde_json::json;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::trace::TraceLayer;

use crate::config::SiteConfig;
use crate::content::{MarkdownRenderer, PostService};
use crate::Blog;

/// Shared, read-only server state
pub struct AppState {
    pub title: String,
    pub description: String,
    pub author: String,
    pub posts: PostService,
    pub renderer: MarkdownRenderer,
}

impl AppState {
    pub fn new(config: &SiteConfig, posts: PostService) -> Self {
        Self {
            title: config.title.clone(),
            description: config.description.clone(),
            author: config.author.clone(),
            posts,
            renderer: MarkdownRenderer::new(),
        }
    }
}

/// Build the router with every endpoint
pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/api/health", get(health_handler))
        .route("/api/posts", get(list_handler))
        .route("/api/posts/:slug", get(post_handler))
        .route("/api/files", get(files::read_file))
        .fallback(fallback_handler)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Start the server
pub async fn start(blog: &Blog, ip: &str, port: u16) -> Result<()> {
    let state = Arc::new(AppState::new(&blog.config, blog.posts.clone()));
    let app = router(state);

    // Parse address - handle "localhost" specially
    let bind_ip = if ip == "localhost" { "127.0.0.1" } else { ip };
    let addr: SocketAddr = format!("{}:{}", bind_ip, port).parse()?;

    println!("Server running at http://{}:{}", ip, port);
    if blog.posts.is_using_fallback() {
        println!("Serving demo content: object storage credentials are not configured.");
    }
    println!("Press Ctrl+C to stop.");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        return;
    }
    tracing::info!("Shutting down");
}

/// JSON error body shared by every endpoint
pub(crate) fn error_response(status: StatusCode, message: &str) -> Response {
    (status, Json(json!({ "error": message }))).into_response()
}

async fn health_handler() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok", "version": env!("CARGO_PKG_VERSION") }))
}

async fn list_handler(State(state): State<Arc<AppState>>) -> Json<serde_json::Value> {
    let posts = state.posts.list_posts().await;
    Json(json!({
        "title": state.title,
        "description": state.description,
        "author": state.author,
        "demo": state.posts.is_using_fallback(),
        "posts": posts,
    }))
}

async fn post_handler(State(state): State<Arc<AppState>>, Path(slug): Path<String>) -> Response {
    let Some(post) = state.posts.get_post(&slug).await else {
        return error_response(StatusCode::NOT_FOUND, "Post not found");
    };

    let html = match state.renderer.render(&post.content) {
        Ok(html) => html,
        Err(e) => {
            tracing::error!("Failed to render post {}: {}", slug, e);
            return error_response(StatusCode::INTERNAL_SERVER_ERROR, "Failed to render post");
        }
    };

    Json(json!({
        "demo": state.posts.is_using_fallback(),
        "post": post,
        "html": html,
    }))
    .into_response()
}

async fn fallback_handler() -> Response {
    error_response(StatusCode::NOT_FOUND, "Not found")
}
