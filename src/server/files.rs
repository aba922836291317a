//! Read-through endpoint for arbitrary objects in the bucket

use axum::{
    extract::{Query, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use bytes::Bytes;
use serde::Deserialize;
use std::sync::Arc;

use super::{error_response, AppState};
use crate::storage::{content_type_for, is_textual, StoreError};

#[derive(Debug, Deserialize)]
pub struct FileQuery {
    path: Option<String>,
    #[serde(rename = "type")]
    kind: Option<String>,
}

/// How the object body is sent back
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReturnMode {
    Json,
    Text,
    Binary,
    Auto,
}

impl ReturnMode {
    /// Unknown or missing values mean `auto`
    pub fn parse(value: Option<&str>) -> Self {
        match value {
            Some("json") => ReturnMode::Json,
            Some("text") => ReturnMode::Text,
            Some("binary") => ReturnMode::Binary,
            _ => ReturnMode::Auto,
        }
    }
}

/// `GET /api/files?path=<key>&type=<mode>`
pub async fn read_file(
    State(state): State<Arc<AppState>>,
    Query(query): Query<FileQuery>,
) -> Response {
    let path = match query.path.as_deref() {
        Some(path) if !path.is_empty() => path,
        _ => return error_response(StatusCode::BAD_REQUEST, "File path is required"),
    };

    if path.contains("..") {
        tracing::warn!("Rejected file path with traversal: {}", path);
        return error_response(StatusCode::BAD_REQUEST, "Invalid file path");
    }

    let Some(client) = state.posts.client() else {
        return error_response(
            StatusCode::INTERNAL_SERVER_ERROR,
            "AWS credentials not configured",
        );
    };

    let bytes = match client.fetch(path).await {
        Ok(bytes) => bytes,
        Err(e) => {
            tracing::error!("Error fetching file {} from object storage: {}", path, e);
            return store_error_response(&e);
        }
    };

    respond(path, ReturnMode::parse(query.kind.as_deref()), bytes)
}

fn respond(path: &str, mode: ReturnMode, bytes: Bytes) -> Response {
    match mode {
        ReturnMode::Json => match serde_json::from_slice::<serde_json::Value>(&bytes) {
            Ok(value) => Json(value).into_response(),
            Err(_) => error_response(StatusCode::BAD_REQUEST, "Invalid JSON content"),
        },
        ReturnMode::Text => text_response("text/plain", &bytes),
        ReturnMode::Binary => binary_response("application/octet-stream", bytes),
        ReturnMode::Auto => {
            let content_type = content_type_for(path);
            if is_textual(content_type) {
                text_response(content_type, &bytes)
            } else {
                binary_response(content_type, bytes)
            }
        }
    }
}

fn text_response(content_type: &'static str, bytes: &[u8]) -> Response {
    let text = String::from_utf8_lossy(bytes).into_owned();
    ([(header::CONTENT_TYPE, content_type)], text).into_response()
}

fn binary_response(content_type: &'static str, bytes: Bytes) -> Response {
    ([(header::CONTENT_TYPE, content_type)], bytes).into_response()
}

fn store_error_response(err: &StoreError) -> Response {
    match err {
        StoreError::NotFound { .. } => error_response(StatusCode::NOT_FOUND, "File not found"),
        StoreError::InvalidKey { .. } => {
            error_response(StatusCode::BAD_REQUEST, "Invalid file path")
        }
        StoreError::Decode { .. } => error_response(StatusCode::BAD_REQUEST, &err.to_string()),
        StoreError::NotConfigured => error_response(
            StatusCode::INTERNAL_SERVER_ERROR,
            "AWS credentials not configured",
        ),
        StoreError::Client { .. } | StoreError::Transport { .. } => {
            error_response(StatusCode::INTERNAL_SERVER_ERROR, &err.to_string())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_return_mode_parse() {
        assert_eq!(ReturnMode::parse(Some("json")), ReturnMode::Json);
        assert_eq!(ReturnMode::parse(Some("text")), ReturnMode::Text);
        assert_eq!(ReturnMode::parse(Some("binary")), ReturnMode::Binary);
        assert_eq!(ReturnMode::parse(Some("auto")), ReturnMode::Auto);
        assert_eq!(ReturnMode::parse(Some("xml")), ReturnMode::Auto);
        assert_eq!(ReturnMode::parse(None), ReturnMode::Auto);
    }

    #[test]
    fn test_store_error_status() {
        let not_found = StoreError::NotFound {
            key: "a.md".to_string(),
        };
        assert_eq!(store_error_response(&not_found).status(), StatusCode::NOT_FOUND);

        let decode = StoreError::Decode {
            key: "a.md".to_string(),
            reason: "bad".to_string(),
        };
        assert_eq!(store_error_response(&decode).status(), StatusCode::BAD_REQUEST);

        assert_eq!(
            store_error_response(&StoreError::NotConfigured).status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }
}
