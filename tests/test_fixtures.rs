//! Shared test fixtures for the HTTP and database tests

#![allow(dead_code)]

use axum::body::Body;
use axum::http::{header, Method, Request, Response};
use axum::Router;
use serde::de::DeserializeOwned;
use serde_json::Value;
use tempfile::TempDir;

use catalog_service::{api::create_router, application::builder::ApplicationBuilder, Config};

pub const BOUNDARY: &str = "catalog-test-boundary";

/// In-memory application with blobs under a temporary directory
pub struct TestApp {
    pub router: Router,
    pub blob_dir: TempDir,
}

impl TestApp {
    pub async fn new() -> Self {
        Self::with_env(&[]).await
    }

    /// Extra environment overrides on top of the in-memory defaults
    pub async fn with_env(overrides: &[(&str, &str)]) -> Self {
        let blob_dir = TempDir::new().expect("Failed to create temp dir");
        let root = blob_dir.path().to_string_lossy().to_string();

        let config = Config::from_lookup(|key| {
            if let Some((_, value)) = overrides.iter().find(|(k, _)| *k == key) {
                return Some(value.to_string());
            }
            match key {
                "PERSISTENCE_BACKEND" => Some("memory".to_string()),
                "BLOB_STORAGE_ROOT" => Some(root.clone()),
                "REKEY_INITIAL_BACKOFF_MS" => Some("1".to_string()),
                _ => None,
            }
        })
        .expect("valid test config");

        let state = ApplicationBuilder::new(config)
            .with_database()
            .await
            .expect("database step")
            .with_infrastructure()
            .await
            .expect("infrastructure step")
            .build()
            .expect("application state");

        Self {
            router: create_router(state),
            blob_dir,
        }
    }
}

pub fn empty_request(method: Method, uri: &str) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

pub fn json_request(method: Method, uri: &str, body: &Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(serde_json::to_vec(body).unwrap()))
        .unwrap()
}

/// A part of a hand-built multipart form
pub enum Part<'a> {
    File {
        file_name: &'a str,
        content_type: &'a str,
        content: &'a [u8],
    },
    Text {
        name: &'a str,
        value: &'a str,
    },
}

pub fn multipart_request(uri: &str, parts: &[Part<'_>]) -> Request<Body> {
    let mut body = Vec::new();
    for part in parts {
        body.extend_from_slice(format!("--{}\r\n", BOUNDARY).as_bytes());
        match part {
            Part::File {
                file_name,
                content_type,
                content,
            } => {
                body.extend_from_slice(
                    format!(
                        "Content-Disposition: form-data; name=\"file\"; filename=\"{}\"\r\nContent-Type: {}\r\n\r\n",
                        file_name, content_type
                    )
                    .as_bytes(),
                );
                body.extend_from_slice(content);
            }
            Part::Text { name, value } => {
                body.extend_from_slice(
                    format!("Content-Disposition: form-data; name=\"{}\"\r\n\r\n{}", name, value)
                        .as_bytes(),
                );
            }
        }
        body.extend_from_slice(b"\r\n");
    }
    body.extend_from_slice(format!("--{}--\r\n", BOUNDARY).as_bytes());

    Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header(
            header::CONTENT_TYPE,
            format!("multipart/form-data; boundary={}", BOUNDARY),
        )
        .body(Body::from(body))
        .unwrap()
}

pub async fn body_bytes(response: Response<Body>) -> Vec<u8> {
    axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("readable body")
        .to_vec()
}

pub async fn body_json<T: DeserializeOwned>(response: Response<Body>) -> T {
    let bytes = body_bytes(response).await;
    serde_json::from_slice(&bytes).unwrap_or_else(|e| {
        panic!(
            "body is not the expected JSON ({}): {}",
            e,
            String::from_utf8_lossy(&bytes)
        )
    })
}
