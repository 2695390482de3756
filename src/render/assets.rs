//! Named text resources and the static bundle.

use std::collections::HashMap;
use std::io::ErrorKind;
use std::path::{Component, Path, PathBuf};

use async_trait::async_trait;
use axum::{
    body::Body,
    http::{header, Request, StatusCode},
    response::{IntoResponse, Response},
};
use tower::ServiceExt;
use tower_http::services::ServeDir;

use crate::error::{GatewayError, GatewayResult};
use crate::http::request::GatewayRequest;

pub const INDEX: &str = "index.html";
pub const SERVICE_WORKER: &str = "sw.js";
pub const MANIFEST: &str = "static/manifest.json";
pub const SHARE_NOT_FOUND: &str = "static/share/404.html";
pub const SHARE_PREVIEW: &str = "static/share/index.html";

/// Source of the UI bundle.
#[async_trait]
pub trait AssetProvider: Send + Sync {
    /// Text of a named resource; a missing resource is an error.
    async fn text(&self, name: &str) -> GatewayResult<String>;

    /// Serve a file from the static bundle for a request whose path is
    /// relative to the bundle root (e.g. `/static/app.js`).
    async fn serve(&self, request: GatewayRequest) -> Response;
}

/// Assets read from a directory on disk.
#[derive(Debug, Clone)]
pub struct DirAssets {
    root: PathBuf,
}

impl DirAssets {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }
}

#[async_trait]
impl AssetProvider for DirAssets {
    async fn text(&self, name: &str) -> GatewayResult<String> {
        let relative = Path::new(name);
        if relative.components().any(|c| !matches!(c, Component::Normal(_))) {
            return Err(GatewayError::AssetNotFound(name.to_string()));
        }

        match tokio::fs::read_to_string(self.root.join(relative)).await {
            Ok(text) => Ok(text),
            Err(e) if e.kind() == ErrorKind::NotFound => {
                Err(GatewayError::AssetNotFound(name.to_string()))
            }
            Err(e) => Err(e.into()),
        }
    }

    async fn serve(&self, request: GatewayRequest) -> Response {
        let uri = request
            .path
            .split('/')
            .map(|segment| urlencoding::encode(segment).into_owned())
            .collect::<Vec<_>>()
            .join("/");

        let inner = match Request::builder()
            .method(request.method)
            .uri(uri)
            .body(Body::empty())
        {
            Ok(req) => req,
            Err(_) => return StatusCode::BAD_REQUEST.into_response(),
        };

        let service = ServeDir::new(&self.root).append_index_html_on_directories(false);
        match service.oneshot(inner).await {
            Ok(response) => response.map(Body::new),
            Err(never) => match never {},
        }
    }
}

/// Assets held in memory, for embedding a bundle into the binary.
#[derive(Debug, Clone, Default)]
pub struct MemoryAssets {
    files: HashMap<String, Vec<u8>>,
}

impl MemoryAssets {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, name: impl Into<String>, content: impl Into<Vec<u8>>) -> Self {
        self.insert(name, content);
        self
    }

    pub fn insert(&mut self, name: impl Into<String>, content: impl Into<Vec<u8>>) {
        self.files.insert(name.into(), content.into());
    }
}

#[async_trait]
impl AssetProvider for MemoryAssets {
    async fn text(&self, name: &str) -> GatewayResult<String> {
        let bytes = self
            .files
            .get(name)
            .ok_or_else(|| GatewayError::AssetNotFound(name.to_string()))?;
        Ok(String::from_utf8_lossy(bytes).into_owned())
    }

    async fn serve(&self, request: GatewayRequest) -> Response {
        let name = request.path.trim_start_matches('/');
        match self.files.get(name) {
            Some(bytes) => (
                [(header::CONTENT_TYPE, content_type_for(name))],
                bytes.clone(),
            )
                .into_response(),
            None => StatusCode::NOT_FOUND.into_response(),
        }
    }
}

fn content_type_for(name: &str) -> &'static str {
    let ext = name.rsplit_once('.').map(|(_, ext)| ext).unwrap_or_default();
    match ext.to_ascii_lowercase().as_str() {
        "html" => "text/html; charset=utf-8",
        "js" => "application/javascript; charset=utf-8",
        "css" => "text/css; charset=utf-8",
        "json" => "application/json",
        "svg" => "image/svg+xml",
        "png" => "image/png",
        "ico" => "image/x-icon",
        "txt" => "text/plain; charset=utf-8",
        "woff2" => "font/woff2",
        _ => "application/octet-stream",
    }
}
