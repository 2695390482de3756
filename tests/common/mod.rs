//! Shared fixtures for the integration tests.

#![allow(dead_code)]

use std::path::Path;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::{
    body::Body,
    http::{HeaderMap, Request, StatusCode},
    response::IntoResponse,
    Router,
};
use http_body_util::BodyExt;

use filegate::api::ApiHandlers;
use filegate::config::{GatewayConfig, RuleConfig, UserConfig};
use filegate::error::{GatewayError, GatewayResult};
use filegate::http::{GatewayRequest, Outcome, RequestContext, Services};
use filegate::render::assets::MemoryAssets;
use filegate::security::{Authenticator, Principal};
use filegate::share::{MemoryShareStore, ShareLink, ShareStore, StoreError};
use filegate::staticgen::{HookOutcome, StaticGen};
use filegate::HttpServer;

pub const TOKEN: &str = "secret-token";
pub const SETTINGS_PATH: &str = "/config.toml";

pub fn test_assets() -> MemoryAssets {
    MemoryAssets::new()
        .with("index.html", "<html><base href=\"{{ base_url }}/\"></html>")
        .with("sw.js", "const BASE = \"{{ base_url }}\";")
        .with("static/manifest.json", "{\"start_url\": \"{{ base_url }}/\"}")
        .with("static/app.js", "console.log('app');")
        .with("static/share/404.html", "<h1>Share not found</h1>")
        .with("static/share/index.html", "<h1>{{ file.name }}</h1><a href=\"{{ base_url }}/\">home</a>")
}

/// Config with one user scoped to `scope`, denied below `/private`.
pub fn test_config(scope: &Path, base_url: &str) -> GatewayConfig {
    let mut config = GatewayConfig::default();
    config.server.base_url = base_url.to_string();
    config.users.push(UserConfig {
        username: "alice".to_string(),
        token: TOKEN.to_string(),
        scope: scope.to_path_buf(),
        rules: vec![RuleConfig {
            path: "/private".to_string(),
            allow: false,
        }],
    });
    config
}

/// Records every handler invocation as `"<area> <path>"`.
#[derive(Clone, Default)]
pub struct RecordingHandlers {
    pub calls: Arc<Mutex<Vec<String>>>,
}

impl RecordingHandlers {
    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    fn record(&self, area: &str, req: &GatewayRequest) -> Outcome {
        let call = format!("{} {}", area, req.path);
        self.calls.lock().unwrap().push(call.clone());
        Outcome::Written((StatusCode::OK, call).into_response())
    }
}

#[async_trait]
impl ApiHandlers for RecordingHandlers {
    async fn auth_get(&self, _ctx: &mut RequestContext, req: GatewayRequest) -> Outcome {
        self.record("auth_get", &req)
    }

    async fn auth_renew(&self, _ctx: &mut RequestContext, req: GatewayRequest) -> Outcome {
        self.record("auth_renew", &req)
    }

    async fn download(&self, _ctx: &mut RequestContext, req: GatewayRequest) -> Outcome {
        self.record("download", &req)
    }

    async fn command(&self, _ctx: &mut RequestContext, req: GatewayRequest) -> Outcome {
        self.record("command", &req)
    }

    async fn search(&self, _ctx: &mut RequestContext, req: GatewayRequest) -> Outcome {
        self.record("search", &req)
    }

    async fn resource(&self, _ctx: &mut RequestContext, req: GatewayRequest) -> Outcome {
        self.record("resource", &req)
    }

    async fn users(&self, _ctx: &mut RequestContext, req: GatewayRequest) -> Outcome {
        self.record("users", &req)
    }

    async fn settings(&self, _ctx: &mut RequestContext, req: GatewayRequest) -> Outcome {
        self.record("settings", &req)
    }

    async fn share(&self, _ctx: &mut RequestContext, req: GatewayRequest) -> Outcome {
        self.record("share", &req)
    }
}

/// Authenticator whose backend is always down.
pub struct FailingAuth;

#[async_trait]
impl Authenticator for FailingAuth {
    async fn validate(&self, _headers: &HeaderMap) -> GatewayResult<Option<Arc<dyn Principal>>> {
        Err(GatewayError::Auth("backend unavailable".to_string()))
    }
}

/// Share store counting deletes, over an in-memory store.
#[derive(Clone, Default)]
pub struct CountingStore {
    pub inner: MemoryShareStore,
    pub deletes: Arc<Mutex<usize>>,
}

impl CountingStore {
    pub fn deletes(&self) -> usize {
        *self.deletes.lock().unwrap()
    }
}

#[async_trait]
impl ShareStore for CountingStore {
    async fn get(&self, hash: &str) -> Result<Option<ShareLink>, StoreError> {
        self.inner.get(hash).await
    }

    async fn delete(&self, link: &ShareLink) -> Result<(), StoreError> {
        *self.deletes.lock().unwrap() += 1;
        self.inner.delete(link).await
    }

    async fn insert(&self, link: ShareLink) -> Result<(), StoreError> {
        self.inner.insert(link).await
    }
}

/// Share store whose lookups fail for every hash but `expired`, and whose
/// deletes always fail.
#[derive(Clone)]
pub struct FaultyStore {
    pub expired: ShareLink,
}

#[async_trait]
impl ShareStore for FaultyStore {
    async fn get(&self, hash: &str) -> Result<Option<ShareLink>, StoreError> {
        if hash == self.expired.hash {
            Ok(Some(self.expired.clone()))
        } else {
            Err(StoreError::Unavailable("lookup failed".to_string()))
        }
    }

    async fn delete(&self, _link: &ShareLink) -> Result<(), StoreError> {
        Err(StoreError::Unavailable("delete failed".to_string()))
    }

    async fn insert(&self, _link: ShareLink) -> Result<(), StoreError> {
        Err(StoreError::Unavailable("insert failed".to_string()))
    }
}

/// Static generator that vetoes paths under `/veto` and records hook paths.
///
/// Previewing `/slow` takes three seconds.
#[derive(Clone, Default)]
pub struct FakeGenerator {
    pub hooked: Arc<Mutex<Vec<String>>>,
}

impl FakeGenerator {
    pub fn hooked(&self) -> Vec<String> {
        self.hooked.lock().unwrap().clone()
    }
}

#[async_trait]
impl StaticGen for FakeGenerator {
    fn name(&self) -> &str {
        "hugo"
    }

    fn settings_path(&self) -> String {
        SETTINGS_PATH.to_string()
    }

    async fn preview(&self, _ctx: &mut RequestContext, request: GatewayRequest) -> Outcome {
        if request.path == "/slow" {
            tokio::time::sleep(std::time::Duration::from_secs(3)).await;
        }
        Outcome::Written((StatusCode::OK, format!("preview {}", request.path)).into_response())
    }

    async fn hook(&self, _ctx: &mut RequestContext, request: &mut GatewayRequest) -> HookOutcome {
        self.hooked.lock().unwrap().push(request.path.clone());
        if request.path.starts_with("/veto") {
            HookOutcome::Respond(Outcome::status(StatusCode::FORBIDDEN))
        } else {
            HookOutcome::Continue
        }
    }
}

/// Everything a test needs to drive and inspect the gateway.
pub struct TestApp {
    pub router: Router,
    pub handlers: RecordingHandlers,
    pub store: CountingStore,
}

pub fn build_app(config: GatewayConfig, generator: Option<FakeGenerator>) -> TestApp {
    build_app_with(config, generator, |services| services)
}

pub fn build_app_with(
    config: GatewayConfig,
    generator: Option<FakeGenerator>,
    customize: impl FnOnce(Services) -> Services,
) -> TestApp {
    let (mut services, handlers, store) = test_services(&config);
    if let Some(generator) = generator {
        services = services.with_static_gen(Arc::new(generator));
    }
    let services = customize(services);

    let router = HttpServer::new(config, services).router();
    TestApp {
        router,
        handlers,
        store,
    }
}

/// Services over the test assets, recording handlers and a counting store.
pub fn test_services(config: &GatewayConfig) -> (Services, RecordingHandlers, CountingStore) {
    let handlers = RecordingHandlers::default();
    let store = CountingStore::default();

    let services = Services::new(
        Arc::new(test_assets()),
        Arc::new(store.clone()),
        Arc::new(filegate::security::TokenAuthenticator::from_config(&config.users)),
        Arc::new(handlers.clone()),
    );
    (services, handlers, store)
}

pub fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

pub fn authed(method: &str, uri: &str) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header("x-auth", TOKEN)
        .body(Body::empty())
        .unwrap()
}

pub async fn body_to_string(body: Body) -> String {
    let bytes = body.collect().await.unwrap().to_bytes();
    String::from_utf8(bytes.to_vec()).unwrap()
}
