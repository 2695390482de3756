//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create the Axum router with a single catch-all handler
//! - Wire up middleware (timeout, request ID, tracing)
//! - Hand each request to the routing core with a fresh context
//! - Apply hot-reloaded configuration between requests
//! - Record request metrics

use std::sync::Arc;
use std::time::{Duration, Instant};

use arc_swap::ArcSwap;
use axum::{
    body::Body,
    extract::State,
    http::{Request, StatusCode},
    response::Response,
    routing::any,
    Router,
};
use tokio::net::TcpListener;
use tokio::sync::{broadcast, mpsc};
use tower_http::{
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

use crate::config::GatewayConfig;
use crate::http::context::{RequestContext, Services};
use crate::http::request::GatewayRequest;
use crate::lifecycle::shutdown;
use crate::observability::metrics;
use crate::routing;

/// Application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<ArcSwap<GatewayConfig>>,
    pub services: Arc<Services>,
}

/// HTTP front end of the file gateway.
pub struct HttpServer {
    router: Router,
    config: Arc<ArcSwap<GatewayConfig>>,
    services: Arc<Services>,
}

impl HttpServer {
    pub fn new(config: GatewayConfig, services: Services) -> Self {
        let request_timeout = Duration::from_secs(config.timeouts.request_secs);
        let config = Arc::new(ArcSwap::from_pointee(config));

        let state = AppState {
            config: config.clone(),
            services: Arc::new(services),
        };

        let router = Self::build_router(request_timeout, state.clone());
        Self {
            router,
            config,
            services: state.services,
        }
    }

    /// Build the Axum router with all middleware layers.
    fn build_router(request_timeout: Duration, state: AppState) -> Router {
        Router::new()
            .route("/{*path}", any(gateway_handler))
            .route("/", any(gateway_handler))
            .with_state(state)
            .layer(TimeoutLayer::with_status_code(StatusCode::REQUEST_TIMEOUT, request_timeout))
            .layer(TraceLayer::new_for_http())
            .layer(PropagateRequestIdLayer::x_request_id())
            .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
    }

    /// The configured router, for serving without a listener.
    pub fn router(&self) -> Router {
        self.router.clone()
    }

    /// Handle to the live configuration.
    pub fn config(&self) -> Arc<ArcSwap<GatewayConfig>> {
        self.config.clone()
    }

    /// Serve on `listener` until `shutdown` fires.
    ///
    /// Configurations arriving on `config_updates` replace the live one and
    /// the authenticator's user list; requests already in flight keep the
    /// snapshot they started with.
    pub async fn run(
        self,
        listener: TcpListener,
        mut config_updates: mpsc::UnboundedReceiver<GatewayConfig>,
        shutdown: broadcast::Receiver<()>,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(address = %addr, "HTTP server starting");

        let live = self.config.clone();
        let services = self.services.clone();
        tokio::spawn(async move {
            while let Some(config) = config_updates.recv().await {
                tracing::info!(
                    base_url = %config.server.base_url,
                    users = config.users.len(),
                    "Applying reloaded configuration"
                );
                services.auth.reload(&config.users);
                live.store(Arc::new(config));
            }
        });

        axum::serve(listener, self.router)
            .with_graceful_shutdown(shutdown::wait(shutdown))
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }
}

/// Catch-all handler: route the request and finalize the outcome.
async fn gateway_handler(State(state): State<AppState>, request: Request<Body>) -> Response {
    let start_time = Instant::now();
    let config = state.config.load_full();

    let request = GatewayRequest::from_http(request);
    let request_id = request.request_id().to_string();
    let method = request.method.to_string();
    let area = metrics::area_label(
        request
            .path
            .strip_prefix(config.server.base_url.as_str())
            .unwrap_or(&request.path),
    );

    tracing::debug!(
        request_id = %request_id,
        method = %method,
        path = %request.path,
        "Handling request"
    );

    let mut ctx = RequestContext::new(config, state.services.clone());
    let outcome = routing::serve(&mut ctx, request).await;
    let response = outcome.finalize(&request_id);

    metrics::record_request(&method, response.status().as_u16(), area, start_time);
    response
}
