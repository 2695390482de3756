//! Top-level request routing.
//!
//! # Responsibilities
//! - Reject requests outside the configured base path
//! - Route the fixed top-level areas (`/sw.js`, `/static`, `/api`,
//!   `/preview`, `/share/`)
//! - Fall back to the UI shell for every other path
//!
//! # Design Decisions
//! - Order is fixed; the first matching branch wins
//! - `/static` and `/api` are compared ASCII case-insensitively; `/preview`
//!   and `/share/` are exact
//! - Returns an [`Outcome`]; finalization happens in the HTTP layer

use axum::http::{Method, StatusCode};

use crate::api::dispatch;
use crate::http::context::RequestContext;
use crate::http::request::GatewayRequest;
use crate::http::response::Outcome;
use crate::render::{assets, render_asset};
use crate::routing::matcher::{match_url, strip_url};
use crate::security::headers::apply_shell_headers;
use crate::share::share_page;

const STATIC_PREFIX: &str = "/static";
const API_PREFIX: &str = "/api";
const PREVIEW_PREFIX: &str = "/preview";
const SHARE_PREFIX: &str = "/share/";
const SERVICE_WORKER_PATH: &str = "/sw.js";
const MANIFEST_PATH: &str = "/static/manifest.json";

/// Route one request.
pub async fn serve(ctx: &mut RequestContext, mut request: GatewayRequest) -> Outcome {
    let base = ctx.config.server.base_url.clone();
    match request.path.strip_prefix(base.as_str()) {
        Some(rest) if !base.is_empty() => request.path = rest.to_string(),
        None if !base.is_empty() => {
            tracing::debug!(
                request_id = %request.request_id(),
                path = %request.path,
                base_url = %base,
                "Path outside base URL"
            );
            return Outcome::status(StatusCode::NOT_FOUND);
        }
        _ => {}
    }

    if request.path == SERVICE_WORKER_PATH {
        return render_asset(ctx, assets::SERVICE_WORKER, "application/javascript").await;
    }

    if match_url(&request.path, STATIC_PREFIX) {
        if request.method != Method::GET {
            return Outcome::status(StatusCode::NOT_IMPLEMENTED);
        }
        if request.path == MANIFEST_PATH {
            return render_asset(ctx, assets::MANIFEST, "application/json").await;
        }
        return Outcome::Written(ctx.services.assets.serve(request).await);
    }

    if let Some(rest) = strip_url(&request.path, API_PREFIX) {
        request.path = rest.to_string();
        return dispatch(ctx, request).await;
    }

    if let Some(generator) = ctx.static_gen() {
        if let Some(rest) = request.path.strip_prefix(PREVIEW_PREFIX) {
            request.path = rest.to_string();
            return generator.preview(ctx, request).await;
        }
    }

    if let Some(rest) = request.path.strip_prefix(SHARE_PREFIX) {
        request.path = rest.to_string();
        return share_page(ctx, request).await;
    }

    match render_asset(ctx, assets::INDEX, "text/html").await {
        Outcome::Written(mut response) => {
            apply_shell_headers(&mut response);
            Outcome::Written(response)
        }
        outcome => outcome,
    }
}
