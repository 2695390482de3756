//! API dispatch: authentication, area selection and handler fan-out.
//!
//! # Flow
//! ```text
//! /auth/get, /auth/renew   → auth handlers (unauthenticated)
//! otherwise
//!     authenticate          → 403 on any failure
//!     split area token      → ctx.router, request.path = rest
//!     clean rest            → 403 on `..`
//!     authorize rest        → 403
//!     static gen            → /settings remap, hook (may short-circuit)
//!     download | checksum   → attach file info
//!     fan out by area       → 404 for unknown tokens
//! ```
//!
//! # Design Decisions
//! - Authorization runs on the post-split, cleaned path, before the hook or
//!   any filesystem access; handlers see the same cleaned path
//! - A failed authentication says nothing about why it failed

use axum::http::StatusCode;

use crate::api::checksum::checksum_handler;
use crate::api::ResourceArea;
use crate::files;
use crate::http::context::RequestContext;
use crate::http::request::GatewayRequest;
use crate::http::response::Outcome;
use crate::observability::metrics;
use crate::routing::matcher::split_url;
use crate::staticgen::HookOutcome;

/// Dispatch a request whose `/api` prefix has already been stripped.
pub async fn dispatch(ctx: &mut RequestContext, mut request: GatewayRequest) -> Outcome {
    let handlers = ctx.services.handlers.clone();

    if request.path == "/auth/get" {
        return handlers.auth_get(ctx, request).await;
    }
    if request.path == "/auth/renew" {
        return handlers.auth_renew(ctx, request).await;
    }

    let principal = match ctx.services.auth.validate(&request.headers).await {
        Ok(Some(principal)) => principal,
        Ok(None) => {
            tracing::debug!(request_id = %request.request_id(), "Missing or invalid credential");
            metrics::record_auth_rejected("unauthenticated");
            return Outcome::status(StatusCode::FORBIDDEN);
        }
        Err(e) => {
            tracing::debug!(request_id = %request.request_id(), error = %e, "Credential validation failed");
            metrics::record_auth_rejected("validation_error");
            return Outcome::status(StatusCode::FORBIDDEN);
        }
    };
    ctx.principal = Some(principal.clone());

    let (area, rest) = split_url(&request.path);
    ctx.router = area;
    request.path = match files::clean_path(&rest) {
        Some(path) => path,
        None => {
            tracing::debug!(request_id = %request.request_id(), path = %rest, "Path escapes scope");
            metrics::record_auth_rejected("path_traversal");
            return Outcome::status(StatusCode::FORBIDDEN);
        }
    };

    if !principal.allowed(&request.path) {
        tracing::debug!(
            request_id = %request.request_id(),
            user = %principal.username(),
            area = %ctx.router,
            path = %request.path,
            "Path not allowed"
        );
        metrics::record_auth_rejected("forbidden_path");
        return Outcome::status(StatusCode::FORBIDDEN);
    }

    if let Some(generator) = ctx.static_gen() {
        if request.path == "/settings" {
            request.path = generator.settings_path();
        }

        if let HookOutcome::Respond(outcome) = generator.hook(ctx, &mut request).await {
            tracing::debug!(
                request_id = %request.request_id(),
                generator = %generator.name(),
                status = %outcome.status_code(),
                "Static generator hook handled request"
            );
            return outcome;
        }
    }

    let area = match ctx.area() {
        Some(area) => area,
        None => return Outcome::status(StatusCode::NOT_FOUND),
    };

    if area.needs_file_info() {
        match files::get_info(principal.scope(), &request.path).await {
            Ok(file) => ctx.file = Some(file),
            Err(e) => return Outcome::from_error(e, false),
        }
    }

    match area {
        ResourceArea::Download => handlers.download(ctx, request).await,
        ResourceArea::Checksum => checksum_handler(ctx, request).await,
        ResourceArea::Command => handlers.command(ctx, request).await,
        ResourceArea::Search => handlers.search(ctx, request).await,
        ResourceArea::Resource => handlers.resource(ctx, request).await,
        ResourceArea::Users => handlers.users(ctx, request).await,
        ResourceArea::Settings => handlers.settings(ctx, request).await,
        ResourceArea::Share => handlers.share(ctx, request).await,
    }
}
