//! Resolution of `/share/<hash>` requests.
//!
//! # Flow
//! ```text
//! hash → store lookup
//!     missing            → share 404 page
//!     lookup failure     → 500
//!     expired            → delete, share 404 page
//!     target stat fails  → mapped status
//!     ?dl absent or "0"  → inline preview page
//!     otherwise          → download handler
//! ```
//!
//! An expired link renders exactly like a missing one; only the store sees
//! the difference.

use axum::http::StatusCode;
use serde_json::Map;

use crate::files::FileDescriptor;
use crate::http::context::RequestContext;
use crate::http::request::GatewayRequest;
use crate::http::response::Outcome;
use crate::observability::metrics;
use crate::render::{assets, render_asset, render_with};

/// Serve a share link. `request.path` holds the hash.
pub async fn share_page(ctx: &mut RequestContext, mut request: GatewayRequest) -> Outcome {
    let hash = request.path.clone();

    let link = match ctx.services.shares.get(&hash).await {
        Ok(Some(link)) => link,
        Ok(None) => return render_asset(ctx, assets::SHARE_NOT_FOUND, "text/html").await,
        Err(e) => return Outcome::error(StatusCode::INTERNAL_SERVER_ERROR, e),
    };

    if link.is_expired() {
        if let Err(e) = ctx.services.shares.delete(&link).await {
            tracing::warn!(
                request_id = %request.request_id(),
                error = %e,
                "Failed to delete expired share link"
            );
        }
        metrics::record_share_expired();
        tracing::debug!(request_id = %request.request_id(), "Share link expired");
        return render_asset(ctx, assets::SHARE_NOT_FOUND, "text/html").await;
    }

    request.path = link.path.to_string_lossy().into_owned();

    let file = match FileDescriptor::stat(&link.path).await {
        Ok(file) => file,
        Err(e) => return Outcome::from_error(e, false),
    };
    ctx.file = Some(file.clone());

    let inline = matches!(request.query_param("dl"), None | Some("") | Some("0"));
    if !inline {
        let handlers = ctx.services.handlers.clone();
        return handlers.download(ctx, request).await;
    }

    let page = match ctx.services.assets.text(assets::SHARE_PREVIEW).await {
        Ok(page) => page,
        Err(e) => return Outcome::error(StatusCode::INTERNAL_SERVER_ERROR, e),
    };

    let file = match serde_json::to_value(&file) {
        Ok(value) => value,
        Err(e) => return Outcome::error(StatusCode::INTERNAL_SERVER_ERROR, e),
    };

    let mut extra = Map::new();
    extra.insert("file".into(), file);
    render_with(ctx, &page, "text/html", extra)
}
