//! Downstream API handlers the dispatcher fans out to.
//!
//! Command execution, search, resource CRUD, user and settings management
//! live outside the routing core; it only calls them by area and forwards
//! their outcome. Every method defaults to 501 so embedders implement only
//! the areas they serve.

use async_trait::async_trait;
use axum::{
    body::Body,
    http::{header, HeaderValue, Method, Request, StatusCode},
};
use tower::ServiceExt;
use tower_http::services::ServeFile;

use crate::error::GatewayError;
use crate::http::context::RequestContext;
use crate::http::request::GatewayRequest;
use crate::http::response::Outcome;

fn not_implemented() -> Outcome {
    Outcome::status(StatusCode::NOT_IMPLEMENTED)
}

#[async_trait]
pub trait ApiHandlers: Send + Sync {
    /// Issue a token. Runs unauthenticated.
    async fn auth_get(&self, _ctx: &mut RequestContext, _req: GatewayRequest) -> Outcome {
        not_implemented()
    }

    /// Renew a token. Runs unauthenticated.
    async fn auth_renew(&self, _ctx: &mut RequestContext, _req: GatewayRequest) -> Outcome {
        not_implemented()
    }

    /// Send `ctx.file` to the client.
    ///
    /// The default streams a regular file as an attachment, honouring
    /// `Range` and conditional headers; directories are not supported.
    async fn download(&self, ctx: &mut RequestContext, req: GatewayRequest) -> Outcome {
        let file = match &ctx.file {
            Some(file) if !file.is_dir => file,
            Some(_) => return not_implemented(),
            None => return Outcome::status(StatusCode::NOT_FOUND),
        };

        let mut inner = Request::new(Body::empty());
        *inner.method_mut() = if req.method == Method::HEAD {
            Method::HEAD
        } else {
            Method::GET
        };
        *inner.headers_mut() = req.headers;

        let mut response = match ServeFile::new(&file.path).oneshot(inner).await {
            Ok(response) => response.map(Body::new),
            Err(never) => match never {},
        };

        if response.status().is_success() {
            let disposition = format!(
                "attachment; filename*=utf-8''{}",
                urlencoding::encode(&file.name)
            );
            match HeaderValue::from_str(&disposition) {
                Ok(value) => {
                    response.headers_mut().insert(header::CONTENT_DISPOSITION, value);
                }
                Err(e) => {
                    return Outcome::error(
                        StatusCode::INTERNAL_SERVER_ERROR,
                        GatewayError::Handler(e.to_string()),
                    )
                }
            }
        }
        Outcome::Written(response)
    }

    async fn command(&self, _ctx: &mut RequestContext, _req: GatewayRequest) -> Outcome {
        not_implemented()
    }

    async fn search(&self, _ctx: &mut RequestContext, _req: GatewayRequest) -> Outcome {
        not_implemented()
    }

    async fn resource(&self, _ctx: &mut RequestContext, _req: GatewayRequest) -> Outcome {
        not_implemented()
    }

    async fn users(&self, _ctx: &mut RequestContext, _req: GatewayRequest) -> Outcome {
        not_implemented()
    }

    async fn settings(&self, _ctx: &mut RequestContext, _req: GatewayRequest) -> Outcome {
        not_implemented()
    }

    async fn share(&self, _ctx: &mut RequestContext, _req: GatewayRequest) -> Outcome {
        not_implemented()
    }
}

/// Handlers using every default: file downloads work, other areas return 501.
#[derive(Debug, Default, Clone, Copy)]
pub struct DefaultHandlers;

impl ApiHandlers for DefaultHandlers {}
