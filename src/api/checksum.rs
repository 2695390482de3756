//! The `checksum` area: hash the attached file with `?algo=`.

use axum::{
    http::{header, StatusCode},
    response::IntoResponse,
};

use crate::error::GatewayError;
use crate::http::context::RequestContext;
use crate::http::request::GatewayRequest;
use crate::http::response::Outcome;

pub async fn checksum_handler(ctx: &mut RequestContext, request: GatewayRequest) -> Outcome {
    let file = match &ctx.file {
        Some(file) => file,
        None => return Outcome::status(StatusCode::NOT_FOUND),
    };

    let algo = request.query_param("algo").unwrap_or_default();

    match file.checksum(algo).await {
        Ok(value) => Outcome::Written(
            ([(header::CONTENT_TYPE, "text/plain; charset=utf-8")], value).into_response(),
        ),
        Err(e @ GatewayError::InvalidOption(_)) => Outcome::error(StatusCode::BAD_REQUEST, e),
        Err(e) => Outcome::error(StatusCode::INTERNAL_SERVER_ERROR, e),
    }
}
