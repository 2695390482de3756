//! Response handling and status mapping.
//!
//! # Responsibilities
//! - Represent a handler result as either a finished response or a status
//!   still waiting to be finalized
//! - Map filesystem/domain errors to HTTP status codes
//! - Finalize pending statuses into responses at the top of the stack
//!
//! # Design Decisions
//! - Finalized bodies carry only the reason phrase; error detail is logged,
//!   never sent to the client

use std::io::ErrorKind;

use axum::{
    http::{header, StatusCode},
    response::{IntoResponse, Response},
};

use crate::error::GatewayError;

/// Result of handling a request.
#[derive(Debug)]
pub enum Outcome {
    /// A complete response was produced; nothing more to do.
    Written(Response),
    /// The router must finalize the response with this status.
    Finalize {
        status: StatusCode,
        error: Option<GatewayError>,
    },
}

impl Outcome {
    pub fn status(status: StatusCode) -> Self {
        Outcome::Finalize {
            status,
            error: None,
        }
    }

    pub fn error(status: StatusCode, error: impl Into<GatewayError>) -> Self {
        Outcome::Finalize {
            status,
            error: Some(error.into()),
        }
    }

    /// Map `error` through [`error_to_status`] and keep it for logging.
    pub fn from_error(error: GatewayError, gone: bool) -> Self {
        let status = error_to_status(Some(&error), gone);
        Outcome::error(status, error)
    }

    /// The status the client will see.
    pub fn status_code(&self) -> StatusCode {
        match self {
            Outcome::Written(response) => response.status(),
            Outcome::Finalize { status, .. } => *status,
        }
    }

    pub fn is_written(&self) -> bool {
        matches!(self, Outcome::Written(_))
    }

    /// Turn the outcome into the response sent to the client.
    pub fn finalize(self, request_id: &str) -> Response {
        match self {
            Outcome::Written(response) => response,
            Outcome::Finalize { status, error } => {
                if let Some(err) = &error {
                    if status.is_server_error() {
                        tracing::error!(request_id = %request_id, status = %status, error = %err, "Request failed");
                    } else {
                        tracing::debug!(request_id = %request_id, status = %status, error = %err, "Request rejected");
                    }
                }

                let reason = status.canonical_reason().unwrap_or("Unknown Status");
                (
                    status,
                    [(header::CONTENT_TYPE, "text/plain; charset=utf-8")],
                    format!("{} {}", status.as_u16(), reason),
                )
                    .into_response()
            }
        }
    }
}

impl From<Response> for Outcome {
    fn from(response: Response) -> Self {
        Outcome::Written(response)
    }
}

/// Map an error to an HTTP status.
///
/// `gone` turns a not-found into 410, for resources known to have existed.
pub fn error_to_status(err: Option<&GatewayError>, gone: bool) -> StatusCode {
    let err = match err {
        None => return StatusCode::OK,
        Some(err) => err,
    };

    let kind = match err {
        GatewayError::Io(io) => io.kind(),
        _ => return StatusCode::INTERNAL_SERVER_ERROR,
    };

    match kind {
        ErrorKind::PermissionDenied => StatusCode::FORBIDDEN,
        ErrorKind::NotFound if gone => StatusCode::GONE,
        ErrorKind::NotFound => StatusCode::NOT_FOUND,
        ErrorKind::AlreadyExists => StatusCode::CONFLICT,
        _ => StatusCode::INTERNAL_SERVER_ERROR,
    }
}
