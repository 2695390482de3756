//! Crate-wide error type for the request path.

use thiserror::Error;

use crate::share::store::StoreError;

/// Errors produced while handling a single request.
#[derive(Debug, Error)]
pub enum GatewayError {
    /// Filesystem or other OS-level failure.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A request option (e.g. a checksum algorithm) is not supported.
    #[error("unsupported option: {0}")]
    InvalidOption(String),

    /// A text resource failed to parse or render as a template.
    #[error("template error: {0}")]
    Template(#[from] tera::Error),

    /// A named asset is missing from the asset provider.
    #[error("asset not found: {0}")]
    AssetNotFound(String),

    /// The share store failed for a reason other than a missing record.
    #[error("share store error: {0}")]
    Store(#[from] StoreError),

    /// A value could not be encoded for a template or response.
    #[error("encoding error: {0}")]
    Encoding(#[from] serde_json::Error),

    /// The authentication backend could not evaluate the credential.
    #[error("authentication error: {0}")]
    Auth(String),

    /// Opaque failure reported by a downstream handler.
    #[error("{0}")]
    Handler(String),
}

pub type GatewayResult<T> = Result<T, GatewayError>;
