//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum setup, timeout, request ID, tracing layers)
//!     → request.rs (decode path, parse query)
//!     → context.rs (config snapshot + collaborators for this request)
//!     → routing::serve
//!     → response.rs (finalize pending statuses)
//!     → Send to client
//! ```

pub mod context;
pub mod request;
pub mod response;
pub mod server;

pub use context::{RequestContext, Services};
pub use request::{GatewayRequest, X_REQUEST_ID};
pub use response::{error_to_status, Outcome};
pub use server::HttpServer;
