//! File gateway: HTTP routing and dispatch core of a web file manager.

pub mod api;
pub mod config;
pub mod error;
pub mod files;
pub mod http;
pub mod lifecycle;
pub mod observability;
pub mod render;
pub mod routing;
pub mod security;
pub mod share;
pub mod staticgen;

pub use config::schema::GatewayConfig;
pub use error::{GatewayError, GatewayResult};
pub use http::{HttpServer, Outcome, RequestContext, Services};
pub use lifecycle::Shutdown;
