//! Security subsystem.
//!
//! # Data Flow
//! ```text
//! API request
//!     → auth.rs (credential → principal, per-path authorization)
//!
//! UI shell response
//!     → headers.rs (framing, sniffing and XSS hardening)
//! ```
//!
//! # Design Decisions
//! - Fail closed: anything short of a valid credential is a 403
//! - The reason for a rejection is logged, never returned

pub mod auth;
pub mod headers;

pub use auth::{Authenticator, ConfigUser, Principal, TokenAuthenticator};
