//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Validate value ranges and address syntax
//! - Detect conflicting user credentials
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: GatewayConfig → Result<(), Vec<ValidationError>>
//! - Runs before config is accepted into the system

use std::collections::HashSet;
use std::net::SocketAddr;

use thiserror::Error;

use crate::config::schema::GatewayConfig;

/// A single semantic problem in a configuration.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("listener.bind_address `{0}` is not a socket address")]
    BindAddress(String),

    #[error("server.base_url `{0}` must start with `/` and not end with `/`")]
    BaseUrl(String),

    #[error("timeouts.request_secs must be greater than zero")]
    ZeroTimeout,

    #[error("user #{0} has an empty username")]
    EmptyUsername(usize),

    #[error("user `{0}` has an empty token")]
    EmptyToken(String),

    #[error("duplicate username `{0}`")]
    DuplicateUsername(String),

    #[error("user `{0}` reuses another user's token")]
    DuplicateToken(String),
}

/// Validate a configuration, collecting every problem found.
pub fn validate_config(config: &GatewayConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.listener.bind_address.parse::<SocketAddr>().is_err() {
        errors.push(ValidationError::BindAddress(config.listener.bind_address.clone()));
    }

    let base = &config.server.base_url;
    if !base.is_empty() && (!base.starts_with('/') || base.ends_with('/')) {
        errors.push(ValidationError::BaseUrl(base.clone()));
    }

    if config.timeouts.request_secs == 0 {
        errors.push(ValidationError::ZeroTimeout);
    }

    let mut names = HashSet::new();
    let mut tokens = HashSet::new();
    for (i, user) in config.users.iter().enumerate() {
        if user.username.is_empty() {
            errors.push(ValidationError::EmptyUsername(i));
        } else if !names.insert(user.username.as_str()) {
            errors.push(ValidationError::DuplicateUsername(user.username.clone()));
        }

        if user.token.is_empty() {
            errors.push(ValidationError::EmptyToken(user.username.clone()));
        } else if !tokens.insert(user.token.as_str()) {
            errors.push(ValidationError::DuplicateToken(user.username.clone()));
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
