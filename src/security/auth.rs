//! Authentication and per-path authorization.
//!
//! # Responsibilities
//! - Validate the credential carried by an API request
//! - Expose the resulting principal's authorization predicate
//!
//! # Design Decisions
//! - Any failure to validate is treated as "not authenticated"
//! - Tokens are looked up, never logged
//! - The token table is swapped whole on config reload; a removed token
//!   stops working for the next request

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use arc_swap::ArcSwap;
use async_trait::async_trait;
use axum::http::{header::AUTHORIZATION, HeaderMap};

use crate::config::schema::{RuleConfig, UserConfig};
use crate::error::GatewayResult;

/// Alternate header carrying a bare token.
pub const X_AUTH: &str = "x-auth";

/// An authenticated identity.
pub trait Principal: Send + Sync + std::fmt::Debug {
    fn username(&self) -> &str;

    /// Filesystem root this principal's paths resolve under.
    fn scope(&self) -> &Path;

    /// Whether the principal may act on `path`.
    fn allowed(&self, path: &str) -> bool;
}

/// Validates the credential of an inbound request.
#[async_trait]
pub trait Authenticator: Send + Sync {
    /// `Ok(Some(_))` when the request headers carry a valid credential.
    async fn validate(&self, headers: &HeaderMap) -> GatewayResult<Option<Arc<dyn Principal>>>;

    /// Apply a reloaded `[[users]]` list. Backends not driven by the
    /// config file ignore it.
    fn reload(&self, _users: &[UserConfig]) {}
}

/// A user defined in the configuration file.
#[derive(Debug, Clone)]
pub struct ConfigUser {
    username: String,
    scope: PathBuf,
    rules: Vec<RuleConfig>,
}

impl ConfigUser {
    pub fn new(username: impl Into<String>, scope: impl Into<PathBuf>, rules: Vec<RuleConfig>) -> Self {
        Self {
            username: username.into(),
            scope: scope.into(),
            rules,
        }
    }
}

impl Principal for ConfigUser {
    fn username(&self) -> &str {
        &self.username
    }

    fn scope(&self) -> &Path {
        &self.scope
    }

    fn allowed(&self, path: &str) -> bool {
        self.rules
            .iter()
            .rev()
            .find(|rule| path.starts_with(&rule.path))
            .map(|rule| rule.allow)
            .unwrap_or(true)
    }
}

/// Static bearer-token authentication backed by `[[users]]`.
#[derive(Debug, Default)]
pub struct TokenAuthenticator {
    users: ArcSwap<HashMap<String, Arc<ConfigUser>>>,
}

impl TokenAuthenticator {
    pub fn from_config(users: &[UserConfig]) -> Self {
        Self {
            users: ArcSwap::from_pointee(Self::table(users)),
        }
    }

    fn table(users: &[UserConfig]) -> HashMap<String, Arc<ConfigUser>> {
        users
            .iter()
            .map(|u| {
                let user = ConfigUser::new(u.username.clone(), u.scope.clone(), u.rules.clone());
                (u.token.clone(), Arc::new(user))
            })
            .collect()
    }

    fn token(headers: &HeaderMap) -> Option<&str> {
        if let Some(bearer) = headers
            .get(AUTHORIZATION)
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.strip_prefix("Bearer "))
        {
            return Some(bearer.trim());
        }

        headers
            .get(X_AUTH)
            .and_then(|v| v.to_str().ok())
            .map(str::trim)
    }
}

#[async_trait]
impl Authenticator for TokenAuthenticator {
    async fn validate(&self, headers: &HeaderMap) -> GatewayResult<Option<Arc<dyn Principal>>> {
        let users = self.users.load();
        let principal = Self::token(headers)
            .filter(|t| !t.is_empty())
            .and_then(|t| users.get(t))
            .map(|user| user.clone() as Arc<dyn Principal>);
        Ok(principal)
    }

    fn reload(&self, users: &[UserConfig]) {
        self.users.store(Arc::new(Self::table(users)));
        tracing::info!(users = users.len(), "Token table reloaded");
    }
}
