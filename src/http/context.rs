//! Per-request state and the process-wide collaborators it points at.

use std::sync::Arc;

use crate::api::handlers::ApiHandlers;
use crate::api::ResourceArea;
use crate::config::schema::GatewayConfig;
use crate::files::FileDescriptor;
use crate::render::assets::AssetProvider;
use crate::security::auth::{Authenticator, Principal};
use crate::share::store::ShareStore;
use crate::staticgen::StaticGen;

/// Collaborators shared by every request.
#[derive(Clone)]
pub struct Services {
    pub assets: Arc<dyn AssetProvider>,
    pub shares: Arc<dyn ShareStore>,
    pub auth: Arc<dyn Authenticator>,
    pub handlers: Arc<dyn ApiHandlers>,
    pub static_gen: Option<Arc<dyn StaticGen>>,
}

impl Services {
    pub fn new(
        assets: Arc<dyn AssetProvider>,
        shares: Arc<dyn ShareStore>,
        auth: Arc<dyn Authenticator>,
        handlers: Arc<dyn ApiHandlers>,
    ) -> Self {
        Self {
            assets,
            shares,
            auth,
            handlers,
            static_gen: None,
        }
    }

    pub fn with_static_gen(mut self, generator: Arc<dyn StaticGen>) -> Self {
        self.static_gen = Some(generator);
        self
    }
}

/// State threaded through one request. Never shared across requests.
pub struct RequestContext {
    /// Configuration snapshot taken when the request arrived.
    pub config: Arc<GatewayConfig>,
    pub services: Arc<Services>,
    /// Set once the API layer has authenticated the request.
    pub principal: Option<Arc<dyn Principal>>,
    /// Attached only on routes that need file metadata.
    pub file: Option<FileDescriptor>,
    /// Resource-area token selected by the API dispatcher.
    pub router: String,
}

impl RequestContext {
    pub fn new(config: Arc<GatewayConfig>, services: Arc<Services>) -> Self {
        Self {
            config,
            services,
            principal: None,
            file: None,
            router: String::new(),
        }
    }

    /// Effective public root used in rendered templates.
    pub fn root_url(&self) -> String {
        self.config.server.root_url()
    }

    pub fn static_gen(&self) -> Option<Arc<dyn StaticGen>> {
        self.services.static_gen.clone()
    }

    /// Parsed resource area, if the token names a known one.
    pub fn area(&self) -> Option<ResourceArea> {
        self.router.parse().ok()
    }
}
