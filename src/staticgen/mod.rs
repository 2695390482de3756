//! Static-site-generator extension point.
//!
//! A generator can intercept API requests before the core handlers run,
//! serve previews under `/preview`, and declare where its settings live.

use async_trait::async_trait;

use crate::http::context::RequestContext;
use crate::http::request::GatewayRequest;
use crate::http::response::Outcome;

/// What the generator hook decided.
#[derive(Debug)]
pub enum HookOutcome {
    /// Carry on to the core handlers (the hook may have rewritten the path).
    Continue,
    /// Stop here: the hook vetoed or fully handled the request.
    Respond(Outcome),
}

/// A pluggable static-site generator.
#[async_trait]
pub trait StaticGen: Send + Sync {
    /// Name exposed to templates as `static_gen`.
    fn name(&self) -> &str;

    /// Real path behind the magic `/settings` API path.
    fn settings_path(&self) -> String;

    /// Serve a preview; `request.path` has `/preview` stripped.
    async fn preview(&self, ctx: &mut RequestContext, request: GatewayRequest) -> Outcome;

    /// Runs after authorization and before any API handler.
    async fn hook(&self, ctx: &mut RequestContext, request: &mut GatewayRequest) -> HookOutcome;
}
