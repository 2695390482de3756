//! Template rendering of named text resources.
//!
//! # Data Flow
//! ```text
//! asset name
//!     → assets.rs (AssetProvider::text)
//!     → Tera one-off render into a buffer
//!     → Content-Type header + body
//! ```
//!
//! # Design Decisions
//! - Output is rendered fully before the response exists, so a failure
//!   never leaves a half-written body
//! - HTML output autoescapes substituted values; undefined variables fail
//!   the render

pub mod assets;

use axum::{
    http::{header, StatusCode},
    response::IntoResponse,
};
use serde_json::{Map, Value};
use tera::{Context, Tera};

use crate::error::GatewayResult;
use crate::http::context::RequestContext;
use crate::http::response::Outcome;

/// Render `resource` with the standard variables.
///
/// Returns `Written` on success and 500 if the template fails to parse
/// or render.
pub fn render_file(ctx: &RequestContext, resource: &str, content_type: &str) -> Outcome {
    render_with(ctx, resource, content_type, Map::new())
}

/// Load a named asset and render it.
pub async fn render_asset(ctx: &RequestContext, name: &str, content_type: &str) -> Outcome {
    match ctx.services.assets.text(name).await {
        Ok(text) => render_file(ctx, &text, content_type),
        Err(e) => Outcome::error(StatusCode::INTERNAL_SERVER_ERROR, e),
    }
}

/// Render with extra variables layered over the standard ones.
pub(crate) fn render_with(
    ctx: &RequestContext,
    resource: &str,
    content_type: &str,
    extra: Map<String, Value>,
) -> Outcome {
    let mut data = Map::new();
    data.insert("base_url".into(), Value::String(ctx.root_url()));
    data.insert(
        "static_gen".into(),
        ctx.services
            .static_gen
            .as_ref()
            .map(|g| Value::String(g.name().to_string()))
            .unwrap_or(Value::Null),
    );
    data.extend(extra);

    match render_template(resource, data, content_type == "text/html") {
        Ok(body) => Outcome::Written(
            (
                StatusCode::OK,
                [(header::CONTENT_TYPE, format!("{}; charset=utf-8", content_type))],
                body,
            )
                .into_response(),
        ),
        Err(e) => Outcome::error(StatusCode::INTERNAL_SERVER_ERROR, e),
    }
}

fn render_template(resource: &str, data: Map<String, Value>, autoescape: bool) -> GatewayResult<String> {
    let context = Context::from_value(Value::Object(data))?;
    Ok(Tera::one_off(resource, &context, autoescape)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use http_body_util::BodyExt;
    use serde_json::json;

    use crate::api::DefaultHandlers;
    use crate::config::GatewayConfig;
    use crate::http::context::Services;
    use crate::render::assets::{self, DirAssets, MemoryAssets};
    use crate::security::TokenAuthenticator;
    use crate::share::MemoryShareStore;

    fn context(base_url: &str) -> RequestContext {
        let mut config = GatewayConfig::default();
        config.server.base_url = base_url.to_string();

        let services = Services::new(
            Arc::new(MemoryAssets::new()),
            Arc::new(MemoryShareStore::new(None)),
            Arc::new(TokenAuthenticator::default()),
            Arc::new(DefaultHandlers),
        );
        RequestContext::new(Arc::new(config), Arc::new(services))
    }

    async fn body(outcome: Outcome) -> String {
        match outcome {
            Outcome::Written(response) => {
                let bytes = response.into_body().collect().await.unwrap().to_bytes();
                String::from_utf8(bytes.to_vec()).unwrap()
            }
            other => panic!("expected a written response, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_substitutes_standard_variables() {
        let ctx = context("/files");
        let outcome = render_file(&ctx, "const base = '{{ base_url }}';", "application/javascript");
        assert_eq!(body(outcome).await, "const base = '/files';");
    }

    #[tokio::test]
    async fn test_dotted_lookup_and_null() {
        let ctx = context("");
        let mut extra = Map::new();
        extra.insert("file".into(), json!({ "name": "a.txt", "size": 12 }));

        let outcome = render_with(
            &ctx,
            "{{ file.name }}|{{ static_gen }}|{{ file.size }}",
            "text/plain",
            extra,
        );
        assert_eq!(body(outcome).await, "a.txt||12");
    }

    #[tokio::test]
    async fn test_html_is_escaped() {
        let ctx = context("");
        let mut extra = Map::new();
        extra.insert("name".into(), json!("<script>&"));

        let outcome = render_with(&ctx, "<h1>{{ name }}</h1>", "text/html", extra.clone());
        assert_eq!(body(outcome).await, "<h1>&lt;script&gt;&amp;</h1>");

        let outcome = render_with(&ctx, "{{ name }}", "application/json", extra);
        assert_eq!(body(outcome).await, "<script>&");
    }

    #[test]
    fn test_broken_templates_are_internal_errors() {
        let ctx = context("");

        let outcome = render_file(&ctx, "abc {{ base_url", "text/html");
        assert_eq!(outcome.status_code(), StatusCode::INTERNAL_SERVER_ERROR);

        let outcome = render_file(&ctx, "{{ missing.key }}", "text/html");
        assert_eq!(outcome.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[tokio::test]
    async fn test_shipped_assets_render() {
        let mut ctx = context("/files");
        let services = Services::new(
            Arc::new(DirAssets::new(concat!(env!("CARGO_MANIFEST_DIR"), "/assets"))),
            Arc::new(MemoryShareStore::new(None)),
            Arc::new(TokenAuthenticator::default()),
            Arc::new(DefaultHandlers),
        );
        ctx.services = Arc::new(services);

        let index = body(render_asset(&ctx, assets::INDEX, "text/html").await).await;
        assert!(index.contains("BaseURL: \"/files\""));
        assert!(index.contains("StaticGen: null"));

        let sw = body(render_asset(&ctx, assets::SERVICE_WORKER, "application/javascript").await).await;
        assert!(sw.starts_with("const BASE_URL = \"/files\";"));

        let manifest = body(render_asset(&ctx, assets::MANIFEST, "application/json").await).await;
        let manifest: Value = serde_json::from_str(&manifest).unwrap();
        assert_eq!(manifest["start_url"], "/files/");

        let mut extra = Map::new();
        extra.insert("file".into(), json!({ "name": "a.txt", "size": 3, "mod_time": "2024-01-01T00:00:00Z" }));
        let page = ctx.services.assets.text(assets::SHARE_PREVIEW).await.unwrap();
        let page = body(render_with(&ctx, &page, "text/html", extra)).await;
        assert!(page.contains("<h1>a.txt</h1>"));
    }

    #[tokio::test]
    async fn test_content_type_header() {
        let ctx = context("");
        match render_file(&ctx, "{}", "application/json") {
            Outcome::Written(response) => assert_eq!(
                response.headers()[header::CONTENT_TYPE],
                "application/json; charset=utf-8"
            ),
            other => panic!("expected a written response, got {:?}", other),
        }
    }
}
