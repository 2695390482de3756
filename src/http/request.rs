//! Request handling and transformation.
//!
//! # Responsibilities
//! - Decode the inbound path once, before any routing decision
//! - Parse query parameters
//! - Carry the request ID assigned by the middleware stack
//!
//! # Design Decisions
//! - The routing layers rewrite `path` in place as prefixes are consumed
//! - The body is passed through untouched to downstream handlers

use std::collections::HashMap;

use axum::{
    body::Body,
    extract::Query,
    http::{header::HeaderName, HeaderMap, HeaderValue, Method, Request},
};

/// Header carrying the per-request correlation ID.
pub const X_REQUEST_ID: &str = "x-request-id";

/// A request as seen by the routing core.
#[derive(Debug)]
pub struct GatewayRequest {
    pub method: Method,
    /// Percent-decoded path, rewritten as routing strips prefixes.
    pub path: String,
    pub query: HashMap<String, String>,
    pub headers: HeaderMap,
    pub body: Body,
}

impl GatewayRequest {
    /// Create an empty-bodied request.
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            query: HashMap::new(),
            headers: HeaderMap::new(),
            body: Body::empty(),
        }
    }

    /// Build from an inbound HTTP request.
    pub fn from_http(request: Request<Body>) -> Self {
        let (parts, body) = request.into_parts();

        let query = Query::<HashMap<String, String>>::try_from_uri(&parts.uri)
            .map(|Query(q)| q)
            .unwrap_or_default();

        let raw = parts.uri.path();
        let path = urlencoding::decode(raw)
            .map(|p| p.into_owned())
            .unwrap_or_else(|_| raw.to_string());

        Self {
            method: parts.method,
            path,
            query,
            headers: parts.headers,
            body,
        }
    }

    pub fn with_query(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.query.insert(key.into(), value.into());
        self
    }

    pub fn with_header(mut self, name: &str, value: &str) -> Self {
        if let (Ok(name), Ok(value)) = (
            HeaderName::from_bytes(name.as_bytes()),
            HeaderValue::from_str(value),
        ) {
            self.headers.insert(name, value);
        }
        self
    }

    /// Query parameter value, if present.
    pub fn query_param(&self, key: &str) -> Option<&str> {
        self.query.get(key).map(String::as_str)
    }

    /// Request ID set by the middleware, or `"unknown"`.
    pub fn request_id(&self) -> &str {
        self.headers
            .get(X_REQUEST_ID)
            .and_then(|v| v.to_str().ok())
            .unwrap_or("unknown")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_http_decodes_path_and_query() {
        let req = Request::builder()
            .uri("http://example.com/api/resource/my%20file.txt?algo=sha256&dl=1")
            .header(X_REQUEST_ID, "abc-123")
            .body(Body::empty())
            .unwrap();

        let req = GatewayRequest::from_http(req);
        assert_eq!(req.path, "/api/resource/my file.txt");
        assert_eq!(req.query_param("algo"), Some("sha256"));
        assert_eq!(req.query_param("dl"), Some("1"));
        assert_eq!(req.query_param("missing"), None);
        assert_eq!(req.request_id(), "abc-123");
    }

    #[test]
    fn test_request_id_default() {
        let req = GatewayRequest::new(Method::GET, "/");
        assert_eq!(req.request_id(), "unknown");
    }
}
