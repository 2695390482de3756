//! Hardening headers for the UI shell.

use axum::http::{header, HeaderValue};
use axum::response::Response;

/// Headers set on every UI-shell response.
pub const SHELL_HEADERS: [(header::HeaderName, &str); 3] = [
    (header::X_FRAME_OPTIONS, "SAMEORIGIN"),
    (header::X_CONTENT_TYPE_OPTIONS, "nosniff"),
    (header::X_XSS_PROTECTION, "1; mode=block"),
];

/// Add the UI-shell hardening headers to `response`.
pub fn apply_shell_headers(response: &mut Response) {
    let headers = response.headers_mut();
    for (name, value) in SHELL_HEADERS {
        headers.insert(name, HeaderValue::from_static(value));
    }
}
