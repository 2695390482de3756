//! Path matching helpers.
//!
//! # Responsibilities
//! - Case-insensitive prefix tests for top-level areas
//! - Split an API path into its resource-area token and remainder
//!
//! # Design Decisions
//! - Pure string functions, no allocation beyond the returned pieces
//! - The remainder keeps its leading separator; handlers rely on that

/// Returns true if `path` starts with `prefix`, ignoring ASCII case.
pub fn match_url(path: &str, prefix: &str) -> bool {
    path.len() >= prefix.len()
        && path.as_bytes()[..prefix.len()].eq_ignore_ascii_case(prefix.as_bytes())
}

/// Split a path into the segment before the first separator and the rest.
///
/// A single leading `/` is dropped first. The head never contains the
/// separator while the rest starts with it (or is empty). A rooted path with
/// a single segment is all head; an unrooted one is all rest:
///
/// ```
/// use filegate::routing::matcher::split_url;
///
/// assert_eq!(split_url("/settings/theme"), ("settings".to_string(), "/theme".to_string()));
/// assert_eq!(split_url("/settings"), ("settings".to_string(), String::new()));
/// assert_eq!(split_url("noslash"), (String::new(), "noslash".to_string()));
/// ```
pub fn split_url(path: &str) -> (String, String) {
    if path.is_empty() {
        return (String::new(), String::new());
    }

    let (rooted, path) = match path.strip_prefix('/') {
        Some(stripped) => (true, stripped),
        None => (false, path),
    };

    match path.find('/') {
        Some(i) => (path[..i].to_string(), path[i..].to_string()),
        None if rooted => (path.to_string(), String::new()),
        None => (String::new(), path.to_string()),
    }
}

/// Strip `prefix` from `path` when it matches case-insensitively.
pub(crate) fn strip_url<'a>(path: &'a str, prefix: &str) -> Option<&'a str> {
    if match_url(path, prefix) {
        path.get(prefix.len()..)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_match_url_case_insensitive() {
        assert!(match_url("/api/resource", "/api"));
        assert!(match_url("/API/resource", "/api"));
        assert!(match_url("/Static/app.js", "/static"));
        assert!(!match_url("/ap", "/api"));
        assert!(!match_url("/preview", "/api"));
    }

    #[test]
    fn test_split_url() {
        assert_eq!(split_url(""), ("".into(), "".into()));
        assert_eq!(split_url("/"), ("".into(), "".into()));
        assert_eq!(split_url("/settings"), ("settings".into(), "".into()));
        assert_eq!(split_url("/settings/"), ("settings".into(), "/".into()));
        assert_eq!(split_url("/settings/theme"), ("settings".into(), "/theme".into()));
        assert_eq!(split_url("noslash"), ("".into(), "noslash".into()));
        assert_eq!(split_url("/resource/a/b.txt"), ("resource".into(), "/a/b.txt".into()));
    }

    #[test]
    fn test_split_url_only_strips_one_separator() {
        assert_eq!(split_url("//etc"), ("".into(), "/etc".into()));
    }

    #[test]
    fn test_strip_url() {
        assert_eq!(strip_url("/API/users", "/api"), Some("/users"));
        assert_eq!(strip_url("/share/abc", "/api"), None);
    }
}
