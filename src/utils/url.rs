//! URL utilities for consistent URL handling
//!
//! This module provides utilities for normalizing URLs to prevent issues
//! with trailing slashes when joining the configured API base with request
//! paths.

/// Normalize a base URL by removing trailing slashes
///
/// This ensures consistent URL construction when appending endpoints,
/// preventing double slashes in the final URLs.
///
/// # Examples
///
/// ```
/// use backchat::utils::url::normalize_base_url;
///
/// assert_eq!(normalize_base_url("https://x/api"), "https://x/api");
/// assert_eq!(normalize_base_url("https://x/api/"), "https://x/api");
/// assert_eq!(normalize_base_url("https://x/api///"), "https://x/api");
/// ```
pub fn normalize_base_url(base_url: &str) -> String {
    base_url.trim_end_matches('/').to_string()
}

/// Join a request path onto a configured base URL.
///
/// An empty path yields the base unchanged. An absolute (scheme-prefixed)
/// path passes through untouched regardless of the base. Otherwise the base
/// loses any trailing slash and the path gains a leading slash when it lacks
/// one, so the join point carries exactly one slash.
///
/// # Examples
///
/// ```
/// use backchat::utils::url::build_url;
///
/// assert_eq!(build_url("https://x/api/", "chat"), "https://x/api/chat");
/// assert_eq!(build_url("https://x/api", "/chat"), "https://x/api/chat");
/// assert_eq!(build_url("https://x/api", "https://other/chat"), "https://other/chat");
/// ```
pub fn build_url(base: &str, path: &str) -> String {
    if path.is_empty() {
        return base.to_string();
    }
    if path.starts_with("http://") || path.starts_with("https://") {
        return path.to_string();
    }
    let base = normalize_base_url(base);
    if path.starts_with('/') {
        format!("{}{}", base, path)
    } else {
        format!("{}/{}", base, path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_base_url() {
        // No trailing slash - should remain unchanged
        assert_eq!(normalize_base_url("https://x/api"), "https://x/api");

        // Single trailing slash - should be removed
        assert_eq!(normalize_base_url("https://x/api/"), "https://x/api");

        // Multiple trailing slashes - should all be removed
        assert_eq!(normalize_base_url("https://x/api///"), "https://x/api");

        // Root URL variants
        assert_eq!(normalize_base_url("https://x/"), "https://x");
        assert_eq!(normalize_base_url("https://x"), "https://x");

        // Empty string
        assert_eq!(normalize_base_url(""), "");
    }

    #[test]
    fn test_build_url_join() {
        // Base with trailing slash, bare path
        assert_eq!(build_url("https://x/api/", "chat"), "https://x/api/chat");

        // Base without trailing slash, path with leading slash
        assert_eq!(build_url("https://x/api", "/chat"), "https://x/api/chat");

        // Neither side carries a slash
        assert_eq!(build_url("https://x/api", "chat"), "https://x/api/chat");

        // Both sides carry a slash
        assert_eq!(build_url("https://x/api/", "/chat"), "https://x/api/chat");
    }

    #[test]
    fn test_build_url_absolute_passthrough() {
        assert_eq!(
            build_url("https://x/api", "https://other/chat"),
            "https://other/chat"
        );
        assert_eq!(
            build_url("", "http://other/chat"),
            "http://other/chat"
        );
    }

    #[test]
    fn test_build_url_empty_path_returns_base() {
        assert_eq!(build_url("https://x/api", ""), "https://x/api");
        assert_eq!(build_url("", ""), "");
    }

    #[test]
    fn test_build_url_empty_base() {
        // No backend configured: the join still produces a rooted path
        assert_eq!(build_url("", "/chat"), "/chat");
        assert_eq!(build_url("", "chat"), "/chat");
    }
}
