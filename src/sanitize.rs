use url::{ParseError, Url};

/// Inert reference substituted for URLs that fail sanitization.
///
/// Protocol-relative, port 0 on the current host: it fetches nothing and never
/// navigates within the document.
pub const PLACEHOLDER: &str = "//:0";

/// Schemes a configured placeholder may carry
const PLACEHOLDER_PROTOCOLS: &[&str] = &["http", "https"];

/// Whether `placeholder` is inert enough to stand in for a rejected URL
pub fn is_safe_placeholder(placeholder: &str) -> bool {
    sanitize(placeholder, PLACEHOLDER_PROTOCOLS)
}

/// `placeholder` when it passes [`is_safe_placeholder`], otherwise [`PLACEHOLDER`]
pub fn safe_placeholder(placeholder: &str) -> &str {
    if is_safe_placeholder(placeholder) {
        placeholder
    } else {
        tracing::warn!(placeholder, "unsafe placeholder replaced with default");
        PLACEHOLDER
    }
}

/// Check a URL's scheme against an allowlist.
///
/// URLs without a scheme (relative, path-relative, protocol-relative) are safe.
/// A URL with a scheme is safe when the scheme matches one of `allowed`, ignoring
/// case. A URL that has a scheme but cannot be parsed is unsafe.
pub fn sanitize<S: AsRef<str>>(url: &str, allowed: &[S]) -> bool {
    match Url::parse(url) {
        Ok(parsed) => {
            let scheme = parsed.scheme();
            allowed
                .iter()
                .map(|p| p.as_ref().trim_end_matches(':'))
                .any(|p| p.eq_ignore_ascii_case(scheme))
        }
        Err(ParseError::RelativeUrlWithoutBase) => true,
        Err(_) => false,
    }
}

/// Return `url` when it passes [`sanitize`], otherwise `placeholder`.
pub fn sanitize_or<'a, S: AsRef<str>>(url: &'a str, allowed: &[S], placeholder: &'a str) -> &'a str {
    if sanitize(url, allowed) {
        url
    } else {
        tracing::debug!(url, placeholder, "unsafe url replaced with placeholder");
        placeholder
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const WEB: &[&str] = &["http", "https"];

    #[test]
    fn test_allowed_protocols() {
        assert!(sanitize("https://example.com/a.png", WEB));
        assert!(sanitize("http://example.com", WEB));
        assert!(sanitize("HTTPS://EXAMPLE.COM", WEB));
        assert!(sanitize("data:image/png;base64,AAAA", &["data"]));
    }

    #[test]
    fn test_disallowed_protocols() {
        assert!(!sanitize("javascript:alert(1)", WEB));
        assert!(!sanitize("JavaScript:alert(1)", WEB));
        assert!(!sanitize("vbscript:msgbox(1)", WEB));
        assert!(!sanitize("data:text/html,<script>", WEB));
        assert!(!sanitize("mailto:someone@example.com", WEB));
    }

    #[test]
    fn test_obfuscated_scheme_is_detected() {
        assert!(!sanitize("  javascript:alert(1)", WEB));
        assert!(!sanitize("java\tscript:alert(1)", WEB));
        assert!(!sanitize("java\nscript:alert(1)", WEB));
    }

    #[test]
    fn test_relative_urls_are_safe() {
        assert!(sanitize("", WEB));
        assert!(sanitize("photo.png", WEB));
        assert!(sanitize("/images/photo.png", WEB));
        assert!(sanitize("../photo.png?a=1", WEB));
        assert!(sanitize("//cdn.example.com/photo.png", WEB));
        assert!(sanitize("path/with:colon", WEB));
        assert!(sanitize(PLACEHOLDER, WEB));
    }

    #[test]
    fn test_malformed_url_is_unsafe() {
        assert!(!sanitize("http://[::1", WEB));
        assert!(!sanitize("https://", WEB));
    }

    #[test]
    fn test_allowlist_entries_may_carry_colon() {
        assert!(sanitize("https://example.com", &["https:"]));
    }

    #[test]
    fn test_safe_placeholder() {
        assert!(is_safe_placeholder(PLACEHOLDER));
        assert!(is_safe_placeholder("/blank.gif"));
        assert!(!is_safe_placeholder("javascript:alert(1)"));
        assert!(!is_safe_placeholder("data:text/html,<script>"));
        assert_eq!(safe_placeholder("/blank.gif"), "/blank.gif");
        assert_eq!(safe_placeholder("javascript:alert(1)"), PLACEHOLDER);
    }

    #[test]
    fn test_sanitize_or() {
        assert_eq!(sanitize_or("https://a.com", WEB, PLACEHOLDER), "https://a.com");
        assert_eq!(sanitize_or("javascript:alert(1)", WEB, PLACEHOLDER), PLACEHOLDER);
    }
}
