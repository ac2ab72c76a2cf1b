//! URL normalization and validation for page references and extracted links.

use url::Url;

/// Prefix `https://` onto a page reference that carries no `scheme://` part.
///
/// Input that already names a scheme is returned as-is (only surrounding
/// whitespace is trimmed).
pub fn normalize_page_url(input: &str) -> String {
    let trimmed = input.trim();
    if has_scheme(trimmed) {
        trimmed.to_string()
    } else {
        format!("https://{}", trimmed)
    }
}

/// Parse a string into a URL that is fit to fetch
pub fn parse_valid(input: &str) -> Option<Url> {
    Url::parse(input).ok().filter(is_valid)
}

/// A fetchable URL: `http` or `https` with a non-empty host
pub fn is_valid(url: &Url) -> bool {
    matches!(url.scheme(), "http" | "https") && url.host_str().is_some_and(|h| !h.is_empty())
}

/// Resolve an anchor `href` against the page it was found on.
///
/// Returns `None` for `mailto:` links, in-page fragments, and anything that
/// does not resolve to a valid URL.
pub fn resolve_href(base: &Url, href: &str) -> Option<Url> {
    let href = href.trim();
    if href.is_empty() || href.starts_with('#') {
        return None;
    }
    if href.get(..7).is_some_and(|p| p.eq_ignore_ascii_case("mailto:")) {
        return None;
    }
    base.join(href).ok().filter(is_valid)
}

/// `scheme://` where scheme is `ALPHA *( ALPHA / DIGIT / "+" / "-" / "." )`
fn has_scheme(input: &str) -> bool {
    let Some((scheme, _)) = input.split_once("://") else {
        return false;
    };
    let mut chars = scheme.chars();
    chars.next().is_some_and(|c| c.is_ascii_alphabetic())
        && chars.all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '.'))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prefixes_https_when_scheme_missing() {
        assert_eq!(normalize_page_url("example.com/news"), "https://example.com/news");
        assert_eq!(normalize_page_url("  example.com "), "https://example.com");
        assert_eq!(normalize_page_url("localhost:8080/a"), "https://localhost:8080/a");
    }

    #[test]
    fn keeps_scheme_bearing_urls() {
        for url in ["http://example.com", "https://example.com/a?b=c", "ftp://files.example.com"] {
            assert_eq!(normalize_page_url(url), url);
        }
    }

    #[test]
    fn query_containing_scheme_text_is_not_a_scheme() {
        assert_eq!(
            normalize_page_url("example.com/?next=https://other.org"),
            "https://example.com/?next=https://other.org"
        );
    }

    #[test]
    fn validation_requires_http_and_host() {
        assert!(parse_valid("https://example.com").is_some());
        assert!(parse_valid("http://127.0.0.1:3000/x").is_some());
        assert!(parse_valid("ftp://example.com").is_none());
        assert!(parse_valid("https://").is_none());
        assert!(parse_valid("not a url").is_none());
    }

    #[test]
    fn resolves_relative_hrefs_against_base() {
        let base = Url::parse("https://example.com/blog/post.html").unwrap();
        assert_eq!(
            resolve_href(&base, "other.html").unwrap().as_str(),
            "https://example.com/blog/other.html"
        );
        assert_eq!(
            resolve_href(&base, "/about").unwrap().as_str(),
            "https://example.com/about"
        );
        assert_eq!(
            resolve_href(&base, "//cdn.example.org/x").unwrap().as_str(),
            "https://cdn.example.org/x"
        );
    }

    #[test]
    fn skips_mailto_fragments_and_invalid() {
        let base = Url::parse("https://example.com/").unwrap();
        assert!(resolve_href(&base, "mailto:someone@example.com").is_none());
        assert!(resolve_href(&base, "MAILTO:someone@example.com").is_none());
        assert!(resolve_href(&base, "#section-2").is_none());
        assert!(resolve_href(&base, "javascript:void(0)").is_none());
        assert!(resolve_href(&base, "   ").is_none());
    }
}
