// src/urls/canonical.rs
// =============================================================================
// This module turns raw link strings into canonical URLs.
//
// A canonical URL is what we use as the identity of a resource:
// - scheme + host (+ port if it isn't the default one) + path
// - query string and fragment are always dropped
// - anything we can't parse becomes the "invalid" value (an empty string)
//
// Two links that only differ by "?page=2" or "#section" therefore map to the
// same canonical URL, so they are downloaded only once.
//
// Rust concepts:
// - Newtype pattern: wrapping a String so it can't be mixed up with raw links
// - Option/Result: parsing failures become a value, never a panic
// =============================================================================

use serde::Serialize;
use std::fmt;
use url::Url;

// A URL in canonical form, or the invalid value
//
// The only ways to build one are canonicalize() and CanonicalUrl::INVALID,
// so a non-empty CanonicalUrl always looks like "scheme://host/path".
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct CanonicalUrl(String);

impl CanonicalUrl {
    /// The value returned for anything that isn't an absolute URL with a host.
    pub const INVALID: CanonicalUrl = CanonicalUrl(String::new());

    /// True for the invalid value.
    pub fn is_invalid(&self) -> bool {
        self.0.is_empty()
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The scheme part, e.g. "https". Empty for the invalid value.
    pub fn scheme(&self) -> &str {
        self.0.split_once("://").map(|(scheme, _)| scheme).unwrap_or("")
    }

    /// Everything after "scheme://", i.e. host, optional port and path.
    pub fn without_scheme(&self) -> &str {
        self.0.split_once("://").map(|(_, rest)| rest).unwrap_or("")
    }
}

impl fmt::Display for CanonicalUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

// Canonicalizes a raw URL string
//
// Parameters:
//   raw: any string found in a page (absolute URL, garbage, "javascript:...")
//
// Returns: the canonical URL, or CanonicalUrl::INVALID
//
// Examples:
//   "https://Example.com/page?x=1#top" -> "https://example.com/page"
//   "https://example.com"              -> "https://example.com/"
//   "invalid-url"                      -> INVALID
//   "mailto:someone@example.com"       -> INVALID (no host)
pub fn canonicalize(raw: &str) -> CanonicalUrl {
    // Cut at the first '#' and then at the first '?'
    let without_fragment = raw.split('#').next().unwrap_or("");
    let stripped = without_fragment.split('?').next().unwrap_or("").trim();

    if stripped.is_empty() {
        return CanonicalUrl::INVALID;
    }

    // Url::parse only accepts absolute URLs, so relative junk fails here
    let parsed = match Url::parse(stripped) {
        Ok(url) => url,
        Err(_) => return CanonicalUrl::INVALID,
    };

    // "mailto:", "data:", "javascript:" etc. parse fine but have no host
    let host = match parsed.host_str() {
        Some(host) if !host.is_empty() => host,
        _ => return CanonicalUrl::INVALID,
    };

    let authority = match parsed.port() {
        Some(port) => format!("{}:{}", host, port),
        None => host.to_string(),
    };

    CanonicalUrl(format!("{}://{}{}", parsed.scheme(), authority, parsed.path()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_url_unchanged() {
        let url = canonicalize("https://example.com/page");
        assert_eq!(url.as_str(), "https://example.com/page");
    }

    #[test]
    fn test_strips_query() {
        let url = canonicalize("https://example.com/page?query=value");
        assert_eq!(url.as_str(), "https://example.com/page");
    }

    #[test]
    fn test_strips_fragment() {
        let url = canonicalize("https://example.com/page#section");
        assert_eq!(url.as_str(), "https://example.com/page");
    }

    #[test]
    fn test_fragment_before_query() {
        // The '?' here is part of the fragment, so both go away
        let url = canonicalize("https://example.com/a#frag?x=1");
        assert_eq!(url.as_str(), "https://example.com/a");
    }

    #[test]
    fn test_query_and_fragment_variants_are_equal() {
        let plain = canonicalize("https://example.com/docs/");
        for variant in [
            "https://example.com/docs/?a=1",
            "https://example.com/docs/#intro",
            "https://example.com/docs/?a=1&b=2#intro",
        ] {
            assert_eq!(canonicalize(variant), plain, "variant {}", variant);
        }
    }

    #[test]
    fn test_idempotent() {
        for raw in [
            "https://example.com",
            "http://example.com:8080/a/b/",
            "https://EXAMPLE.com/x/../y?z#w",
        ] {
            let once = canonicalize(raw);
            let twice = canonicalize(once.as_str());
            assert_eq!(once, twice);
        }
    }

    #[test]
    fn test_keeps_non_default_port() {
        let url = canonicalize("http://localhost:8080/index.html");
        assert_eq!(url.as_str(), "http://localhost:8080/index.html");

        let url = canonicalize("https://example.com:443/");
        assert_eq!(url.as_str(), "https://example.com/");
    }

    #[test]
    fn test_malformed_inputs_are_invalid() {
        for raw in [
            "",
            "   ",
            "invalid-url",
            "/relative/path",
            "#only-a-fragment",
            "?only=query",
            "mailto:test@example.com",
            "javascript:void(0)",
            "http://",
            "https://exa mple.com/",
        ] {
            assert!(canonicalize(raw).is_invalid(), "expected invalid: {:?}", raw);
        }
    }

    #[test]
    fn test_scheme_accessors() {
        let url = canonicalize("https://example.com/dir/file.txt");
        assert_eq!(url.scheme(), "https");
        assert_eq!(url.without_scheme(), "example.com/dir/file.txt");

        assert_eq!(CanonicalUrl::INVALID.scheme(), "");
        assert_eq!(CanonicalUrl::INVALID.without_scheme(), "");
    }
}

// -----------------------------------------------------------------------------
// BEGINNER NOTES:
//
// 1. What is a newtype?
//    - struct CanonicalUrl(String) wraps a String in a new type
//    - The compiler now refuses to pass a raw &str where a CanonicalUrl is
//      expected, so un-normalized links can't sneak into the visited set
//    - It costs nothing at runtime
//
// 2. Why is "invalid" a value and not an error?
//    - Web pages are full of broken links
//    - Treating them as errors would mean handling Err at every call site
//    - An empty CanonicalUrl is checked with is_invalid() and simply skipped
//
// 3. What does split('#').next().unwrap_or("") do?
//    - split() returns an iterator over the pieces
//    - next() takes the first piece (everything before the first '#')
//    - split always yields at least one piece, unwrap_or is just a fallback
//
// 4. What does Url::parse normalize for us?
//    - The host is lowercased ("EXAMPLE.com" -> "example.com")
//    - Default ports are removed (":443" for https, ":80" for http)
//    - "." and ".." segments in the path are resolved
//    - An empty path becomes "/"
//
// 5. Why #[serde(transparent)]?
//    - It serializes CanonicalUrl exactly like the String inside
//    - The JSON report shows "https://example.com/" instead of ["..."]
// -----------------------------------------------------------------------------
