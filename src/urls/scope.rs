// src/urls/scope.rs
// =============================================================================
// This module decides which URLs the crawler is allowed to fetch.
//
// A URL is admissible when:
// 1. It canonicalized to something valid
// 2. It starts with the origin prefix (the canonical start URL)
// 3. Its scheme is http or https
// 4. The original link text isn't a "javascript:" pseudo-link
//
// Note that rule 2 is a plain string prefix test, not a domain comparison:
// when crawling under https://site.com/docs/ we never leave /docs/.
// =============================================================================

use super::canonical::CanonicalUrl;
use crate::error::CrawlError;
use std::fmt;

// The prefix that bounds a crawl
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Origin(CanonicalUrl);

impl Origin {
    // Builds the origin from the canonical start URL
    //
    // Fails when the start URL itself could never be fetched, because then
    // nothing at all would be admissible.
    pub fn new(start: CanonicalUrl, raw: &str) -> Result<Self, CrawlError> {
        if start.is_invalid() {
            return Err(CrawlError::InvalidStartUrl {
                url: raw.to_string(),
                reason: "not an absolute URL with a host".to_string(),
            });
        }
        if !is_fetchable_scheme(start.scheme()) {
            return Err(CrawlError::InvalidStartUrl {
                url: raw.to_string(),
                reason: format!("unsupported scheme '{}'", start.scheme()),
            });
        }
        Ok(Origin(start))
    }

    /// The canonical start URL, which is also the first frontier entry.
    pub fn start(&self) -> &CanonicalUrl {
        &self.0
    }

    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }

    pub fn admits(&self, raw: &str, url: &CanonicalUrl) -> bool {
        is_admissible(raw, url, self)
    }
}

impl fmt::Display for Origin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

// Checks whether a URL may be fetched
//
// Parameters:
//   raw: the link exactly as it was found (before canonicalization)
//   url: the canonical form of raw
//   origin: the crawl's origin prefix
//
// Returns: true if the crawler should fetch it
pub fn is_admissible(raw: &str, url: &CanonicalUrl, origin: &Origin) -> bool {
    !url.is_invalid()
        && !is_javascript_link(raw)
        && is_fetchable_scheme(url.scheme())
        && url.as_str().starts_with(origin.as_str())
}

fn is_fetchable_scheme(scheme: &str) -> bool {
    scheme == "http" || scheme == "https"
}

// "javascript:", "JavaScript:", " javascript:" all count
fn is_javascript_link(raw: &str) -> bool {
    const PREFIX: &str = "javascript:";
    let trimmed = raw.trim_start();
    trimmed
        .get(..PREFIX.len())
        .map(|head| head.eq_ignore_ascii_case(PREFIX))
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::urls::canonicalize;

    fn origin(raw: &str) -> Origin {
        Origin::new(canonicalize(raw), raw).unwrap()
    }

    fn admissible(raw: &str, origin: &Origin) -> bool {
        is_admissible(raw, &canonicalize(raw), origin)
    }

    #[test]
    fn test_admits_same_origin() {
        let origin = origin("https://example.com");
        assert!(admissible("https://example.com/page1", &origin));
        assert!(admissible("https://example.com/", &origin));
        assert!(admissible("https://example.com/a/b?x=1#y", &origin));
    }

    #[test]
    fn test_rejects_external_domain() {
        let origin = origin("https://example.com");
        assert!(!admissible("https://external.com/page", &origin));
        // A prefix test on "https://example.com/" also keeps out look-alike hosts
        assert!(!admissible("https://example.com.evil.org/", &origin));
    }

    #[test]
    fn test_prefix_is_path_aware() {
        let origin = origin("https://site.com/docs/");
        assert!(admissible("https://site.com/docs/x", &origin));
        assert!(!admissible("https://site.com/other/", &origin));
        assert!(!admissible("https://site.com/", &origin));
    }

    #[test]
    fn test_rejects_other_scheme_on_same_host() {
        let origin = origin("https://example.com/");
        assert!(!admissible("http://example.com/page", &origin));
        assert!(!admissible("ftp://example.com/file", &origin));
    }

    #[test]
    fn test_rejects_javascript_any_case() {
        let origin = origin("https://example.com/");
        for raw in [
            "javascript:void(0)",
            "JavaScript:alert(1)",
            "  JAVASCRIPT://example.com/%0aalert(1)",
        ] {
            // Even if canonicalization produced something in scope, the raw
            // text decides
            let pretend = canonicalize("https://example.com/page");
            assert!(!is_admissible(raw, &pretend, &origin), "{}", raw);
        }
    }

    #[test]
    fn test_rejects_invalid() {
        let origin = origin("https://example.com/");
        assert!(!is_admissible("", &CanonicalUrl::INVALID, &origin));
        assert!(!admissible("invalid-url", &origin));
    }

    #[test]
    fn test_origin_rejects_bad_start() {
        assert!(Origin::new(canonicalize("not a url"), "not a url").is_err());
        assert!(Origin::new(canonicalize("ftp://example.com/"), "ftp://example.com/").is_err());
    }

    #[test]
    fn test_origin_start_is_canonical() {
        let origin = origin("https://example.com?utm=1");
        assert_eq!(origin.start().as_str(), "https://example.com/");
        assert!(origin.admits("https://example.com/", origin.start()));
    }
}
