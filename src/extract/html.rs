// src/extract/html.rs
// =============================================================================
// This module extracts resource links from HTML pages.
//
// We use the `scraper` crate which:
// - Parses HTML into a DOM (Document Object Model)
// - Supports CSS selectors for finding elements
// - Is built on html5ever (Mozilla's HTML parser)
//
// We look at every element that points at something a mirror needs:
//   <a href>, <link href>, <img src>, <script src>, <iframe src>, <frame src>
//
// For each element the href attribute wins; src is used when href is missing
// or blank. Links are resolved with the `url` crate against the page's base
// URL: the first <base href> in the document if there is one, otherwise the
// page URL itself. They come out in document order. Duplicates are kept: deduplication is the
// frontier's job.
// =============================================================================

use scraper::{ElementRef, Html, Selector};
use std::sync::OnceLock;
use url::Url;

const LINK_SELECTOR: &str =
    "a[href], img[src], link[href], script[src], iframe[src], frame[src]";

const BASE_SELECTOR: &str = "base[href]";

// Parsed once, reused for every page
fn link_selector() -> &'static Selector {
    static SELECTOR: OnceLock<Selector> = OnceLock::new();
    // The selector is a constant and known to be valid
    SELECTOR.get_or_init(|| Selector::parse(LINK_SELECTOR).unwrap())
}

fn base_selector() -> &'static Selector {
    static SELECTOR: OnceLock<Selector> = OnceLock::new();
    SELECTOR.get_or_init(|| Selector::parse(BASE_SELECTOR).unwrap())
}

// A parsed HTML page together with the URL it came from
pub struct ParsedPage {
    document: Html,
    base: Option<Url>,
}

impl ParsedPage {
    pub fn parse(content: &str, source_url: &str) -> Self {
        let document = Html::parse_document(content);
        let page_url = Url::parse(source_url).ok();

        // <base href> replaces the page URL for resolving relative links
        let base = document_base(&document, page_url.as_ref()).or(page_url);

        ParsedPage { document, base }
    }

    // Lazily yields absolute link strings in document order
    //
    // If the page URL itself is unusable, relative links can't be resolved,
    // so only links that are already absolute come out.
    pub fn links(&self) -> impl Iterator<Item = String> + '_ {
        self.document
            .select(link_selector())
            .filter_map(move |element| {
                let raw = link_attribute(element)?;
                resolve_url(self.base.as_ref(), raw)
            })
    }
}

// Extracts all links from HTML content
//
// Parameters:
//   content: the HTML content to parse
//   source_url: the URL of the page (for resolving relative links)
//
// Returns: absolute URLs, in document order, duplicates included
//
// Example:
//   content = "<a href='/docs'>Docs</a><img src='logo.png'>"
//   source_url = "https://example.com/"
//   result = ["https://example.com/docs", "https://example.com/logo.png"]
pub fn extract_links(content: &str, source_url: &str) -> Vec<String> {
    ParsedPage::parse(content, source_url).links().collect()
}

// The URL named by the first <base href> element, resolved against the page
//
// Returns None when there is no <base>, its href is blank, or it can't be
// resolved; the caller then falls back to the page URL.
fn document_base(document: &Html, page_url: Option<&Url>) -> Option<Url> {
    let element = document.select(base_selector()).next()?;
    let href = element.value().attr("href")?.trim();
    if href.is_empty() {
        return None;
    }

    match Url::parse(href) {
        Ok(url) => Some(url),
        Err(_) => page_url?.join(href).ok(),
    }
}

// href first, then src; blank values count as missing
fn link_attribute(element: ElementRef<'_>) -> Option<&str> {
    let value = element.value();
    ["href", "src"]
        .into_iter()
        .filter_map(|name| value.attr(name))
        .map(str::trim)
        .find(|v| !v.is_empty())
}

// Resolves a possibly-relative URL to an absolute URL
//
// Examples:
//   base = "https://example.com/page"
//   href = "/docs" -> Some("https://example.com/docs")
//   href = "../other" -> Some("https://example.com/other")
//   href = "https://other.com" -> Some("https://other.com/")
//   href = "javascript:void(0)" -> Some("javascript:void(0)") (the scope filter drops it)
fn resolve_url(base: Option<&Url>, href: &str) -> Option<String> {
    // If it's already absolute (has a scheme), this works
    // If it's relative, this fails, so we join it with base
    match Url::parse(href) {
        Ok(url) => Some(url.to_string()),
        Err(_) => base?.join(href).ok().map(|url| url.to_string()),
    }
}


// -----------------------------------------------------------------------------
// BEGINNER NOTES:
//
// 1. Why cache the Selector in a OnceLock?
//    - Selector::parse compiles the CSS selector string
//    - The selector never changes, so compiling it for every page is wasted work
//    - OnceLock::get_or_init runs the closure the first time and hands out
//      the same &'static Selector afterwards (even from several threads)
//
// 2. What does <base href> do?
//    - It tells the browser "resolve relative links against this URL"
//    - <base href="https://example.com/docs/"> + <a href="page1">
//      means https://example.com/docs/page1, not a sibling of the page
//    - Only the first <base> in a document counts
//
// 3. What does impl Iterator<Item = String> + '_ mean?
//    - links() returns "some iterator" without naming its (long) type
//    - The '_ says the iterator borrows from the ParsedPage
//    - Nothing is resolved until someone pulls items out of it
//
// 4. What is the ? inside filter_map doing?
//    - Inside a closure returning Option, ? returns None early
//    - link_attribute(element)? means "skip elements without a usable link"
//
// 5. Why keep javascript: and mailto: links here?
//    - Extraction only turns markup into absolute strings
//    - Deciding what gets crawled is the scope filter's job (urls::scope)
// -----------------------------------------------------------------------------
