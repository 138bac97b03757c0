// src/download/mod.rs
// =============================================================================
// This module fetches resources and writes them to disk.
//
// Submodules:
// - http: The real downloader, built on reqwest
// - file: Atomic file writing (temp file + rename)
//
// The crawl engine only knows about the Downloader trait below, so tests can
// plug in an in-memory fake instead of hitting the network.
//
// Rust concepts:
// - Traits: Shared behaviour that several types can implement
// - async-trait: Lets us put async fn inside a trait object (dyn Downloader)
// =============================================================================

mod file;
mod http;

use crate::error::{PersistError, TransportError};
use async_trait::async_trait;
use encoding_rs::{Encoding, UTF_8};
use std::borrow::Cow;
use std::path::Path;

pub use http::{HttpConfig, HttpDownloader};

// A successfully downloaded resource
#[derive(Debug, Clone, Default)]
pub struct FetchedPage {
    /// Raw response body
    pub body: Vec<u8>,
    /// Value of the Content-Type header, if the server sent one
    pub content_type: Option<String>,
}

impl FetchedPage {
    #[cfg(test)]
    pub fn html(body: impl Into<String>) -> Self {
        FetchedPage {
            body: body.into().into_bytes(),
            content_type: Some("text/html".to_string()),
        }
    }

    // The body as text, decoded with the charset from Content-Type
    //
    // Falls back to UTF-8 when there is no charset or it isn't one we know.
    // A byte order mark at the start of the body wins over the header.
    // Malformed bytes become U+FFFD instead of failing.
    pub fn text(&self) -> Cow<'_, str> {
        let encoding = self
            .charset()
            .and_then(|label| Encoding::for_label(label.as_bytes()))
            .unwrap_or(UTF_8);
        let (text, _, _) = encoding.decode(&self.body);
        text
    }

    // text/html; charset="ISO-8859-1" -> Some("ISO-8859-1")
    fn charset(&self) -> Option<&str> {
        let content_type = self.content_type.as_deref()?;
        content_type.split(';').skip(1).find_map(|param| {
            let (name, value) = param.split_once('=')?;
            if name.trim().eq_ignore_ascii_case("charset") {
                Some(value.trim().trim_matches('"'))
            } else {
                None
            }
        })
    }

    // Whether it's worth looking for links in this resource
    //
    // Servers that don't send a Content-Type get the benefit of the doubt,
    // everything else has to be some flavour of HTML.
    pub fn may_contain_links(&self) -> bool {
        match &self.content_type {
            None => true,
            Some(ct) => {
                let ct = ct.to_ascii_lowercase();
                ct.contains("text/html") || ct.contains("application/xhtml")
            }
        }
    }
}

// Fetches resources and persists them
#[async_trait]
pub trait Downloader: Send + Sync {
    /// GET the URL and return its body.
    async fn download(&self, url: &str) -> Result<FetchedPage, TransportError>;

    /// Write content to path, creating missing parent directories.
    async fn save(&self, content: &[u8], path: &Path) -> Result<(), PersistError>;
}
