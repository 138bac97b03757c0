// src/error.rs
// =============================================================================
// Error types for the crawler.
//
// There are three kinds:
// - TransportError: a single page could not be downloaded (recoverable)
// - PersistError: a single page could not be written to disk (recoverable)
// - CrawlError: the crawl can't start or can't go on at all (fatal)
//
// Invalid and out-of-scope links are NOT errors: they are filtered through
// return values (see urls::canonicalize and urls::is_admissible).
//
// Rust concepts:
// - thiserror: derives std::error::Error and Display from attributes
// - #[source]: keeps the underlying cause so anyhow can print the whole chain
// =============================================================================

use std::path::PathBuf;
use thiserror::Error;

// Why a download failed
//
// The variants follow the same categories we use when reporting a failed
// request (timeout, redirect loop, DNS, TLS, ...).
#[derive(Debug, Error)]
pub enum TransportError {
    #[error("HTTP {status} for {url}")]
    Status { url: String, status: u16 },

    #[error("request to {url} timed out")]
    Timeout { url: String },

    #[error("too many redirects for {url}")]
    TooManyRedirects { url: String },

    #[error("could not resolve host for {url}")]
    Dns { url: String },

    #[error("TLS/certificate error for {url}")]
    Tls { url: String },

    #[error("connection to {url} failed: {message}")]
    Connect { url: String, message: String },

    #[error("request to {url} failed: {message}")]
    Other { url: String, message: String },
}

// Writing a downloaded resource failed
#[derive(Debug, Error)]
#[error("failed to write {}", path.display())]
pub struct PersistError {
    pub path: PathBuf,
    #[source]
    pub source: std::io::Error,
}

// Errors that stop the whole crawl
#[derive(Debug, Error)]
pub enum CrawlError {
    #[error("invalid start URL '{url}': {reason}")]
    InvalidStartUrl { url: String, reason: String },

    #[error("could not create output directory {}", path.display())]
    OutputDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("could not build HTTP client")]
    HttpClient(#[source] reqwest::Error),
}
