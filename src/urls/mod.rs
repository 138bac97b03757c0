// src/urls/mod.rs
// =============================================================================
// This module contains everything that works on URL strings.
//
// Submodules:
// - canonical: Normalizes raw links into canonical URLs (identity for dedup)
// - scope: Decides whether a canonical URL belongs to the crawl
// - path: Maps a canonical URL to a file under the output directory
//
// The UrlHandler trait bundles canonicalize + map so the crawl engine can be
// given a different implementation in tests.
// =============================================================================

mod canonical;
mod path;
mod scope;

use std::path::{Path, PathBuf};

pub use canonical::{canonicalize, CanonicalUrl};
pub use path::map_to_path;
pub use scope::Origin;

// Turns raw links into canonical URLs and canonical URLs into file paths
pub trait UrlHandler: Send + Sync {
    fn canonicalize(&self, raw: &str) -> CanonicalUrl;

    /// None means "don't write this resource".
    fn file_path(&self, url: &CanonicalUrl, output_root: &Path) -> Option<PathBuf>;
}

// The default handler, backed by the functions in this module
#[derive(Debug, Clone, Copy, Default)]
pub struct BasicUrlHandler;

impl UrlHandler for BasicUrlHandler {
    fn canonicalize(&self, raw: &str) -> CanonicalUrl {
        canonicalize(raw)
    }

    fn file_path(&self, url: &CanonicalUrl, output_root: &Path) -> Option<PathBuf> {
        map_to_path(url, output_root)
    }
}
