// src/urls/path.rs
// =============================================================================
// This module maps canonical URLs to files under the output directory.
//
// Layout:
//   https://example.com/            -> <root>/example.com/index.html
//   https://example.com/dir/        -> <root>/example.com/dir/index.html
//   https://example.com/file.txt    -> <root>/example.com/file.txt
//   http://localhost:8080/a/b.css   -> <root>/localhost:8080/a/b.css
//
// We build the result with PathBuf::push, so the platform separator is used
// and there is always exactly one separator between the root and the rest,
// whether or not the root ends with one.
// =============================================================================

use super::canonical::CanonicalUrl;
use std::path::{Path, PathBuf};

/// File name used for directory-style URLs (ending in '/').
pub const INDEX_FILE: &str = "index.html";

// Computes where a resource should be written
//
// Parameters:
//   url: a canonical URL
//   output_root: the mirror's root directory
//
// Returns: Some(path) or None when the URL is invalid (nothing to persist)
pub fn map_to_path(url: &CanonicalUrl, output_root: &Path) -> Option<PathBuf> {
    if url.is_invalid() {
        return None;
    }

    let rest = url.without_scheme();
    let (authority, path) = match rest.find('/') {
        Some(index) => rest.split_at(index),
        None => (rest, "/"),
    };

    let mut file_path = output_root.to_path_buf();
    file_path.push(authority);

    // "." and ".." can't be part of a canonical path, but never let a
    // segment climb out of the output root regardless
    for segment in path.split('/') {
        if segment.is_empty() || segment == "." || segment == ".." {
            continue;
        }
        file_path.push(segment);
    }

    if path.ends_with('/') {
        file_path.push(INDEX_FILE);
    }

    Some(file_path)
}
