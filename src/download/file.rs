// src/download/file.rs
// =============================================================================
// Writes downloaded content to disk.
//
// The content first goes to a uniquely named hidden temporary file next to
// the target and is then renamed into place. A rename within one directory
// is atomic, so a crash or a failed write never leaves a half-written mirror
// file behind. Because every write gets its own temporary file, two workers
// writing the same target (e.g. "/a//b" and "/a/b" both map to "a/b") never
// trample each other: the last rename wins.
//
// The tempfile crate does blocking I/O, so the whole write runs on tokio's
// blocking thread pool.
// =============================================================================

use crate::error::PersistError;
use std::io::{self, Write};
use std::path::Path;

// Writes content to path atomically
//
// Parameters:
//   content: bytes to write
//   path: target file (parent directories are created when missing)
pub async fn write_atomically(content: &[u8], path: &Path) -> Result<(), PersistError> {
    let content = content.to_vec();
    let target = path.to_path_buf();

    tokio::task::spawn_blocking(move || write_blocking(&content, &target))
        .await
        .map_err(|e| PersistError {
            path: path.to_path_buf(),
            source: io::Error::new(io::ErrorKind::Other, e),
        })?
}

fn write_blocking(content: &[u8], path: &Path) -> Result<(), PersistError> {
    let fail = |source: io::Error| PersistError {
        path: path.to_path_buf(),
        source,
    };

    let parent = match path.parent().filter(|p| !p.as_os_str().is_empty()) {
        Some(parent) => parent,
        None => Path::new("."),
    };
    std::fs::create_dir_all(parent).map_err(fail)?;

    // ".page.html.Xy12ab.part"; deleted automatically if we bail out early
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    let mut temp = tempfile::Builder::new()
        .prefix(&format!(".{}.", name))
        .suffix(".part")
        .tempfile_in(parent)
        .map_err(fail)?;

    temp.write_all(content).map_err(fail)?;
    temp.persist(path).map_err(|e| fail(e.error))?;

    Ok(())
}
