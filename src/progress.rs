// src/progress.rs
// =============================================================================
// This module reports crawl progress to the user.
//
// The crawl engine calls:
// - set_total(n) once, if a counting pass was run
// - record_completed(url) after every successful download
//
// ConsoleProgress prints one line per download:
//   "40.00% (2/5 URLs are downloaded) - https://example.com/page"
// and, when no total is known:
//   "2 URLs are downloaded (total not known) - https://example.com/page"
//
// Rust concepts:
// - Atomics: Counters that can be updated through a shared reference (&self)
// =============================================================================

use crate::urls::CanonicalUrl;
use std::sync::atomic::{AtomicUsize, Ordering};

// Receives progress events from the crawl engine
pub trait ProgressReporter: Send + Sync {
    fn set_total(&self, total: usize);
    fn record_completed(&self, url: &CanonicalUrl);
}

// Prints progress lines to stdout (or to the log, in quiet mode)
#[derive(Debug, Default)]
pub struct ConsoleProgress {
    total: AtomicUsize,
    completed: AtomicUsize,
    // In quiet mode lines go to tracing instead of stdout, so --json output
    // stays machine-readable
    quiet: bool,
}

impl ConsoleProgress {
    pub fn new(quiet: bool) -> Self {
        ConsoleProgress {
            quiet,
            ..Default::default()
        }
    }

    #[cfg(test)]
    pub fn completed(&self) -> usize {
        self.completed.load(Ordering::Relaxed)
    }
}

impl ProgressReporter for ConsoleProgress {
    fn set_total(&self, total: usize) {
        self.total.store(total, Ordering::Relaxed);
    }

    fn record_completed(&self, url: &CanonicalUrl) {
        let completed = self.completed.fetch_add(1, Ordering::Relaxed) + 1;
        let total = self.total.load(Ordering::Relaxed);
        let line = format_progress(completed, total, url.as_str());

        if self.quiet {
            tracing::info!("{}", line);
        } else {
            println!("{}", line);
        }
    }
}

// Formats one progress line
//
// A total of 0 means "unknown". More completions than the total can happen
// (a page that failed during counting may succeed later), so the percentage
// is capped at 100.
pub fn format_progress(completed: usize, total: usize, url: &str) -> String {
    if total == 0 {
        return format!("{} URLs are downloaded (total not known) - {}", completed, url);
    }

    let percentage = (completed as f64 / total as f64 * 100.0).min(100.0);
    format!(
        "{:.2}% ({}/{} URLs are downloaded) - {}",
        percentage, completed, total, url
    )
}
