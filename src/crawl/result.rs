// src/crawl/result.rs
// =============================================================================
// What happened to each URL the crawler took out of the frontier.
//
// Every dequeued URL gets exactly one CrawlResult:
// - Fetched: downloaded (and written to disk, if that worked)
// - FetchFailed: the download failed; the URL is not retried
// - Skipped: already visited, out of scope, or invalid
//
// CrawlReport collects them for the summary table and the --json output.
// =============================================================================

use crate::config::TraversalMode;
use crate::urls::CanonicalUrl;
use serde::Serialize;
use std::path::PathBuf;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SkipReason {
    OutOfScope,
    AlreadyVisited,
    Invalid,
}

// Outcome for one URL
//
// #[serde(tag = "outcome")] writes the variant name into an "outcome" field
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum CrawlOutcome {
    Fetched {
        /// Size of the downloaded body
        bytes: usize,
        /// Where it was written; None if it could not be written
        #[serde(skip_serializing_if = "Option::is_none")]
        saved_to: Option<PathBuf>,
    },
    FetchFailed {
        cause: String,
    },
    Skipped {
        reason: SkipReason,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CrawlResult {
    pub url: CanonicalUrl,
    #[serde(flatten)]
    pub outcome: CrawlOutcome,
}

impl CrawlResult {
    pub fn fetched(url: CanonicalUrl, bytes: usize, saved_to: Option<PathBuf>) -> Self {
        CrawlResult {
            url,
            outcome: CrawlOutcome::Fetched { bytes, saved_to },
        }
    }

    pub fn failed(url: CanonicalUrl, cause: impl ToString) -> Self {
        CrawlResult {
            url,
            outcome: CrawlOutcome::FetchFailed {
                cause: cause.to_string(),
            },
        }
    }

    pub fn skipped(url: CanonicalUrl, reason: SkipReason) -> Self {
        CrawlResult {
            url,
            outcome: CrawlOutcome::Skipped { reason },
        }
    }

    pub fn is_fetched(&self) -> bool {
        matches!(self.outcome, CrawlOutcome::Fetched { .. })
    }

    pub fn is_failed(&self) -> bool {
        matches!(self.outcome, CrawlOutcome::FetchFailed { .. })
    }
}

// Everything one crawl produced
#[derive(Debug, Clone, Serialize)]
pub struct CrawlReport {
    pub start_url: CanonicalUrl,
    pub mode: TraversalMode,
    /// Result of the counting pass, if one was run
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_estimate: Option<usize>,
    /// True if the crawl was stopped before the frontier ran dry
    pub cancelled: bool,
    pub elapsed_ms: u64,
    pub results: Vec<CrawlResult>,
}

impl CrawlReport {
    pub fn fetched_count(&self) -> usize {
        self.results.iter().filter(|r| r.is_fetched()).count()
    }

    pub fn failed_count(&self) -> usize {
        self.results.iter().filter(|r| r.is_failed()).count()
    }

    pub fn skipped_count(&self) -> usize {
        self.results.len() - self.fetched_count() - self.failed_count()
    }

    // URLs that were downloaded, in the order they were processed
    #[cfg(test)]
    pub fn fetched_urls(&self) -> Vec<&str> {
        self.results
            .iter()
            .filter(|r| r.is_fetched())
            .map(|r| r.url.as_str())
            .collect()
    }
}
