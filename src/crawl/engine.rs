// src/crawl/engine.rs
// =============================================================================
// The traversal engine: mirrors every reachable page under the origin.
//
// How it works:
// 1. (optional) Run a counting pass to learn the total for the progress bar
// 2. Put the start URL in the frontier
// 3. Keep up to `workers` downloads in flight: take URLs out of the frontier
//    and claim each one in the visited set; URLs that are already visited or
//    not admissible are recorded as skipped
// 4. Whenever one download finishes, write it to disk and extract its links
// 5. Canonicalize the links and put the admissible, unvisited ones back in
//    the frontier, then refill the free worker slot
// 6. Repeat until the frontier is empty and nothing is in flight (or the
//    crawl is cancelled)
//
// A failed download or a failed write only affects that one URL: it is
// logged, recorded in the report and the crawl moves on.
//
// Rust concepts:
// - Arc<dyn Trait>: Shared, swappable collaborators (real or fake)
// - FuturesUnordered: a set of futures polled together, yielding each one
//   as soon as it completes
// =============================================================================

use super::frontier::{Frontier, VisitedSet};
use super::result::{CrawlReport, CrawlResult, SkipReason};
use crate::config::CrawlConfig;
use crate::download::Downloader;
use crate::error::CrawlError;
use crate::extract::extract_links;
use crate::progress::ProgressReporter;
use crate::urls::{CanonicalUrl, Origin, UrlHandler};
use futures::stream::{FuturesUnordered, StreamExt};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Instant;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

// Drives one crawl
pub struct Crawler {
    pub(super) config: CrawlConfig,
    pub(super) origin: Origin,
    pub(super) downloader: Arc<dyn Downloader>,
    pub(super) urls: Arc<dyn UrlHandler>,
    pub(super) progress: Arc<dyn ProgressReporter>,
    pub(super) cancel: CancellationToken,
}

// What processing one claimed URL produced
struct Processed {
    result: CrawlResult,
    links: Vec<String>,
}

impl Crawler {
    // Builds a crawler
    //
    // Fails if the start URL can't be fetched at all (invalid, or not
    // http/https), since then there is nothing to crawl.
    pub fn new(
        config: CrawlConfig,
        downloader: Arc<dyn Downloader>,
        urls: Arc<dyn UrlHandler>,
        progress: Arc<dyn ProgressReporter>,
    ) -> Result<Self, CrawlError> {
        let start = urls.canonicalize(&config.start_url);
        let origin = Origin::new(start, &config.start_url)?;

        Ok(Crawler {
            config,
            origin,
            downloader,
            urls,
            progress,
            cancel: CancellationToken::new(),
        })
    }

    /// Use a token the caller can cancel (e.g. on Ctrl-C).
    pub fn with_cancellation(mut self, cancel: CancellationToken) -> Self {
        self.cancel = cancel;
        self
    }

    pub fn origin(&self) -> &Origin {
        &self.origin
    }

    fn workers(&self) -> usize {
        self.config.workers.max(1)
    }

    // Runs the crawl to completion
    //
    // Returns: one CrawlResult per URL taken out of the frontier
    pub async fn start_crawling(&self) -> CrawlReport {
        let started = Instant::now();
        info!(
            origin = %self.origin,
            mode = ?self.config.mode,
            workers = self.workers(),
            "Starting crawl"
        );

        let total_estimate = if self.config.count_first {
            info!("Counting reachable resources (every page is fetched twice)");
            let total = self.count_reachable().await;
            info!(total, "Counting pass finished");
            self.progress.set_total(total);
            Some(total)
        } else {
            None
        };

        let mut frontier = Frontier::new(self.config.mode);
        let mut visited = VisitedSet::default();
        let mut results = Vec::new();
        let mut cancelled = false;
        let mut in_flight = FuturesUnordered::new();

        frontier.push(self.origin.start().clone());

        loop {
            let work_left = !frontier.is_empty() || !in_flight.is_empty();
            if !cancelled && work_left && self.cancel.is_cancelled() {
                warn!(
                    pending = frontier.len(),
                    in_flight = in_flight.len(),
                    "Crawl cancelled, finishing downloads in flight"
                );
                cancelled = true;
            }

            // Top up the free worker slots; with one worker this is the
            // plain sequential loop
            if !cancelled {
                while in_flight.len() < self.workers() {
                    match self.claim_next(&mut frontier, &mut visited, &mut results) {
                        Some(url) => in_flight.push(self.process(url)),
                        None => break,
                    }
                }
            }

            let Some(Processed { result, links }) = in_flight.next().await else {
                break;
            };

            if result.is_fetched() {
                self.progress.record_completed(&result.url);
            }
            results.push(result);
            if !cancelled {
                self.discover(&links, &mut frontier, &visited);
            }
        }

        let report = CrawlReport {
            start_url: self.origin.start().clone(),
            mode: self.config.mode,
            total_estimate,
            cancelled,
            elapsed_ms: started.elapsed().as_millis() as u64,
            results,
        };

        info!(
            fetched = report.fetched_count(),
            failed = report.failed_count(),
            skipped = report.skipped_count(),
            elapsed_ms = report.elapsed_ms,
            "Crawl finished"
        );
        report
    }

    // Pops URLs until one can be claimed
    //
    // Anything that can't be claimed gets its Skipped result right here.
    // discover() only offers valid, in-scope URLs, but the frontier makes no
    // promise about that, so the claim checks again.
    //
    // Returns: the claimed URL, or None once the frontier is empty
    fn claim_next(
        &self,
        frontier: &mut Frontier,
        visited: &mut VisitedSet,
        results: &mut Vec<CrawlResult>,
    ) -> Option<CanonicalUrl> {
        while let Some(url) = frontier.pop() {
            let reason = if url.is_invalid() {
                SkipReason::Invalid
            } else if !self.origin.admits(url.as_str(), &url) {
                SkipReason::OutOfScope
            } else if visited.claim(&url) {
                return Some(url);
            } else {
                SkipReason::AlreadyVisited
            };

            debug!(url = %url, ?reason, "Skipping");
            results.push(CrawlResult::skipped(url, reason));
        }
        None
    }

    // Downloads one claimed URL, saves it and extracts its links
    async fn process(&self, url: CanonicalUrl) -> Processed {
        debug!(url = %url, "Fetching");

        let page = match self.downloader.download(url.as_str()).await {
            Ok(page) => page,
            Err(e) => {
                warn!(url = %url, error = %e, "Download failed");
                return Processed {
                    result: CrawlResult::failed(url, e),
                    links: Vec::new(),
                };
            }
        };

        let saved_to = self.persist(&url, &page.body).await;

        let links = if page.may_contain_links() {
            extract_links(&page.text(), url.as_str())
        } else {
            Vec::new()
        };

        Processed {
            result: CrawlResult::fetched(url, page.body.len(), saved_to),
            links,
        }
    }

    // Writes the body to its mirror path
    //
    // Returns: the path on success, None if nothing was written
    async fn persist(&self, url: &CanonicalUrl, body: &[u8]) -> Option<PathBuf> {
        let path = self.urls.file_path(url, &self.config.output_root)?;

        match self.downloader.save(body, &path).await {
            Ok(()) => Some(path),
            Err(e) => {
                warn!(
                    url = %url,
                    path = %e.path.display(),
                    error = %e.source,
                    "Could not save resource"
                );
                None
            }
        }
    }

    // Canonicalizes raw links and offers the admissible ones to the frontier
    pub(super) fn discover(&self, links: &[String], frontier: &mut Frontier, visited: &VisitedSet) {
        for raw in links {
            let url = self.urls.canonicalize(raw);
            if !self.origin.admits(raw, &url) {
                debug!(link = %raw, "Not admissible");
                continue;
            }
            frontier.offer(url, visited);
        }
    }
}


// -----------------------------------------------------------------------------
// BEGINNER NOTES:
//
// 1. Why Arc<dyn Downloader> instead of a concrete HttpDownloader?
//    - dyn Trait means "any type implementing this trait", picked at runtime
//    - main.rs passes the real reqwest downloader
//    - the tests pass FakeSite, an in-memory website, so no network is needed
//    - Arc lets the crawler and the caller share the same object
//
// 2. How does FuturesUnordered keep several workers busy?
//    - in_flight holds up to `workers` unfinished process() futures
//    - in_flight.next().await waits for whichever one finishes first
//    - after each finished page we claim more URLs to fill the free slots,
//      so one slow page never stops the others from being replaced
//    - All futures run on the current task: no threads, no locks
//
// 3. Why claim URLs when they leave the frontier, not when they are found?
//    - Two pages can link to the same URL before either link is processed
//    - Both copies end up in the frontier
//    - Only the first claim() succeeds; the second copy becomes a Skipped
//      result, so every URL is downloaded at most once
//
// 4. What does `let Some(x) = ... else { break; };` do?
//    - It is "let-else": bind x if the pattern matches
//    - Otherwise run the else block, which must leave the current scope
//    - Here: stop the loop once nothing is left in flight
//
// 5. Why is cancellation a CancellationToken and not a bool?
//    - The token can be cloned and cancelled from another task (Ctrl-C)
//    - is_cancelled() is a cheap check we do once per loop iteration
//    - Downloads already running are allowed to finish
// -----------------------------------------------------------------------------
