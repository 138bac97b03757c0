// src/crawl/counter.rs
// =============================================================================
// The counting pass: how many resources can the crawl reach?
//
// This walks the site breadth-first with the same admission rules as the
// real crawl, but only downloads and parses; nothing is written. It uses its
// own throwaway visited set and shares no downloaded content with the main
// pass, so turning it on roughly doubles the number of requests.
//
// A URL counts once it has been claimed, whether or not its download works,
// so the total matches "fetched + failed" of a crawl over the same site.
// =============================================================================

use super::engine::Crawler;
use super::frontier::{Frontier, VisitedSet};
use crate::config::TraversalMode;
use crate::extract::extract_links;
use tracing::{debug, warn};

impl Crawler {
    // Counts the admissible URLs reachable from the start URL
    //
    // Stops early (returning what it has so far) if the crawl is cancelled.
    pub async fn count_reachable(&self) -> usize {
        let mut frontier = Frontier::new(TraversalMode::BreadthFirst);
        let mut visited = VisitedSet::default();
        frontier.push(self.origin.start().clone());

        while let Some(url) = frontier.pop() {
            if self.cancel.is_cancelled() {
                warn!(counted = visited.len(), "Counting pass cancelled");
                break;
            }

            if !self.origin.admits(url.as_str(), &url) || !visited.claim(&url) {
                continue;
            }

            let page = match self.downloader.download(url.as_str()).await {
                Ok(page) => page,
                Err(e) => {
                    debug!(url = %url, error = %e, "Counting pass: download failed");
                    continue;
                }
            };

            if page.may_contain_links() {
                let links = extract_links(&page.text(), url.as_str());
                self.discover(&links, &mut frontier, &visited);
            }
        }

        visited.len()
    }
}
