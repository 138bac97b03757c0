// src/crawl/mod.rs
// =============================================================================
// This module handles website crawling.
//
// Features:
// - Depth-first (stack) or breadth-first (queue) traversal
// - Stays under the origin prefix (doesn't crawl external sites)
// - Each URL is downloaded at most once, even on sites full of cycles
// - Optional counting pass so progress can show a percentage
// - Optional concurrent fetching with a fixed number of workers
// - Cancellation between frontier iterations
//
// Submodules:
// - frontier: The pending-URL container and the visited set
// - engine: The draining loop (Crawler::start_crawling)
// - counter: The counting pass (Crawler::count_reachable)
// - result: Per-URL outcomes and the crawl report
// =============================================================================

mod counter;
mod engine;
mod frontier;
mod result;

#[cfg(test)]
mod testing;

// Re-export the main crawling types
pub use engine::Crawler;
pub use result::{CrawlOutcome, CrawlReport, SkipReason};
