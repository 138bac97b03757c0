// src/config.rs
// =============================================================================
// Configuration for one crawl.
//
// Everything the engine needs to know is in CrawlConfig and is handed to the
// engine when it is built. There are no global settings.
//
// Required:
// - start_url: where to begin (also the scope prefix)
// - output_root: where the mirror is written
//
// Optional:
// - mode: depth-first (default) or breadth-first
// - count_first: run a counting pass first so progress shows percentages
// - workers: how many pages are fetched at the same time (default 1)
// =============================================================================

use clap::ValueEnum;
use serde::Serialize;
use std::path::PathBuf;

// Order in which the frontier hands out URLs
//
// #[derive(ValueEnum)] lets clap parse "depth-first" / "breadth-first"
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum TraversalMode {
    /// Follow the most recently discovered link first (stack)
    #[default]
    DepthFirst,
    /// Finish each level before going one link deeper (queue)
    BreadthFirst,
}

#[derive(Debug, Clone)]
pub struct CrawlConfig {
    pub start_url: String,
    pub output_root: PathBuf,
    pub mode: TraversalMode,
    pub count_first: bool,
    pub workers: usize,
}

impl CrawlConfig {
    pub fn new(start_url: impl Into<String>, output_root: impl Into<PathBuf>) -> Self {
        CrawlConfig {
            start_url: start_url.into(),
            output_root: output_root.into(),
            mode: TraversalMode::default(),
            count_first: false,
            workers: 1,
        }
    }
}
