// src/crawl/frontier.rs
// =============================================================================
// The frontier (URLs waiting to be processed) and the visited set.
//
// How they work together:
// 1. A discovered URL is offered to the frontier. It is only added if it has
//    not been visited yet (this keeps the frontier small on cyclic sites).
// 2. When a URL is taken out of the frontier, it is claimed in the visited
//    set. Only the first claim succeeds.
// 3. Only a successful claim leads to a download.
//
// Step 1 is an optimization: the same URL can sit in the frontier twice if it
// was discovered twice before being processed. Step 2 is what guarantees
// each URL is downloaded at most once.
//
// Rust concepts:
// - VecDeque: One container that works as both a stack and a queue
// - HashSet::insert: Returns false when the value was already present
// =============================================================================

use crate::config::TraversalMode;
use crate::urls::CanonicalUrl;
use std::collections::{HashSet, VecDeque};

// Pending URLs, handed out as a stack or a queue depending on the mode
#[derive(Debug)]
pub struct Frontier {
    mode: TraversalMode,
    entries: VecDeque<CanonicalUrl>,
}

impl Frontier {
    pub fn new(mode: TraversalMode) -> Self {
        Frontier {
            mode,
            entries: VecDeque::new(),
        }
    }

    pub fn push(&mut self, url: CanonicalUrl) {
        self.entries.push_back(url);
    }

    // Adds url unless it is empty or already visited
    //
    // Returns: true if it was added
    pub fn offer(&mut self, url: CanonicalUrl, visited: &VisitedSet) -> bool {
        if url.is_invalid() || visited.contains(&url) {
            return false;
        }
        self.push(url);
        true
    }

    // Takes the next URL to process
    //
    // Depth-first: the most recently added URL (stack)
    // Breadth-first: the oldest URL (queue)
    pub fn pop(&mut self) -> Option<CanonicalUrl> {
        match self.mode {
            TraversalMode::DepthFirst => self.entries.pop_back(),
            TraversalMode::BreadthFirst => self.entries.pop_front(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }
}

// URLs that have been claimed for processing
#[derive(Debug, Default)]
pub struct VisitedSet {
    urls: HashSet<CanonicalUrl>,
}

impl VisitedSet {
    // Insert-if-absent
    //
    // Returns: true for the caller that claimed the URL first, false for
    // everyone after that
    pub fn claim(&mut self, url: &CanonicalUrl) -> bool {
        if self.urls.contains(url) {
            return false;
        }
        self.urls.insert(url.clone())
    }

    pub fn contains(&self, url: &CanonicalUrl) -> bool {
        self.urls.contains(url)
    }

    pub fn len(&self) -> usize {
        self.urls.len()
    }
}
