// src/crawl/testing.rs
// =============================================================================
// Test doubles for the crawl engine.
//
// - FakeSite: an in-memory website implementing Downloader; it records every
//   download and save so tests can count fetches, and can make chosen pages
//   slow to answer
// - RecordingProgress: a ProgressReporter that remembers what it was told
// =============================================================================

use super::Crawler;
use crate::config::CrawlConfig;
use crate::download::{Downloader, FetchedPage};
use crate::error::{PersistError, TransportError};
use crate::progress::ProgressReporter;
use crate::urls::{BasicUrlHandler, CanonicalUrl};
use async_trait::async_trait;
use std::collections::{HashMap, HashSet};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio_util::sync::CancellationToken;

// An in-memory website
#[derive(Default)]
pub struct FakeSite {
    pages: HashMap<String, FetchedPage>,
    failing: HashSet<String>,
    delays: HashMap<String, Duration>,
    fail_saves: bool,
    cancel_after_first: Option<CancellationToken>,
    downloads: Mutex<Vec<String>>,
    saves: Mutex<Vec<PathBuf>>,
}

impl FakeSite {
    pub fn page(mut self, url: &str, html: &str) -> Self {
        self.pages.insert(url.to_string(), FetchedPage::html(html));
        self
    }

    pub fn asset(mut self, url: &str, body: &str, content_type: &str) -> Self {
        self.pages.insert(
            url.to_string(),
            FetchedPage {
                body: body.as_bytes().to_vec(),
                content_type: Some(content_type.to_string()),
            },
        );
        self
    }

    pub fn failing(mut self, url: &str) -> Self {
        self.failing.insert(url.to_string());
        self
    }

    pub fn slow(mut self, url: &str, delay: Duration) -> Self {
        self.delays.insert(url.to_string(), delay);
        self
    }

    pub fn failing_saves(mut self) -> Self {
        self.fail_saves = true;
        self
    }

    pub fn cancel_after_first(mut self, token: CancellationToken) -> Self {
        self.cancel_after_first = Some(token);
        self
    }

    pub fn downloads(&self) -> Vec<String> {
        self.downloads.lock().unwrap().clone()
    }

    pub fn times_downloaded(&self, url: &str) -> usize {
        self.downloads().iter().filter(|u| *u == url).count()
    }

    pub fn saves(&self) -> Vec<PathBuf> {
        self.saves.lock().unwrap().clone()
    }
}

#[async_trait]
impl Downloader for FakeSite {
    async fn download(&self, url: &str) -> Result<FetchedPage, TransportError> {
        self.downloads.lock().unwrap().push(url.to_string());
        if let Some(token) = &self.cancel_after_first {
            token.cancel();
        }

        if let Some(delay) = self.delays.get(url) {
            tokio::time::sleep(*delay).await;
        }

        if self.failing.contains(url) {
            return Err(TransportError::Connect {
                url: url.to_string(),
                message: "Download failed".to_string(),
            });
        }

        self.pages.get(url).cloned().ok_or_else(|| TransportError::Status {
            url: url.to_string(),
            status: 404,
        })
    }

    async fn save(&self, _content: &[u8], path: &Path) -> Result<(), PersistError> {
        if self.fail_saves {
            return Err(PersistError {
                path: path.to_path_buf(),
                source: std::io::Error::new(std::io::ErrorKind::Other, "disk full"),
            });
        }
        self.saves.lock().unwrap().push(path.to_path_buf());
        Ok(())
    }
}

#[derive(Default)]
pub struct RecordingProgress {
    total: Mutex<Option<usize>>,
    completed: Mutex<Vec<String>>,
}

impl RecordingProgress {
    pub fn total(&self) -> Option<usize> {
        *self.total.lock().unwrap()
    }

    pub fn completed(&self) -> Vec<String> {
        self.completed.lock().unwrap().clone()
    }
}

impl ProgressReporter for RecordingProgress {
    fn set_total(&self, total: usize) {
        *self.total.lock().unwrap() = Some(total);
    }

    fn record_completed(&self, url: &CanonicalUrl) {
        self.completed.lock().unwrap().push(url.to_string());
    }
}

pub fn crawler(
    config: CrawlConfig,
    site: &Arc<FakeSite>,
    progress: &Arc<RecordingProgress>,
) -> Crawler {
    Crawler::new(
        config,
        site.clone(),
        Arc::new(BasicUrlHandler),
        progress.clone(),
    )
    .unwrap()
}
