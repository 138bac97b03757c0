// src/download/http.rs
// =============================================================================
// This module downloads resources over HTTP(S).
//
// Key functionality:
// - One reqwest Client reused for the whole crawl (connection pooling)
// - Non-2xx responses count as failures
// - reqwest errors are sorted into TransportError categories
//   (timeout, redirect loop, DNS, TLS, connection, other)
//
// Rust concepts:
// - async/await: Network I/O without blocking the thread
// - impl Trait for Type: HttpDownloader implements the Downloader trait
// =============================================================================

use super::{file, Downloader, FetchedPage};
use crate::error::{CrawlError, PersistError, TransportError};
use async_trait::async_trait;
use reqwest::{header, Client};
use std::path::Path;
use std::time::Duration;

// Settings for the HTTP client
#[derive(Debug, Clone)]
pub struct HttpConfig {
    /// Per-request timeout
    pub timeout: Duration,
    /// Sent as the User-Agent header
    pub user_agent: String,
    /// How many redirects to follow before giving up
    pub max_redirects: usize,
}

impl Default for HttpConfig {
    fn default() -> Self {
        HttpConfig {
            timeout: Duration::from_secs(10),
            user_agent: concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")).to_string(),
            max_redirects: 5,
        }
    }
}

// Downloader backed by reqwest
#[derive(Debug, Clone)]
pub struct HttpDownloader {
    client: Client,
}

impl HttpDownloader {
    // Builds the client once; it is cheap to clone afterwards
    pub fn new(config: &HttpConfig) -> Result<Self, CrawlError> {
        let client = Client::builder()
            .timeout(config.timeout)
            .redirect(reqwest::redirect::Policy::limited(config.max_redirects))
            .user_agent(config.user_agent.clone())
            .build()
            .map_err(CrawlError::HttpClient)?;
        Ok(Self::with_client(client))
    }

    pub fn with_client(client: Client) -> Self {
        HttpDownloader { client }
    }
}

#[async_trait]
impl Downloader for HttpDownloader {
    async fn download(&self, url: &str) -> Result<FetchedPage, TransportError> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| categorize_error(url, e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(TransportError::Status {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        let content_type = response
            .headers()
            .get(header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);

        let body = response
            .bytes()
            .await
            .map_err(|e| categorize_error(url, e))?;

        Ok(FetchedPage {
            body: body.to_vec(),
            content_type,
        })
    }

    async fn save(&self, content: &[u8], path: &Path) -> Result<(), PersistError> {
        file::write_atomically(content, path).await
    }
}

// Sorts a reqwest error into a TransportError
//
// reqwest errors can happen for many reasons:
// - Network timeout
// - DNS resolution failure
// - SSL certificate issues
// - Too many redirects
// - etc.
fn categorize_error(url: &str, error: reqwest::Error) -> TransportError {
    let url = url.to_string();
    let message = error_chain(&error);
    let lowered = message.to_lowercase();

    if error.is_timeout() {
        TransportError::Timeout { url }
    } else if error.is_redirect() {
        TransportError::TooManyRedirects { url }
    } else if error.is_connect() {
        // Connection errors often mean DNS issues or host unreachable
        if lowered.contains("dns") {
            TransportError::Dns { url }
        } else {
            TransportError::Connect { url, message }
        }
    } else if lowered.contains("certificate") || lowered.contains("ssl") || lowered.contains("tls") {
        TransportError::Tls { url }
    } else {
        TransportError::Other { url, message }
    }
}

// reqwest keeps the interesting part (e.g. "dns error") in the source chain
fn error_chain(error: &(dyn std::error::Error + 'static)) -> String {
    let mut message = error.to_string();
    let mut source = error.source();
    while let Some(cause) = source {
        message.push_str(": ");
        message.push_str(&cause.to_string());
        source = cause.source();
    }
    message
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;

    // Serves one canned HTTP response on a loopback port and returns its URL
    async fn serve_once(response: String) -> String {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();

        tokio::spawn(async move {
            if let Ok((mut socket, _)) = listener.accept().await {
                let mut buf = [0u8; 4096];
                let _ = socket.read(&mut buf).await;
                let _ = socket.write_all(response.as_bytes()).await;
                let _ = socket.shutdown().await;
            }
        });

        format!("http://{}/page", addr)
    }

    fn canned(status: &str, content_type: &str, body: &str) -> String {
        format!(
            "HTTP/1.1 {}\r\nContent-Type: {}\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
            status,
            content_type,
            body.len(),
            body
        )
    }

    fn local_downloader(timeout: Duration) -> HttpDownloader {
        let client = Client::builder().no_proxy().timeout(timeout).build().unwrap();
        HttpDownloader::with_client(client)
    }

    #[tokio::test]
    async fn test_successful_download() {
        let url = serve_once(canned("200 OK", "text/html", "<a href='/x'>x</a>")).await;
        let downloader = local_downloader(Duration::from_secs(5));

        let page = downloader.download(&url).await.unwrap();
        assert_eq!(page.body, b"<a href='/x'>x</a>");
        assert_eq!(page.content_type.as_deref(), Some("text/html"));
    }

    #[tokio::test]
    async fn test_http_error_status() {
        let url = serve_once(canned("404 Not Found", "text/plain", "nope")).await;
        let downloader = local_downloader(Duration::from_secs(5));

        match downloader.download(&url).await {
            Err(TransportError::Status { status, url: failed }) => {
                assert_eq!(status, 404);
                assert_eq!(failed, url);
            }
            other => panic!("expected HTTP status error, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_connection_refused() {
        // Grab a free port and close it again so nothing is listening
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let downloader = local_downloader(Duration::from_secs(5));
        let result = downloader.download(&format!("http://{}/", addr)).await;
        assert!(
            matches!(result, Err(TransportError::Connect { .. })),
            "got {:?}",
            result
        );
    }

    #[tokio::test]
    async fn test_timeout() {
        // Accept the connection but never answer
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            let (_socket, _) = listener.accept().await.unwrap();
            tokio::time::sleep(Duration::from_secs(5)).await;
        });

        let downloader = local_downloader(Duration::from_millis(200));
        let result = downloader.download(&format!("http://{}/", addr)).await;
        assert!(matches!(result, Err(TransportError::Timeout { .. })), "got {:?}", result);
    }

    #[tokio::test]
    async fn test_save_writes_file() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("example.com").join("index.html");
        let downloader = local_downloader(Duration::from_secs(1));

        downloader.save(b"Test file content", &path).await.unwrap();
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "Test file content");
    }

    #[test]
    fn test_default_config() {
        let config = HttpConfig::default();
        assert_eq!(config.timeout, Duration::from_secs(10));
        assert_eq!(config.max_redirects, 5);
        assert!(config.user_agent.starts_with("site-mirror/"));
        assert!(HttpDownloader::new(&config).is_ok());
    }
}

// -----------------------------------------------------------------------------
// BEGINNER NOTES:
//
// 1. What is #[async_trait]?
//    - Traits used as dyn Trait can't have plain async fn methods
//    - The macro rewrites each async fn into one returning a boxed future
//    - That is what lets the crawler hold an Arc<dyn Downloader>
//
// 2. Why build the Client once?
//    - A reqwest Client keeps a pool of open connections
//    - Reusing it means pages from the same host share connections
//    - Building a new Client per request would throw that pool away
//
// 3. Why is a 404 an error here?
//    - reqwest only returns Err for network problems
//    - A 404 page is a successful HTTP exchange, but it isn't the resource
//      we wanted to mirror, so we turn it into TransportError::Status
//
// 4. What does .map_err(|e| categorize_error(url, e))? do?
//    - map_err converts the reqwest::Error into our TransportError
//    - ? then returns it early if the request failed
//
// 5. Why walk the error's source() chain?
//    - reqwest's top-level message is often just "error sending request"
//    - The useful detail ("dns error", "connection refused") is in the causes
//    - Joining them gives one readable message and lets us spot DNS failures
//
// 6. How do the tests avoid the internet?
//    - serve_once() binds a TcpListener on 127.0.0.1 port 0 (any free port)
//    - It answers one request with a hand-written HTTP response
//    - no_proxy() makes sure a proxy from the environment isn't used
// -----------------------------------------------------------------------------
