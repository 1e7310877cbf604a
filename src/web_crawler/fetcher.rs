// src/web_crawler/fetcher.rs
use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use scraper::{Html, Selector};
use std::time::{Duration, Instant};
use thiserror::Error;
use tracing::debug;

// The directory serves stripped-down markup to unknown clients, so requests
// present themselves as a desktop browser.
const USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/91.0.4472.124 Safari/537.36";

const POLL_INTERVAL: Duration = Duration::from_millis(500);

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("unexpected status {status} for {url}")]
    Status { url: String, status: StatusCode },

    #[error("marker {selector:?} not present on {url} after {timeout:?}")]
    ReadyMarkerTimeout {
        url: String,
        selector: String,
        timeout: Duration,
    },

    #[error("invalid marker selector: {0}")]
    InvalidSelector(String),
}

/// Source of rendered pages. `fetch` returns a document as served;
/// `fetch_when_ready` waits (bounded) until the given marker selector
/// matches, for listings that fill in their content after the first
/// response.
#[async_trait]
pub trait PageFetcher: Send + Sync {
    async fn fetch(&self, url: &str) -> Result<String, FetchError>;
    async fn fetch_when_ready(&self, url: &str, marker: &str) -> Result<String, FetchError>;
}

pub struct HttpPageFetcher {
    client: Client,
    render_timeout: Duration,
}

impl HttpPageFetcher {
    pub fn new(request_timeout_seconds: u64, render_timeout_seconds: u64) -> Self {
        let client = Client::builder()
            .user_agent(USER_AGENT)
            .timeout(Duration::from_secs(request_timeout_seconds))
            .build()
            .expect("Failed to create HTTP client");

        Self {
            client,
            render_timeout: Duration::from_secs(render_timeout_seconds),
        }
    }
}

#[async_trait]
impl PageFetcher for HttpPageFetcher {
    async fn fetch(&self, url: &str) -> Result<String, FetchError> {
        debug!("Fetching: {}", url);

        let response = self.client.get(url).send().await?;
        if !response.status().is_success() {
            return Err(FetchError::Status {
                url: url.to_string(),
                status: response.status(),
            });
        }

        let html = response.text().await?;
        debug!("Fetched {} bytes from {}", html.len(), url);
        Ok(html)
    }

    async fn fetch_when_ready(&self, url: &str, marker: &str) -> Result<String, FetchError> {
        let deadline = Instant::now() + self.render_timeout;

        loop {
            let html = self.fetch(url).await?;
            if document_has_marker(&html, marker)? {
                return Ok(html);
            }

            if Instant::now() + POLL_INTERVAL >= deadline {
                return Err(FetchError::ReadyMarkerTimeout {
                    url: url.to_string(),
                    selector: marker.to_string(),
                    timeout: self.render_timeout,
                });
            }

            debug!("Marker {:?} not present yet on {}, retrying", marker, url);
            tokio::time::sleep(POLL_INTERVAL).await;
        }
    }
}

fn document_has_marker(html: &str, marker: &str) -> Result<bool, FetchError> {
    let selector =
        Selector::parse(marker).map_err(|_| FetchError::InvalidSelector(marker.to_string()))?;
    let document = Html::parse_document(html);
    Ok(document.select(&selector).next().is_some())
}
