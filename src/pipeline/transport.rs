use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT};
use std::time::Duration;

use crate::config::FetchConfig;

/// Status and text body of one caption fetch
#[derive(Debug, Clone)]
pub struct FetchedBody {
    pub status: u16,
    pub body: String,
}

impl FetchedBody {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Network seam for the fetch cascade
///
/// The cascade never treats a transport error as fatal, so implementations
/// surface failures as plain `Err` values and leave retry policy to the
/// caller's candidate list.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CaptionTransport: Send + Sync {
    /// Issue a GET against a candidate URL and read the body as text
    async fn fetch_text(&self, url: &str) -> Result<FetchedBody>;
}

/// Production transport backed by a shared reqwest client
///
/// Requests are cookie-less and carry a broad `Accept` header, since the
/// caption endpoint keys its response format off undocumented parameters and
/// may serve JSON, VTT, or plain text for the same track.
pub struct HttpTransport {
    client: reqwest::Client,
}

impl HttpTransport {
    pub fn new(config: &FetchConfig) -> Result<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(
            ACCEPT,
            HeaderValue::from_static("application/json, text/vtt, text/plain, */*"),
        );

        let client = reqwest::Client::builder()
            .user_agent(&config.user_agent)
            .default_headers(headers)
            .timeout(Duration::from_secs(config.timeout_seconds))
            .build()
            .context("Failed to build HTTP client")?;

        Ok(Self { client })
    }
}

#[async_trait]
impl CaptionTransport for HttpTransport {
    async fn fetch_text(&self, url: &str) -> Result<FetchedBody> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .context("Caption request failed")?;

        let status = response.status().as_u16();
        let body = response
            .text()
            .await
            .context("Failed to read response body")?;

        Ok(FetchedBody { status, body })
    }
}
