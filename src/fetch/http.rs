//! HTTP implementation of the `Fetcher` seam.

use std::sync::Arc;

use tokio_retry::RetryIf;
use tokio_util::sync::CancellationToken;
use url::Url;

use super::request::RequestHeaders;
use super::Fetcher;
use crate::config::{Config, MAX_RESPONSE_BODY_SIZE};
use crate::error_handling::{get_retry_strategy, is_retriable, FetchError, InitializationError};
use crate::initialization::init_client;

/// Fetches documents with a shared `reqwest` client.
///
/// Transient failures (timeouts, connection errors, 5xx, 429) are retried with
/// exponential backoff; everything else fails on the first attempt. Bodies
/// larger than the size cap fail the fetch instead of being buffered.
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: Arc<reqwest::Client>,
    max_body_size: usize,
}

impl HttpFetcher {
    /// Wraps an already configured client.
    pub fn new(client: Arc<reqwest::Client>) -> Self {
        Self {
            client,
            max_body_size: MAX_RESPONSE_BODY_SIZE,
        }
    }

    /// Builds the client from the run configuration.
    ///
    /// # Errors
    ///
    /// Returns `InitializationError::HttpClientError` if the client cannot be built.
    pub fn from_config(config: &Config) -> Result<Self, InitializationError> {
        Ok(Self::new(init_client(config)?))
    }

    /// Overrides the response body cap (bytes).
    pub fn with_max_body_size(mut self, max_body_size: usize) -> Self {
        self.max_body_size = max_body_size;
        self
    }

    async fn fetch_once(&self, url: &Url) -> Result<String, FetchError> {
        let request = RequestHeaders::apply_to_request_builder(self.client.get(url.clone()));
        let mut response = request.send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status(status.as_u16()));
        }

        let too_large = FetchError::BodyTooLarge {
            limit: self.max_body_size,
        };
        if response
            .content_length()
            .is_some_and(|len| len > self.max_body_size as u64)
        {
            return Err(too_large);
        }

        let mut body = Vec::new();
        while let Some(chunk) = response.chunk().await? {
            if body.len() + chunk.len() > self.max_body_size {
                return Err(too_large);
            }
            body.extend_from_slice(&chunk);
        }
        Ok(String::from_utf8_lossy(&body).into_owned())
    }
}

fn parse_http_url(raw: &str) -> Result<Url, FetchError> {
    let invalid = |reason: String| FetchError::InvalidUrl {
        url: raw.to_string(),
        reason,
    };
    let url = Url::parse(raw).map_err(|e| invalid(e.to_string()))?;
    match url.scheme() {
        "http" | "https" => Ok(url),
        other => Err(invalid(format!("unsupported scheme '{other}'"))),
    }
}

impl Fetcher for HttpFetcher {
    async fn fetch(&self, url: &str, cancel: CancellationToken) -> Result<String, FetchError> {
        let parsed = parse_http_url(url)?;
        log::debug!("Fetching {}", parsed);

        let attempt = || self.fetch_once(&parsed);
        tokio::select! {
            biased;
            _ = cancel.cancelled() => Err(FetchError::Cancelled),
            result = RetryIf::start(get_retry_strategy(), attempt, is_retriable) => result,
        }
    }
}
