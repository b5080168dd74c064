//! Error categorization and retry strategy.

use std::time::Duration;
use tokio_retry::strategy::ExponentialBackoff;

use super::types::FetchError;
use crate::config::{
    HTTP_STATUS_TOO_MANY_REQUESTS, RETRY_FACTOR, RETRY_INITIAL_DELAY_MS, RETRY_MAX_ATTEMPTS,
    RETRY_MAX_DELAY_SECS,
};

/// Creates an exponential backoff retry strategy.
///
/// Yields one delay per retry, `RETRY_MAX_ATTEMPTS - 1` in total, so a fetch
/// makes at most `RETRY_MAX_ATTEMPTS` attempts. No delay exceeds
/// `RETRY_MAX_DELAY_SECS`.
pub fn get_retry_strategy() -> impl Iterator<Item = Duration> {
    ExponentialBackoff::from_millis(RETRY_INITIAL_DELAY_MS)
        .factor(RETRY_FACTOR)
        .max_delay(Duration::from_secs(RETRY_MAX_DELAY_SECS))
        .take(RETRY_MAX_ATTEMPTS.saturating_sub(1))
}

/// Maps a `reqwest::Error` onto a `FetchError`.
pub(crate) fn categorize_reqwest_error(error: &reqwest::Error) -> FetchError {
    if let Some(status) = error.status() {
        return FetchError::Status(status.as_u16());
    }
    if error.is_timeout() {
        FetchError::Timeout
    } else if error.is_builder() {
        FetchError::InvalidUrl {
            url: error.url().map(|u| u.to_string()).unwrap_or_default(),
            reason: error.to_string(),
        }
    } else {
        FetchError::Network(error.to_string())
    }
}

impl From<reqwest::Error> for FetchError {
    fn from(error: reqwest::Error) -> Self {
        categorize_reqwest_error(&error)
    }
}

/// Whether a failed fetch is worth another attempt.
///
/// Timeouts, network failures, 5xx and 429 are transient. Other 4xx, invalid
/// URLs, oversized bodies and cancellation are permanent.
pub fn is_retriable(error: &FetchError) -> bool {
    match error {
        FetchError::Timeout | FetchError::Network(_) => true,
        FetchError::Status(code) => {
            *code == HTTP_STATUS_TOO_MANY_REQUESTS || (500..600).contains(code)
        }
        FetchError::InvalidUrl { .. } | FetchError::BodyTooLarge { .. } | FetchError::Cancelled => {
            false
        }
    }
}
