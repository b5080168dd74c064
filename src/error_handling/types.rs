//! Error type definitions.
//!
//! Operational failures only. Findings about a document are `Issue`s, not
//! errors, and never travel through these types.

use log::SetLoggerError;
use reqwest::Error as ReqwestError;
use strum_macros::EnumIter as EnumIterMacro;
use thiserror::Error;

/// Error types for initialization failures.
#[derive(Error, Debug)]
#[allow(clippy::enum_variant_names)] // All variants end with "Error" by convention
pub enum InitializationError {
    /// Error initializing the logger.
    #[error("Logger initialization error: {0}")]
    LoggerError(#[from] SetLoggerError),

    /// Error initializing the HTTP client.
    #[error("HTTP client initialization error: {0}")]
    HttpClientError(#[from] ReqwestError),
}

/// Why a document could not be fetched.
///
/// Cloneable so a failure can be stored on a job and still be reported.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FetchError {
    /// The URL did not parse or does not use http/https.
    #[error("Invalid URL '{url}': {reason}")]
    InvalidUrl {
        /// The URL as given
        url: String,
        /// What was wrong with it
        reason: String,
    },

    /// The request did not complete within the client timeout.
    #[error("Request timed out")]
    Timeout,

    /// The server answered with a non-success status.
    #[error("HTTP status {0}")]
    Status(u16),

    /// Connection, TLS, redirect or body read failure.
    #[error("Network error: {0}")]
    Network(String),

    /// The response body exceeded the configured size cap.
    #[error("Response body exceeds {limit} bytes")]
    BodyTooLarge {
        /// Cap in bytes
        limit: usize,
    },

    /// The fetch was abandoned because the batch was cancelled.
    #[error("Request cancelled")]
    Cancelled,
}

impl FetchError {
    /// Category used for failure statistics.
    pub fn kind(&self) -> FailureKind {
        match self {
            FetchError::InvalidUrl { .. } => FailureKind::InvalidUrl,
            FetchError::Timeout => FailureKind::HttpTimeout,
            FetchError::Status(429) => FailureKind::TooManyRequests,
            FetchError::Status(code) if (500..600).contains(code) => FailureKind::HttpServerError,
            FetchError::Status(_) => FailureKind::HttpClientError,
            FetchError::Network(_) => FailureKind::Network,
            FetchError::BodyTooLarge { .. } => FailureKind::BodyTooLarge,
            FetchError::Cancelled => FailureKind::Cancelled,
        }
    }
}

/// Errors returned by the batch controller's control surface.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum BatchError {
    /// `start` was called while a batch is still running.
    #[error("A batch is already running")]
    AlreadyRunning,

    /// `start` was called without any URLs.
    #[error("Cannot start a batch without URLs")]
    EmptyBatch,
}

/// Categories of per-job failures, tracked in `FailureStats`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIterMacro)]
pub enum FailureKind {
    InvalidUrl,
    HttpTimeout,
    HttpClientError, // 4xx other than 429
    HttpServerError, // 5xx
    TooManyRequests,
    Network,
    BodyTooLarge,
    Cancelled,
    JobTimeout, // fetch + analysis exceeded the per-job limit
    TaskPanicked,
}

impl std::fmt::Display for FailureKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FailureKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            FailureKind::InvalidUrl => "Invalid URL",
            FailureKind::HttpTimeout => "HTTP request timeout",
            FailureKind::HttpClientError => "HTTP client error (4xx)",
            FailureKind::HttpServerError => "HTTP server error (5xx)",
            FailureKind::TooManyRequests => "Too many requests (429)",
            FailureKind::Network => "Network error",
            FailureKind::BodyTooLarge => "Response body too large",
            FailureKind::Cancelled => "Cancelled",
            FailureKind::JobTimeout => "Job timeout",
            FailureKind::TaskPanicked => "Task panicked",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use strum::IntoEnumIterator;

    #[test]
    fn test_fetch_error_kind() {
        assert_eq!(FetchError::Status(404).kind(), FailureKind::HttpClientError);
        assert_eq!(FetchError::Status(429).kind(), FailureKind::TooManyRequests);
        assert_eq!(FetchError::Status(503).kind(), FailureKind::HttpServerError);
        assert_eq!(FetchError::Timeout.kind(), FailureKind::HttpTimeout);
        assert_eq!(FetchError::Cancelled.kind(), FailureKind::Cancelled);
    }

    #[test]
    fn test_fetch_error_messages() {
        assert_eq!(FetchError::Status(404).to_string(), "HTTP status 404");
        let invalid = FetchError::InvalidUrl {
            url: "ftp://x".to_string(),
            reason: "unsupported scheme".to_string(),
        };
        assert_eq!(invalid.to_string(), "Invalid URL 'ftp://x': unsupported scheme");
        assert_eq!(
            BatchError::AlreadyRunning.to_string(),
            "A batch is already running"
        );
    }

    #[test]
    fn test_all_failure_kinds_have_string_representation() {
        for kind in FailureKind::iter() {
            assert!(!kind.as_str().is_empty(), "{:?} should have a name", kind);
        }
    }
}
