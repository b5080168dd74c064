//! Document retrieval.
//!
//! The batch controller only needs "fetch this URL or fail"; the `Fetcher`
//! trait is that seam. `HttpFetcher` is the production implementation, tests
//! plug in their own.

mod http;
mod request;

use std::future::Future;

use tokio_util::sync::CancellationToken;

use crate::error_handling::FetchError;

pub use http::HttpFetcher;

/// Retrieves the HTML of one document.
///
/// Implementations should stop work and return `FetchError::Cancelled` once
/// `cancel` fires. The controller treats any error as a failed job.
pub trait Fetcher: Send + Sync + 'static {
    /// Fetches `url` and returns the response body as text.
    fn fetch(
        &self,
        url: &str,
        cancel: CancellationToken,
    ) -> impl Future<Output = Result<String, FetchError>> + Send;
}
