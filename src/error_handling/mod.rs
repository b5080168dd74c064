//! Error handling and failure statistics.
//!
//! This module provides:
//! - Error type definitions (initialization, fetch, batch control)
//! - Failure categorization and the retry strategy for fetches
//! - Thread-safe per-category failure counters

mod categorization;
mod stats;
mod types;

// Re-export public API
pub use categorization::{get_retry_strategy, is_retriable};
pub use stats::FailureStats;
pub use types::{BatchError, FailureKind, FetchError, InitializationError};
