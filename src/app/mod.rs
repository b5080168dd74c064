//! Command-line run helpers.
//!
//! This module provides URL validation, progress logging, shutdown handling
//! and statistics printing used by `run_audit`.

pub mod logging;
pub mod shutdown;
pub mod statistics;
pub mod url;

pub use logging::log_progress;
pub use shutdown::shutdown_gracefully;
pub use statistics::{print_batch_statistics, print_failure_statistics};
pub use url::validate_and_normalize_url;
