//! Configuration constants.
//!
//! This module defines the constants used throughout the application: batch
//! scheduling defaults, network timeouts and retry policy, size limits, and
//! the thresholds the validation passes apply.

use std::time::Duration;

// Batch scheduling
/// Default number of documents analyzed concurrently
pub const DEFAULT_MAX_CONCURRENCY: usize = 3;
/// Default delay between two job admissions in milliseconds
/// Keeps the batch from bursting the fetch layer when many slots free up at once
pub const DEFAULT_ADMISSION_DELAY_MS: u64 = 500;
/// Per-job processing timeout (fetch + analysis)
/// Worst case per job: 3 attempts x 10s HTTP timeout + 1s and 5s retry delays = 36s
pub const JOB_PROCESSING_TIMEOUT: Duration = Duration::from_secs(45);
/// Interval in seconds between progress log lines
pub const LOGGING_INTERVAL: u64 = 5;

// Network
/// Per-request HTTP timeout in seconds
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 10;

/// Default User-Agent string for HTTP requests.
///
/// Users can override this via the `--user-agent` CLI flag.
pub const DEFAULT_USER_AGENT: &str =
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/131.0.0.0 Safari/537.36";

// Response and markup size limits
/// Maximum response body size in bytes (2MB)
/// Responses larger than this fail the job instead of being parsed
pub const MAX_RESPONSE_BODY_SIZE: usize = 2 * 1024 * 1024;
/// Maximum characters of outer HTML kept per heading for diagnostics
pub const MAX_RAW_MARKUP_CHARS: usize = 500;
/// Maximum characters of an error message stored on a failed job
pub const MAX_ERROR_MESSAGE_LENGTH: usize = 500;

// Retry strategy
/// Initial delay in milliseconds before the first retry
pub const RETRY_INITIAL_DELAY_MS: u64 = 500;
/// Backoff multiplier applied to each subsequent retry delay
pub const RETRY_FACTOR: u64 = 2;
/// Maximum delay between retries in seconds
pub const RETRY_MAX_DELAY_SECS: u64 = 5;
/// Maximum number of attempts (initial request + retries)
pub const RETRY_MAX_ATTEMPTS: usize = 3;

/// HTTP status code for Too Many Requests
pub const HTTP_STATUS_TOO_MANY_REQUESTS: u16 = 429;

// Heading text limits
/// Headings shorter than this many characters are flagged as too short
pub const MIN_HEADING_LENGTH: usize = 3;
/// Headings longer than this many characters are flagged as too long
pub const MAX_HEADING_LENGTH: usize = 70;
/// Recommended minimum H1 length (characters)
pub const H1_MIN_LENGTH: usize = 20;
/// Recommended maximum H1 length (characters)
pub const H1_MAX_LENGTH: usize = 70;

// Structural thresholds
/// More than this many H5/H6 headings is flagged as excessive depth
pub const DEEP_HEADING_LIMIT: usize = 5;
/// Words must be longer than this to count towards keyword stuffing
pub const STUFFING_MIN_WORD_LENGTH: usize = 3;
/// A word repeated more than this many times in one heading is stuffing
pub const STUFFING_REPEAT_LIMIT: usize = 2;

// Landmark thresholds
/// A missing main landmark is reported once a page has more headings than this
pub const MAIN_LANDMARK_MIN_HEADINGS: usize = 3;
/// A missing navigation landmark is reported once a page has more headings than this
pub const NAV_LANDMARK_MIN_HEADINGS: usize = 5;

// Heuristic thresholds
/// Flesch reading-ease scores below this are reported as hard to read
pub const LOW_READABILITY_THRESHOLD: f64 = 30.0;
/// Pairwise similarity above this is reported as near-duplicate headings
pub const SIMILARITY_THRESHOLD: f64 = 0.7;
/// Stop-word ratio above this is reported
pub const STOP_WORD_RATIO_LIMIT: f64 = 0.5;
/// The pairwise similarity pass is O(n^2); pages with more headings skip it
pub const MAX_SIMILARITY_HEADINGS: usize = 500;
