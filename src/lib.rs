//! heading_audit library: heading outline analysis for web pages
//!
//! This library builds the outline of a document's H1–H6 headings, runs
//! structural, accessibility, semantic-landmark and SEO/readability checks over
//! it, and computes aggregate metrics. A bounded-concurrency batch controller
//! runs the same pipeline over many URLs with pause, resume and cancel.
//!
//! # Example
//!
//! ```no_run
//! use heading_audit::{run_audit, Config};
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let config = Config {
//!     file: std::path::PathBuf::from("urls.txt"),
//!     max_concurrency: 5,
//!     ..Default::default()
//! };
//!
//! let report = run_audit(config).await?;
//! println!("Audited {} URLs: {} analyzed, {} failed",
//!          report.total_urls, report.completed, report.failed);
//! # Ok(())
//! # }
//! ```
//!
//! Single documents need no runtime:
//!
//! ```
//! use heading_audit::{analyze_html, IssueType};
//!
//! let result = analyze_html("<h1>Gardening for beginners guide</h1><h3>Tools</h3>");
//! assert!(result.validation.contains(IssueType::HeadingSkipped));
//! ```
//!
//! # Requirements
//!
//! The batch controller, the HTTP fetcher and `run_audit` require a Tokio
//! runtime.

mod analysis;
mod app;
mod batch;
pub mod config;
mod error_handling;
mod extract;
mod fetch;
mod hierarchy;
pub mod initialization;
mod metrics;
mod model;
mod text;
mod utils;
mod validation;

// Re-export public API
pub use analysis::{analyze_headings, analyze_html, analyze_url};
pub use batch::{
    BatchConfig, BatchController, BatchJob, BatchMode, BatchRun, BatchState, BatchStats, JobStatus,
};
pub use config::{Config, LogFormat, LogLevel};
pub use error_handling::{BatchError, FailureKind, FailureStats, FetchError, InitializationError};
pub use extract::extract_headings;
pub use fetch::{Fetcher, HttpFetcher};
pub use hierarchy::build_hierarchy;
pub use metrics::{compute_metrics, count_by_level, max_depth};
pub use model::{
    AccessibilityInfo, AnalysisResult, HeadingMetrics, HeadingNode, HeadingRecord, HiddenMethod,
    Issue, IssueType, LandmarkType, SemanticInfo, Severity, ValidationResult,
};
pub use run::{run_audit, AuditReport};
pub use validation::{
    validate_accessibility, validate_all, validate_heuristics, validate_semantics,
    validate_structure,
};

// Internal run module (reads the URL list and drives one batch)
mod run {
    use std::path::Path;
    use std::time::Duration;

    use anyhow::{Context, Result};
    use log::{info, warn};
    use tokio::io::{AsyncBufRead, AsyncBufReadExt, BufReader};
    use tokio_util::sync::CancellationToken;

    use crate::app::{
        log_progress, print_batch_statistics, print_failure_statistics, shutdown_gracefully,
        validate_and_normalize_url,
    };
    use crate::batch::{BatchConfig, BatchController, BatchStats};
    use crate::config::{Config, LOGGING_INTERVAL};
    use crate::fetch::HttpFetcher;

    /// Results of an audit run.
    #[derive(Debug, Clone)]
    pub struct AuditReport {
        /// Number of valid URLs in the input
        pub total_urls: usize,
        /// Pages fetched and analyzed
        pub completed: usize,
        /// Pages whose job failed
        pub failed: usize,
        /// Whether the run was interrupted before every page was attempted
        pub cancelled: bool,
        /// Batch identifier (format: `batch_<timestamp_millis>`)
        pub batch_id: String,
        /// Elapsed time in seconds
        pub elapsed_seconds: f64,
        /// Aggregate figures over the analyzed pages
        pub stats: BatchStats,
    }

    /// Reads URLs one per line, skipping blank lines, `#` comments and
    /// invalid entries.
    async fn read_urls<R: AsyncBufRead + Unpin>(reader: R) -> Result<Vec<String>> {
        let mut lines = reader.lines();
        let mut urls = Vec::new();
        while let Some(line) = lines
            .next_line()
            .await
            .context("Failed to read line from input")?
        {
            let trimmed = line.trim();
            if trimmed.is_empty() || trimmed.starts_with('#') {
                continue;
            }
            if let Some(url) = validate_and_normalize_url(trimmed) {
                urls.push(url);
            }
        }
        Ok(urls)
    }

    async fn load_urls(path: &Path) -> Result<Vec<String>> {
        if path.as_os_str() == "-" {
            info!("Reading URLs from stdin");
            read_urls(BufReader::new(tokio::io::stdin())).await
        } else {
            let file = tokio::fs::File::open(path)
                .await
                .with_context(|| format!("Failed to open input file {}", path.display()))?;
            read_urls(BufReader::new(file)).await
        }
    }

    /// Runs a heading audit over every URL of the input file.
    ///
    /// Progress is logged every `LOGGING_INTERVAL` seconds and Ctrl-C cancels
    /// the batch: jobs already analyzing finish, pending ones never start.
    ///
    /// # Errors
    ///
    /// This function will return an error if:
    /// - The input cannot be read or holds no valid URL
    /// - The HTTP client cannot be initialized
    ///
    /// Failed pages are not errors; they are counted in the report.
    pub async fn run_audit(config: Config) -> Result<AuditReport> {
        let urls = load_urls(&config.file).await?;
        anyhow::ensure!(!urls.is_empty(), "No valid URLs found in input");
        info!("Total URLs in input: {}", urls.len());

        let fetcher =
            HttpFetcher::from_config(&config).context("Failed to initialize HTTP client")?;
        let controller = BatchController::new(fetcher, BatchConfig::from(&config));

        let start_time = std::time::Instant::now();
        let run = controller.start(urls).context("Failed to start batch")?;
        let batch_id = run.batch_id().to_string();

        let cancel = CancellationToken::new();

        let cancel_logging = cancel.child_token();
        let logging_controller = controller.clone();
        let logging_task = tokio::task::spawn(async move {
            let mut interval = tokio::time::interval(Duration::from_secs(LOGGING_INTERVAL));
            // The first tick completes immediately
            interval.tick().await;
            loop {
                tokio::select! {
                    _ = interval.tick() => {
                        log_progress(start_time, &logging_controller.snapshot());
                    }
                    _ = cancel_logging.cancelled() => {
                        break;
                    }
                }
            }
        });

        let cancel_interrupt = cancel.child_token();
        let interrupt_controller = controller.clone();
        let interrupt_task = tokio::task::spawn(async move {
            tokio::select! {
                signal = tokio::signal::ctrl_c() => {
                    match signal {
                        Ok(()) => {
                            warn!("Interrupted, cancelling remaining jobs");
                            interrupt_controller.cancel();
                        }
                        Err(e) => warn!("Failed to listen for Ctrl-C: {e}"),
                    }
                }
                _ = cancel_interrupt.cancelled() => {}
            }
        });

        let final_state = run.wait().await.context("Batch scheduler failed")?;

        shutdown_gracefully(cancel, Some(logging_task)).await;
        let _ = interrupt_task.await;

        log_progress(start_time, &final_state);
        let stats = BatchStats::from_state(&final_state);
        print_batch_statistics(&stats);
        print_failure_statistics(&controller.failure_stats());

        Ok(AuditReport {
            total_urls: final_state.total_jobs,
            completed: final_state.completed_jobs,
            failed: final_state.failed_jobs,
            cancelled: final_state.is_cancelled,
            batch_id,
            elapsed_seconds: start_time.elapsed().as_secs_f64(),
            stats,
        })
    }

    #[cfg(test)]
    mod tests {
        use super::*;

        #[tokio::test]
        async fn test_read_urls_skips_comments_blanks_and_invalid_lines() {
            let input = "# audit list\n\nexample.com\n  https://example.org/blog  \nftp://example.net\nnot a url\n";
            let urls = read_urls(input.as_bytes()).await.expect("read should succeed");
            assert_eq!(urls, vec!["https://example.com", "https://example.org/blog"]);
        }

        #[tokio::test]
        async fn test_run_audit_missing_file() {
            let config = Config {
                file: "/nonexistent/heading_audit_urls.txt".into(),
                ..Config::default()
            };
            let err = run_audit(config).await.expect_err("missing file should fail");
            assert!(format!("{err:#}").contains("Failed to open input file"));
        }
    }
}
