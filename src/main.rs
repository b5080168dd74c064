//! Main application entry point (CLI binary).
//!
//! This is a thin wrapper around the `heading_audit` library that handles:
//! - Command-line argument parsing
//! - Logger initialization
//! - User-facing output formatting
//!
//! All core functionality is implemented in the library crate.

use anyhow::{Context, Result};
use clap::Parser;
use std::process;

use heading_audit::initialization::init_logger_with;
use heading_audit::{run_audit, Config};

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::parse();

    let log_level = config.log_level.clone();
    let log_format = config.log_format.clone();
    init_logger_with(log_level.into(), log_format).context("Failed to initialize logger")?;

    match run_audit(config).await {
        Ok(report) => {
            println!(
                "Audited {} URL{} ({} analyzed, {} failed{}) in {:.1}s",
                report.total_urls,
                if report.total_urls == 1 { "" } else { "s" },
                report.completed,
                report.failed,
                if report.cancelled { ", cancelled" } else { "" },
                report.elapsed_seconds
            );
            if report.completed > 0 {
                println!(
                    "{} of {} pages have heading issues ({:.1}%): {} critical, {} warning, {} info",
                    report.stats.pages_with_issues,
                    report.completed,
                    report.stats.pages_with_issues_pct,
                    report.stats.critical_issues,
                    report.stats.warning_issues,
                    report.stats.info_issues
                );
            }
            Ok(())
        }
        Err(e) => {
            eprintln!("heading_audit error: {:#}", e);
            process::exit(1);
        }
    }
}
