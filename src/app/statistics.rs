//! Final statistics printing.

use log::info;
use strum::IntoEnumIterator;

use crate::batch::BatchStats;
use crate::error_handling::{FailureKind, FailureStats};
use crate::model::Severity;

/// `"2 critical, 5 warning, 0 info"`, most severe first.
fn issue_summary(stats: &BatchStats) -> String {
    Severity::iter()
        .map(|severity| format!("{} {}", stats.issues(severity), severity))
        .collect::<Vec<_>>()
        .join(", ")
}

/// Logs the aggregate figures of a finished batch.
pub fn print_batch_statistics(stats: &BatchStats) {
    info!(
        "Pages: {} total, {} analyzed, {} failed, {} not started",
        stats.total_jobs,
        stats.completed_jobs,
        stats.failed_jobs,
        stats.pending_jobs + stats.analyzing_jobs
    );
    if stats.completed_jobs == 0 {
        return;
    }
    info!(
        "Headings: {} total, {:.1} per page",
        stats.total_headings, stats.average_headings_per_page
    );
    info!(
        "Pages with issues: {} ({:.1}%), without H1: {}, with multiple H1: {}",
        stats.pages_with_issues,
        stats.pages_with_issues_pct,
        stats.pages_without_h1,
        stats.pages_with_multiple_h1
    );
    info!("Issues: {}", issue_summary(stats));
}

/// Logs the failure counts by category, skipping categories with no failures.
pub fn print_failure_statistics(failures: &FailureStats) {
    let total = failures.total();
    if total == 0 {
        return;
    }
    info!("Failure Counts ({} total):", total);
    for kind in FailureKind::iter() {
        let count = failures.count(kind);
        if count > 0 {
            info!("   {}: {}", kind.as_str(), count);
        }
    }
}
