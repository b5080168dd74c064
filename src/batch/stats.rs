//! Aggregate statistics over a batch snapshot.

use serde::Serialize;

use super::state::{BatchState, JobStatus};
use crate::model::{AnalysisResult, Severity};

/// Pure reduction over the jobs of a `BatchState`.
///
/// Page-level figures only consider completed jobs, since failed jobs have no
/// analysis. "Pages with issues" counts pages with at least one critical or
/// warning issue; info-level advisories are ignored there.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct BatchStats {
    pub total_jobs: usize,
    pub completed_jobs: usize,
    pub failed_jobs: usize,
    pub pending_jobs: usize,
    pub analyzing_jobs: usize,
    pub total_headings: usize,
    pub average_headings_per_page: f64,
    pub pages_with_issues: usize,
    pub pages_with_issues_pct: f64,
    pub pages_without_h1: usize,
    pub pages_with_multiple_h1: usize,
    pub critical_issues: usize,
    pub warning_issues: usize,
    pub info_issues: usize,
}

impl BatchStats {
    pub fn from_state(state: &BatchState) -> Self {
        let results: Vec<&AnalysisResult> = state
            .jobs
            .iter()
            .filter(|job| job.status == JobStatus::Completed)
            .filter_map(|job| job.result.as_ref())
            .collect();
        let pages = results.len();

        let total_headings: usize = results.iter().map(|r| r.metrics.total_headings).sum();
        let pages_with_issues = results.iter().filter(|r| r.has_actionable_issues()).count();
        let issues = |severity: Severity| -> usize {
            results.iter().map(|r| r.issue_count(severity)).sum()
        };

        Self {
            total_jobs: state.total_jobs,
            completed_jobs: state.completed_jobs,
            failed_jobs: state.failed_jobs,
            pending_jobs: state.count(JobStatus::Pending),
            analyzing_jobs: state.count(JobStatus::Analyzing),
            total_headings,
            average_headings_per_page: ratio(total_headings, pages),
            pages_with_issues,
            pages_with_issues_pct: ratio(pages_with_issues, pages) * 100.0,
            pages_without_h1: results.iter().filter(|r| r.h1_count() == 0).count(),
            pages_with_multiple_h1: results.iter().filter(|r| r.h1_count() > 1).count(),
            critical_issues: issues(Severity::Critical),
            warning_issues: issues(Severity::Warning),
            info_issues: issues(Severity::Info),
        }
    }

    /// Issue total for one severity.
    pub fn issues(&self, severity: Severity) -> usize {
        match severity {
            Severity::Critical => self.critical_issues,
            Severity::Warning => self.warning_issues,
            Severity::Info => self.info_issues,
        }
    }
}

fn ratio(part: usize, whole: usize) -> f64 {
    if whole == 0 {
        0.0
    } else {
        part as f64 / whole as f64
    }
}
