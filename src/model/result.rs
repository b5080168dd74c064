//! Merged per-document analysis output.

use serde::Serialize;

use super::{HeadingNode, HeadingRecord, Severity, ValidationResult};

/// Heading counts per level plus outline depth.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct HeadingMetrics {
    pub h1: usize,
    pub h2: usize,
    pub h3: usize,
    pub h4: usize,
    pub h5: usize,
    pub h6: usize,
    pub total_headings: usize,
    pub max_depth: usize,
}

impl HeadingMetrics {
    /// Count for a level in 1..=6; any other level yields 0.
    pub fn count(&self, level: u8) -> usize {
        match level {
            1 => self.h1,
            2 => self.h2,
            3 => self.h3,
            4 => self.h4,
            5 => self.h5,
            6 => self.h6,
            _ => 0,
        }
    }
}

/// Everything produced for one document. Never mutated after construction.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnalysisResult {
    pub headings: Vec<HeadingRecord>,
    pub hierarchy: HeadingNode,
    pub validation: ValidationResult,
    pub metrics: HeadingMetrics,
}

impl AnalysisResult {
    pub fn h1_count(&self) -> usize {
        self.metrics.h1
    }

    /// Whether any critical or warning issue was found.
    ///
    /// Info-level advisories do not count; nearly every real page carries some.
    pub fn has_actionable_issues(&self) -> bool {
        !self.validation.errors.is_empty() || !self.validation.warnings.is_empty()
    }

    pub fn issue_count(&self, severity: Severity) -> usize {
        match severity {
            Severity::Critical => self.validation.errors.len(),
            Severity::Warning => self.validation.warnings.len(),
            Severity::Info => self.validation.info.len(),
        }
    }
}
