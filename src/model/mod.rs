//! Core data model.
//!
//! This module defines the data contract shared by every stage of the audit:
//! - `HeadingRecord`: one extracted H1–H6 element plus accessibility/semantic metadata
//! - `HeadingNode`: a node of the built outline tree
//! - `Issue` / `ValidationResult`: classified findings
//! - `AnalysisResult` / `HeadingMetrics`: the merged output of one document
//!
//! All types derive `serde::Serialize` so downstream exporters can consume them
//! without any additional API surface.

mod issue;
mod record;
mod result;
mod tree;

// Re-export public API
pub use issue::{Issue, IssueType, Severity, ValidationResult};
pub use record::{AccessibilityInfo, HeadingRecord, HiddenMethod, LandmarkType, SemanticInfo};
pub use result::{AnalysisResult, HeadingMetrics};
pub use tree::HeadingNode;
