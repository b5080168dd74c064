//! Rule-validation passes over a flat heading list.
//!
//! Four independent passes run over the same input:
//! - **Structural**: sequencing and content rules (H1 presence, skips, length, generic text)
//! - **Accessibility**: ARIA and visibility metadata
//! - **Semantic landmarks**: containment and landmark metadata
//! - **Heuristics**: text-only SEO/readability analytics
//!
//! Every pass is a total function: any well-formed heading list produces a
//! result, never an error. Issues are data.

mod accessibility;
mod heuristics;
mod semantics;
mod structure;

// Re-export public API
pub use accessibility::validate_accessibility;
pub use heuristics::validate_heuristics;
pub use semantics::validate_semantics;
pub use structure::validate_structure;

use crate::model::{HeadingRecord, ValidationResult};

/// Runs all passes and merges them in pass order.
pub fn validate_all(headings: &[HeadingRecord]) -> ValidationResult {
    let mut result = validate_structure(headings);
    result.merge(validate_accessibility(headings));
    result.merge(validate_semantics(headings));
    result.merge(validate_heuristics(headings));
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::IssueType;

    #[test]
    fn test_validate_all_merges_in_pass_order() {
        // Structural warning (generic) must precede the heuristic warning (similar).
        let headings = HeadingRecord::outline(&[
            (1, "The Ultimate Guide to Heading Audits"),
            (2, "Overview"),
            (2, "Overviews"),
        ]);
        let result = validate_all(&headings);
        let warnings: Vec<IssueType> = result.warnings.iter().map(|i| i.issue_type).collect();
        let generic = warnings
            .iter()
            .position(|t| *t == IssueType::GenericHeading)
            .expect("generic heading warning");
        let similar = warnings
            .iter()
            .position(|t| *t == IssueType::SimilarHeadings)
            .expect("similar headings warning");
        assert!(generic < similar);
    }

    #[test]
    fn test_validate_all_is_deterministic() {
        let headings = HeadingRecord::outline(&[
            (2, "Pricing pricing pricing plans"),
            (1, ""),
            (4, "WHY CHOOSE US?"),
            (2, "Pricing plan"),
        ]);
        let first = serde_json::to_string(&validate_all(&headings)).unwrap();
        let second = serde_json::to_string(&validate_all(&headings)).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_empty_input_is_safe_for_every_pass() {
        let result = validate_all(&[]);
        assert_eq!(result.codes(), vec![IssueType::NoHeadings]);
    }
}
