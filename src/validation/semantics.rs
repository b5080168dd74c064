//! Semantic-landmark validation over containment metadata.
//!
//! The extractor (or any other producer of `HeadingRecord`s) supplies the
//! landmark and container facts; no HTML outline algorithm runs here.

use std::collections::HashSet;

use crate::config::{MAIN_LANDMARK_MIN_HEADINGS, NAV_LANDMARK_MIN_HEADINGS};
use crate::model::{HeadingRecord, Issue, IssueType, LandmarkType, ValidationResult};

/// Inline or interactive elements that must not wrap a heading.
const INLINE_PARENTS: &[&str] = &[
    "a", "b", "button", "em", "i", "label", "small", "span", "strong",
];

/// Sectioning elements that scope an H1 of their own.
const SECTIONING_TAGS: &[&str] = &["article", "section"];

/// Flags headings outside the containers a well-structured page would use.
pub fn validate_semantics(headings: &[HeadingRecord]) -> ValidationResult {
    let mut result = ValidationResult::new();

    for heading in headings {
        let semantics = &heading.semantics;
        let parent = semantics.parent_tag.as_deref().map(str::to_ascii_lowercase);

        if let Some(parent) = parent.as_deref() {
            if INLINE_PARENTS.contains(&parent) {
                result.push(
                    Issue::critical(
                        IssueType::InappropriateNesting,
                        format!(
                            "\"{}\" (H{}) is nested inside an inline <{}> element",
                            heading.text, heading.level, parent
                        ),
                    )
                    .with_recommendation("Move the heading out of the inline element")
                    .at(heading.position),
                );
            }
        }

        if heading.level > 1
            && semantics.parent_semantic_tag.is_none()
            && !semantics.is_in_landmark
        {
            result.push(
                Issue::info(
                    IssueType::MissingSemanticContext,
                    format!(
                        "\"{}\" (H{}) is not inside any section or landmark",
                        heading.text, heading.level
                    ),
                )
                .with_recommendation("Wrap related content in <section>, <article> or <main>")
                .at(heading.position),
            );
        }

        if heading.level == 1 && semantics.is_in_landmark {
            let landmark = semantics.landmark_type;
            if !matches!(landmark, Some(LandmarkType::Main) | Some(LandmarkType::Banner)) {
                let name = landmark.map_or("unknown", |l| l.as_str());
                result.push(
                    Issue::warning(
                        IssueType::H1WrongLandmark,
                        format!(
                            "H1 \"{}\" sits in the {} landmark instead of main or the page header",
                            heading.text, name
                        ),
                    )
                    .with_recommendation("Place the page H1 in <main> or the page <header>")
                    .at(heading.position),
                );
            }
        }

        if heading.level > 1
            && parent.as_deref() == Some("div")
            && semantics.parent_semantic_tag.is_none()
        {
            result.push(
                Issue::info(
                    IssueType::DivInsteadOfSection,
                    format!(
                        "\"{}\" (H{}) is grouped by a generic <div>",
                        heading.text, heading.level
                    ),
                )
                .with_recommendation("Use <section> for thematic groups that carry a heading")
                .at(heading.position),
            );
        }
    }

    if headings.is_empty() {
        return result;
    }

    if !headings.iter().any(|h| h.semantics.is_in_landmark) {
        result.push(
            Issue::warning(
                IssueType::NoLandmarkStructure,
                "No heading is inside a landmark region",
            )
            .with_recommendation("Use <header>, <nav>, <main> and <footer> to structure the page"),
        );
    }

    check_sectioned_h1s(headings, &mut result);

    if headings.len() > MAIN_LANDMARK_MIN_HEADINGS && !has_landmark(headings, LandmarkType::Main) {
        result.push(
            Issue::warning(
                IssueType::MissingMainLandmark,
                format!(
                    "{} headings but none inside a main landmark",
                    headings.len()
                ),
            )
            .with_recommendation("Wrap the primary content in <main>"),
        );
    }

    if headings.len() > NAV_LANDMARK_MIN_HEADINGS
        && !has_landmark(headings, LandmarkType::Navigation)
    {
        result.push(
            Issue::info(
                IssueType::MissingNavLandmark,
                format!(
                    "{} headings but none inside a navigation landmark",
                    headings.len()
                ),
            )
            .with_recommendation("Mark site navigation with <nav>"),
        );
    }

    result
}

fn has_landmark(headings: &[HeadingRecord], landmark: LandmarkType) -> bool {
    headings
        .iter()
        .any(|h| h.semantics.landmark_type == Some(landmark))
}

/// Multiple H1s are valid HTML5 when each one opens its own sectioning element.
fn check_sectioned_h1s(headings: &[HeadingRecord], result: &mut ValidationResult) {
    let h1s: Vec<&HeadingRecord> = headings.iter().filter(|h| h.level == 1).collect();
    if h1s.len() < 2 {
        return;
    }

    let mut containers = HashSet::new();
    let properly_scoped = h1s.iter().all(|h| {
        let sectioned = h
            .semantics
            .parent_semantic_tag
            .as_deref()
            .is_some_and(|tag| SECTIONING_TAGS.contains(&tag.to_ascii_lowercase().as_str()));
        match h.semantics.container_id.as_deref() {
            Some(id) if sectioned => containers.insert(id),
            _ => false,
        }
    });

    if properly_scoped {
        result.push(Issue::info(
            IssueType::MultipleH1Sectioned,
            format!(
                "{} H1s, each scoped to its own section or article",
                h1s.len()
            ),
        ));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn landmarked(level: u8, text: &str, position: usize) -> HeadingRecord {
        HeadingRecord::new(level, text)
            .with_position(position)
            .with_parent("section")
            .within_section("section", &format!("s{position}"))
            .in_landmark(LandmarkType::Main)
    }

    #[test]
    fn test_well_structured_page_is_clean() {
        let headings = vec![
            landmarked(1, "Title", 0),
            landmarked(2, "Part one", 1),
            landmarked(2, "Part two", 2),
        ];
        assert!(validate_semantics(&headings).is_empty());
    }

    #[test]
    fn test_inappropriate_nesting() {
        let headings = vec![
            landmarked(1, "Title", 0),
            landmarked(2, "Clickable", 1).with_parent("A"),
        ];
        let result = validate_semantics(&headings);
        assert_eq!(result.errors.len(), 1);
        assert_eq!(result.errors[0].issue_type, IssueType::InappropriateNesting);
        assert!(result.errors[0].message.contains("<a>"));
    }

    #[test]
    fn test_missing_context_and_div_grouping() {
        let headings = vec![
            landmarked(1, "Title", 0),
            HeadingRecord::new(2, "Loose").with_position(1).with_parent("div"),
        ];
        let result = validate_semantics(&headings);
        assert_eq!(
            result.info.iter().map(|i| i.issue_type).collect::<Vec<_>>(),
            vec![IssueType::MissingSemanticContext, IssueType::DivInsteadOfSection]
        );
        assert!(result.info.iter().all(|i| i.position == Some(1)));
    }

    #[test]
    fn test_top_level_heading_needs_no_context() {
        let headings = vec![HeadingRecord::new(1, "Title").with_parent("div")];
        let result = validate_semantics(&headings);
        assert!(!result.contains(IssueType::MissingSemanticContext));
        assert!(!result.contains(IssueType::DivInsteadOfSection));
    }

    #[test]
    fn test_h1_wrong_landmark() {
        let headings = vec![
            HeadingRecord::new(1, "Sidebar title").in_landmark(LandmarkType::Complementary),
            HeadingRecord::new(1, "Header title")
                .with_position(1)
                .in_landmark(LandmarkType::Banner),
        ];
        let result = validate_semantics(&headings);
        assert_eq!(result.count(IssueType::H1WrongLandmark), 1);
        let issue = result
            .warnings
            .iter()
            .find(|i| i.issue_type == IssueType::H1WrongLandmark)
            .expect("wrong landmark warning");
        assert!(issue.message.contains("complementary"));
        assert_eq!(issue.position, Some(0));
    }

    #[test]
    fn test_no_landmark_structure() {
        let headings = HeadingRecord::outline(&[(1, "Title")]);
        let result = validate_semantics(&headings);
        assert_eq!(result.codes(), vec![IssueType::NoLandmarkStructure]);
    }

    #[test]
    fn test_sectioned_h1s_are_info() {
        let headings = vec![landmarked(1, "First story", 0), landmarked(1, "Second story", 1)];
        let result = validate_semantics(&headings);
        assert_eq!(result.codes(), vec![IssueType::MultipleH1Sectioned]);
    }

    #[test]
    fn test_h1s_sharing_a_container_are_not_sectioned() {
        let headings = vec![
            landmarked(1, "First story", 0).within_section("article", "shared"),
            landmarked(1, "Second story", 1).within_section("article", "shared"),
        ];
        let result = validate_semantics(&headings);
        assert!(!result.contains(IssueType::MultipleH1Sectioned));
    }

    #[test]
    fn test_missing_main_and_nav_landmarks() {
        let headings: Vec<HeadingRecord> = (0..6)
            .map(|i| {
                HeadingRecord::new(if i == 0 { 1 } else { 2 }, "Part")
                    .with_position(i)
                    .within_section("section", &format!("s{i}"))
                    .in_landmark(LandmarkType::Region)
            })
            .collect();
        let result = validate_semantics(&headings);
        assert!(result.contains(IssueType::MissingMainLandmark));
        assert!(result.contains(IssueType::MissingNavLandmark));

        let result = validate_semantics(&headings[..4]);
        assert!(result.contains(IssueType::MissingMainLandmark));
        assert!(!result.contains(IssueType::MissingNavLandmark));

        let result = validate_semantics(&headings[..3]);
        assert!(!result.contains(IssueType::MissingMainLandmark));
    }
}
