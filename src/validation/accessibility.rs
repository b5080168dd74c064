//! Accessibility validation over ARIA and visibility metadata.

use crate::model::{HeadingRecord, HiddenMethod, Issue, IssueType, ValidationResult};

/// Flags hidden, relabelled and re-roled headings.
///
/// Headings hidden with a screen-reader-only class are reported as info only
/// and do not count towards the "all/most headings hidden" rollups.
pub fn validate_accessibility(headings: &[HeadingRecord]) -> ValidationResult {
    let mut result = ValidationResult::new();

    for heading in headings {
        check_visibility(heading, &mut result);
        check_labels(heading, &mut result);

        let a11y = &heading.accessibility;
        if let Some(aria_level) = a11y.aria_level {
            if aria_level != heading.level {
                result.push(
                    Issue::critical(
                        IssueType::AriaLevelMismatch,
                        format!(
                            "\"{}\" is an H{} but aria-level announces level {}",
                            heading.text, heading.level, aria_level
                        ),
                    )
                    .with_recommendation("Remove aria-level or change the tag to match it")
                    .at(heading.position),
                );
            }
        }

        if let Some(role) = a11y.role.as_deref() {
            if !role.trim().eq_ignore_ascii_case("heading") {
                result.push(
                    Issue::critical(
                        IssueType::HeadingRoleOverride,
                        format!(
                            "\"{}\" has role=\"{}\", which removes its heading semantics",
                            heading.text, role
                        ),
                    )
                    .with_recommendation("Remove the role attribute from the heading")
                    .at(heading.position),
                );
            }
        }
    }

    let hidden = headings
        .iter()
        .filter(|h| h.is_effectively_hidden())
        .count();
    if !headings.is_empty() && hidden == headings.len() {
        result.push(
            Issue::critical(
                IssueType::AllHeadingsHidden,
                format!("All {hidden} headings are hidden from users"),
            )
            .with_recommendation("Expose at least the main headings to assistive technology"),
        );
    } else if hidden * 2 > headings.len() {
        result.push(
            Issue::warning(
                IssueType::MostHeadingsHidden,
                format!("{} of {} headings are hidden", hidden, headings.len()),
            )
            .with_recommendation("Check that hidden headings are intentional"),
        );
    }

    result
}

fn check_visibility(heading: &HeadingRecord, result: &mut ValidationResult) {
    let a11y = &heading.accessibility;
    if a11y.aria_hidden || a11y.hidden_method == Some(HiddenMethod::AriaHidden) {
        result.push(
            Issue::warning(
                IssueType::AriaHidden,
                format!(
                    "\"{}\" is hidden from assistive technology with aria-hidden",
                    heading.text
                ),
            )
            .with_recommendation("Remove aria-hidden so screen reader users can navigate by it")
            .at(heading.position),
        );
        return;
    }

    if !a11y.is_hidden {
        return;
    }
    match a11y.hidden_method {
        Some(HiddenMethod::ScreenReaderOnly) => {
            result.push(
                Issue::info(
                    IssueType::ScreenReaderOnly,
                    format!(
                        "\"{}\" is visually hidden but available to screen readers",
                        heading.text
                    ),
                )
                .at(heading.position),
            );
        }
        method => {
            let how = method.map_or("CSS", |m| m.as_str());
            result.push(
                Issue::warning(
                    IssueType::CssHidden,
                    format!("\"{}\" is hidden with {}", heading.text, how),
                )
                .with_recommendation(
                    "Hidden headings are skipped by everyone; remove or reveal the heading",
                )
                .at(heading.position),
            );
        }
    }
}

fn check_labels(heading: &HeadingRecord, result: &mut ValidationResult) {
    let a11y = &heading.accessibility;
    if let Some(label) = a11y.aria_label.as_deref() {
        if heading.text.is_empty() {
            result.push(
                Issue::info(
                    IssueType::AriaLabelOnly,
                    format!(
                        "H{} at position {} is only named by aria-label \"{}\"",
                        heading.level, heading.position, label
                    ),
                )
                .at(heading.position),
            );
        } else {
            result.push(
                Issue::warning(
                    IssueType::AriaLabelOverride,
                    format!(
                        "aria-label \"{}\" replaces the visible text \"{}\"",
                        label, heading.text
                    ),
                )
                .with_recommendation("Make the spoken name match the visible heading text")
                .at(heading.position),
            );
        }
    }

    if let Some(labelledby) = a11y.aria_labelledby.as_deref() {
        result.push(
            Issue::info(
                IssueType::AriaLabelledby,
                format!(
                    "\"{}\" takes its accessible name from #{}",
                    heading.text, labelledby
                ),
            )
            .at(heading.position),
        );
    }
}
