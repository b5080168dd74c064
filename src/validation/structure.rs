//! Structural validation: sequencing and content rules.

use std::collections::BTreeMap;

use crate::config::{
    DEEP_HEADING_LIMIT, H1_MAX_LENGTH, H1_MIN_LENGTH, MAX_HEADING_LENGTH, MIN_HEADING_LENGTH,
    STUFFING_MIN_WORD_LENGTH, STUFFING_REPEAT_LIMIT,
};
use crate::model::{HeadingRecord, Issue, IssueType, ValidationResult};
use crate::text::{is_all_caps, words};

/// Headings that say nothing about the section they introduce.
const GENERIC_HEADINGS: &[&str] = &[
    "welcome",
    "about",
    "about us",
    "overview",
    "introduction",
    "home",
    "untitled",
    "more",
    "more info",
    "click here",
    "read more",
    "learn more",
    "section",
    "content",
    "heading",
    "title",
    "information",
    "details",
    "miscellaneous",
    "other",
    "services",
    "products",
];

/// Validates heading sequencing and content in one left-to-right pass.
///
/// Empty input yields a single `no_headings` error and nothing else. For an
/// empty heading only the H1 bookkeeping (count, `multiple_h1`, `h1_length`)
/// runs before `empty_heading` is reported; the level still becomes the
/// reference for the next skip check.
pub fn validate_structure(headings: &[HeadingRecord]) -> ValidationResult {
    let mut result = ValidationResult::new();

    let Some(first) = headings.first() else {
        result.push(
            Issue::critical(IssueType::NoHeadings, "No headings found on the page")
                .with_recommendation("Add an H1 describing the page and H2s for its main sections"),
        );
        return result;
    };

    if first.level != 1 {
        result.push(
            Issue::critical(
                IssueType::MissingH1Start,
                format!(
                    "The first heading is an H{} (\"{}\"), not an H1",
                    first.level, first.text
                ),
            )
            .with_recommendation("Start the outline with the page's H1")
            .at(first.position),
        );
    }

    let mut previous_level: u8 = 0;
    let mut h1_count = 0usize;

    for heading in headings {
        let len = heading.text_len();
        if heading.level == 1 {
            h1_count += 1;
            if h1_count > 1 {
                result.push(
                    Issue::warning(
                        IssueType::MultipleH1,
                        format!(
                            "Additional H1 #{} \"{}\" at position {}",
                            h1_count, heading.text, heading.position
                        ),
                    )
                    .with_recommendation("Keep a single H1 and demote the others to H2")
                    .at(heading.position),
                );
            }
            check_h1_length(heading, len, &mut result);
        }

        if len == 0 {
            result.push(
                Issue::critical(
                    IssueType::EmptyHeading,
                    format!(
                        "H{} at position {} has no text",
                        heading.level, heading.position
                    ),
                )
                .with_recommendation("Give the heading descriptive text or remove it")
                .at(heading.position),
            );
            previous_level = heading.level;
            continue;
        }

        if previous_level > 0 && heading.level > previous_level + 1 {
            let missing: Vec<String> = ((previous_level + 1)..heading.level)
                .map(|level| format!("H{level}"))
                .collect();
            result.push(
                Issue::critical(
                    IssueType::HeadingSkipped,
                    format!(
                        "H{} \"{}\" follows an H{}; missing {}",
                        heading.level,
                        heading.text,
                        previous_level,
                        missing.join(", ")
                    ),
                )
                .with_recommendation(format!(
                    "Use H{} or insert the missing levels",
                    previous_level + 1
                ))
                .at(heading.position),
            );
        }

        check_length(heading, len, &mut result);
        check_generic(heading, &mut result);
        check_stuffing(heading, &mut result);

        if len > 3 && is_all_caps(&heading.text) {
            result.push(
                Issue::info(
                    IssueType::AllCaps,
                    format!("\"{}\" is written in all caps", heading.text),
                )
                .with_recommendation("Use sentence or title case and apply uppercase with CSS")
                .at(heading.position),
            );
        }

        previous_level = heading.level;
    }

    if h1_count == 0 {
        result.push(
            Issue::critical(IssueType::MissingH1, "The page has no H1 heading")
                .with_recommendation("Add exactly one H1 that states the page topic"),
        );
    }

    let deep = headings.iter().filter(|h| h.level >= 5).count();
    if deep > DEEP_HEADING_LIMIT {
        result.push(
            Issue::warning(
                IssueType::ExcessiveDepth,
                format!("{deep} headings at level H5 or deeper"),
            )
            .with_recommendation("Flatten the outline; deep levels are rarely navigable"),
        );
    }

    result
}

fn check_h1_length(heading: &HeadingRecord, len: usize, result: &mut ValidationResult) {
    if len < H1_MIN_LENGTH {
        result.push(
            Issue::warning(
                IssueType::H1Length,
                format!(
                    "H1 \"{}\" is too short ({} characters, recommended {}-{})",
                    heading.text, len, H1_MIN_LENGTH, H1_MAX_LENGTH
                ),
            )
            .with_recommendation("Describe the page topic in more detail")
            .at(heading.position),
        );
    } else if len > H1_MAX_LENGTH {
        result.push(
            Issue::warning(
                IssueType::H1Length,
                format!(
                    "H1 \"{}\" is too long ({} characters, recommended {}-{})",
                    heading.text, len, H1_MIN_LENGTH, H1_MAX_LENGTH
                ),
            )
            .with_recommendation("Shorten the H1 so it is not truncated in search results")
            .at(heading.position),
        );
    }
}

fn check_length(heading: &HeadingRecord, len: usize, result: &mut ValidationResult) {
    if len < MIN_HEADING_LENGTH {
        result.push(
            Issue::warning(
                IssueType::HeadingTooShort,
                format!("\"{}\" is only {} characters long", heading.text, len),
            )
            .at(heading.position),
        );
    } else if len > MAX_HEADING_LENGTH {
        result.push(
            Issue::warning(
                IssueType::HeadingTooLong,
                format!(
                    "\"{}\" is {} characters long (max {})",
                    heading.text, len, MAX_HEADING_LENGTH
                ),
            )
            .at(heading.position),
        );
    }
}

fn check_generic(heading: &HeadingRecord, result: &mut ValidationResult) {
    let normalized = heading.text.trim().to_lowercase();
    if GENERIC_HEADINGS.contains(&normalized.as_str()) {
        result.push(
            Issue::warning(
                IssueType::GenericHeading,
                format!("\"{}\" is a generic heading", heading.text),
            )
            .with_recommendation("Say what the section is about, including relevant keywords")
            .at(heading.position),
        );
    }
}

fn check_stuffing(heading: &HeadingRecord, result: &mut ValidationResult) {
    let words = words(&heading.text);
    let mut counts: BTreeMap<&str, usize> = BTreeMap::new();
    for word in &words {
        if word.chars().count() > STUFFING_MIN_WORD_LENGTH {
            *counts.entry(word.as_str()).or_default() += 1;
        }
    }

    // Report in first-appearance order so output does not depend on map order.
    let mut stuffed: Vec<&str> = Vec::new();
    for word in &words {
        let word = word.as_str();
        if counts.get(word).is_some_and(|&n| n > STUFFING_REPEAT_LIMIT) && !stuffed.contains(&word)
        {
            stuffed.push(word);
        }
    }

    if !stuffed.is_empty() {
        result.push(
            Issue::warning(
                IssueType::KeywordStuffing,
                format!(
                    "\"{}\" repeats {} more than {} times",
                    heading.text,
                    stuffed.join(", "),
                    STUFFING_REPEAT_LIMIT
                ),
            )
            .with_recommendation("Use each keyword once and write for readers")
            .at(heading.position),
        );
    }
}
