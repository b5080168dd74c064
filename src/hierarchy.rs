//! Outline construction from a flat heading stream.
//!
//! The builder walks the headings once, keeping an explicit stack of open
//! ancestors that starts with the synthetic root (level 0). Each heading pops
//! every open node whose level is greater than or equal to its own (the root is
//! never popped), becomes the last child of whatever is left on top, and is
//! then pushed itself. A node is attached to its parent only when it is popped,
//! which is always before its next sibling arrives, so child order equals
//! document order.
//!
//! While attaching, node-local issues are recorded: skipped levels relative to
//! the parent, empty text, and text outside the length limits. Content checks
//! (generic text, stuffing, caps) belong to the structural validator.

use std::collections::HashSet;

use crate::config::{MAX_HEADING_LENGTH, MIN_HEADING_LENGTH};
use crate::model::{HeadingNode, HeadingRecord, Issue, IssueType};
use crate::text::slugify;

/// Builds the outline tree for an ordered list of headings.
///
/// Empty input yields a root without children; reporting "no headings" is the
/// structural validator's job.
pub fn build_hierarchy(headings: &[HeadingRecord]) -> HeadingNode {
    let mut ids = SlugRegistry::default();
    let mut stack: Vec<HeadingNode> = vec![HeadingNode::root()];

    for heading in headings {
        while stack.len() > 1 && stack.last().is_some_and(|top| top.level >= heading.level) {
            close_top(&mut stack);
        }

        let parent_level = stack.last().map_or(0, |parent| parent.level);
        let node = HeadingNode {
            text: heading.text.clone(),
            level: heading.level,
            id: ids.assign(heading),
            raw_markup: heading.raw_markup.clone(),
            position: Some(heading.position),
            children: Vec::new(),
            issues: node_issues(heading, parent_level),
        };
        stack.push(node);
    }

    while stack.len() > 1 {
        close_top(&mut stack);
    }
    stack.pop().unwrap_or_else(HeadingNode::root)
}

/// Pops the top of the stack and appends it to the new top's children.
fn close_top(stack: &mut Vec<HeadingNode>) {
    if let Some(node) = stack.pop() {
        if let Some(parent) = stack.last_mut() {
            parent.children.push(node);
        }
    }
}

fn node_issues(heading: &HeadingRecord, parent_level: u8) -> Vec<Issue> {
    let mut issues = Vec::new();

    if parent_level > 0 && heading.level > parent_level + 1 {
        let skipped: Vec<String> = ((parent_level + 1)..heading.level)
            .map(|level| format!("H{level}"))
            .collect();
        issues.push(
            Issue::critical(
                IssueType::SkippedLevel,
                format!(
                    "\"{}\" (H{}) is nested directly under an H{}; skipped {}",
                    heading.text,
                    heading.level,
                    parent_level,
                    skipped.join(", ")
                ),
            )
            .with_recommendation(format!(
                "Use H{} here or add the missing intermediate headings",
                parent_level + 1
            ))
            .at(heading.position),
        );
    }

    let len = heading.text_len();
    if len == 0 {
        issues.push(
            Issue::critical(
                IssueType::EmptyHeading,
                format!("H{} at position {} has no text", heading.level, heading.position),
            )
            .with_recommendation("Give the heading descriptive text or remove it")
            .at(heading.position),
        );
    } else if len < MIN_HEADING_LENGTH {
        issues.push(
            Issue::warning(
                IssueType::HeadingTooShort,
                format!("\"{}\" is only {} characters long", heading.text, len),
            )
            .at(heading.position),
        );
    } else if len > MAX_HEADING_LENGTH {
        issues.push(
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

    issues
}

/// Hands out slugs that are unique within one tree (`intro`, `intro-1`, ...).
#[derive(Default)]
struct SlugRegistry {
    used: HashSet<String>,
}

impl SlugRegistry {
    fn assign(&mut self, heading: &HeadingRecord) -> String {
        let base = match slugify(&heading.text) {
            slug if slug.is_empty() => format!("heading-{}", heading.position),
            slug => slug,
        };
        let mut candidate = base.clone();
        let mut suffix = 1;
        while !self.used.insert(candidate.clone()) {
            candidate = format!("{base}-{suffix}");
            suffix += 1;
        }
        candidate
    }
}
