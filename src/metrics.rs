//! Heading counts and outline depth.

use crate::model::{HeadingMetrics, HeadingNode, HeadingRecord};

/// Buckets headings by level. Index 0 is H1, index 5 is H6.
pub fn count_by_level(headings: &[HeadingRecord]) -> [usize; 6] {
    headings.iter().fold([0; 6], |mut counts, heading| {
        if (1..=6).contains(&heading.level) {
            counts[usize::from(heading.level) - 1] += 1;
        }
        counts
    })
}

/// Longest chain of edges below the root's children.
///
/// A leaf has depth 0 and so does a tree holding only the root, which makes
/// `[H1, H2, H3, H2]` come out as 2.
pub fn max_depth(root: &HeadingNode) -> usize {
    root.children.iter().map(height).max().unwrap_or(0)
}

fn height(node: &HeadingNode) -> usize {
    node.children
        .iter()
        .map(|child| height(child) + 1)
        .max()
        .unwrap_or(0)
}

pub fn compute_metrics(headings: &[HeadingRecord], root: &HeadingNode) -> HeadingMetrics {
    let [h1, h2, h3, h4, h5, h6] = count_by_level(headings);
    HeadingMetrics {
        h1,
        h2,
        h3,
        h4,
        h5,
        h6,
        total_headings: headings.len(),
        max_depth: max_depth(root),
    }
}
