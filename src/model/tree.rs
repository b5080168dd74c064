//! Outline tree nodes.

use serde::Serialize;

use super::Issue;

/// A node of the heading outline.
///
/// The synthetic root has `level == 0` and is never itself a heading. Every
/// child's level is strictly greater than its parent's level, and children are
/// kept in document order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HeadingNode {
    pub text: String,
    pub level: u8,
    /// Slug derived from the text, unique within the tree
    pub id: String,
    pub raw_markup: String,
    /// Document position of the heading; `None` for the root
    pub position: Option<usize>,
    pub children: Vec<HeadingNode>,
    /// Issues discovered while building the tree
    pub issues: Vec<Issue>,
}

impl HeadingNode {
    /// Creates the synthetic root node.
    pub fn root() -> Self {
        Self {
            text: String::new(),
            level: 0,
            id: "root".to_string(),
            raw_markup: String::new(),
            position: None,
            children: Vec::new(),
            issues: Vec::new(),
        }
    }

    pub fn is_root(&self) -> bool {
        self.level == 0
    }

    /// Pre-order list of all non-root nodes, children in insertion order.
    ///
    /// For a tree built from a heading list this reproduces the input order.
    pub fn flatten(&self) -> Vec<&HeadingNode> {
        let mut out = Vec::new();
        collect_preorder(self, &mut out);
        out
    }

    /// Total number of non-root nodes.
    pub fn len(&self) -> usize {
        self.children.iter().map(|c| 1 + c.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.children.is_empty()
    }

    /// All node-local issues in pre-order.
    pub fn all_issues(&self) -> Vec<&Issue> {
        self.flatten()
            .into_iter()
            .flat_map(|node| node.issues.iter())
            .collect()
    }
}

fn collect_preorder<'a>(node: &'a HeadingNode, out: &mut Vec<&'a HeadingNode>) {
    for child in &node.children {
        out.push(child);
        collect_preorder(child, out);
    }
}
