//! Issue vocabulary and validation results.

use serde::{Deserialize, Serialize};
use strum_macros::{EnumIter, IntoStaticStr};

/// Issue severity.
///
/// - `Critical`: must fix
/// - `Warning`: should fix
/// - `Info`: advisory
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, EnumIter, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Critical,
    Warning,
    Info,
}

impl Severity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Critical => "critical",
            Severity::Warning => "warning",
            Severity::Info => "info",
        }
    }
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Fixed vocabulary of issue codes.
///
/// Codes serialize as snake_case strings (e.g. `heading_skipped`), which is the
/// form downstream exporters key on.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    EnumIter,
    IntoStaticStr,
    Serialize,
    Deserialize,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum IssueType {
    // Node-local issues recorded by the hierarchy builder
    SkippedLevel,
    // Structural
    NoHeadings,
    MissingH1Start,
    MissingH1,
    MultipleH1,
    H1Length,
    EmptyHeading,
    HeadingSkipped,
    HeadingTooShort,
    HeadingTooLong,
    GenericHeading,
    KeywordStuffing,
    AllCaps,
    ExcessiveDepth,
    // Accessibility
    AriaHidden,
    CssHidden,
    ScreenReaderOnly,
    AriaLabelOverride,
    AriaLabelOnly,
    AriaLabelledby,
    AriaLevelMismatch,
    HeadingRoleOverride,
    AllHeadingsHidden,
    MostHeadingsHidden,
    // Semantic landmarks
    InappropriateNesting,
    MissingSemanticContext,
    H1WrongLandmark,
    DivInsteadOfSection,
    NoLandmarkStructure,
    MultipleH1Sectioned,
    MissingMainLandmark,
    MissingNavLandmark,
    // Heuristic SEO/readability
    LowReadability,
    QuestionFormat,
    NoPowerWordsH1,
    NumberedHeading,
    TooManyStopWords,
    NegativeSentimentH1,
    SimilarHeadings,
}

impl IssueType {
    /// The snake_case issue code.
    pub fn as_str(&self) -> &'static str {
        self.into()
    }
}

impl std::fmt::Display for IssueType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single finding. Issues are plain values with no identity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Issue {
    #[serde(rename = "type")]
    pub issue_type: IssueType,
    pub severity: Severity,
    pub message: String,
    pub recommendation: Option<String>,
    /// Document position of the offending heading, when the issue concerns one
    pub position: Option<usize>,
}

impl Issue {
    pub fn new(issue_type: IssueType, severity: Severity, message: impl Into<String>) -> Self {
        Self {
            issue_type,
            severity,
            message: message.into(),
            recommendation: None,
            position: None,
        }
    }

    pub fn critical(issue_type: IssueType, message: impl Into<String>) -> Self {
        Self::new(issue_type, Severity::Critical, message)
    }

    pub fn warning(issue_type: IssueType, message: impl Into<String>) -> Self {
        Self::new(issue_type, Severity::Warning, message)
    }

    pub fn info(issue_type: IssueType, message: impl Into<String>) -> Self {
        Self::new(issue_type, Severity::Info, message)
    }

    pub fn with_recommendation(mut self, recommendation: impl Into<String>) -> Self {
        self.recommendation = Some(recommendation.into());
        self
    }

    /// Attaches the document position of the heading the issue concerns.
    pub fn at(mut self, position: usize) -> Self {
        self.position = Some(position);
        self
    }
}

/// Issues partitioned by severity.
///
/// Each list keeps insertion order: validator-pass order first, then document
/// order within a pass. Tests rely on this being deterministic.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationResult {
    pub errors: Vec<Issue>,
    pub warnings: Vec<Issue>,
    pub info: Vec<Issue>,
}

impl ValidationResult {
    pub fn new() -> Self {
        Self::default()
    }

    /// Routes an issue to the list matching its severity.
    pub fn push(&mut self, issue: Issue) {
        match issue.severity {
            Severity::Critical => self.errors.push(issue),
            Severity::Warning => self.warnings.push(issue),
            Severity::Info => self.info.push(issue),
        }
    }

    /// Appends another (partial) result, preserving order.
    pub fn merge(&mut self, other: ValidationResult) {
        self.errors.extend(other.errors);
        self.warnings.extend(other.warnings);
        self.info.extend(other.info);
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty() && self.warnings.is_empty() && self.info.is_empty()
    }

    pub fn total(&self) -> usize {
        self.errors.len() + self.warnings.len() + self.info.len()
    }

    /// Iterates over all issues: errors, then warnings, then info.
    pub fn iter(&self) -> impl Iterator<Item = &Issue> {
        self.errors
            .iter()
            .chain(self.warnings.iter())
            .chain(self.info.iter())
    }

    /// Number of issues with the given code, across all severities.
    pub fn count(&self, issue_type: IssueType) -> usize {
        self.iter().filter(|i| i.issue_type == issue_type).count()
    }

    pub fn contains(&self, issue_type: IssueType) -> bool {
        self.iter().any(|i| i.issue_type == issue_type)
    }

    /// Issue codes in iteration order, handy for assertions and log lines.
    pub fn codes(&self) -> Vec<IssueType> {
        self.iter().map(|i| i.issue_type).collect()
    }
}
