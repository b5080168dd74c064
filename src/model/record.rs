//! Heading records produced by the extractor.

use serde::{Deserialize, Serialize};

/// How a heading is hidden from users or assistive technology.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HiddenMethod {
    /// `aria-hidden="true"` on the heading or an ancestor
    AriaHidden,
    /// Inline `display: none`
    DisplayNone,
    /// Inline `visibility: hidden`
    VisibilityHidden,
    /// The HTML `hidden` attribute
    HiddenAttribute,
    /// Off-screen "screen-reader-only" class convention (intentional)
    ScreenReaderOnly,
}

impl HiddenMethod {
    /// Whether this method removes the heading from the accessibility tree.
    ///
    /// Screen-reader-only headings stay announced, so they are not hidden in
    /// the sense the accessibility rollups care about.
    pub fn hides_from_assistive_tech(&self) -> bool {
        !matches!(self, HiddenMethod::ScreenReaderOnly)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            HiddenMethod::AriaHidden => "aria-hidden",
            HiddenMethod::DisplayNone => "display:none",
            HiddenMethod::VisibilityHidden => "visibility:hidden",
            HiddenMethod::HiddenAttribute => "hidden attribute",
            HiddenMethod::ScreenReaderOnly => "screen-reader-only class",
        }
    }
}

/// Landmark regions used for accessible page navigation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LandmarkType {
    Main,
    Navigation,
    Banner,
    Complementary,
    ContentInfo,
    Region,
    Search,
    Form,
}

impl LandmarkType {
    /// Maps an ARIA `role` value to a landmark, if it names one.
    pub fn from_role(role: &str) -> Option<Self> {
        match role.trim().to_ascii_lowercase().as_str() {
            "main" => Some(LandmarkType::Main),
            "navigation" => Some(LandmarkType::Navigation),
            "banner" => Some(LandmarkType::Banner),
            "complementary" => Some(LandmarkType::Complementary),
            "contentinfo" => Some(LandmarkType::ContentInfo),
            "region" => Some(LandmarkType::Region),
            "search" => Some(LandmarkType::Search),
            "form" => Some(LandmarkType::Form),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            LandmarkType::Main => "main",
            LandmarkType::Navigation => "navigation",
            LandmarkType::Banner => "banner",
            LandmarkType::Complementary => "complementary",
            LandmarkType::ContentInfo => "contentinfo",
            LandmarkType::Region => "region",
            LandmarkType::Search => "search",
            LandmarkType::Form => "form",
        }
    }
}

/// ARIA and visibility metadata for one heading.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccessibilityInfo {
    pub aria_label: Option<String>,
    pub aria_labelledby: Option<String>,
    pub aria_hidden: bool,
    pub aria_level: Option<u8>,
    pub role: Option<String>,
    pub is_hidden: bool,
    pub hidden_method: Option<HiddenMethod>,
}

/// Landmark and containment metadata for one heading.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SemanticInfo {
    /// Tag name of the immediate parent element
    pub parent_tag: Option<String>,
    /// Tag name of the nearest sectioning ancestor (section, article, aside, nav, main, header, footer)
    pub parent_semantic_tag: Option<String>,
    pub is_in_landmark: bool,
    pub landmark_type: Option<LandmarkType>,
    /// Opaque identifier of the nearest sectioning ancestor, unique within a document
    pub container_id: Option<String>,
}

/// One H1–H6 element extracted from a document.
///
/// Records are created once by the extractor and never mutated by the audit.
/// `position` is 0-based document order and must be unique and increasing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HeadingRecord {
    pub tag: String,
    pub level: u8,
    pub text: String,
    pub raw_markup: String,
    pub position: usize,
    /// DOM nesting depth (informational)
    pub depth: usize,
    #[serde(default)]
    pub accessibility: AccessibilityInfo,
    #[serde(default)]
    pub semantics: SemanticInfo,
}

impl HeadingRecord {
    /// Creates a record without any accessibility or semantic metadata.
    ///
    /// `level` is clamped to 1..=6 and `text` is trimmed.
    pub fn new(level: u8, text: &str) -> Self {
        let level = level.clamp(1, 6);
        let text = text.trim().to_string();
        Self {
            tag: format!("h{level}"),
            level,
            raw_markup: format!("<h{level}>{text}</h{level}>"),
            text,
            position: 0,
            depth: 0,
            accessibility: AccessibilityInfo::default(),
            semantics: SemanticInfo::default(),
        }
    }

    /// Builds an ordered list from `(level, text)` pairs, assigning positions.
    ///
    /// # Examples
    ///
    /// ```
    /// use heading_audit::HeadingRecord;
    ///
    /// let headings = HeadingRecord::outline(&[(1, "Guide"), (2, "Setup")]);
    /// assert_eq!(headings[1].position, 1);
    /// ```
    pub fn outline(pairs: &[(u8, &str)]) -> Vec<Self> {
        pairs
            .iter()
            .enumerate()
            .map(|(i, (level, text))| Self::new(*level, text).with_position(i))
            .collect()
    }

    pub fn with_position(mut self, position: usize) -> Self {
        self.position = position;
        self
    }

    pub fn with_aria_label(mut self, label: &str) -> Self {
        self.accessibility.aria_label = Some(label.to_string());
        self
    }

    pub fn with_aria_labelledby(mut self, id: &str) -> Self {
        self.accessibility.aria_labelledby = Some(id.to_string());
        self
    }

    pub fn with_aria_level(mut self, level: u8) -> Self {
        self.accessibility.aria_level = Some(level);
        self
    }

    pub fn with_role(mut self, role: &str) -> Self {
        self.accessibility.role = Some(role.to_string());
        self
    }

    /// Marks the heading hidden by the given method.
    pub fn hidden_by(mut self, method: HiddenMethod) -> Self {
        self.accessibility.is_hidden = true;
        self.accessibility.hidden_method = Some(method);
        if method == HiddenMethod::AriaHidden {
            self.accessibility.aria_hidden = true;
        }
        self
    }

    pub fn with_parent(mut self, tag: &str) -> Self {
        self.semantics.parent_tag = Some(tag.to_string());
        self
    }

    /// Places the heading inside a sectioning element with the given identity.
    pub fn within_section(mut self, tag: &str, container_id: &str) -> Self {
        self.semantics.parent_semantic_tag = Some(tag.to_string());
        self.semantics.container_id = Some(container_id.to_string());
        self
    }

    pub fn in_landmark(mut self, landmark: LandmarkType) -> Self {
        self.semantics.is_in_landmark = true;
        self.semantics.landmark_type = Some(landmark);
        self
    }

    /// Whether the heading is removed from what users and assistive tech perceive.
    pub fn is_effectively_hidden(&self) -> bool {
        if self.accessibility.aria_hidden {
            return true;
        }
        self.accessibility.is_hidden
            && self
                .accessibility
                .hidden_method
                .map_or(true, |m| m.hides_from_assistive_tech())
    }

    /// Character length of the (already trimmed) text.
    pub fn text_len(&self) -> usize {
        self.text.chars().count()
    }
}
