//! HTML heading extraction.
//!
//! Turns a document into the flat, ordered `HeadingRecord` list the audit
//! consumes. The extractor is the only place that looks at markup: everything
//! downstream relies on the accessibility and containment facts gathered here.

use std::sync::LazyLock;

use scraper::{ElementRef, Html, Selector};

use crate::config::MAX_RAW_MARKUP_CHARS;
use crate::model::{AccessibilityInfo, HeadingRecord, HiddenMethod, LandmarkType, SemanticInfo};
use crate::utils::{normalize_whitespace, parse_selector_unsafe, truncate_chars};

static HEADING_SELECTOR: LazyLock<Selector> =
    LazyLock::new(|| parse_selector_unsafe("h1, h2, h3, h4, h5, h6", "HEADING_SELECTOR"));

/// Class names of the common "visually hidden but announced" conventions.
const SCREEN_READER_CLASSES: &[&str] = &[
    "sr-only",
    "visually-hidden",
    "screen-reader-text",
    "visuallyhidden",
];

/// Ancestors reported as a heading's semantic container.
const SEMANTIC_CONTAINERS: &[&str] = &[
    "section", "article", "aside", "nav", "main", "header", "footer",
];

/// A `header`/`footer` inside one of these is not the page banner/contentinfo.
const SCOPING_TAGS: &[&str] = &["article", "aside", "main", "nav", "section"];

/// Extracts every H1–H6 element in document order.
///
/// Positions are assigned 0, 1, 2, ... in the order the parser encounters the
/// headings. Malformed markup is handled by the HTML parser's own recovery and
/// never fails.
pub fn extract_headings(html: &str) -> Vec<HeadingRecord> {
    let document = Html::parse_document(html);
    let mut containers = ContainerIds::default();

    document
        .select(&HEADING_SELECTOR)
        .filter_map(|element| heading_level(element).map(|level| (element, level)))
        .enumerate()
        .map(|(position, (element, level))| {
            let text = normalize_whitespace(&element.text().collect::<String>());
            let mut record = HeadingRecord::new(level, &text).with_position(position);
            record.raw_markup = truncate_chars(&element.html(), MAX_RAW_MARKUP_CHARS);
            record.depth = element_ancestors(element).count();
            record.accessibility = accessibility(element);
            record.semantics = semantics(element, &mut containers);
            record
        })
        .collect()
}

fn heading_level(element: ElementRef<'_>) -> Option<u8> {
    element
        .value()
        .name()
        .strip_prefix('h')
        .and_then(|digit| digit.parse::<u8>().ok())
        .filter(|level| (1..=6).contains(level))
}

fn element_ancestors<'a>(element: ElementRef<'a>) -> impl Iterator<Item = ElementRef<'a>> {
    element.ancestors().filter_map(ElementRef::wrap)
}

fn non_empty_attr(element: ElementRef<'_>, name: &str) -> Option<String> {
    element
        .value()
        .attr(name)
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .map(str::to_string)
}

fn accessibility(element: ElementRef<'_>) -> AccessibilityInfo {
    let hidden_method = std::iter::once(element)
        .chain(element_ancestors(element))
        .find_map(hidden_method);

    AccessibilityInfo {
        aria_label: non_empty_attr(element, "aria-label"),
        aria_labelledby: non_empty_attr(element, "aria-labelledby"),
        aria_hidden: hidden_method == Some(HiddenMethod::AriaHidden),
        aria_level: element
            .value()
            .attr("aria-level")
            .and_then(|value| value.trim().parse().ok()),
        role: non_empty_attr(element, "role"),
        is_hidden: hidden_method.is_some(),
        hidden_method,
    }
}

/// How this element itself hides its subtree, if it does.
fn hidden_method(element: ElementRef<'_>) -> Option<HiddenMethod> {
    let value = element.value();

    if value
        .attr("aria-hidden")
        .is_some_and(|v| v.trim().eq_ignore_ascii_case("true"))
    {
        return Some(HiddenMethod::AriaHidden);
    }
    if value.attr("hidden").is_some() {
        return Some(HiddenMethod::HiddenAttribute);
    }
    if let Some(style) = value.attr("style") {
        for declaration in style.split(';') {
            let Some((property, raw)) = declaration.split_once(':') else {
                continue;
            };
            let setting = raw
                .trim()
                .trim_end_matches("!important")
                .trim()
                .to_ascii_lowercase();
            match property.trim().to_ascii_lowercase().as_str() {
                "display" if setting == "none" => return Some(HiddenMethod::DisplayNone),
                "visibility" if setting == "hidden" => {
                    return Some(HiddenMethod::VisibilityHidden)
                }
                _ => {}
            }
        }
    }
    if value
        .classes()
        .any(|class| SCREEN_READER_CLASSES.contains(&class))
    {
        return Some(HiddenMethod::ScreenReaderOnly);
    }
    None
}

fn semantics<'a>(element: ElementRef<'a>, containers: &mut ContainerIds<'a>) -> SemanticInfo {
    let parent_tag = element
        .parent()
        .and_then(ElementRef::wrap)
        .map(|parent| parent.value().name().to_string());
    let container =
        element_ancestors(element).find(|a| SEMANTIC_CONTAINERS.contains(&a.value().name()));
    let landmark = nearest_landmark(element);

    SemanticInfo {
        parent_tag,
        parent_semantic_tag: container.map(|c| c.value().name().to_string()),
        is_in_landmark: landmark.is_some(),
        landmark_type: landmark,
        container_id: container.map(|c| containers.id_for(c)),
    }
}

fn nearest_landmark(element: ElementRef<'_>) -> Option<LandmarkType> {
    let ancestors: Vec<ElementRef<'_>> = element_ancestors(element).collect();
    ancestors
        .iter()
        .enumerate()
        .find_map(|(i, ancestor)| landmark_of(*ancestor, &ancestors[i + 1..]))
}

/// The landmark an element exposes, given the ancestors that enclose it.
fn landmark_of(element: ElementRef<'_>, enclosing: &[ElementRef<'_>]) -> Option<LandmarkType> {
    let value = element.value();
    if let Some(landmark) = value.attr("role").and_then(LandmarkType::from_role) {
        return Some(landmark);
    }

    let scoped = || {
        enclosing
            .iter()
            .any(|outer| SCOPING_TAGS.contains(&outer.value().name()))
    };
    let named = || value.attr("aria-label").is_some() || value.attr("aria-labelledby").is_some();

    match value.name() {
        "main" => Some(LandmarkType::Main),
        "nav" => Some(LandmarkType::Navigation),
        "aside" => Some(LandmarkType::Complementary),
        "header" if !scoped() => Some(LandmarkType::Banner),
        "footer" if !scoped() => Some(LandmarkType::ContentInfo),
        "section" if named() => Some(LandmarkType::Region),
        "form" if named() => Some(LandmarkType::Form),
        "search" => Some(LandmarkType::Search),
        _ => None,
    }
}

/// Stable per-document identifiers for sectioning containers.
///
/// Uses the element's `id` attribute when present, otherwise `{tag}-{n}` with
/// `n` counted per tag in order of first use.
#[derive(Default)]
struct ContainerIds<'a> {
    assigned: Vec<(ElementRef<'a>, String)>,
    per_tag: Vec<(&'a str, usize)>,
}

impl<'a> ContainerIds<'a> {
    fn id_for(&mut self, element: ElementRef<'a>) -> String {
        if let Some((_, id)) = self.assigned.iter().find(|(e, _)| *e == element) {
            return id.clone();
        }

        let id = match element.value().attr("id").map(str::trim) {
            Some(explicit) if !explicit.is_empty() => explicit.to_string(),
            _ => {
                let tag = element.value().name();
                let ordinal = match self.per_tag.iter_mut().find(|(t, _)| *t == tag) {
                    Some((_, next)) => {
                        *next += 1;
                        *next - 1
                    }
                    None => {
                        self.per_tag.push((tag, 1));
                        0
                    }
                };
                format!("{tag}-{ordinal}")
            }
        };
        self.assigned.push((element, id.clone()));
        id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PAGE: &str = r#"<!DOCTYPE html>
<html><body>
<header><h1>Site title for the shop</h1></header>
<nav><h2>Menu</h2></nav>
<main>
  <section id="intro"><h2>Getting
     started</h2><div><h3 aria-level="4">Install</h3></div></section>
  <article><h2 role="presentation">Promo</h2><h3>Promo details</h3></article>
</main>
<aside><h2 aria-hidden="true">Ads</h2></aside>
<footer><h2 class="sr-only">Footer links</h2></footer>
<div style="display: none"><h2>Old</h2></div>
<a href="/"><h3>Clickable</h3></a>
</body></html>"#;

    fn find<'a>(headings: &'a [HeadingRecord], text: &str) -> &'a HeadingRecord {
        headings
            .iter()
            .find(|h| h.text == text)
            .unwrap_or_else(|| panic!("heading {text:?} not extracted"))
    }

    #[test]
    fn test_document_order_and_text() {
        let headings = extract_headings(PAGE);
        let texts: Vec<&str> = headings.iter().map(|h| h.text.as_str()).collect();
        assert_eq!(
            texts,
            vec![
                "Site title for the shop",
                "Menu",
                "Getting started",
                "Install",
                "Promo",
                "Promo details",
                "Ads",
                "Footer links",
                "Old",
                "Clickable"
            ]
        );
        let positions: Vec<usize> = headings.iter().map(|h| h.position).collect();
        assert_eq!(positions, (0..headings.len()).collect::<Vec<_>>());
        assert_eq!(headings[0].tag, "h1");
        assert_eq!(headings[3].level, 3);
    }

    #[test]
    fn test_landmarks() {
        let headings = extract_headings(PAGE);
        let landmark = |text| find(&headings, text).semantics.landmark_type;
        assert_eq!(landmark("Site title for the shop"), Some(LandmarkType::Banner));
        assert_eq!(landmark("Menu"), Some(LandmarkType::Navigation));
        assert_eq!(landmark("Install"), Some(LandmarkType::Main));
        assert_eq!(landmark("Ads"), Some(LandmarkType::Complementary));
        assert_eq!(landmark("Footer links"), Some(LandmarkType::ContentInfo));
        assert_eq!(landmark("Old"), None);
        assert!(!find(&headings, "Old").semantics.is_in_landmark);
    }

    #[test]
    fn test_containers() {
        let headings = extract_headings(PAGE);

        let install = find(&headings, "Install");
        assert_eq!(install.semantics.parent_tag.as_deref(), Some("div"));
        assert_eq!(install.semantics.parent_semantic_tag.as_deref(), Some("section"));
        assert_eq!(install.semantics.container_id.as_deref(), Some("intro"));

        let promo = find(&headings, "Promo");
        let details = find(&headings, "Promo details");
        assert_eq!(promo.semantics.container_id.as_deref(), Some("article-0"));
        assert_eq!(promo.semantics.container_id, details.semantics.container_id);

        assert_eq!(
            find(&headings, "Clickable").semantics.parent_tag.as_deref(),
            Some("a")
        );
        assert_eq!(find(&headings, "Site title for the shop").depth, 3);
    }

    #[test]
    fn test_accessibility_attributes() {
        let headings = extract_headings(PAGE);

        assert_eq!(find(&headings, "Install").accessibility.aria_level, Some(4));
        assert_eq!(
            find(&headings, "Promo").accessibility.role.as_deref(),
            Some("presentation")
        );

        let ads = &find(&headings, "Ads").accessibility;
        assert!(ads.aria_hidden);
        assert_eq!(ads.hidden_method, Some(HiddenMethod::AriaHidden));

        let footer = &find(&headings, "Footer links").accessibility;
        assert!(footer.is_hidden);
        assert_eq!(footer.hidden_method, Some(HiddenMethod::ScreenReaderOnly));

        let old = &find(&headings, "Old").accessibility;
        assert_eq!(old.hidden_method, Some(HiddenMethod::DisplayNone));
        assert!(!old.aria_hidden);

        assert!(!find(&headings, "Menu").accessibility.is_hidden);
    }

    #[test]
    fn test_scoped_header_is_not_banner() {
        let html = "<main><article><header><h2>Story</h2></header></article></main>";
        let headings = extract_headings(html);
        assert_eq!(headings[0].semantics.landmark_type, Some(LandmarkType::Main));
        assert_eq!(headings[0].semantics.parent_semantic_tag.as_deref(), Some("header"));
    }

    #[test]
    fn test_role_landmark_and_visibility_style() {
        let html = r#"<div role="navigation"><h2 style="visibility: hidden !important">Links</h2></div>"#;
        let headings = extract_headings(html);
        assert_eq!(headings[0].semantics.landmark_type, Some(LandmarkType::Navigation));
        assert_eq!(
            headings[0].accessibility.hidden_method,
            Some(HiddenMethod::VisibilityHidden)
        );
    }

    #[test]
    fn test_raw_markup_is_truncated() {
        let long = "word ".repeat(200);
        let headings = extract_headings(&format!("<h2 aria-label=\"x\">{long}</h2>"));
        assert!(headings[0].raw_markup.starts_with("<h2 aria-label=\"x\">"));
        assert_eq!(headings[0].raw_markup.chars().count(), MAX_RAW_MARKUP_CHARS + 3);
        assert_eq!(headings[0].accessibility.aria_label.as_deref(), Some("x"));
    }

    #[test]
    fn test_no_headings() {
        assert!(extract_headings("<p>No headings here</p>").is_empty());
        assert!(extract_headings("").is_empty());
    }
}
