//! CSS selector parsing.

use scraper::Selector;

/// Parses a CSS selector that must succeed.
///
/// Only for selectors that are compile-time constants, typically behind a
/// `LazyLock`.
///
/// # Panics
///
/// Panics if the selector cannot be parsed (indicates a programming error).
pub fn parse_selector_unsafe(selector_str: &str, context: &str) -> Selector {
    Selector::parse(selector_str).unwrap_or_else(|e| {
        panic!(
            "Failed to parse CSS selector '{}' in {}: {}. This is a programming error.",
            selector_str, context, e
        )
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use scraper::Html;

    #[test]
    fn test_valid_selector_matches() {
        let selector = parse_selector_unsafe("h1, h2", "test");
        let document = Html::parse_document("<h1>A</h1><h2>B</h2><p>C</p>");
        assert_eq!(document.select(&selector).count(), 2);
    }

    #[test]
    #[should_panic(expected = "programming error")]
    fn test_unsafe_selector_panics_on_invalid_input() {
        parse_selector_unsafe("h1[", "test");
    }
}
