//! Small helpers shared by the extractor and the batch layer.
//!
//! - CSS selector parsing for constant selectors
//! - Whitespace normalization and character-based truncation of markup
//! - Sanitizing error messages before they are stored on a job

mod sanitize;
mod selector;

pub use sanitize::{normalize_whitespace, sanitize_error_message, truncate_chars};
pub use selector::parse_selector_unsafe;
