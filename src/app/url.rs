//! URL validation and normalization for the input list.

use log::warn;

use crate::utils::truncate_chars;

/// Maximum accepted URL length, matching common browser and server limits.
const MAX_URL_LENGTH: usize = 2048;

/// Validates and normalizes one input line into a fetchable URL.
///
/// Bare hosts get an `https://` prefix. Anything with another explicit scheme,
/// anything that does not parse, and anything longer than `MAX_URL_LENGTH`
/// is logged and skipped.
///
/// Returns `Some(normalized_url)` if the URL should be audited.
pub fn validate_and_normalize_url(url: &str) -> Option<String> {
    let normalized = if url.starts_with("http://") || url.starts_with("https://") {
        url.to_string()
    } else if url.contains("://") {
        warn!("Skipping unsupported scheme for URL: {}", truncate_chars(url, 80));
        return None;
    } else {
        format!("https://{url}")
    };

    if normalized.len() > MAX_URL_LENGTH {
        warn!(
            "Skipping URL exceeding maximum length ({} > {}): {}",
            normalized.len(),
            MAX_URL_LENGTH,
            truncate_chars(&normalized, 50)
        );
        return None;
    }

    match url::Url::parse(&normalized) {
        Ok(parsed) if parsed.host().is_some() => Some(normalized),
        _ => {
            warn!("Skipping invalid URL: {}", truncate_chars(url, 80));
            None
        }
    }
}
