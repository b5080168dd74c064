//! Single-document pipeline: outline, validation passes and metrics.

use tokio_util::sync::CancellationToken;

use crate::error_handling::FetchError;
use crate::extract::extract_headings;
use crate::fetch::Fetcher;
use crate::hierarchy::build_hierarchy;
use crate::metrics::compute_metrics;
use crate::model::{AnalysisResult, HeadingRecord};
use crate::validation::validate_all;

/// Runs the hierarchy builder, every validation pass and the metrics over one
/// heading list.
///
/// Pure and deterministic: the same input always yields the same result.
pub fn analyze_headings(headings: Vec<HeadingRecord>) -> AnalysisResult {
    let hierarchy = build_hierarchy(&headings);
    let validation = validate_all(&headings);
    let metrics = compute_metrics(&headings, &hierarchy);
    AnalysisResult {
        headings,
        hierarchy,
        validation,
        metrics,
    }
}

/// Extracts the headings of an HTML document and analyzes them.
pub fn analyze_html(html: &str) -> AnalysisResult {
    analyze_headings(extract_headings(html))
}

/// Fetches one document and analyzes it.
///
/// # Errors
///
/// Returns the fetcher's `FetchError` when the document could not be
/// retrieved; no partial result is produced in that case.
pub async fn analyze_url<F: Fetcher>(fetcher: &F, url: &str) -> Result<AnalysisResult, FetchError> {
    analyze_url_with_cancel(fetcher, url, CancellationToken::new()).await
}

pub(crate) async fn analyze_url_with_cancel<F: Fetcher>(
    fetcher: &F,
    url: &str,
    cancel: CancellationToken,
) -> Result<AnalysisResult, FetchError> {
    let html = fetcher.fetch(url, cancel).await?;
    let result = analyze_html(&html);
    log::debug!(
        "Analyzed {}: {} headings, {} issues",
        url,
        result.metrics.total_headings,
        result.validation.total()
    );
    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::IssueType;

    struct StaticFetcher(Result<String, FetchError>);

    impl Fetcher for StaticFetcher {
        async fn fetch(&self, _url: &str, _cancel: CancellationToken) -> Result<String, FetchError> {
            self.0.clone()
        }
    }

    #[test]
    fn test_analyze_headings_merges_every_part() {
        let result = analyze_headings(HeadingRecord::outline(&[
            (1, "A guide to heading outlines"),
            (3, "Deep dive"),
        ]));
        assert_eq!(result.headings.len(), 2);
        assert_eq!(result.hierarchy.len(), 2);
        assert_eq!(result.metrics.max_depth, 1);
        assert!(result.validation.contains(IssueType::HeadingSkipped));
        assert_eq!(result.hierarchy.all_issues().len(), 1);
    }

    #[test]
    fn test_analyze_html() {
        let result = analyze_html("<main><h1>Essential guide to baking bread</h1><h2>Flour</h2></main>");
        assert_eq!(result.h1_count(), 1);
        assert_eq!(result.metrics.h2, 1);
        assert!(result.headings[0].semantics.is_in_landmark);
    }

    #[tokio::test]
    async fn test_analyze_url_success_and_failure() {
        let ok = StaticFetcher(Ok("<h1>Title</h1>".to_string()));
        let result = analyze_url(&ok, "https://example.com").await;
        assert_eq!(result.map(|r| r.metrics.total_headings), Ok(1));

        let failing = StaticFetcher(Err(FetchError::Status(404)));
        let result = analyze_url(&failing, "https://example.com").await;
        assert_eq!(result.map(|r| r.metrics.total_headings), Err(FetchError::Status(404)));
    }
}
