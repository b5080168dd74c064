//! Heuristic SEO/readability pass over heading text only.

use crate::config::{
    LOW_READABILITY_THRESHOLD, MAX_SIMILARITY_HEADINGS, SIMILARITY_THRESHOLD,
    STOP_WORD_RATIO_LIMIT,
};
use crate::model::{HeadingRecord, Issue, IssueType, ValidationResult};
use crate::text::{
    flesch_reading_ease, has_power_word, is_question, negative_word, similarity, stop_word_ratio,
};

/// Runs the text heuristics. Empty headings are skipped (the structural pass
/// already reports them).
///
/// The near-duplicate check compares every pair of headings and is therefore
/// O(n²); pages with more than `MAX_SIMILARITY_HEADINGS` headings skip it.
pub fn validate_heuristics(headings: &[HeadingRecord]) -> ValidationResult {
    let mut result = ValidationResult::new();

    for heading in headings.iter().filter(|h| !h.text.is_empty()) {
        let text = heading.text.as_str();

        let score = flesch_reading_ease(text);
        if score < LOW_READABILITY_THRESHOLD {
            result.push(
                Issue::info(
                    IssueType::LowReadability,
                    format!("\"{text}\" is hard to read (Flesch score {score:.1})"),
                )
                .with_recommendation("Prefer shorter, more common words")
                .at(heading.position),
            );
        }

        if heading.level >= 2 && is_question(text) {
            result.push(
                Issue::info(
                    IssueType::QuestionFormat,
                    format!("\"{text}\" is phrased as a question"),
                )
                .with_recommendation("Question headings can match search queries; answer them directly below")
                .at(heading.position),
            );
        }

        if heading.level == 1 && !has_power_word(text) {
            result.push(
                Issue::info(
                    IssueType::NoPowerWordsH1,
                    format!("H1 \"{text}\" contains no power words"),
                )
                .with_recommendation("Consider a compelling word such as \"guide\" or \"essential\"")
                .at(heading.position),
            );
        }

        if heading.level <= 3 && text.chars().any(|c| c.is_ascii_digit()) {
            result.push(
                Issue::info(
                    IssueType::NumberedHeading,
                    format!("\"{text}\" contains numbers"),
                )
                .at(heading.position),
            );
        }

        if let Some(ratio) = stop_word_ratio(text) {
            if ratio > STOP_WORD_RATIO_LIMIT {
                result.push(
                    Issue::warning(
                        IssueType::TooManyStopWords,
                        format!(
                            "{:.0}% of the words in \"{text}\" are stop words",
                            ratio * 100.0
                        ),
                    )
                    .with_recommendation("Lead with meaningful keywords")
                    .at(heading.position),
                );
            }
        }

        if heading.level == 1 {
            if let Some(word) = negative_word(text) {
                result.push(
                    Issue::warning(
                        IssueType::NegativeSentimentH1,
                        format!("H1 \"{text}\" has a negative tone (\"{word}\")"),
                    )
                    .with_recommendation("Frame the page topic positively")
                    .at(heading.position),
                );
            }
        }
    }

    check_similar_pairs(headings, &mut result);
    result
}

fn check_similar_pairs(headings: &[HeadingRecord], result: &mut ValidationResult) {
    let candidates: Vec<&HeadingRecord> = headings.iter().filter(|h| !h.text.is_empty()).collect();
    if candidates.len() > MAX_SIMILARITY_HEADINGS {
        log::debug!(
            "Skipping similar-heading check for {} headings (limit {})",
            candidates.len(),
            MAX_SIMILARITY_HEADINGS
        );
        return;
    }

    for (i, first) in candidates.iter().enumerate() {
        for second in &candidates[i + 1..] {
            let score = similarity(&first.text, &second.text);
            if score > SIMILARITY_THRESHOLD {
                result.push(
                    Issue::warning(
                        IssueType::SimilarHeadings,
                        format!(
                            "\"{}\" (position {}) and \"{}\" (position {}) are {:.0}% similar",
                            first.text,
                            first.position,
                            second.text,
                            second.position,
                            score * 100.0
                        ),
                    )
                    .with_recommendation("Differentiate the headings so each section is distinct")
                    .at(second.position),
                );
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clean_headings() {
        let headings = HeadingRecord::outline(&[(1, "The easy guide"), (2, "Fast setup")]);
        let result = validate_heuristics(&headings);
        assert!(result.is_empty(), "{:?}", result.codes());
    }

    #[test]
    fn test_question_format_only_below_h1() {
        let headings = HeadingRecord::outline(&[(1, "Why learn the best tools?"), (2, "How it works")]);
        let result = validate_heuristics(&headings);
        let questions: Vec<&Issue> = result
            .info
            .iter()
            .filter(|i| i.issue_type == IssueType::QuestionFormat)
            .collect();
        assert_eq!(questions.len(), 1);
        assert_eq!(questions[0].position, Some(1));
    }

    #[test]
    fn test_no_power_words_h1() {
        let headings = HeadingRecord::outline(&[(1, "Notes on cats")]);
        let result = validate_heuristics(&headings);
        assert!(result.contains(IssueType::NoPowerWordsH1));
    }

    #[test]
    fn test_numbered_heading_up_to_h3() {
        let headings = HeadingRecord::outline(&[
            (1, "Top 10 tips"),
            (3, "Step 2 setup"),
            (4, "Step 3 wrap"),
        ]);
        let result = validate_heuristics(&headings);
        let positions: Vec<Option<usize>> = result
            .info
            .iter()
            .filter(|i| i.issue_type == IssueType::NumberedHeading)
            .map(|i| i.position)
            .collect();
        assert_eq!(positions, vec![Some(0), Some(1)]);
    }

    #[test]
    fn test_too_many_stop_words() {
        let headings = HeadingRecord::outline(&[(1, "The best guide"), (2, "Some of the ways to do it")]);
        let result = validate_heuristics(&headings);
        let issue = result
            .warnings
            .iter()
            .find(|i| i.issue_type == IssueType::TooManyStopWords)
            .expect("stop word warning");
        assert_eq!(issue.position, Some(1));
    }

    #[test]
    fn test_single_stop_word_heading_is_flagged() {
        let headings = HeadingRecord::outline(&[(1, "The essential guide to compost"), (2, "About")]);
        let result = validate_heuristics(&headings);
        let issue = result
            .warnings
            .iter()
            .find(|i| i.issue_type == IssueType::TooManyStopWords)
            .expect("stop word warning");
        assert_eq!(issue.position, Some(1));
    }

    #[test]
    fn test_negative_sentiment_h1() {
        let headings = HeadingRecord::outline(&[(1, "The worst guide"), (2, "Bad habits")]);
        let result = validate_heuristics(&headings);
        assert_eq!(result.count(IssueType::NegativeSentimentH1), 1);
    }

    #[test]
    fn test_low_readability() {
        let headings = HeadingRecord::outline(&[
            (1, "The easy guide"),
            (2, "Comprehensive Organizational Infrastructure Considerations"),
        ]);
        let result = validate_heuristics(&headings);
        let issue = result
            .info
            .iter()
            .find(|i| i.issue_type == IssueType::LowReadability)
            .expect("low readability");
        assert_eq!(issue.position, Some(1));
    }

    #[test]
    fn test_similar_headings_pairs() {
        let headings = HeadingRecord::outline(&[
            (1, "The easy guide"),
            (2, "Pricing plans"),
            (2, "Fast setup"),
            (2, "Pricing plan"),
        ]);
        let result = validate_heuristics(&headings);
        let similar: Vec<&Issue> = result
            .warnings
            .iter()
            .filter(|i| i.issue_type == IssueType::SimilarHeadings)
            .collect();
        assert_eq!(similar.len(), 1);
        assert_eq!(similar[0].position, Some(3));
        assert!(similar[0].message.contains("position 1"));
    }

    #[test]
    fn test_empty_headings_are_skipped() {
        let headings = HeadingRecord::outline(&[(1, ""), (2, "")]);
        assert!(validate_heuristics(&headings).is_empty());
    }
}
