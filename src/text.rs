//! Text analytics over heading text.
//!
//! Stateless helpers used by the heuristic pass: tokenization, a Flesch-style
//! readability score with a vowel-group syllable counter, edit-distance
//! similarity, and small fixed lexicons (question, stop, power and negative
//! words).

/// Words that open a question-style heading.
const QUESTION_WORDS: &[&str] = &[
    "what", "why", "how", "when", "where", "who", "which", "whose", "can", "could", "does", "do",
    "is", "are", "should", "will", "would",
];

const STOP_WORDS: &[&str] = &[
    "a", "about", "an", "and", "are", "as", "at", "be", "but", "by", "for", "from", "has", "have",
    "he", "her", "his", "i", "if", "in", "into", "is", "it", "its", "me", "my", "no", "not", "of",
    "on", "or", "our", "she", "so", "than", "that", "the", "their", "them", "then", "there",
    "these", "they", "this", "those", "to", "too", "up", "us", "was", "we", "were", "what",
    "which", "who", "will", "with", "you", "your",
];

const POWER_WORDS: &[&str] = &[
    "amazing", "best", "complete", "definitive", "easy", "essential", "exclusive", "expert",
    "fast", "free", "guide", "instant", "new", "powerful", "proven", "quick", "secret", "simple",
    "smart", "step-by-step", "top", "ultimate", "unique", "vital",
];

const NEGATIVE_WORDS: &[&str] = &[
    "awful", "bad", "broken", "danger", "dangerous", "disaster", "fail", "failure", "fear",
    "horrible", "mistake", "mistakes", "never", "poor", "problem", "problems", "terrible", "ugly",
    "useless", "worst", "wrong",
];

/// Splits text into lowercase words, trimming surrounding punctuation.
///
/// Inner hyphens and apostrophes are kept (`step-by-step`, `don't`).
pub fn words(text: &str) -> Vec<String> {
    text.split_whitespace()
        .map(|w| {
            w.trim_matches(|c: char| !c.is_alphanumeric())
                .to_lowercase()
        })
        .filter(|w| !w.is_empty())
        .collect()
}

/// Counts syllables with a simplified vowel-group heuristic.
///
/// Consecutive vowels (including `y`) form one group; a trailing silent `e`
/// is dropped unless the word ends in `le`. Every non-empty word has at least
/// one syllable.
pub fn count_syllables(word: &str) -> usize {
    let letters: Vec<char> = word
        .chars()
        .filter(|c| c.is_alphabetic())
        .flat_map(char::to_lowercase)
        .collect();
    if letters.is_empty() {
        return 0;
    }
    if letters.len() <= 3 {
        return 1;
    }

    let is_vowel = |c: char| matches!(c, 'a' | 'e' | 'i' | 'o' | 'u' | 'y');
    let mut groups = 0;
    let mut previous_vowel = false;
    for &c in &letters {
        let vowel = is_vowel(c);
        if vowel && !previous_vowel {
            groups += 1;
        }
        previous_vowel = vowel;
    }

    let n = letters.len();
    let silent_e = letters[n - 1] == 'e' && letters[n - 2] != 'l' && !is_vowel(letters[n - 2]);
    if silent_e && groups > 1 {
        groups -= 1;
    }
    groups.max(1)
}

fn count_sentences(text: &str) -> usize {
    text.split(['.', '!', '?'])
        .filter(|s| s.chars().any(char::is_alphanumeric))
        .count()
        .max(1)
}

/// Flesch reading-ease score clamped to 0..=100 (higher is easier).
///
/// `206.835 - 1.015 * (words / sentences) - 84.6 * (syllables / words)`.
/// Text without words scores 100.
pub fn flesch_reading_ease(text: &str) -> f64 {
    let words = words(text);
    if words.is_empty() {
        return 100.0;
    }
    let word_count = words.len() as f64;
    let sentences = count_sentences(text) as f64;
    let syllables: usize = words.iter().map(|w| count_syllables(w)).sum();

    let score =
        206.835 - 1.015 * (word_count / sentences) - 84.6 * (syllables as f64 / word_count);
    score.clamp(0.0, 100.0)
}

/// Levenshtein edit distance over Unicode scalar values.
pub fn levenshtein(a: &str, b: &str) -> usize {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();
    if a.is_empty() {
        return b.len();
    }
    if b.is_empty() {
        return a.len();
    }

    let mut previous: Vec<usize> = (0..=b.len()).collect();
    let mut current = vec![0; b.len() + 1];
    for (i, ca) in a.iter().enumerate() {
        current[0] = i + 1;
        for (j, cb) in b.iter().enumerate() {
            let substitution = previous[j] + usize::from(ca != cb);
            current[j + 1] = substitution
                .min(previous[j + 1] + 1)
                .min(current[j] + 1);
        }
        std::mem::swap(&mut previous, &mut current);
    }
    previous[b.len()]
}

/// Case-insensitive similarity in 0..=1: `1 - distance / longer_length`.
pub fn similarity(a: &str, b: &str) -> f64 {
    let a = a.to_lowercase();
    let b = b.to_lowercase();
    let longest = a.chars().count().max(b.chars().count());
    if longest == 0 {
        return 1.0;
    }
    1.0 - levenshtein(&a, &b) as f64 / longest as f64
}

/// Starts with a question word or ends with `?`.
pub fn is_question(text: &str) -> bool {
    if text.trim_end().ends_with('?') {
        return true;
    }
    words(text)
        .first()
        .is_some_and(|first| QUESTION_WORDS.contains(&first.as_str()))
}

pub fn has_power_word(text: &str) -> bool {
    words(text).iter().any(|w| POWER_WORDS.contains(&w.as_str()))
}

/// The first negative-lexicon word found, if any.
pub fn negative_word(text: &str) -> Option<String> {
    words(text)
        .into_iter()
        .find(|w| NEGATIVE_WORDS.contains(&w.as_str()))
}

/// Share of stop words among all words, or `None` for text without words.
pub fn stop_word_ratio(text: &str) -> Option<f64> {
    let words = words(text);
    if words.is_empty() {
        return None;
    }
    let stops = words
        .iter()
        .filter(|w| STOP_WORDS.contains(&w.as_str()))
        .count();
    Some(stops as f64 / words.len() as f64)
}

/// Whether the text contains letters and none of them is lowercase.
pub fn is_all_caps(text: &str) -> bool {
    text.chars().any(char::is_alphabetic) && !text.chars().any(char::is_lowercase)
}

/// Generates a URL-style slug: lowercase ASCII alphanumerics joined by hyphens.
pub fn slugify(text: &str) -> String {
    text.chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() {
                c.to_ascii_lowercase()
            } else {
                '-'
            }
        })
        .collect::<String>()
        .split('-')
        .filter(|s| !s.is_empty())
        .collect::<Vec<_>>()
        .join("-")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_words_strips_punctuation() {
        assert_eq!(
            words("  Hello, World! Step-by-step "),
            vec!["hello", "world", "step-by-step"]
        );
        assert!(words("  ...  ").is_empty());
    }

    #[test]
    fn test_count_syllables() {
        assert_eq!(count_syllables("cat"), 1);
        assert_eq!(count_syllables("the"), 1);
        assert_eq!(count_syllables("water"), 2);
        assert_eq!(count_syllables("make"), 1);
        assert_eq!(count_syllables("title"), 2);
        assert_eq!(count_syllables("readability"), 5);
        assert_eq!(count_syllables(""), 0);
        assert_eq!(count_syllables("123"), 0);
    }

    #[test]
    fn test_flesch_simple_text_scores_high() {
        let score = flesch_reading_ease("The cat sat on the mat");
        assert!(score > 90.0, "score was {score}");
    }

    #[test]
    fn test_flesch_complex_text_scores_low() {
        let score = flesch_reading_ease("Comprehensive Organizational Infrastructure Considerations");
        assert!(score < 30.0, "score was {score}");
        assert!(score >= 0.0);
    }

    #[test]
    fn test_flesch_empty_text() {
        assert_eq!(flesch_reading_ease(""), 100.0);
    }

    #[test]
    fn test_levenshtein() {
        assert_eq!(levenshtein("kitten", "sitting"), 3);
        assert_eq!(levenshtein("", "abc"), 3);
        assert_eq!(levenshtein("abc", ""), 3);
        assert_eq!(levenshtein("same", "same"), 0);
    }

    #[test]
    fn test_similarity() {
        assert_eq!(similarity("Pricing", "pricing"), 1.0);
        assert_eq!(similarity("", ""), 1.0);
        assert!(similarity("Pricing plans", "Pricing plan") > 0.9);
        assert!(similarity("Installation", "Contact us") < 0.3);
    }

    #[test]
    fn test_is_question() {
        assert!(is_question("How does it work"));
        assert!(is_question("Ready to start?"));
        assert!(!is_question("Getting started"));
        assert!(!is_question(""));
    }

    #[test]
    fn test_lexicons() {
        assert!(has_power_word("The Ultimate Guide to Rust"));
        assert!(!has_power_word("Notes on Rust"));
        assert_eq!(
            negative_word("The worst mistakes"),
            Some("worst".to_string())
        );
        assert_eq!(negative_word("Great results"), None);
    }

    #[test]
    fn test_stop_word_ratio() {
        assert_eq!(stop_word_ratio("the and of it"), Some(1.0));
        assert_eq!(stop_word_ratio("Rust ownership"), Some(0.0));
        assert_eq!(stop_word_ratio(""), None);
    }

    #[test]
    fn test_is_all_caps() {
        assert!(is_all_caps("FREE SHIPPING"));
        assert!(!is_all_caps("Free Shipping"));
        assert!(!is_all_caps("2024"));
    }

    #[test]
    fn test_slugify() {
        assert_eq!(slugify("Chapter One"), "chapter-one");
        assert_eq!(slugify("Hello, World!"), "hello-world");
        assert_eq!(slugify("  Multiple   Spaces  "), "multiple-spaces");
        assert_eq!(slugify("!!!"), "");
    }
}
