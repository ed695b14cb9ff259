//! Shared text analysis primitives used by the evaluator panel.
//!
//! All helpers here are pure functions over borrowed string slices;
//! the evaluators build their lexical heuristics on top of these.

use std::collections::{HashMap, HashSet};

/// Minimum token length considered meaningful for overlap scoring.
pub const MIN_TOKEN_LEN: usize = 3;

/// Tokenize text into lower-cased terms of at least [`MIN_TOKEN_LEN`]
/// characters, splitting on whitespace and punctuation.
#[must_use]
pub fn tokenize(text: &str) -> Vec<String> {
    text.split(|c: char| !c.is_alphanumeric())
        .filter(|t| t.chars().count() >= MIN_TOKEN_LEN)
        .map(str::to_lowercase)
        .collect()
}

/// Distinct token set for membership checks.
#[must_use]
pub fn token_set(text: &str) -> HashSet<String> {
    tokenize(text).into_iter().collect()
}

/// Term-frequency vector over the tokens of `text`.
#[must_use]
pub fn term_frequencies(text: &str) -> HashMap<String, f64> {
    let mut freqs = HashMap::new();
    for token in tokenize(text) {
        *freqs.entry(token).or_insert(0.0) += 1.0;
    }
    freqs
}

/// Cosine similarity between two term-frequency vectors.
///
/// Returns `0.0` when either vector is the zero vector.
#[must_use]
pub fn cosine_similarity(a: &HashMap<String, f64>, b: &HashMap<String, f64>) -> f64 {
    let dot: f64 = a
        .iter()
        .filter_map(|(term, va)| b.get(term).map(|vb| va * vb))
        .sum();

    let norm_a = a.values().map(|v| v * v).sum::<f64>().sqrt();
    let norm_b = b.values().map(|v| v * v).sum::<f64>().sqrt();

    if norm_a < f64::EPSILON || norm_b < f64::EPSILON {
        return 0.0;
    }
    dot / (norm_a * norm_b)
}

/// Split text into trimmed, non-empty sentences on `.`, `!` and `?`.
#[must_use]
pub fn split_sentences(text: &str) -> Vec<String> {
    text.split(['.', '!', '?'])
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(String::from)
        .collect()
}

/// Number of whitespace-separated words in `text`.
#[must_use]
pub fn word_count(text: &str) -> usize {
    text.split_whitespace().count()
}

/// Clamp a score into the normalized `[0, 1]` range.
#[must_use]
pub fn clamp_score(score: f64) -> f64 {
    score.clamp(0.0, 1.0)
}

#[cfg(test)]
#[allow(clippy::float_cmp)]
mod tests {
    use super::*;

    #[test]
    fn test_tokenize_drops_short_tokens() {
        let tokens = tokenize("The cat is on a mat");
        assert_eq!(tokens, vec!["the", "cat", "mat"]);
    }

    #[test]
    fn test_tokenize_splits_on_punctuation() {
        let tokens = tokenize("Hello, world! (really)");
        assert_eq!(tokens, vec!["hello", "world", "really"]);
    }

    #[test]
    fn test_tokenize_empty() {
        assert!(tokenize("").is_empty());
        assert!(tokenize("a b c").is_empty());
    }

    #[test]
    fn test_term_frequencies_counts() {
        let freqs = term_frequencies("dog dog cat");
        assert_eq!(freqs["dog"], 2.0);
        assert_eq!(freqs["cat"], 1.0);
    }

    #[test]
    fn test_cosine_identical_vectors() {
        let v = term_frequencies("alpha beta gamma alpha");
        let sim = cosine_similarity(&v, &v);
        assert!((sim - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_cosine_disjoint_vectors() {
        let a = term_frequencies("alpha beta");
        let b = term_frequencies("gamma delta");
        assert_eq!(cosine_similarity(&a, &b), 0.0);
    }

    #[test]
    fn test_cosine_zero_vector() {
        let a = term_frequencies("alpha beta");
        let empty = HashMap::new();
        assert_eq!(cosine_similarity(&a, &empty), 0.0);
        assert_eq!(cosine_similarity(&empty, &a), 0.0);
    }

    #[test]
    fn test_split_sentences() {
        let sentences = split_sentences("First one. Second one! Third one?");
        assert_eq!(sentences, vec!["First one", "Second one", "Third one"]);
    }

    #[test]
    fn test_split_sentences_empty_segments() {
        let sentences = split_sentences("One... Two.");
        assert_eq!(sentences, vec!["One", "Two"]);
    }

    #[test]
    fn test_word_count() {
        assert_eq!(word_count(""), 0);
        assert_eq!(word_count("one two   three"), 3);
    }

    #[test]
    fn test_clamp_score() {
        assert_eq!(clamp_score(-0.5), 0.0);
        assert_eq!(clamp_score(1.5), 1.0);
        assert_eq!(clamp_score(0.42), 0.42);
    }
}
