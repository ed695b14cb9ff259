//! Conciseness scoring: word-count band and padding-phrase detection.

use crate::evaluators::{single_metric_result, Evaluator};
use crate::run::EvaluationResult;
use crate::text::word_count;

/// Fixed pass threshold for conciseness.
pub const CONCISENESS_THRESHOLD: f64 = 0.5;

/// Default ideal word-count band.
pub const DEFAULT_MIN_WORDS: usize = 20;
/// Default ideal word-count upper bound.
pub const DEFAULT_MAX_WORDS: usize = 200;

/// Penalty per detected padding phrase.
const PADDING_PENALTY: f64 = 0.1;

/// Common filler phrases that add length without content.
const PADDING_PHRASES: [&str; 12] = [
    "in conclusion",
    "as i mentioned",
    "it's worth noting that",
    "it is worth noting that",
    "as a matter of fact",
    "needless to say",
    "at the end of the day",
    "it goes without saying",
    "in other words",
    "to summarize",
    "as previously stated",
    "for what it's worth",
];

/// Penalizes overly verbose or too-short responses.
///
/// Word counts inside `[min_words, max_words]` score `1.0`; below the
/// band the score scales as `word_count / min_words`, above it the
/// score decays linearly, reaching `0` at twice the maximum. Each
/// padding phrase costs an extra `0.1`. Empty output scores `0.0`.
#[derive(Debug, Clone)]
pub struct ConcisenessEvaluator {
    min_words: usize,
    max_words: usize,
}

impl Default for ConcisenessEvaluator {
    fn default() -> Self {
        Self {
            min_words: DEFAULT_MIN_WORDS,
            max_words: DEFAULT_MAX_WORDS,
        }
    }
}

impl ConcisenessEvaluator {
    /// Create an evaluator with a custom ideal word-count band.
    #[must_use]
    pub const fn with_bounds(min_words: usize, max_words: usize) -> Self {
        Self {
            min_words,
            max_words,
        }
    }
}

impl Evaluator for ConcisenessEvaluator {
    fn name(&self) -> &'static str {
        "conciseness"
    }

    #[allow(clippy::cast_precision_loss)]
    fn evaluate(&self, _input: &str, output: &str, _expected: Option<&str>) -> EvaluationResult {
        if output.trim().is_empty() {
            return single_metric_result(
                self.name(),
                0.0,
                CONCISENESS_THRESHOLD,
                "Empty response.".to_string(),
            );
        }

        let words = word_count(output);
        let lower = output.to_lowercase();
        let padding = PADDING_PHRASES.iter().filter(|p| lower.contains(*p)).count();

        let base = if words >= self.min_words && words <= self.max_words {
            1.0
        } else if words < self.min_words {
            if self.min_words == 0 {
                1.0
            } else {
                words as f64 / self.min_words as f64
            }
        } else {
            1.0 - (words - self.max_words) as f64 / self.max_words as f64
        };

        let score = base - padding as f64 * PADDING_PENALTY;
        let details = format!(
            "Response has {words} words (ideal {}-{}), {padding} padding phrase(s).",
            self.min_words, self.max_words
        );
        single_metric_result(self.name(), score, CONCISENESS_THRESHOLD, details)
    }
}
