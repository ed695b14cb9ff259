//! Factuality scoring: claim extraction and token-overlap support.

use crate::evaluators::{single_metric_result, Evaluator};
use crate::run::EvaluationResult;
use crate::text::{split_sentences, token_set, tokenize};

/// Default pass threshold for factuality.
pub const DEFAULT_FACTUALITY_THRESHOLD: f64 = 0.8;

/// Minimum token-overlap ratio for a claim to count as supported.
const SUPPORT_OVERLAP: f64 = 0.5;
/// Minimum words for a sentence to count as a claim.
const MIN_CLAIM_WORDS: usize = 3;

/// Scores factual support of an output against the expected output.
///
/// Claims are sentences with at least three words; each is supported
/// when at least half of its tokens appear in the expected output's
/// token set. Without an expected output the check is skipped and the
/// score is `1.0`; an empty output scores `0.0`.
#[derive(Debug, Clone)]
pub struct FactualityEvaluator {
    threshold: f64,
}

impl Default for FactualityEvaluator {
    fn default() -> Self {
        Self {
            threshold: DEFAULT_FACTUALITY_THRESHOLD,
        }
    }
}

impl FactualityEvaluator {
    /// Create an evaluator with a custom pass threshold.
    #[must_use]
    pub const fn with_threshold(threshold: f64) -> Self {
        Self { threshold }
    }
}

impl Evaluator for FactualityEvaluator {
    fn name(&self) -> &'static str {
        "factuality"
    }

    #[allow(clippy::cast_precision_loss)]
    fn evaluate(&self, _input: &str, output: &str, expected: Option<&str>) -> EvaluationResult {
        let Some(expected) = expected.filter(|e| !e.trim().is_empty()) else {
            return single_metric_result(
                self.name(),
                1.0,
                self.threshold,
                "No expected output, factuality check skipped.".to_string(),
            );
        };

        if output.trim().is_empty() {
            return single_metric_result(
                self.name(),
                0.0,
                self.threshold,
                "Empty response.".to_string(),
            );
        }

        let claims: Vec<String> = split_sentences(output)
            .into_iter()
            .filter(|s| s.split_whitespace().count() >= MIN_CLAIM_WORDS)
            .collect();
        if claims.is_empty() {
            return single_metric_result(
                self.name(),
                1.0,
                self.threshold,
                "No claims extracted from response.".to_string(),
            );
        }

        let reference = token_set(expected);
        let supported = claims
            .iter()
            .filter(|claim| {
                let tokens = tokenize(claim);
                if tokens.is_empty() {
                    return false;
                }
                let overlapping = tokens.iter().filter(|t| reference.contains(*t)).count();
                overlapping as f64 / tokens.len() as f64 >= SUPPORT_OVERLAP
            })
            .count();
        let score = supported as f64 / claims.len() as f64;

        let details = format!("{supported}/{} claims supported by expected output.", claims.len());
        single_metric_result(self.name(), score, self.threshold, details)
    }
}

#[cfg(test)]
#[allow(clippy::float_cmp)]
mod tests {
    use super::*;

    #[test]
    fn test_supported_claims_score_full() {
        let evaluator = FactualityEvaluator::default();
        let result = evaluator.evaluate(
            "Where is the Louvre?",
            "The Louvre museum is located in Paris.",
            Some("The Louvre museum is located in Paris, France."),
        );
        assert_eq!(result.score, 1.0);
        assert!(result.passed);
    }

    #[test]
    fn test_unsupported_claims_score_lower() {
        let evaluator = FactualityEvaluator::default();
        let result = evaluator.evaluate(
            "Where is the Louvre?",
            "The Louvre sits on the moon. Aliens built the galleries centuries ago.",
            Some("The Louvre museum is located in Paris, France."),
        );
        assert!(result.score < 0.8);
        assert!(!result.passed);
    }

    #[test]
    fn test_no_expected_output_skips() {
        let evaluator = FactualityEvaluator::default();
        let result = evaluator.evaluate("q", "Any answer at all works here.", None);
        assert_eq!(result.score, 1.0);
        assert!(result.passed);
    }

    #[test]
    fn test_blank_expected_output_skips() {
        let evaluator = FactualityEvaluator::default();
        let result = evaluator.evaluate("q", "Some answer text here.", Some("  "));
        assert_eq!(result.score, 1.0);
    }

    #[test]
    fn test_empty_output_scores_zero() {
        let evaluator = FactualityEvaluator::default();
        let result = evaluator.evaluate("q", "", Some("expected text"));
        assert_eq!(result.score, 0.0);
        assert!(!result.passed);
    }

    #[test]
    fn test_no_claims_scores_full() {
        // sentences under three words are not claims
        let evaluator = FactualityEvaluator::default();
        let result = evaluator.evaluate("q", "Yes. No.", Some("expected text"));
        assert_eq!(result.score, 1.0);
    }

    #[test]
    fn test_partial_support_ratio() {
        let evaluator = FactualityEvaluator::default();
        let result = evaluator.evaluate(
            "q",
            "Water boils at hundred degrees. Purple dragons guard the castle keep.",
            Some("Water boils at one hundred degrees celsius."),
        );
        assert!((result.score - 0.5).abs() < 1e-9);
    }

    #[test]
    fn test_custom_threshold() {
        let lenient = FactualityEvaluator::with_threshold(0.4);
        let result = lenient.evaluate(
            "q",
            "Water boils at hundred degrees. Purple dragons guard the castle keep.",
            Some("Water boils at one hundred degrees celsius."),
        );
        assert!(result.passed);
    }
}
