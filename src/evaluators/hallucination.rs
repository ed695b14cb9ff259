//! Hallucination detection via grounding-corpus token coverage.

use crate::evaluators::{single_metric_result, Evaluator};
use crate::run::EvaluationResult;
use crate::text::{token_set, tokenize};

/// Default pass threshold for hallucination grounding.
pub const DEFAULT_HALLUCINATION_THRESHOLD: f64 = 0.7;

/// Scores how grounded an output is in the input and expected output.
///
/// The grounding corpus is the concatenation of `input` and
/// `expected_output`; the score is the fraction of output tokens that
/// appear in the corpus token set. Empty output or an empty grounding
/// corpus scores `1.0` (nothing to hallucinate, nothing to check
/// against).
#[derive(Debug, Clone)]
pub struct HallucinationEvaluator {
    threshold: f64,
}

impl Default for HallucinationEvaluator {
    fn default() -> Self {
        Self {
            threshold: DEFAULT_HALLUCINATION_THRESHOLD,
        }
    }
}

impl HallucinationEvaluator {
    /// Create an evaluator with a custom pass threshold.
    #[must_use]
    pub const fn with_threshold(threshold: f64) -> Self {
        Self { threshold }
    }
}

impl Evaluator for HallucinationEvaluator {
    fn name(&self) -> &'static str {
        "hallucination"
    }

    #[allow(clippy::cast_precision_loss)]
    fn evaluate(&self, input: &str, output: &str, expected: Option<&str>) -> EvaluationResult {
        let output_tokens = tokenize(output);
        if output_tokens.is_empty() {
            return single_metric_result(
                self.name(),
                1.0,
                self.threshold,
                "Empty response, nothing to hallucinate.".to_string(),
            );
        }

        let corpus = format!("{input} {}", expected.unwrap_or_default());
        let grounding = token_set(&corpus);
        if grounding.is_empty() {
            return single_metric_result(
                self.name(),
                1.0,
                self.threshold,
                "No grounding corpus to check against.".to_string(),
            );
        }

        let grounded = output_tokens
            .iter()
            .filter(|t| grounding.contains(*t))
            .count();
        let score = grounded as f64 / output_tokens.len() as f64;

        let details = format!(
            "{grounded}/{} output tokens grounded in input and expected output.",
            output_tokens.len()
        );
        single_metric_result(self.name(), score, self.threshold, details)
    }
}

#[cfg(test)]
#[allow(clippy::float_cmp)]
mod tests {
    use super::*;

    #[test]
    fn test_fully_grounded_scores_full() {
        let evaluator = HallucinationEvaluator::default();
        let result = evaluator.evaluate(
            "The Eiffel Tower stands in Paris",
            "Eiffel Tower stands Paris",
            None,
        );
        assert_eq!(result.score, 1.0);
        assert!(result.passed);
    }

    #[test]
    fn test_ungrounded_content_scores_lower() {
        let evaluator = HallucinationEvaluator::default();
        let result = evaluator.evaluate(
            "Describe the Eiffel Tower",
            "The tower was painted green by Napoleon during the winter festival",
            None,
        );
        assert!(result.score < 0.7);
        assert!(!result.passed);
    }

    #[test]
    fn test_empty_output_scores_full() {
        let evaluator = HallucinationEvaluator::default();
        let result = evaluator.evaluate("anything", "", None);
        assert_eq!(result.score, 1.0);
        assert!(result.passed);
    }

    #[test]
    fn test_empty_grounding_corpus_scores_full() {
        let evaluator = HallucinationEvaluator::default();
        let result = evaluator.evaluate("", "some unverifiable claim here", None);
        assert_eq!(result.score, 1.0);
    }

    #[test]
    fn test_expected_output_extends_grounding() {
        let evaluator = HallucinationEvaluator::default();
        let without = evaluator.evaluate("the question", "answer mentions quantum physics", None);
        let with = evaluator.evaluate(
            "the question",
            "answer mentions quantum physics",
            Some("quantum physics answer"),
        );
        assert!(with.score > without.score);
    }

    #[test]
    fn test_half_grounded_ratio() {
        let evaluator = HallucinationEvaluator::default();
        let result = evaluator.evaluate("apple banana", "apple banana cherry mango", None);
        assert!((result.score - 0.5).abs() < 1e-9);
    }

    #[test]
    fn test_custom_threshold() {
        let lenient = HallucinationEvaluator::with_threshold(0.4);
        let result = lenient.evaluate("apple banana", "apple banana cherry mango", None);
        assert!(result.passed);
    }
}
