//! Coherence scoring: sentence structure, contradictions, repetition.

use crate::evaluators::{single_metric_result, Evaluator};
use crate::run::EvaluationResult;
use crate::text::split_sentences;
use std::collections::HashSet;

/// Default pass threshold for coherence.
pub const DEFAULT_COHERENCE_THRESHOLD: f64 = 0.7;

/// Penalty per sentence with fewer than three words.
const FRAGMENT_PENALTY: f64 = 0.15;
/// Penalty per opposite-term pair found in the output.
const CONTRADICTION_PENALTY: f64 = 0.10;
/// Flat penalty when the repetition ratio exceeds [`REPETITION_LIMIT`].
const REPETITION_PENALTY: f64 = 0.20;
/// Maximum tolerated `1 - distinct/total` sentence repetition ratio.
const REPETITION_LIMIT: f64 = 0.3;

/// Opposite-term pairs scanned as substrings of the lower-cased output.
const OPPOSITE_PAIRS: [(&str, &str); 6] = [
    (" is ", " is not "),
    (" are ", " are not "),
    (" can ", " cannot "),
    (" will ", " will not "),
    ("always", "never"),
    ("everything", "nothing"),
];

/// Scores the structural coherence of an output.
///
/// Starts at `1.0` and subtracts penalties for sentence fragments,
/// opposite-term contradictions, and heavy sentence repetition.
/// Empty output scores `0.0`.
#[derive(Debug, Clone)]
pub struct CoherenceEvaluator {
    threshold: f64,
}

impl Default for CoherenceEvaluator {
    fn default() -> Self {
        Self {
            threshold: DEFAULT_COHERENCE_THRESHOLD,
        }
    }
}

impl CoherenceEvaluator {
    /// Create an evaluator with a custom pass threshold.
    #[must_use]
    pub const fn with_threshold(threshold: f64) -> Self {
        Self { threshold }
    }
}

impl Evaluator for CoherenceEvaluator {
    fn name(&self) -> &'static str {
        "coherence"
    }

    #[allow(clippy::cast_precision_loss)]
    fn evaluate(&self, _input: &str, output: &str, _expected: Option<&str>) -> EvaluationResult {
        if output.trim().is_empty() {
            return single_metric_result(
                self.name(),
                0.0,
                self.threshold,
                "Empty response.".to_string(),
            );
        }

        let sentences = split_sentences(output);
        let fragments = sentences
            .iter()
            .filter(|s| s.split_whitespace().count() < 3)
            .count();

        let lower = output.to_lowercase();
        let contradictions = OPPOSITE_PAIRS
            .iter()
            .filter(|(term, opposite)| lower.contains(term) && lower.contains(opposite))
            .count();

        let repetitive = if sentences.len() >= 2 {
            let distinct: HashSet<String> = sentences.iter().map(|s| s.to_lowercase()).collect();
            let ratio = 1.0 - distinct.len() as f64 / sentences.len() as f64;
            ratio > REPETITION_LIMIT
        } else {
            false
        };

        let mut score = 1.0;
        score -= fragments as f64 * FRAGMENT_PENALTY;
        score -= contradictions as f64 * CONTRADICTION_PENALTY;
        if repetitive {
            score -= REPETITION_PENALTY;
        }

        let details = format!(
            "{} sentences, {fragments} fragment(s), {contradictions} contradiction(s){}.",
            sentences.len(),
            if repetitive { ", repetitive" } else { "" }
        );
        single_metric_result(self.name(), score, self.threshold, details)
    }
}

#[cfg(test)]
#[allow(clippy::float_cmp)]
mod tests {
    use super::*;

    #[test]
    fn test_coherent_text_scores_high() {
        let evaluator = CoherenceEvaluator::default();
        let result = evaluator.evaluate(
            "Explain gravity.",
            "Gravity is a fundamental force that attracts objects with mass. \
             It keeps planets in orbit around the sun.",
            None,
        );
        assert!(result.score >= 0.7);
        assert!(result.passed);
    }

    #[test]
    fn test_empty_output_scores_zero() {
        let evaluator = CoherenceEvaluator::default();
        let result = evaluator.evaluate("question", "", None);
        assert_eq!(result.score, 0.0);
        assert!(!result.passed);
    }

    #[test]
    fn test_contradiction_penalized() {
        let evaluator = CoherenceEvaluator::default();
        let clean = evaluator.evaluate("q", "The sky is blue today in the city.", None);
        let contradictory =
            evaluator.evaluate("q", "The sky is blue today. The sky is not blue today.", None);
        assert!(contradictory.score < clean.score);
    }

    #[test]
    fn test_fragments_penalized() {
        let evaluator = CoherenceEvaluator::default();
        let result = evaluator.evaluate("q", "Yes indeed. No. Maybe so. Sure thing now.", None);
        // two fragments under three words each cost 0.15
        assert!(result.score <= 0.7);
    }

    #[test]
    fn test_repetition_penalized() {
        let evaluator = CoherenceEvaluator::default();
        let repetitive = "The answer is yes. ".repeat(10);
        let result = evaluator.evaluate("q", &repetitive, None);
        assert!(result.score < 1.0);
    }

    #[test]
    fn test_single_sentence_skips_repetition_check() {
        let evaluator = CoherenceEvaluator::default();
        let result = evaluator.evaluate("q", "Water boils at one hundred degrees celsius.", None);
        assert_eq!(result.score, 1.0);
    }

    #[test]
    fn test_score_clamped_at_zero() {
        let evaluator = CoherenceEvaluator::default();
        let broken = "No. Bad. Sad. Mad. Odd. Off. Dim. Low. ".repeat(3);
        let result = evaluator.evaluate("q", &broken, None);
        assert!(result.score >= 0.0);
    }

    #[test]
    fn test_custom_threshold_affects_pass() {
        let strict = CoherenceEvaluator::with_threshold(0.99);
        let result = strict.evaluate("q", "Short answer. Yes.", None);
        assert!(!result.passed);
    }
}
