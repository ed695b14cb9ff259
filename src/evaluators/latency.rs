//! Latency scoring for pre-measured or wrapper-timed responses.

use crate::evaluators::{single_metric_result, Evaluator};
use crate::run::EvaluationResult;
use std::time::Instant;

/// Fixed pass threshold on the derived latency score.
pub const LATENCY_THRESHOLD: f64 = 0.5;

/// Default maximum acceptable response time in milliseconds.
pub const DEFAULT_MAX_LATENCY_MS: f64 = 5000.0;

/// Marker prefix for pre-measured latency embedded in the input.
const LATENCY_MARKER: &str = "[latency_ms:";

/// Scores response latency against an acceptable ceiling.
///
/// Latency arrives one of three ways: a `[latency_ms:N]` marker
/// embedded in the input, a timing wrapper around a caller-supplied
/// action, or a directly supplied elapsed value. At or under the
/// ceiling scores `1.0`, decaying linearly to `0` at twice the
/// ceiling. An input without a marker is treated as instantaneous.
#[derive(Debug, Clone)]
pub struct LatencyEvaluator {
    max_acceptable_ms: f64,
}

impl Default for LatencyEvaluator {
    fn default() -> Self {
        Self {
            max_acceptable_ms: DEFAULT_MAX_LATENCY_MS,
        }
    }
}

impl LatencyEvaluator {
    /// Create an evaluator with a custom latency ceiling.
    #[must_use]
    pub const fn with_max_ms(max_acceptable_ms: f64) -> Self {
        Self { max_acceptable_ms }
    }

    /// Score a pre-measured elapsed time in milliseconds.
    #[must_use]
    pub fn evaluate_elapsed(&self, elapsed_ms: f64) -> EvaluationResult {
        let score = if elapsed_ms <= self.max_acceptable_ms {
            1.0
        } else {
            1.0 - (elapsed_ms - self.max_acceptable_ms) / self.max_acceptable_ms
        };
        let details = format!(
            "Response took {elapsed_ms:.0}ms (ceiling {:.0}ms).",
            self.max_acceptable_ms
        );
        single_metric_result("latency", score, LATENCY_THRESHOLD, details)
    }

    /// Execute `action`, measure its wall-clock time, and score it.
    /// Returns the action's output alongside the result.
    pub fn evaluate_timed<F>(&self, action: F) -> (String, EvaluationResult)
    where
        F: FnOnce() -> String,
    {
        let start = Instant::now();
        let output = action();
        let elapsed_ms = start.elapsed().as_secs_f64() * 1000.0;
        (output, self.evaluate_elapsed(elapsed_ms))
    }

    /// Parse a `[latency_ms:N]` marker out of the input, if present.
    fn parse_marker(input: &str) -> Option<f64> {
        let start = input.find(LATENCY_MARKER)? + LATENCY_MARKER.len();
        let end = input[start..].find(']')? + start;
        input[start..end].trim().parse().ok()
    }
}

impl Evaluator for LatencyEvaluator {
    fn name(&self) -> &'static str {
        "latency"
    }

    fn evaluate(&self, input: &str, _output: &str, _expected: Option<&str>) -> EvaluationResult {
        let elapsed_ms = Self::parse_marker(input).unwrap_or(0.0);
        self.evaluate_elapsed(elapsed_ms)
    }
}

#[cfg(test)]
#[allow(clippy::float_cmp)]
mod tests {
    use super::*;

    #[test]
    fn test_under_ceiling_scores_full() {
        let evaluator = LatencyEvaluator::default();
        let result = evaluator.evaluate_elapsed(1200.0);
        assert_eq!(result.score, 1.0);
        assert!(result.passed);
    }

    #[test]
    fn test_at_ceiling_scores_full() {
        let evaluator = LatencyEvaluator::default();
        let result = evaluator.evaluate_elapsed(5000.0);
        assert_eq!(result.score, 1.0);
    }

    #[test]
    fn test_over_ceiling_decays() {
        let evaluator = LatencyEvaluator::default();
        let result = evaluator.evaluate_elapsed(7500.0);
        assert_eq!(result.score, 0.5);
        assert!(result.passed);
    }

    #[test]
    fn test_double_ceiling_scores_zero() {
        let evaluator = LatencyEvaluator::default();
        let result = evaluator.evaluate_elapsed(10_000.0);
        assert_eq!(result.score, 0.0);
        assert!(!result.passed);
    }

    #[test]
    fn test_marker_parsed_from_input() {
        let evaluator = LatencyEvaluator::default();
        let result = evaluator.evaluate("[latency_ms:7500] what is rust?", "an answer", None);
        assert_eq!(result.score, 0.5);
    }

    #[test]
    fn test_missing_marker_treated_as_instant() {
        let evaluator = LatencyEvaluator::default();
        let result = evaluator.evaluate("what is rust?", "an answer", None);
        assert_eq!(result.score, 1.0);
    }

    #[test]
    fn test_malformed_marker_ignored() {
        let evaluator = LatencyEvaluator::default();
        let result = evaluator.evaluate("[latency_ms:abc] question", "answer", None);
        assert_eq!(result.score, 1.0);
    }

    #[test]
    fn test_evaluate_timed_returns_output() {
        let evaluator = LatencyEvaluator::default();
        let (output, result) = evaluator.evaluate_timed(|| "computed".to_string());
        assert_eq!(output, "computed");
        assert_eq!(result.score, 1.0);
    }

    #[test]
    fn test_custom_ceiling() {
        let evaluator = LatencyEvaluator::with_max_ms(100.0);
        let result = evaluator.evaluate_elapsed(150.0);
        assert_eq!(result.score, 0.5);
    }

    #[test]
    fn test_metric_key() {
        let evaluator = LatencyEvaluator::default();
        let result = evaluator.evaluate_elapsed(10.0);
        assert!(result.metric_scores.contains_key("latency"));
    }
}
