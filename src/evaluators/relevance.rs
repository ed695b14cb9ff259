//! Relevance scoring via term-frequency cosine similarity.

use crate::evaluators::{single_metric_result, Evaluator};
use crate::run::EvaluationResult;
use crate::text::{cosine_similarity, term_frequencies};

/// Default pass threshold for relevance.
pub const DEFAULT_RELEVANCE_THRESHOLD: f64 = 0.6;

/// Scores how lexically relevant an output is to the input query.
///
/// Builds lower-cased term-frequency vectors for input and output and
/// scores their cosine similarity. Either side being empty (or having
/// no meaningful tokens) scores `0.0`.
#[derive(Debug, Clone)]
pub struct RelevanceEvaluator {
    threshold: f64,
}

impl Default for RelevanceEvaluator {
    fn default() -> Self {
        Self {
            threshold: DEFAULT_RELEVANCE_THRESHOLD,
        }
    }
}

impl RelevanceEvaluator {
    /// Create an evaluator with a custom pass threshold.
    #[must_use]
    pub const fn with_threshold(threshold: f64) -> Self {
        Self { threshold }
    }
}

impl Evaluator for RelevanceEvaluator {
    fn name(&self) -> &'static str {
        "relevance"
    }

    fn evaluate(&self, input: &str, output: &str, _expected: Option<&str>) -> EvaluationResult {
        if input.trim().is_empty() || output.trim().is_empty() {
            return single_metric_result(
                self.name(),
                0.0,
                self.threshold,
                "Empty input or output, no relevance signal.".to_string(),
            );
        }

        let input_freqs = term_frequencies(input);
        let output_freqs = term_frequencies(output);
        let score = cosine_similarity(&input_freqs, &output_freqs);

        let details = format!(
            "Cosine similarity {score:.2} over {} input / {} output terms.",
            input_freqs.len(),
            output_freqs.len()
        );
        single_metric_result(self.name(), score, self.threshold, details)
    }
}
