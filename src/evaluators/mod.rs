//! The evaluator panel: independent, deterministic, offline scoring
//! strategies.
//!
//! Every evaluator is a pure, total function over
//! `(input, output, expected_output)`: any well-typed input yields a
//! well-formed [`EvaluationResult`], never a panic or an error. No
//! evaluator performs I/O, reads the clock, or calls a model.
//!
//! Each evaluator owns exactly one metric key; the panel runner merges
//! metric maps relying on that key uniqueness.

mod coherence;
mod completeness;
mod conciseness;
mod consistency;
mod cost;
mod factuality;
mod hallucination;
mod latency;
mod relevance;
mod safety;

pub use coherence::CoherenceEvaluator;
pub use completeness::CompletenessEvaluator;
pub use conciseness::ConcisenessEvaluator;
pub use consistency::ConsistencyEvaluator;
pub use cost::CostEvaluator;
pub use factuality::FactualityEvaluator;
pub use hallucination::HallucinationEvaluator;
pub use latency::LatencyEvaluator;
pub use relevance::RelevanceEvaluator;
pub use safety::SafetyEvaluator;

use crate::metrics::MetricScore;
use crate::run::EvaluationResult;
use crate::text::clamp_score;
use std::collections::BTreeMap;

/// A pure scoring strategy mapping `(input, output, expected_output?)`
/// to a normalized result.
pub trait Evaluator: Send + Sync {
    /// Metric name owned by this evaluator.
    fn name(&self) -> &'static str;

    /// Score a single model output. Must be deterministic and total.
    fn evaluate(
        &self,
        input: &str,
        output: &str,
        expected_output: Option<&str>,
    ) -> EvaluationResult;
}

/// Build a single-metric result, clamping the score into `[0, 1]`.
pub(crate) fn single_metric_result(
    name: &'static str,
    score: f64,
    threshold: f64,
    details: String,
) -> EvaluationResult {
    let score = clamp_score(score);
    let mut metric_scores = BTreeMap::new();
    metric_scores.insert(
        name.to_string(),
        MetricScore::with_threshold(name, score, threshold),
    );
    EvaluationResult {
        score,
        passed: score >= threshold,
        details,
        metric_scores,
    }
}

/// Run every evaluator in the panel over one example and merge the
/// outputs into a single result.
///
/// Overall score is the arithmetic mean of the evaluators' own scores;
/// overall `passed` is the logical AND of every evaluator's verdict;
/// details are joined with `"; "`; metric maps are unioned. Supplying
/// an empty panel is a caller error; the merged result degrades to
/// score `0.0` with a vacuously true pass flag.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn run_panel(
    evaluators: &[Box<dyn Evaluator>],
    input: &str,
    output: &str,
    expected_output: Option<&str>,
) -> EvaluationResult {
    let mut total_score = 0.0;
    let mut all_passed = true;
    let mut details = Vec::new();
    let mut metric_scores = BTreeMap::new();

    for evaluator in evaluators {
        let result = evaluator.evaluate(input, output, expected_output);
        total_score += result.score;
        all_passed &= result.passed;
        if !result.details.is_empty() {
            details.push(result.details);
        }
        metric_scores.extend(result.metric_scores);
    }

    let score = if evaluators.is_empty() {
        0.0
    } else {
        total_score / evaluators.len() as f64
    };

    EvaluationResult {
        score,
        passed: all_passed,
        details: details.join("; "),
        metric_scores,
    }
}

/// The full ten-evaluator panel with default thresholds.
#[must_use]
pub fn default_panel() -> Vec<Box<dyn Evaluator>> {
    vec![
        Box::new(RelevanceEvaluator::default()),
        Box::new(CoherenceEvaluator::default()),
        Box::new(SafetyEvaluator::default()),
        Box::new(HallucinationEvaluator::default()),
        Box::new(FactualityEvaluator::default()),
        Box::new(CompletenessEvaluator::default()),
        Box::new(ConcisenessEvaluator::default()),
        Box::new(ConsistencyEvaluator::default()),
        Box::new(CostEvaluator::default()),
        Box::new(LatencyEvaluator::default()),
    ]
}
