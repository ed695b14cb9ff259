//! Cost scoring: estimated token spend against a per-response budget.

use crate::evaluators::{single_metric_result, Evaluator};
use crate::run::EvaluationResult;
use crate::text::word_count;

/// Fixed pass threshold for cost.
pub const COST_THRESHOLD: f64 = 0.5;

/// Default maximum acceptable cost per response, in dollars.
pub const DEFAULT_COST_BUDGET: f64 = 0.01;
/// Default cost per 1K tokens, in dollars.
pub const DEFAULT_TOKEN_COST_RATE: f64 = 0.002;

/// Tokens estimated per word.
const TOKENS_PER_WORD: f64 = 1.3;

/// Scores cost-effectiveness of a response from its estimated token
/// usage.
///
/// Tokens are estimated as `word_count * 1.3`; cost as
/// `(tokens / 1000) * token_cost_rate`. At or under budget scores
/// `1.0`, then decays linearly to `0` at twice the budget. Empty
/// output costs nothing and scores `1.0`.
#[derive(Debug, Clone)]
pub struct CostEvaluator {
    max_cost_per_response: f64,
    token_cost_rate: f64,
}

impl Default for CostEvaluator {
    fn default() -> Self {
        Self {
            max_cost_per_response: DEFAULT_COST_BUDGET,
            token_cost_rate: DEFAULT_TOKEN_COST_RATE,
        }
    }
}

impl CostEvaluator {
    /// Create an evaluator with a custom budget and token rate.
    #[must_use]
    pub const fn with_budget(max_cost_per_response: f64, token_cost_rate: f64) -> Self {
        Self {
            max_cost_per_response,
            token_cost_rate,
        }
    }
}

impl Evaluator for CostEvaluator {
    fn name(&self) -> &'static str {
        "cost"
    }

    #[allow(clippy::cast_precision_loss)]
    fn evaluate(&self, _input: &str, output: &str, _expected: Option<&str>) -> EvaluationResult {
        if output.trim().is_empty() {
            return single_metric_result(
                self.name(),
                1.0,
                COST_THRESHOLD,
                "Empty response, no cost.".to_string(),
            );
        }

        let estimated_tokens = word_count(output) as f64 * TOKENS_PER_WORD;
        let estimated_cost = (estimated_tokens / 1000.0) * self.token_cost_rate;

        let score = if estimated_cost <= self.max_cost_per_response {
            1.0
        } else {
            1.0 - (estimated_cost - self.max_cost_per_response) / self.max_cost_per_response
        };

        let details = format!(
            "Estimated {estimated_tokens:.0} tokens, cost ${estimated_cost:.4} (budget ${:.4}).",
            self.max_cost_per_response
        );
        single_metric_result(self.name(), score, COST_THRESHOLD, details)
    }
}
