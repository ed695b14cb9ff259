//! Metric primitives and aggregation helpers.
//!
//! A [`MetricScore`] is a single named, thresholded score in `[0, 1]`.
//! Aggregation helpers combine a slice of metric scores into weighted
//! averages, minimums, and pass rates.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A single metric measurement with a normalized score between 0 and 1.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetricScore {
    /// Name of the metric (e.g., "relevance", "coherence").
    pub name: String,
    /// Normalized score value between 0.0 and 1.0.
    pub value: f64,
    /// Optional pass/fail threshold. When absent, the metric always passes.
    pub threshold: Option<f64>,
    /// Weight used when aggregating multiple scores.
    #[serde(default = "default_weight")]
    pub weight: f64,
}

const fn default_weight() -> f64 {
    1.0
}

impl MetricScore {
    /// Create a metric score without a threshold.
    #[must_use]
    pub fn new(name: impl Into<String>, value: f64) -> Self {
        Self {
            name: name.into(),
            value,
            threshold: None,
            weight: 1.0,
        }
    }

    /// Create a metric score with a pass/fail threshold.
    #[must_use]
    pub fn with_threshold(name: impl Into<String>, value: f64, threshold: f64) -> Self {
        Self {
            name: name.into(),
            value,
            threshold: Some(threshold),
            weight: 1.0,
        }
    }

    /// Whether the score meets or exceeds the threshold.
    /// True when no threshold is set.
    #[must_use]
    pub fn passed(&self) -> bool {
        self.threshold.is_none_or(|t| self.value >= t)
    }
}

impl fmt::Display for MetricScore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.threshold {
            Some(t) => write!(
                f,
                "{}={:.2} (threshold={:.2}, {})",
                self.name,
                self.value,
                t,
                if self.passed() { "PASS" } else { "FAIL" }
            ),
            None => write!(f, "{}={:.2}", self.name, self.value),
        }
    }
}

/// Weighted average of metric values. Returns `0.0` for an empty slice
/// or when all weights are zero.
#[must_use]
pub fn weighted_average(scores: &[MetricScore]) -> f64 {
    if scores.is_empty() {
        return 0.0;
    }

    let mut weighted_sum = 0.0;
    let mut total_weight = 0.0;
    for score in scores {
        weighted_sum += score.value * score.weight;
        total_weight += score.weight;
    }

    if total_weight < f64::EPSILON {
        return 0.0;
    }
    weighted_sum / total_weight
}

/// Minimum metric value across the slice. Returns `0.0` for an empty slice.
#[must_use]
pub fn minimum(scores: &[MetricScore]) -> f64 {
    scores
        .iter()
        .map(|s| s.value)
        .fold(None, |min: Option<f64>, v| {
            Some(min.map_or(v, |m| m.min(v)))
        })
        .unwrap_or(0.0)
}

/// Fraction of scores that passed their threshold.
/// Returns `0.0` for an empty slice.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn pass_rate(scores: &[MetricScore]) -> f64 {
    if scores.is_empty() {
        return 0.0;
    }
    let passed = scores.iter().filter(|s| s.passed()).count();
    passed as f64 / scores.len() as f64
}

#[cfg(test)]
#[allow(clippy::float_cmp, clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_passed_without_threshold() {
        let score = MetricScore::new("relevance", 0.1);
        assert!(score.passed());
    }

    #[test]
    fn test_passed_at_threshold_boundary() {
        let score = MetricScore::with_threshold("relevance", 0.6, 0.6);
        assert!(score.passed());

        let below = MetricScore::with_threshold("relevance", 0.59, 0.6);
        assert!(!below.passed());
    }

    #[test]
    fn test_display_with_threshold() {
        let score = MetricScore::with_threshold("safety", 0.85, 0.9);
        let text = score.to_string();
        assert!(text.contains("safety=0.85"));
        assert!(text.contains("FAIL"));
    }

    #[test]
    fn test_display_without_threshold() {
        let score = MetricScore::new("cost", 1.0);
        assert_eq!(score.to_string(), "cost=1.00");
    }

    #[test]
    fn test_weighted_average_empty() {
        assert_eq!(weighted_average(&[]), 0.0);
    }

    #[test]
    fn test_weighted_average_uniform_weights() {
        let scores = vec![
            MetricScore::new("a", 0.5),
            MetricScore::new("b", 0.7),
            MetricScore::new("c", 0.9),
        ];
        assert!((weighted_average(&scores) - 0.7).abs() < 1e-9);
    }

    #[test]
    fn test_weighted_average_respects_weights() {
        let mut heavy = MetricScore::new("heavy", 1.0);
        heavy.weight = 3.0;
        let light = MetricScore::new("light", 0.0);
        // (1.0 * 3 + 0.0 * 1) / 4 = 0.75
        assert!((weighted_average(&[heavy, light]) - 0.75).abs() < 1e-9);
    }

    #[test]
    fn test_weighted_average_zero_weights() {
        let mut a = MetricScore::new("a", 0.8);
        a.weight = 0.0;
        assert_eq!(weighted_average(&[a]), 0.0);
    }

    #[test]
    fn test_minimum_empty() {
        assert_eq!(minimum(&[]), 0.0);
    }

    #[test]
    fn test_minimum_finds_lowest() {
        let scores = vec![
            MetricScore::new("a", 0.9),
            MetricScore::new("b", 0.2),
            MetricScore::new("c", 0.5),
        ];
        assert_eq!(minimum(&scores), 0.2);
    }

    #[test]
    fn test_pass_rate_empty() {
        assert_eq!(pass_rate(&[]), 0.0);
    }

    #[test]
    fn test_pass_rate_mixed() {
        let scores = vec![
            MetricScore::with_threshold("a", 0.9, 0.5),
            MetricScore::with_threshold("b", 0.3, 0.5),
            MetricScore::new("c", 0.0),
        ];
        // two of three pass (b fails, c has no threshold)
        assert!((pass_rate(&scores) - 2.0 / 3.0).abs() < 1e-9);
    }

    #[test]
    fn test_serde_round_trip() {
        let score = MetricScore::with_threshold("hallucination", 0.72, 0.7);
        let json = serde_json::to_string(&score).unwrap();
        let back: MetricScore = serde_json::from_str(&json).unwrap();
        assert_eq!(back, score);
    }

    #[test]
    fn test_serde_default_weight() {
        let json = r#"{"name":"relevance","value":0.8,"threshold":null}"#;
        let score: MetricScore = serde_json::from_str(json).unwrap();
        assert_eq!(score.weight, 1.0);
    }
}
