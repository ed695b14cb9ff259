//! Evaluation result and run records.
//!
//! An [`EvaluationResult`] aggregates every evaluator's output for one
//! example. An [`EvaluationRun`] collects results across a dataset and
//! derives aggregate statistics on read. Both are immutable once a run
//! is finalized.

use crate::baseline::BaselineSnapshot;
use crate::metrics::MetricScore;
use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Per-example aggregate of every evaluator's output.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EvaluationResult {
    /// Overall score from 0.0 to 1.0.
    pub score: f64,
    /// Whether the evaluation passed every evaluator's threshold.
    pub passed: bool,
    /// Human-readable details about the evaluation.
    pub details: String,
    /// Individual metric scores keyed by metric name.
    pub metric_scores: BTreeMap<String, MetricScore>,
}

impl fmt::Display for EvaluationResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[{}] score={:.2} - {}",
            if self.passed { "PASS" } else { "FAIL" },
            self.score,
            self.details
        )
    }
}

/// A complete evaluation run with results, timing, and cost information.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EvaluationRun {
    /// Opaque identifier for this run.
    pub run_id: String,
    /// When the evaluation run started.
    pub started_at: DateTime<Utc>,
    /// When the evaluation completed. Unset until the run is finalized.
    pub completed_at: Option<DateTime<Utc>>,
    /// Name of the dataset that was evaluated.
    pub dataset_name: String,
    /// One result per dataset example, index-aligned with the dataset.
    pub results: Vec<EvaluationResult>,
    /// Total tokens consumed during the run, if tracked.
    pub total_tokens: Option<u64>,
    /// Estimated cost of the run in dollars, if tracked.
    pub estimated_cost: Option<f64>,
}

impl EvaluationRun {
    /// Start a new, empty run for the named dataset.
    #[must_use]
    pub fn new(dataset_name: impl Into<String>) -> Self {
        let dataset_name = dataset_name.into();
        let started_at = Utc::now();
        let run_id = format!(
            "{}-{}",
            dataset_name,
            started_at.format("%Y%m%dT%H%M%S%.3fZ")
        );
        Self {
            run_id,
            started_at,
            completed_at: None,
            dataset_name,
            results: Vec::new(),
            total_tokens: None,
            estimated_cost: None,
        }
    }

    /// Mark the run as complete. No results may be appended afterwards.
    pub fn finalize(&mut self) {
        if self.completed_at.is_none() {
            self.completed_at = Some(Utc::now());
        }
    }

    /// Wall-clock duration, available once the run is finalized.
    #[must_use]
    pub fn duration(&self) -> Option<Duration> {
        self.completed_at.map(|done| done - self.started_at)
    }

    /// Mean overall score across all examples. `0.0` for an empty run.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn aggregate_score(&self) -> f64 {
        if self.results.is_empty() {
            return 0.0;
        }
        self.results.iter().map(|r| r.score).sum::<f64>() / self.results.len() as f64
    }

    /// Fraction of results that passed. `0.0` for an empty run.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn pass_rate(&self) -> f64 {
        if self.results.is_empty() {
            return 0.0;
        }
        let passed = self.results.iter().filter(|r| r.passed).count();
        passed as f64 / self.results.len() as f64
    }

    /// Whether every individual evaluation passed.
    /// Vacuously true for an empty run.
    #[must_use]
    pub fn all_passed(&self) -> bool {
        self.results.iter().all(|r| r.passed)
    }

    /// Per-metric mean value, averaged over the results that contain
    /// each metric (a metric missing from some results contributes only
    /// where present).
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn metric_averages(&self) -> BTreeMap<String, f64> {
        let mut sums: BTreeMap<String, (f64, usize)> = BTreeMap::new();
        for result in &self.results {
            for (name, metric) in &result.metric_scores {
                let entry = sums.entry(name.clone()).or_insert((0.0, 0));
                entry.0 += metric.value;
                entry.1 += 1;
            }
        }
        sums.into_iter()
            .map(|(name, (sum, count))| (name, sum / count as f64))
            .collect()
    }

    /// Capture a baseline snapshot of this run's per-metric averages.
    #[must_use]
    pub fn to_baseline(&self) -> BaselineSnapshot {
        BaselineSnapshot {
            dataset_name: self.dataset_name.clone(),
            created_at: self.completed_at.unwrap_or_else(Utc::now),
            scores: self.metric_averages(),
            aggregate_score: self.aggregate_score(),
        }
    }
}
