//! Baseline snapshots and regression detection.
//!
//! A [`BaselineSnapshot`] freezes a run's per-metric average scores.
//! [`RegressionDetector::compare`] classifies each baseline metric as
//! improved, regressed, or unchanged within an absolute tolerance band.
//! A metric missing from the current scores is always a regression to
//! `0.0`, never "unchanged".

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;
use thiserror::Error;

/// Default tolerance band for regression classification.
pub const DEFAULT_TOLERANCE: f64 = 0.05;

/// Errors that can occur while persisting or loading baselines.
#[derive(Error, Debug)]
pub enum BaselineError {
    #[error("failed to read baseline file: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse baseline JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// A named capture of per-metric average scores from a completed run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BaselineSnapshot {
    /// Name of the dataset the baseline was captured from.
    pub dataset_name: String,
    /// When the snapshot was created.
    pub created_at: DateTime<Utc>,
    /// Per-metric average score, keyed by metric name.
    pub scores: BTreeMap<String, f64>,
    /// Mean overall score across the run's examples.
    pub aggregate_score: f64,
}

impl BaselineSnapshot {
    /// Load a snapshot from a JSON file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn load(path: &Path) -> Result<Self, BaselineError> {
        let content = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&content)?)
    }

    /// Save the snapshot to a JSON file.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization or the write fails.
    pub fn save(&self, path: &Path) -> Result<(), BaselineError> {
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)?;
        Ok(())
    }
}

/// Baseline and current value for a single metric.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScorePair {
    /// Value recorded in the baseline.
    pub baseline: f64,
    /// Value observed in the current run.
    pub current: f64,
}

/// Classification of every baseline metric against current scores.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegressionReport {
    /// Metrics that improved beyond the tolerance.
    pub improved: BTreeMap<String, ScorePair>,
    /// Metrics that regressed beyond the tolerance.
    pub regressed: BTreeMap<String, ScorePair>,
    /// Metrics that stayed within the tolerance band.
    pub unchanged: BTreeMap<String, ScorePair>,
    /// The absolute tolerance used for comparison.
    pub tolerance: f64,
}

impl RegressionReport {
    /// Whether any metric regressed beyond tolerance.
    #[must_use]
    pub fn has_regressions(&self) -> bool {
        !self.regressed.is_empty()
    }

    /// True when no regressions were detected.
    #[must_use]
    pub fn overall_passed(&self) -> bool {
        self.regressed.is_empty()
    }
}

/// Compares current metric scores against a baseline snapshot.
#[derive(Debug, Clone, Copy)]
pub struct RegressionDetector {
    /// Absolute score-unit tolerance band. Defaults to 0.05.
    pub tolerance: f64,
}

impl Default for RegressionDetector {
    fn default() -> Self {
        Self {
            tolerance: DEFAULT_TOLERANCE,
        }
    }
}

impl RegressionDetector {
    /// Create a detector with a custom tolerance band.
    #[must_use]
    pub const fn with_tolerance(tolerance: f64) -> Self {
        Self { tolerance }
    }

    /// Whether any metric dropped below the baseline by more than the
    /// configured tolerance.
    #[must_use]
    pub fn has_regression(
        &self,
        baseline: &BaselineSnapshot,
        current_scores: &BTreeMap<String, f64>,
    ) -> bool {
        !Self::compare(baseline, current_scores, self.tolerance).overall_passed()
    }

    /// Classify every metric in the baseline against `current_scores`.
    ///
    /// The comparison is driven entirely by the baseline's metric set:
    /// metrics present only in `current_scores` are ignored, and a
    /// metric absent from `current_scores` is recorded as a regression
    /// with current value `0.0`.
    #[must_use]
    pub fn compare(
        baseline: &BaselineSnapshot,
        current_scores: &BTreeMap<String, f64>,
        tolerance: f64,
    ) -> RegressionReport {
        let mut improved = BTreeMap::new();
        let mut regressed = BTreeMap::new();
        let mut unchanged = BTreeMap::new();

        for (metric, &baseline_value) in &baseline.scores {
            let Some(&current_value) = current_scores.get(metric) else {
                // Missing metric is the worst possible outcome.
                regressed.insert(
                    metric.clone(),
                    ScorePair {
                        baseline: baseline_value,
                        current: 0.0,
                    },
                );
                continue;
            };

            let pair = ScorePair {
                baseline: baseline_value,
                current: current_value,
            };
            let delta = current_value - baseline_value;
            if delta < -tolerance {
                regressed.insert(metric.clone(), pair);
            } else if delta > tolerance {
                improved.insert(metric.clone(), pair);
            } else {
                unchanged.insert(metric.clone(), pair);
            }
        }

        RegressionReport {
            improved,
            regressed,
            unchanged,
            tolerance,
        }
    }
}
