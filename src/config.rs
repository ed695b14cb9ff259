//! YAML settings for evaluation runs.
//!
//! Settings select which evaluators sit on the panel, override the
//! thresholds that are configurable, and carry run-level knobs like
//! the regression tolerance and the synthetic-data seed.

use crate::baseline::DEFAULT_TOLERANCE;
use crate::evaluators::{
    CoherenceEvaluator, CompletenessEvaluator, ConcisenessEvaluator, ConsistencyEvaluator,
    CostEvaluator, Evaluator, FactualityEvaluator, HallucinationEvaluator, LatencyEvaluator,
    RelevanceEvaluator, SafetyEvaluator,
};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;
use thiserror::Error;

/// Errors that can occur during settings loading and validation.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to read settings file: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse YAML settings: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("unknown evaluator: {0}")]
    UnknownEvaluator(String),

    #[error("threshold for '{0}' is not configurable")]
    FixedThreshold(String),

    #[error("threshold for '{name}' must be in [0, 1], got {value}")]
    InvalidThreshold { name: String, value: f64 },

    #[error("tolerance must be in [0, 1], got {0}")]
    InvalidTolerance(f64),
}

/// Every evaluator name the panel knows.
pub const EVALUATOR_NAMES: [&str; 10] = [
    "relevance",
    "coherence",
    "safety",
    "hallucination",
    "factuality",
    "completeness",
    "conciseness",
    "consistency",
    "cost",
    "latency",
];

/// Evaluators whose pass threshold can be overridden in settings.
const CONFIGURABLE_THRESHOLDS: [&str; 5] = [
    "relevance",
    "coherence",
    "safety",
    "hallucination",
    "factuality",
];

/// Run-level settings loaded from YAML.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct EvalSettings {
    /// Evaluators to put on the panel, in order.
    #[serde(default = "default_evaluators")]
    pub evaluators: Vec<String>,
    /// Threshold overrides, keyed by evaluator name.
    #[serde(default)]
    pub thresholds: BTreeMap<String, f64>,
    /// Regression tolerance band.
    #[serde(default = "default_tolerance")]
    pub tolerance: f64,
    /// Seed for synthetic dataset generation.
    #[serde(default = "default_seed")]
    pub seed: u64,
}

fn default_evaluators() -> Vec<String> {
    EVALUATOR_NAMES.iter().map(ToString::to_string).collect()
}
const fn default_tolerance() -> f64 {
    DEFAULT_TOLERANCE
}
const fn default_seed() -> u64 {
    42
}

impl Default for EvalSettings {
    fn default() -> Self {
        Self {
            evaluators: default_evaluators(),
            thresholds: BTreeMap::new(),
            tolerance: default_tolerance(),
            seed: default_seed(),
        }
    }
}

impl EvalSettings {
    /// Load settings from a YAML file and validate them.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed, or the
    /// settings are invalid.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_yaml(&content)
    }

    /// Parse settings from a YAML string and validate them.
    ///
    /// # Errors
    ///
    /// Returns an error if the YAML cannot be parsed or the settings
    /// are invalid.
    pub fn from_yaml(yaml: &str) -> Result<Self, ConfigError> {
        let settings: Self = serde_yaml::from_str(yaml)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Validate evaluator names, threshold overrides, and tolerance.
    ///
    /// # Errors
    ///
    /// Returns the first violation found.
    pub fn validate(&self) -> Result<(), ConfigError> {
        for name in &self.evaluators {
            if !EVALUATOR_NAMES.contains(&name.as_str()) {
                return Err(ConfigError::UnknownEvaluator(name.clone()));
            }
        }
        for (name, value) in &self.thresholds {
            if !EVALUATOR_NAMES.contains(&name.as_str()) {
                return Err(ConfigError::UnknownEvaluator(name.clone()));
            }
            if !CONFIGURABLE_THRESHOLDS.contains(&name.as_str()) {
                return Err(ConfigError::FixedThreshold(name.clone()));
            }
            if !(0.0..=1.0).contains(value) {
                return Err(ConfigError::InvalidThreshold {
                    name: name.clone(),
                    value: *value,
                });
            }
        }
        if !(0.0..=1.0).contains(&self.tolerance) {
            return Err(ConfigError::InvalidTolerance(self.tolerance));
        }
        Ok(())
    }

    /// Build the configured evaluator panel, in the configured order.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::UnknownEvaluator`] for an unrecognized
    /// name.
    pub fn build_panel(&self) -> Result<Vec<Box<dyn Evaluator>>, ConfigError> {
        self.evaluators
            .iter()
            .map(|name| self.build_evaluator(name))
            .collect()
    }

    fn build_evaluator(&self, name: &str) -> Result<Box<dyn Evaluator>, ConfigError> {
        let threshold = self.thresholds.get(name).copied();
        let evaluator: Box<dyn Evaluator> = match name {
            "relevance" => match threshold {
                Some(t) => Box::new(RelevanceEvaluator::with_threshold(t)),
                None => Box::new(RelevanceEvaluator::default()),
            },
            "coherence" => match threshold {
                Some(t) => Box::new(CoherenceEvaluator::with_threshold(t)),
                None => Box::new(CoherenceEvaluator::default()),
            },
            "safety" => match threshold {
                Some(t) => Box::new(SafetyEvaluator::with_threshold(t)),
                None => Box::new(SafetyEvaluator::default()),
            },
            "hallucination" => match threshold {
                Some(t) => Box::new(HallucinationEvaluator::with_threshold(t)),
                None => Box::new(HallucinationEvaluator::default()),
            },
            "factuality" => match threshold {
                Some(t) => Box::new(FactualityEvaluator::with_threshold(t)),
                None => Box::new(FactualityEvaluator::default()),
            },
            "completeness" => Box::new(CompletenessEvaluator::new()),
            "conciseness" => Box::new(ConcisenessEvaluator::default()),
            "consistency" => Box::new(ConsistencyEvaluator::new()),
            "cost" => Box::new(CostEvaluator::default()),
            "latency" => Box::new(LatencyEvaluator::default()),
            other => return Err(ConfigError::UnknownEvaluator(other.to_string())),
        };
        Ok(evaluator)
    }
}
