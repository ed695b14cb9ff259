//! # Golden Eval
//!
//! Offline evaluation framework for LLM outputs: a panel of
//! deterministic evaluators scored against golden datasets, with
//! baseline snapshots and tolerance-banded regression detection.
//!
//! ## Core Thesis
//!
//! Model quality can be tracked like any other regression suite: score
//! every output with cheap, deterministic heuristics, snapshot the
//! per-metric averages as a baseline, and fail the build when a later
//! run drops below the baseline by more than a tolerance band. No
//! model-as-judge calls, no network, no flakiness.
//!
//! ## Architecture
//!
//! ```text
//! Golden Dataset (JSON, versioned)
//!        ↓
//! Model Client (offline, deterministic)
//!        ↓
//! Evaluator Panel (relevance, coherence, safety, ...)
//!        ↓
//! EvaluationRun (per-example results, aggregates)
//!        ↓
//! BaselineSnapshot (per-metric averages)
//!        ↓
//! RegressionReport (improved / regressed / unchanged)
//! ```

pub mod baseline;
pub mod config;
pub mod dataset;
pub mod evaluators;
pub mod metrics;
pub mod pipeline;
pub mod report;
pub mod run;
pub mod synthetic;
pub mod text;

pub use baseline::{
    BaselineError, BaselineSnapshot, RegressionDetector, RegressionReport, ScorePair,
    DEFAULT_TOLERANCE,
};
pub use config::{ConfigError, EvalSettings, EVALUATOR_NAMES};
pub use dataset::{DatasetError, DatasetStats, GoldenDataset, GoldenExample};
pub use evaluators::{
    default_panel, run_panel, CoherenceEvaluator, CompletenessEvaluator, ConcisenessEvaluator,
    ConsistencyEvaluator, CostEvaluator, Evaluator, FactualityEvaluator, HallucinationEvaluator,
    LatencyEvaluator, RelevanceEvaluator, SafetyEvaluator,
};
pub use metrics::MetricScore;
pub use pipeline::{
    CancelToken, EchoClient, EvaluationPipeline, FailureMode, ModelClient, ModelError,
    PipelineBuilder, PipelineError, StaticClient,
};
pub use report::{ComparisonReport, RunReport};
pub use run::{EvaluationResult, EvaluationRun};
pub use synthetic::{SyntheticError, SyntheticGenerator, SyntheticKind};
