//! Evaluation pipeline: drives a model client over a golden dataset
//! and folds evaluator panels into an [`EvaluationRun`].

use crate::baseline::{BaselineSnapshot, RegressionDetector, RegressionReport, DEFAULT_TOLERANCE};
use crate::dataset::GoldenDataset;
use crate::evaluators::{run_panel, Evaluator};
use crate::run::EvaluationRun;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, info, warn};

/// Errors raised by pipeline construction and execution.
#[derive(Error, Debug)]
pub enum PipelineError {
    #[error("pipeline has no model client")]
    MissingClient,

    #[error("pipeline has no dataset")]
    MissingDataset,

    #[error("pipeline has an empty evaluator panel")]
    EmptyPanel,

    #[error("model client failed on input '{input}': {source}")]
    Client {
        input: String,
        #[source]
        source: ModelError,
    },
}

/// Error returned by a [`ModelClient`] for a single request.
#[derive(Error, Debug)]
#[error("{0}")]
pub struct ModelError(pub String);

/// Produces a model response for a single input.
///
/// Implementations are expected to be deterministic for offline
/// evaluation; anything nondeterministic makes runs incomparable.
pub trait ModelClient: Send + Sync {
    /// Produce a response for `input`.
    ///
    /// # Errors
    ///
    /// Returns an error when the underlying model cannot respond.
    fn respond(&self, input: &str) -> Result<String, ModelError>;
}

/// Test client that echoes the input back.
#[derive(Debug, Clone, Copy, Default)]
pub struct EchoClient;

impl ModelClient for EchoClient {
    fn respond(&self, input: &str) -> Result<String, ModelError> {
        Ok(input.to_string())
    }
}

/// Test client that returns the same canned response for every input.
#[derive(Debug, Clone)]
pub struct StaticClient {
    response: String,
}

impl StaticClient {
    /// Create a client that always answers with `response`.
    #[must_use]
    pub fn new(response: impl Into<String>) -> Self {
        Self {
            response: response.into(),
        }
    }
}

impl ModelClient for StaticClient {
    fn respond(&self, _input: &str) -> Result<String, ModelError> {
        Ok(self.response.clone())
    }
}

/// Cooperative cancellation handle shared between a pipeline run and
/// its caller.
#[derive(Debug, Clone, Default)]
pub struct CancelToken {
    cancelled: Arc<AtomicBool>,
}

impl CancelToken {
    /// Create a token in the not-cancelled state.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Request cancellation. Takes effect at the next example boundary.
    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::SeqCst);
    }

    /// Whether cancellation has been requested.
    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::SeqCst)
    }
}

/// How the pipeline reacts when the model client fails on an example.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FailureMode {
    /// Stop the run and surface the client error.
    #[default]
    Abort,
    /// Log the failure and continue with the remaining examples.
    Skip,
}

/// Builder for [`EvaluationPipeline`].
#[derive(Default)]
pub struct PipelineBuilder {
    client: Option<Box<dyn ModelClient>>,
    dataset: Option<GoldenDataset>,
    evaluators: Vec<Box<dyn Evaluator>>,
    baseline: Option<BaselineSnapshot>,
    tolerance: f64,
    failure_mode: FailureMode,
}

impl PipelineBuilder {
    /// Create an empty builder with the default regression tolerance.
    #[must_use]
    pub fn new() -> Self {
        Self {
            tolerance: DEFAULT_TOLERANCE,
            ..Self::default()
        }
    }

    /// Set the model client to evaluate.
    #[must_use]
    pub fn with_client(mut self, client: Box<dyn ModelClient>) -> Self {
        self.client = Some(client);
        self
    }

    /// Set the golden dataset to run over.
    #[must_use]
    pub fn with_dataset(mut self, dataset: GoldenDataset) -> Self {
        self.dataset = Some(dataset);
        self
    }

    /// Append an evaluator to the panel. Order is preserved.
    #[must_use]
    pub fn add_evaluator(mut self, evaluator: Box<dyn Evaluator>) -> Self {
        self.evaluators.push(evaluator);
        self
    }

    /// Attach a baseline for post-run regression comparison.
    #[must_use]
    pub fn with_baseline(mut self, baseline: BaselineSnapshot) -> Self {
        self.baseline = Some(baseline);
        self
    }

    /// Override the regression tolerance band.
    #[must_use]
    pub const fn with_tolerance(mut self, tolerance: f64) -> Self {
        self.tolerance = tolerance;
        self
    }

    /// Set how client failures are handled.
    #[must_use]
    pub const fn with_failure_mode(mut self, mode: FailureMode) -> Self {
        self.failure_mode = mode;
        self
    }

    /// Finalize the builder.
    ///
    /// # Errors
    ///
    /// Returns an error if the client or dataset is missing, or the
    /// evaluator panel is empty.
    pub fn build(self) -> Result<EvaluationPipeline, PipelineError> {
        let client = self.client.ok_or(PipelineError::MissingClient)?;
        let dataset = self.dataset.ok_or(PipelineError::MissingDataset)?;
        if self.evaluators.is_empty() {
            return Err(PipelineError::EmptyPanel);
        }
        Ok(EvaluationPipeline {
            client,
            dataset,
            evaluators: self.evaluators,
            baseline: self.baseline,
            tolerance: self.tolerance,
            failure_mode: self.failure_mode,
        })
    }
}

/// A fully configured evaluation pipeline.
pub struct EvaluationPipeline {
    client: Box<dyn ModelClient>,
    dataset: GoldenDataset,
    evaluators: Vec<Box<dyn Evaluator>>,
    baseline: Option<BaselineSnapshot>,
    tolerance: f64,
    failure_mode: FailureMode,
}

impl EvaluationPipeline {
    /// Start building a pipeline.
    #[must_use]
    pub fn builder() -> PipelineBuilder {
        PipelineBuilder::new()
    }

    /// Run every example through the client and the evaluator panel.
    ///
    /// Cancellation is checked before each example; a cancelled run
    /// stops early and returns the results collected so far, finalized.
    ///
    /// # Errors
    ///
    /// Returns an error on a client failure when the failure mode is
    /// [`FailureMode::Abort`].
    pub fn run(&self, cancel: &CancelToken) -> Result<EvaluationRun, PipelineError> {
        let total = self.dataset.len();
        info!(
            dataset = %self.dataset.name,
            examples = total,
            evaluators = self.evaluators.len(),
            "starting evaluation run"
        );

        let mut run = EvaluationRun::new(&self.dataset.name);

        for (index, example) in self.dataset.examples.iter().enumerate() {
            if cancel.is_cancelled() {
                warn!(completed = index, total, "run cancelled, returning partial run");
                break;
            }

            let output = match self.client.respond(&example.input) {
                Ok(output) => output,
                Err(source) => match self.failure_mode {
                    FailureMode::Abort => {
                        return Err(PipelineError::Client {
                            input: example.input.clone(),
                            source,
                        });
                    }
                    FailureMode::Skip => {
                        warn!(index, error = %source, "client failed, skipping example");
                        continue;
                    }
                },
            };

            let result = run_panel(
                &self.evaluators,
                &example.input,
                &output,
                Some(example.expected_output.as_str()),
            );
            debug!(index, score = result.score, passed = result.passed, "example evaluated");
            run.results.push(result);
        }

        run.finalize();
        info!(
            run_id = %run.run_id,
            aggregate = run.aggregate_score(),
            pass_rate = run.pass_rate(),
            "evaluation run complete"
        );
        Ok(run)
    }

    /// Run the pipeline, then compare against the attached baseline.
    /// Without a baseline the report is `None`.
    ///
    /// # Errors
    ///
    /// Propagates any error from [`Self::run`].
    pub fn run_against_baseline(
        &self,
        cancel: &CancelToken,
    ) -> Result<(EvaluationRun, Option<RegressionReport>), PipelineError> {
        let run = self.run(cancel)?;
        let report = self.baseline.as_ref().map(|baseline| {
            RegressionDetector::compare(baseline, &run.metric_averages(), self.tolerance)
        });
        Ok((run, report))
    }
}
