//! Demo: golden-eval library in action
use golden_eval::{
    default_panel, CancelToken, ComparisonReport, EvaluationPipeline, GoldenDataset,
    GoldenExample, ModelClient, ModelError, RegressionDetector, RunReport, DEFAULT_TOLERANCE,
};

/// Simulated model with canned answers of varying quality.
struct DemoModel {
    degraded: bool,
}

impl ModelClient for DemoModel {
    fn respond(&self, input: &str) -> Result<String, ModelError> {
        if self.degraded {
            return Ok("Something vague that answers nothing in particular.".to_string());
        }
        let answer = match input {
            "What is the capital of France?" => "The capital of France is Paris.",
            "How does photosynthesis work?" => {
                "Photosynthesis converts sunlight, water, and carbon dioxide into glucose and oxygen."
            }
            _ => "I do not know.",
        };
        Ok(answer.to_string())
    }
}

fn main() {
    println!("=== Golden Eval Demo ===\n");

    // 1. Build a small golden dataset
    let dataset = GoldenDataset::new(
        "demo-faq",
        vec![
            GoldenExample::new(
                "What is the capital of France?",
                "The capital of France is Paris.",
            ),
            GoldenExample::new(
                "How does photosynthesis work?",
                "Photosynthesis converts sunlight, water, and carbon dioxide into glucose and oxygen.",
            ),
        ],
    );

    // 2. Evaluate the healthy model and capture a baseline
    println!("📊 Evaluating the healthy model...\n");
    let run = evaluate(DemoModel { degraded: false }, dataset.clone());
    print!("{}", RunReport::new(&run).to_text());
    let baseline = run.to_baseline();

    // 3. Evaluate a degraded model against the baseline
    println!("\n📉 Evaluating a degraded model against the baseline...\n");
    let degraded_run = evaluate(DemoModel { degraded: true }, dataset);
    let report = RegressionDetector::compare(
        &baseline,
        &degraded_run.metric_averages(),
        DEFAULT_TOLERANCE,
    );
    print!("{}", ComparisonReport::new(&report).to_text());

    println!(
        "\nVerdict: {}",
        if report.has_regressions() {
            "regressions detected, gate would fail"
        } else {
            "no regressions"
        }
    );
}

fn evaluate(model: DemoModel, dataset: GoldenDataset) -> golden_eval::EvaluationRun {
    let mut builder = EvaluationPipeline::builder()
        .with_client(Box::new(model))
        .with_dataset(dataset);
    for evaluator in default_panel() {
        builder = builder.add_evaluator(evaluator);
    }
    let pipeline = builder.build().expect("demo pipeline is complete");
    pipeline.run(&CancelToken::new()).expect("demo run succeeds")
}
