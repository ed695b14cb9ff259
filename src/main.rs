//! Golden Eval CLI
//!
//! Offline LLM-output evaluation: golden datasets, deterministic
//! evaluator panels, baseline snapshots, regression gates.

use anyhow::Context;
use clap::{Parser, Subcommand, ValueEnum};
use golden_eval::{
    BaselineSnapshot, CancelToken, ComparisonReport, EvalSettings, EvaluationPipeline,
    EvaluationRun, GoldenDataset, ModelClient, ModelError, RegressionDetector, RunReport,
    SyntheticGenerator, SyntheticKind,
};
use std::collections::HashMap;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "golden-eval")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum ReportFormat {
    Text,
    Markdown,
    Json,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum GenerateKind {
    Qa,
    Rag,
    Adversarial,
}

impl From<GenerateKind> for SyntheticKind {
    fn from(kind: GenerateKind) -> Self {
        match kind {
            GenerateKind::Qa => Self::Qa,
            GenerateKind::Rag => Self::Rag,
            GenerateKind::Adversarial => Self::Adversarial,
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Evaluate recorded model outputs against a golden dataset
    Evaluate {
        /// Golden dataset file (JSON)
        #[arg(long)]
        dataset: PathBuf,

        /// Recorded model outputs, a JSON map of input to output
        #[arg(long)]
        outputs: PathBuf,

        /// Evaluation settings file (YAML)
        #[arg(long)]
        settings: Option<PathBuf>,

        /// Baseline snapshot to compare against
        #[arg(long)]
        baseline: Option<PathBuf>,

        /// Write the finished run to this file (JSON)
        #[arg(long)]
        save_run: Option<PathBuf>,

        /// Capture the run as a new baseline at this path
        #[arg(long)]
        save_baseline: Option<PathBuf>,

        /// Report format
        #[arg(long, value_enum, default_value = "text")]
        format: ReportFormat,
    },

    /// Compare a saved run against a baseline snapshot
    Compare {
        /// Saved run file (JSON)
        #[arg(long)]
        run: PathBuf,

        /// Baseline snapshot file (JSON)
        #[arg(long)]
        baseline: PathBuf,

        /// Regression tolerance band
        #[arg(long, default_value_t = golden_eval::DEFAULT_TOLERANCE)]
        tolerance: f64,

        /// Report format
        #[arg(long, value_enum, default_value = "text")]
        format: ReportFormat,
    },

    /// Capture a baseline snapshot from a saved run
    Baseline {
        /// Saved run file (JSON)
        #[arg(long)]
        run: PathBuf,

        /// Output baseline file (JSON)
        #[arg(long)]
        output: PathBuf,
    },

    /// Show dataset statistics
    DatasetStats {
        /// Golden dataset file (JSON)
        #[arg(long)]
        dataset: PathBuf,
    },

    /// Generate a synthetic golden dataset
    Generate {
        /// Dataset name
        #[arg(long)]
        name: String,

        /// Kind of examples to generate
        #[arg(long, value_enum, default_value = "qa")]
        kind: GenerateKind,

        /// Number of examples
        #[arg(long, default_value_t = 20)]
        count: usize,

        /// Generation seed
        #[arg(long, default_value_t = 42)]
        seed: u64,

        /// Output dataset file (JSON)
        #[arg(long)]
        output: PathBuf,
    },
}

/// Client that replays recorded outputs keyed by input.
struct ReplayClient {
    outputs: HashMap<String, String>,
}

impl ModelClient for ReplayClient {
    fn respond(&self, input: &str) -> Result<String, ModelError> {
        self.outputs
            .get(input)
            .cloned()
            .ok_or_else(|| ModelError(format!("no recorded output for input '{input}'")))
    }
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    if cli.verbose {
        tracing::info!("Verbose mode enabled");
    }

    if let Err(e) = run(cli.command) {
        eprintln!("Error: {e:#}");
        std::process::exit(1);
    }
}

#[allow(clippy::too_many_lines)]
fn run(command: Commands) -> anyhow::Result<()> {
    match command {
        Commands::Evaluate {
            dataset,
            outputs,
            settings,
            baseline,
            save_run,
            save_baseline,
            format,
        } => {
            let dataset = GoldenDataset::load(&dataset)
                .with_context(|| format!("loading dataset {}", dataset.display()))?;

            let recorded = std::fs::read_to_string(&outputs)
                .with_context(|| format!("reading outputs {}", outputs.display()))?;
            let recorded: HashMap<String, String> =
                serde_json::from_str(&recorded).context("parsing outputs JSON")?;

            let settings = match settings {
                Some(path) => EvalSettings::load(&path)
                    .with_context(|| format!("loading settings {}", path.display()))?,
                None => EvalSettings::default(),
            };

            let mut builder = EvaluationPipeline::builder()
                .with_client(Box::new(ReplayClient { outputs: recorded }))
                .with_dataset(dataset)
                .with_tolerance(settings.tolerance);
            for evaluator in settings.build_panel()? {
                builder = builder.add_evaluator(evaluator);
            }
            if let Some(path) = &baseline {
                let snapshot = BaselineSnapshot::load(path)
                    .with_context(|| format!("loading baseline {}", path.display()))?;
                builder = builder.with_baseline(snapshot);
            }

            let pipeline = builder.build()?;
            let (run, comparison) = pipeline.run_against_baseline(&CancelToken::new())?;

            print_run(&run, format)?;
            if let Some(report) = &comparison {
                print_comparison(report, format)?;
            }

            if let Some(path) = save_run {
                let json = serde_json::to_string_pretty(&run)?;
                std::fs::write(&path, json)
                    .with_context(|| format!("writing run {}", path.display()))?;
                println!("Run saved to {}", path.display());
            }
            if let Some(path) = save_baseline {
                run.to_baseline().save(&path)?;
                println!("Baseline saved to {}", path.display());
            }

            if comparison.is_some_and(|r| r.has_regressions()) {
                std::process::exit(1);
            }
        }
        Commands::Compare {
            run,
            baseline,
            tolerance,
            format,
        } => {
            let content = std::fs::read_to_string(&run)
                .with_context(|| format!("reading run {}", run.display()))?;
            let run: EvaluationRun = serde_json::from_str(&content).context("parsing run JSON")?;
            let baseline = BaselineSnapshot::load(&baseline)?;

            let report =
                RegressionDetector::compare(&baseline, &run.metric_averages(), tolerance);
            print_comparison(&report, format)?;

            if report.has_regressions() {
                std::process::exit(1);
            }
        }
        Commands::Baseline { run, output } => {
            let content = std::fs::read_to_string(&run)
                .with_context(|| format!("reading run {}", run.display()))?;
            let run: EvaluationRun = serde_json::from_str(&content).context("parsing run JSON")?;

            run.to_baseline().save(&output)?;
            println!("Baseline saved to {}", output.display());
        }
        Commands::DatasetStats { dataset } => {
            let dataset = GoldenDataset::load(&dataset)?;
            let stats = dataset.stats();
            println!("Dataset Statistics");
            println!("==================");
            println!("Name: {} (v{})", dataset.name, dataset.version);
            println!("Total examples: {}", stats.total_examples);
            println!("With context: {}", stats.with_context);
            println!("With tags: {}", stats.with_tags);
            println!("Avg input words: {:.1}", stats.avg_input_words);
        }
        Commands::Generate {
            name,
            kind,
            count,
            seed,
            output,
        } => {
            let mut generator = SyntheticGenerator::from_seed(seed);
            let dataset = generator.generate(&name, kind.into(), count)?;
            dataset.save(&output)?;
            println!(
                "Generated {} examples into {}",
                dataset.len(),
                output.display()
            );
        }
    }
    Ok(())
}

fn print_run(run: &EvaluationRun, format: ReportFormat) -> anyhow::Result<()> {
    let report = RunReport::new(run);
    match format {
        ReportFormat::Text => print!("{}", report.to_text()),
        ReportFormat::Markdown => print!("{}", report.to_markdown()),
        ReportFormat::Json => println!("{}", report.to_json()?),
    }
    Ok(())
}

fn print_comparison(
    report: &golden_eval::RegressionReport,
    format: ReportFormat,
) -> anyhow::Result<()> {
    let rendered = ComparisonReport::new(report);
    match format {
        ReportFormat::Text => print!("{}", rendered.to_text()),
        ReportFormat::Markdown => print!("{}", rendered.to_markdown()),
        ReportFormat::Json => println!("{}", rendered.to_json()?),
    }
    Ok(())
}
