//! Report rendering for evaluation runs and regression comparisons.
//!
//! Three output formats: plain text tables for terminals, markdown for
//! CI artifacts, and pretty JSON for downstream tooling.

use crate::baseline::RegressionReport;
use crate::run::EvaluationRun;
use std::fmt::Write as FmtWrite;
use tabled::{Table, Tabled};

/// Table row for per-metric averages.
#[derive(Tabled)]
struct MetricTableRow {
    #[tabled(rename = "Metric")]
    metric: String,
    #[tabled(rename = "Average")]
    average: String,
}

/// Table row for regression comparison output.
#[derive(Tabled)]
struct RegressionTableRow {
    #[tabled(rename = "Metric")]
    metric: String,
    #[tabled(rename = "Baseline")]
    baseline: String,
    #[tabled(rename = "Current")]
    current: String,
    #[tabled(rename = "Delta")]
    delta: String,
    #[tabled(rename = "Status")]
    status: String,
}

/// Renders an [`EvaluationRun`] in the supported output formats.
pub struct RunReport<'a> {
    run: &'a EvaluationRun,
}

impl<'a> RunReport<'a> {
    /// Wrap a run for rendering.
    #[must_use]
    pub const fn new(run: &'a EvaluationRun) -> Self {
        Self { run }
    }

    /// Render as pretty JSON.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self.run)
    }

    /// Render as a plain text table.
    #[must_use]
    pub fn to_text(&self) -> String {
        let mut output = String::new();

        writeln!(output, "EVALUATION RUN  {}", self.run.run_id).ok();
        writeln!(
            output,
            "───────────────────────────────────────────────────────────────"
        )
        .ok();
        writeln!(output, "  Dataset:         {}", self.run.dataset_name).ok();
        writeln!(output, "  Examples:        {}", self.run.results.len()).ok();
        writeln!(
            output,
            "  Aggregate Score: {:.3}",
            self.run.aggregate_score()
        )
        .ok();
        writeln!(
            output,
            "  Pass Rate:       {:.1}%",
            self.run.pass_rate() * 100.0
        )
        .ok();
        if let Some(duration) = self.run.duration() {
            writeln!(output, "  Duration:        {}ms", duration.num_milliseconds()).ok();
        }
        writeln!(output).ok();

        let table = Table::new(self.metric_rows()).to_string();
        writeln!(output, "{table}").ok();

        output
    }

    /// Render as markdown.
    #[must_use]
    pub fn to_markdown(&self) -> String {
        let mut output = String::new();

        writeln!(output, "# Evaluation Run: {}", self.run.run_id).ok();
        writeln!(output).ok();
        writeln!(
            output,
            "**Started:** {}",
            self.run.started_at.format("%Y-%m-%d %H:%M:%S UTC")
        )
        .ok();
        writeln!(output, "**Dataset:** {}", self.run.dataset_name).ok();
        writeln!(output).ok();

        writeln!(output, "## Summary").ok();
        writeln!(output).ok();
        writeln!(output, "| Metric | Value |").ok();
        writeln!(output, "|--------|-------|").ok();
        writeln!(output, "| Examples | {} |", self.run.results.len()).ok();
        writeln!(
            output,
            "| Aggregate Score | {:.3} |",
            self.run.aggregate_score()
        )
        .ok();
        writeln!(
            output,
            "| Pass Rate | {:.1}% |",
            self.run.pass_rate() * 100.0
        )
        .ok();
        writeln!(
            output,
            "| All Passed | {} |",
            if self.run.all_passed() { "Yes" } else { "No" }
        )
        .ok();
        writeln!(output).ok();

        writeln!(output, "## Metric Averages").ok();
        writeln!(output).ok();
        writeln!(output, "| Metric | Average |").ok();
        writeln!(output, "|--------|---------|").ok();
        for (name, value) in self.run.metric_averages() {
            writeln!(output, "| {name} | {value:.3} |").ok();
        }

        output
    }

    fn metric_rows(&self) -> Vec<MetricTableRow> {
        self.run
            .metric_averages()
            .into_iter()
            .map(|(metric, average)| MetricTableRow {
                metric,
                average: format!("{average:.3}"),
            })
            .collect()
    }
}

/// Renders a [`RegressionReport`] in the supported output formats.
pub struct ComparisonReport<'a> {
    report: &'a RegressionReport,
}

impl<'a> ComparisonReport<'a> {
    /// Wrap a regression report for rendering.
    #[must_use]
    pub const fn new(report: &'a RegressionReport) -> Self {
        Self { report }
    }

    /// Render as pretty JSON.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self.report)
    }

    /// Render as a plain text table.
    #[must_use]
    pub fn to_text(&self) -> String {
        let mut output = String::new();

        writeln!(output, "BASELINE COMPARISON").ok();
        writeln!(
            output,
            "───────────────────────────────────────────────────────────────"
        )
        .ok();
        writeln!(output, "  Tolerance:  ±{:.3}", self.report.tolerance).ok();
        writeln!(output, "  Improved:   {}", self.report.improved.len()).ok();
        writeln!(output, "  Regressed:  {}", self.report.regressed.len()).ok();
        writeln!(output, "  Unchanged:  {}", self.report.unchanged.len()).ok();
        writeln!(
            output,
            "  Verdict:    {}",
            if self.report.overall_passed() {
                "PASS"
            } else {
                "REGRESSED"
            }
        )
        .ok();
        writeln!(output).ok();

        let table = Table::new(self.rows()).to_string();
        writeln!(output, "{table}").ok();

        output
    }

    /// Render as markdown.
    #[must_use]
    pub fn to_markdown(&self) -> String {
        let mut output = String::new();

        writeln!(output, "# Baseline Comparison").ok();
        writeln!(output).ok();
        writeln!(output, "**Tolerance:** ±{:.3}", self.report.tolerance).ok();
        writeln!(
            output,
            "**Verdict:** {}",
            if self.report.overall_passed() {
                "PASS"
            } else {
                "REGRESSED"
            }
        )
        .ok();
        writeln!(output).ok();

        writeln!(output, "| Metric | Baseline | Current | Delta | Status |").ok();
        writeln!(output, "|--------|----------|---------|-------|--------|").ok();
        for row in self.rows() {
            writeln!(
                output,
                "| {} | {} | {} | {} | {} |",
                row.metric, row.baseline, row.current, row.delta, row.status
            )
            .ok();
        }

        output
    }

    fn rows(&self) -> Vec<RegressionTableRow> {
        let mut rows = Vec::new();
        for (status, pairs) in [
            ("regressed", &self.report.regressed),
            ("improved", &self.report.improved),
            ("unchanged", &self.report.unchanged),
        ] {
            for (metric, pair) in pairs {
                rows.push(RegressionTableRow {
                    metric: metric.clone(),
                    baseline: format!("{:.3}", pair.baseline),
                    current: format!("{:.3}", pair.current),
                    delta: format!("{:+.3}", pair.current - pair.baseline),
                    status: status.to_string(),
                });
            }
        }
        rows
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::baseline::{BaselineSnapshot, RegressionDetector, DEFAULT_TOLERANCE};
    use crate::evaluators::{default_panel, run_panel};
    use crate::run::EvaluationRun;
    use chrono::Utc;
    use std::collections::BTreeMap;

    fn sample_run() -> EvaluationRun {
        let mut run = EvaluationRun::new("report-test");
        let panel = default_panel();
        run.results.push(run_panel(
            &panel,
            "What is the capital of France?",
            "The capital of France is Paris.",
            Some("Paris is the capital of France."),
        ));
        run.finalize();
        run
    }

    fn sample_comparison() -> RegressionReport {
        let run = sample_run();
        let mut scores = BTreeMap::new();
        scores.insert("relevance".to_string(), 0.99);
        scores.insert("ghost_metric".to_string(), 0.5);
        let baseline = BaselineSnapshot {
            dataset_name: "report-test".to_string(),
            created_at: Utc::now(),
            scores,
            aggregate_score: 0.9,
        };
        RegressionDetector::compare(&baseline, &run.metric_averages(), DEFAULT_TOLERANCE)
    }

    #[test]
    fn test_run_text_contains_summary() {
        let run = sample_run();
        let text = RunReport::new(&run).to_text();
        assert!(text.contains("EVALUATION RUN"));
        assert!(text.contains("report-test"));
        assert!(text.contains("Aggregate Score"));
    }

    #[test]
    fn test_run_markdown_lists_metrics() {
        let run = sample_run();
        let markdown = RunReport::new(&run).to_markdown();
        assert!(markdown.contains("# Evaluation Run"));
        assert!(markdown.contains("| relevance |"));
        assert!(markdown.contains("| safety |"));
    }

    #[test]
    fn test_run_json_round_trips() {
        let run = sample_run();
        let json = RunReport::new(&run).to_json().unwrap();
        let parsed: EvaluationRun = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, run);
    }

    #[test]
    fn test_comparison_text_has_verdict() {
        let report = sample_comparison();
        let text = ComparisonReport::new(&report).to_text();
        assert!(text.contains("BASELINE COMPARISON"));
        // ghost_metric vanished from current scores, so the run regressed
        assert!(text.contains("REGRESSED"));
    }

    #[test]
    fn test_comparison_markdown_rows() {
        let report = sample_comparison();
        let markdown = ComparisonReport::new(&report).to_markdown();
        assert!(markdown.contains("| ghost_metric |"));
        assert!(markdown.contains("regressed"));
    }

    #[test]
    fn test_comparison_json_serializes() {
        let report = sample_comparison();
        let json = ComparisonReport::new(&report).to_json().unwrap();
        assert!(json.contains("tolerance"));
    }
}
