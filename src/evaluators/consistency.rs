//! Consistency scoring: self-contradiction and numeric conflicts.

use crate::evaluators::{single_metric_result, Evaluator};
use crate::run::EvaluationResult;
use regex::Regex;
use std::collections::{HashMap, HashSet};
use std::sync::LazyLock;

/// Fixed pass threshold for consistency.
pub const CONSISTENCY_THRESHOLD: f64 = 0.5;

static NUMBER_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b\d+(?:\.\d+)?\b").expect("number regex is valid"));

/// Detects self-contradictions within an output.
///
/// Two signals: negated restatements (`X is Y` followed by
/// `X is not Y`, verbs limited to "is"/"are") and numeric conflicts
/// (the same entity word associated with two distinct numbers across
/// sentences). Zero contradictions score `1.0`, one scores `0.5`, two
/// or more score `0.0`. Empty output scores `1.0`.
#[derive(Debug, Clone, Default)]
pub struct ConsistencyEvaluator;

impl ConsistencyEvaluator {
    /// Create a consistency evaluator.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

fn words_of(sentence: &str) -> Vec<&str> {
    sentence
        .split([' ', ',', ';', ':', '(', ')', '"', '\''])
        .filter(|w| !w.is_empty())
        .collect()
}

fn are_contradictory(a: &str, b: &str) -> bool {
    let words_a = words_of(a);
    let words_b = words_of(b);

    for i in 0..words_a.len().saturating_sub(2) {
        let verb = words_a[i + 1];
        if !verb.eq_ignore_ascii_case("is") && !verb.eq_ignore_ascii_case("are") {
            continue;
        }
        let subject = words_a[i];
        let predicate = words_a[i + 2];

        for k in 0..words_b.len().saturating_sub(3) {
            if words_b[k].eq_ignore_ascii_case(subject)
                && words_b[k + 1].eq_ignore_ascii_case(verb)
                && words_b[k + 2].eq_ignore_ascii_case("not")
                && words_b[k + 3].eq_ignore_ascii_case(predicate)
            {
                return true;
            }
        }
    }
    false
}

fn negation_contradictions(sentences: &[String]) -> usize {
    let mut count = 0;
    for i in 0..sentences.len() {
        for j in i + 1..sentences.len() {
            if are_contradictory(&sentences[i], &sentences[j]) {
                count += 1;
            }
        }
    }
    count
}

fn numeric_inconsistencies(sentences: &[String]) -> usize {
    let mut entity_numbers: HashMap<String, HashSet<String>> = HashMap::new();

    for sentence in sentences {
        for m in NUMBER_PATTERN.find_iter(sentence) {
            let preceding = words_of(&sentence[..m.start()])
                .into_iter()
                .rev()
                .find(|w| w.chars().count() > 2 && w.parse::<f64>().is_err());
            let Some(entity) = preceding else { continue };

            entity_numbers
                .entry(entity.to_lowercase())
                .or_default()
                .insert(m.as_str().to_string());
        }
    }

    entity_numbers.values().filter(|nums| nums.len() > 1).count()
}

impl Evaluator for ConsistencyEvaluator {
    fn name(&self) -> &'static str {
        "consistency"
    }

    fn evaluate(&self, _input: &str, output: &str, _expected: Option<&str>) -> EvaluationResult {
        if output.trim().is_empty() {
            return single_metric_result(
                self.name(),
                1.0,
                CONSISTENCY_THRESHOLD,
                "Empty response, no contradictions possible.".to_string(),
            );
        }

        let sentences: Vec<String> = crate::text::split_sentences(output)
            .into_iter()
            .filter(|s| s.chars().count() > 3)
            .collect();

        let contradictions = negation_contradictions(&sentences) + numeric_inconsistencies(&sentences);
        let score = match contradictions {
            0 => 1.0,
            1 => 0.5,
            _ => 0.0,
        };

        let details = if contradictions == 0 {
            "No contradictions detected.".to_string()
        } else {
            format!(
                "{contradictions} contradiction(s) detected in {} sentences.",
                sentences.len()
            )
        };
        single_metric_result(self.name(), score, CONSISTENCY_THRESHOLD, details)
    }
}
