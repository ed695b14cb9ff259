//! Completeness scoring: are all parts of a multi-part question answered?

use crate::evaluators::{single_metric_result, Evaluator};
use crate::run::EvaluationResult;

/// Fixed pass threshold for completeness.
pub const COMPLETENESS_THRESHOLD: f64 = 0.5;

/// Checks whether every detected topic in the input is addressed by
/// the output.
///
/// Topics are question sentences, numbered list items, or (as a
/// fallback) clauses split on `" and "`. A topic counts as addressed
/// when any of its keywords (words longer than three characters)
/// appears in the output. No detectable topics scores `1.0`; an empty
/// output with topics scores `0.0`.
#[derive(Debug, Clone, Default)]
pub struct CompletenessEvaluator;

impl CompletenessEvaluator {
    /// Create a completeness evaluator.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

fn extract_topics(input: &str) -> Vec<String> {
    let mut topics = Vec::new();

    // Question sentences: track which terminator ended each sentence.
    let mut current = String::new();
    for c in input.chars() {
        match c {
            '?' => {
                let sentence = current.trim();
                if !sentence.is_empty() {
                    topics.push(sentence.to_string());
                }
                current.clear();
            }
            '.' | '!' => current.clear(),
            _ => current.push(c),
        }
    }

    // Numbered list items ("1. xxx", "12. xxx").
    for line in input.lines() {
        let trimmed = line.trim_start();
        let digits = trimmed.chars().take_while(char::is_ascii_digit).count();
        if digits == 0 || digits > 2 {
            continue;
        }
        let rest = &trimmed[digits..];
        if let Some(content) = rest.strip_prefix('.') {
            let content = content.trim().trim_end_matches(['?', '.', '!']).trim();
            if !content.is_empty()
                && !topics
                    .iter()
                    .any(|t| t.to_lowercase().contains(&content.to_lowercase()))
            {
                topics.push(content.to_string());
            }
        }
    }

    // Fallback: a single question joined with "and".
    if topics.is_empty() && input.contains('?') {
        let parts: Vec<&str> = input.split(" and ").collect();
        if parts.len() > 1 {
            topics.extend(
                parts
                    .iter()
                    .map(|p| p.trim().trim_end_matches('?').trim())
                    .filter(|p| p.chars().count() > 3)
                    .map(String::from),
            );
        }
    }

    topics
}

fn topic_keywords(topic: &str) -> Vec<String> {
    topic
        .split_whitespace()
        .filter(|w| w.chars().count() > 3)
        .map(str::to_lowercase)
        .collect()
}

impl Evaluator for CompletenessEvaluator {
    fn name(&self) -> &'static str {
        "completeness"
    }

    #[allow(clippy::cast_precision_loss)]
    fn evaluate(&self, input: &str, output: &str, _expected: Option<&str>) -> EvaluationResult {
        if input.trim().is_empty() {
            return single_metric_result(
                self.name(),
                1.0,
                COMPLETENESS_THRESHOLD,
                "No input, nothing to check.".to_string(),
            );
        }

        let topics = extract_topics(input);
        if topics.is_empty() {
            return single_metric_result(
                self.name(),
                1.0,
                COMPLETENESS_THRESHOLD,
                "No question markers detected in input.".to_string(),
            );
        }

        if output.trim().is_empty() {
            return single_metric_result(
                self.name(),
                0.0,
                COMPLETENESS_THRESHOLD,
                format!("Empty response but {} topic(s) detected.", topics.len()),
            );
        }

        let output_lower = output.to_lowercase();
        let addressed = topics
            .iter()
            .filter(|topic| {
                let keywords = topic_keywords(topic);
                keywords.is_empty() || keywords.iter().any(|k| output_lower.contains(k))
            })
            .count();

        let score = addressed as f64 / topics.len() as f64;
        let details = format!("{addressed}/{} topics addressed in response.", topics.len());
        single_metric_result(self.name(), score, COMPLETENESS_THRESHOLD, details)
    }
}

#[cfg(test)]
#[allow(clippy::float_cmp)]
mod tests {
    use super::*;

    #[test]
    fn test_all_questions_addressed() {
        let evaluator = CompletenessEvaluator::new();
        let result = evaluator.evaluate(
            "What is the capital of France? What currency does it use?",
            "The capital of France is Paris and the currency is the euro.",
            None,
        );
        assert_eq!(result.score, 1.0);
        assert!(result.passed);
    }

    #[test]
    fn test_partially_addressed() {
        let evaluator = CompletenessEvaluator::new();
        let result = evaluator.evaluate(
            "What is the capital of France? What currency does Japan use?",
            "The capital of France is Paris.",
            None,
        );
        assert!(result.score < 1.0);
    }

    #[test]
    fn test_no_topics_scores_full() {
        let evaluator = CompletenessEvaluator::new();
        let result = evaluator.evaluate(
            "The weather was nice today.",
            "Indeed it was pleasant.",
            None,
        );
        assert_eq!(result.score, 1.0);
    }

    #[test]
    fn test_empty_input_scores_full() {
        let evaluator = CompletenessEvaluator::new();
        let result = evaluator.evaluate("", "some answer", None);
        assert_eq!(result.score, 1.0);
    }

    #[test]
    fn test_empty_output_with_topics_scores_zero() {
        let evaluator = CompletenessEvaluator::new();
        let result = evaluator.evaluate("What color is the ocean?", "", None);
        assert_eq!(result.score, 0.0);
        assert!(!result.passed);
    }

    #[test]
    fn test_numbered_list_topics() {
        let evaluator = CompletenessEvaluator::new();
        let input = "Please cover:\n1. pricing details\n2. shipping options";
        let result = evaluator.evaluate(
            input,
            "Our pricing starts at ten dollars. Shipping takes two days.",
            None,
        );
        assert_eq!(result.score, 1.0);
    }

    #[test]
    fn test_multi_part_question_single_topic() {
        // a question joined with "and" still ends in '?', so it is one topic
        let evaluator = CompletenessEvaluator::new();
        let result = evaluator.evaluate(
            "Tell me about pricing and about shipping?",
            "Pricing starts at ten dollars.",
            None,
        );
        assert_eq!(result.score, 1.0);
    }

    #[test]
    fn test_and_fallback_split() {
        // no question sentence is detected, so clauses split on " and "
        let topics = extract_topics("? pricing options and shipping times");
        assert_eq!(topics.len(), 2);
    }

    #[test]
    fn test_extract_topics_question_sentences() {
        let topics = extract_topics("This is a statement. What about taxes? Fine.");
        assert_eq!(topics, vec!["What about taxes"]);
    }

    #[test]
    fn test_extract_topics_numbered_items_deduped() {
        let topics = extract_topics("What about shipping costs?\n1. shipping costs");
        // the list item is contained in the question topic already
        assert_eq!(topics.len(), 1);
    }
}
