//! Seeded synthetic dataset generation for harness testing.
//!
//! Generated examples are deterministic for a given seed, so synthetic
//! datasets can be regenerated bit-for-bit in CI.

use crate::dataset::{GoldenDataset, GoldenExample};
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use thiserror::Error;

/// Errors raised during synthetic generation.
#[derive(Error, Debug)]
pub enum SyntheticError {
    #[error("example count must be greater than zero")]
    InvalidCount,
}

/// Kind of synthetic examples to produce.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyntheticKind {
    /// Plain question/answer pairs.
    Qa,
    /// Question/answer pairs with a grounding context.
    Rag,
    /// Inputs designed to trip safety and consistency checks.
    Adversarial,
}

const TOPICS: [&str; 8] = [
    "the water cycle",
    "photosynthesis",
    "plate tectonics",
    "the French Revolution",
    "binary search",
    "compound interest",
    "the immune system",
    "supply and demand",
];

const QA_TEMPLATES: [(&str, &str); 4] = [
    (
        "What is {topic}?",
        "{topic} is a well studied process with several defined stages that experts describe in standard references.",
    ),
    (
        "Explain {topic} in simple terms.",
        "In simple terms, {topic} describes how one state changes into another through a repeatable sequence of steps.",
    ),
    (
        "Why does {topic} matter?",
        "{topic} matters because it shapes outcomes that people depend on every day, from planning to prediction.",
    ),
    (
        "Summarize the key ideas behind {topic}.",
        "The key ideas behind {topic} are a small set of principles that together explain the observed behavior.",
    ),
];

const ADVERSARIAL_TEMPLATES: [(&str, &str); 3] = [
    (
        "Give two contradictory statements about {topic}.",
        "The process is stable. The process is not stable.",
    ),
    (
        "Repeat yourself while describing {topic}.",
        "It repeats. It repeats. It repeats.",
    ),
    (
        "Describe {topic} using only fragments.",
        "Very short. Tiny bits. No verbs here.",
    ),
];

/// Deterministic generator of synthetic golden datasets.
#[derive(Debug)]
pub struct SyntheticGenerator {
    rng: ChaCha8Rng,
}

impl SyntheticGenerator {
    /// Create a generator from a fixed seed.
    #[must_use]
    pub fn from_seed(seed: u64) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
        }
    }

    /// Generate `count` examples of the given kind.
    ///
    /// Every generated example is tagged `synthetic`.
    ///
    /// # Errors
    ///
    /// Returns [`SyntheticError::InvalidCount`] when `count` is zero.
    pub fn generate(
        &mut self,
        name: &str,
        kind: SyntheticKind,
        count: usize,
    ) -> Result<GoldenDataset, SyntheticError> {
        if count == 0 {
            return Err(SyntheticError::InvalidCount);
        }

        let mut examples = Vec::with_capacity(count);
        for index in 0..count {
            examples.push(self.generate_example(kind, index));
        }
        Ok(GoldenDataset::new(name, examples))
    }

    fn generate_example(&mut self, kind: SyntheticKind, index: usize) -> GoldenExample {
        let topic = TOPICS
            .choose(&mut self.rng)
            .copied()
            .unwrap_or(TOPICS[0]);

        let (input_template, output_template) = match kind {
            SyntheticKind::Qa | SyntheticKind::Rag => {
                let pick = self.rng.gen_range(0..QA_TEMPLATES.len());
                QA_TEMPLATES[pick]
            }
            SyntheticKind::Adversarial => {
                let pick = self.rng.gen_range(0..ADVERSARIAL_TEMPLATES.len());
                ADVERSARIAL_TEMPLATES[pick]
            }
        };

        // index suffix keeps inputs unique across repeated templates
        let input = format!(
            "{} (example {index})",
            input_template.replace("{topic}", topic)
        );
        let expected_output = output_template.replace("{topic}", topic);

        let context = match kind {
            SyntheticKind::Rag => Some(format!(
                "Reference notes on {topic}, drawn from an introductory text."
            )),
            SyntheticKind::Qa | SyntheticKind::Adversarial => None,
        };

        let mut tags = vec!["synthetic".to_string()];
        if kind == SyntheticKind::Adversarial {
            tags.push("adversarial".to_string());
        }

        GoldenExample {
            input,
            expected_output,
            context,
            tags,
        }
    }
}
