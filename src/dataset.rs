//! Golden dataset model and JSON persistence.
//!
//! A golden dataset is an ordered, versioned collection of examples
//! with known-good expected outputs, used as ground truth for
//! evaluation runs.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::Path;
use thiserror::Error;

/// Errors that can occur while loading or validating datasets.
#[derive(Error, Debug)]
pub enum DatasetError {
    #[error("failed to read dataset file: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse dataset JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("dataset '{0}' contains no examples")]
    Empty(String),

    #[error("dataset '{0}' has a duplicate input at index {1}")]
    DuplicateInput(String, usize),
}

/// A single example in a golden dataset.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GoldenExample {
    /// Input prompt sent to the model.
    pub input: String,
    /// Known-good expected output.
    pub expected_output: String,
    /// Optional grounding context for the example.
    pub context: Option<String>,
    /// Free-form tags for filtering and reporting.
    #[serde(default)]
    pub tags: Vec<String>,
}

impl GoldenExample {
    /// Create an example without context or tags.
    #[must_use]
    pub fn new(input: impl Into<String>, expected_output: impl Into<String>) -> Self {
        Self {
            input: input.into(),
            expected_output: expected_output.into(),
            context: None,
            tags: Vec::new(),
        }
    }
}

/// A versioned collection of golden examples.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GoldenDataset {
    /// Dataset name, used for run and baseline identification.
    pub name: String,
    /// Dataset version string.
    #[serde(default = "default_version")]
    pub version: String,
    /// Ordered examples.
    pub examples: Vec<GoldenExample>,
}

fn default_version() -> String {
    "1.0.0".to_string()
}

/// Summary statistics for a dataset.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatasetStats {
    /// Number of examples.
    pub total_examples: usize,
    /// Examples carrying grounding context.
    pub with_context: usize,
    /// Examples carrying at least one tag.
    pub with_tags: usize,
    /// Mean word count of inputs.
    pub avg_input_words: f64,
}

impl GoldenDataset {
    /// Create a dataset with the default version.
    #[must_use]
    pub fn new(name: impl Into<String>, examples: Vec<GoldenExample>) -> Self {
        Self {
            name: name.into(),
            version: default_version(),
            examples,
        }
    }

    /// Load a dataset from a JSON file and validate it.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed, the
    /// dataset is empty, or an input appears twice.
    pub fn load(path: &Path) -> Result<Self, DatasetError> {
        let content = std::fs::read_to_string(path)?;
        let dataset: Self = serde_json::from_str(&content)?;
        dataset.validate()?;
        Ok(dataset)
    }

    /// Save the dataset to a JSON file.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization or the write fails.
    pub fn save(&self, path: &Path) -> Result<(), DatasetError> {
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)?;
        Ok(())
    }

    /// Validate structural invariants: non-empty, unique inputs.
    ///
    /// # Errors
    ///
    /// Returns an error naming the offending dataset and index.
    pub fn validate(&self) -> Result<(), DatasetError> {
        if self.examples.is_empty() {
            return Err(DatasetError::Empty(self.name.clone()));
        }
        let mut seen = HashSet::new();
        for (index, example) in self.examples.iter().enumerate() {
            if !seen.insert(example.input.as_str()) {
                return Err(DatasetError::DuplicateInput(self.name.clone(), index));
            }
        }
        Ok(())
    }

    /// Number of examples.
    #[must_use]
    pub fn len(&self) -> usize {
        self.examples.len()
    }

    /// Whether the dataset has no examples.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.examples.is_empty()
    }

    /// Compute summary statistics.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn stats(&self) -> DatasetStats {
        let total = self.examples.len();
        let input_words: usize = self
            .examples
            .iter()
            .map(|e| e.input.split_whitespace().count())
            .sum();
        DatasetStats {
            total_examples: total,
            with_context: self.examples.iter().filter(|e| e.context.is_some()).count(),
            with_tags: self.examples.iter().filter(|e| !e.tags.is_empty()).count(),
            avg_input_words: if total == 0 {
                0.0
            } else {
                input_words as f64 / total as f64
            },
        }
    }
}
