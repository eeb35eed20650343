//! Label Encoder
//!
//! Maps family name strings to dense integer classes. Classes are the
//! lexicographically sorted unique labels, so with the standard family set
//! `benign` encodes to 0.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use super::artifacts::ArtifactError;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LabelEncoder {
    /// Sorted unique class labels; index is the encoded value
    pub classes: Vec<String>,
}

impl LabelEncoder {
    /// Fit from a label column
    pub fn fit<S: AsRef<str>>(labels: &[S]) -> Self {
        let mut classes: Vec<String> = labels
            .iter()
            .map(|l| l.as_ref().to_string())
            .collect::<HashSet<_>>()
            .into_iter()
            .collect();
        classes.sort();
        Self { classes }
    }

    /// Encode a label to its class index
    pub fn encode(&self, label: &str) -> Option<usize> {
        self.classes.iter().position(|c| c == label)
    }

    /// Decode a class index back to its label
    pub fn decode(&self, index: usize) -> Option<&str> {
        self.classes.get(index).map(|s| s.as_str())
    }

    /// Number of classes
    pub fn len(&self) -> usize {
        self.classes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.classes.is_empty()
    }

    pub fn validate(&self) -> Result<(), ArtifactError> {
        if self.classes.is_empty() {
            return Err(ArtifactError::Invalid {
                model: "label encoder",
                reason: "no classes".to_string(),
            });
        }
        let unique: HashSet<&String> = self.classes.iter().collect();
        if unique.len() != self.classes.len() {
            return Err(ArtifactError::Invalid {
                model: "label encoder",
                reason: "duplicate class label".to_string(),
            });
        }
        Ok(())
    }
}

// ============================================================================
// TESTS
// ============================================================================
