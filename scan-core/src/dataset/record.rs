use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::family::BENIGN_LABEL;
use crate::features::{FeatureVector, LayoutMismatchError};

pub const LABEL_BENIGN: u8 = 0;
pub const LABEL_MALWARE: u8 = 1;

/// One labeled training sample
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SampleRecord {
    pub features: FeatureVector,
    pub label: u8,
    pub family: String,
}

#[derive(Debug, Error)]
pub enum RecordError {
    #[error("label must be 0 or 1, found {0}")]
    BadLabel(u8),

    #[error("family {family:?} does not match label {label}")]
    FamilyMismatch { family: String, label: u8 },

    #[error(transparent)]
    Layout(#[from] LayoutMismatchError),
}

impl SampleRecord {
    pub fn benign(features: FeatureVector) -> Self {
        Self {
            features,
            label: LABEL_BENIGN,
            family: BENIGN_LABEL.to_string(),
        }
    }

    pub fn malware(features: FeatureVector, family: &str) -> Self {
        Self {
            features,
            label: LABEL_MALWARE,
            family: family.to_string(),
        }
    }

    pub fn is_malware(&self) -> bool {
        self.label == LABEL_MALWARE
    }

    /// Layout and label/family consistency
    pub fn validate(&self) -> Result<(), RecordError> {
        self.features.validate()?;

        if self.label > LABEL_MALWARE {
            return Err(RecordError::BadLabel(self.label));
        }
        let has_benign_family = self.family == BENIGN_LABEL;
        if has_benign_family == self.is_malware() {
            return Err(RecordError::FamilyMismatch {
                family: self.family.clone(),
                label: self.label,
            });
        }
        Ok(())
    }
}
