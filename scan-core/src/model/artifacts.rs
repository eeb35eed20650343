//! Model artifact persistence
//!
//! A trained model is five JSON blobs on disk: the feature scaler, the
//! binary detector forest, the family classifier forest, the family label
//! encoder, and the feature column manifest. Each file loads on its own;
//! [`ModelArtifacts::load`] pulls in the full set and cross-checks it
//! before the inference backend will touch it.

use std::fs;
use std::path::Path;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::features::{
    layout_hash, validate_layout, LayoutMismatchError, FEATURE_COUNT, FEATURE_LAYOUT,
    FEATURE_VERSION,
};

use super::forest::RandomForest;
use super::labels::LabelEncoder;
use super::scaler::StandardScaler;

// ============================================================================
// ARTIFACT FILE NAMES
// ============================================================================

pub const SCALER_FILE: &str = "scaler.json";
pub const BINARY_MODEL_FILE: &str = "binary_model.json";
pub const FAMILY_MODEL_FILE: &str = "family_model.json";
pub const LABEL_ENCODER_FILE: &str = "label_encoder.json";
pub const FEATURE_COLUMNS_FILE: &str = "feature_columns.json";

// ============================================================================
// ERRORS
// ============================================================================

#[derive(Debug, Error)]
pub enum ArtifactError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },

    #[error("failed to parse {path}: {source}")]
    Parse {
        path: String,
        source: serde_json::Error,
    },

    #[error("{model} artifact is invalid: {reason}")]
    Invalid { model: &'static str, reason: String },

    #[error(transparent)]
    Layout(#[from] LayoutMismatchError),
}

// ============================================================================
// FEATURE COLUMN MANIFEST
// ============================================================================

/// Records the feature layout the model was trained against.
///
/// Models are only usable when this matches the layout compiled into the
/// binary, so a stale model directory degrades to the mock backend instead
/// of scoring the wrong columns.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeatureColumns {
    pub version: u8,
    pub layout_hash: u32,
    pub names: Vec<String>,
}

impl FeatureColumns {
    /// Manifest for the layout compiled into this binary
    pub fn current() -> Self {
        Self {
            version: FEATURE_VERSION,
            layout_hash: layout_hash(),
            names: FEATURE_LAYOUT.iter().map(|name| name.to_string()).collect(),
        }
    }

    pub fn validate(&self) -> Result<(), ArtifactError> {
        validate_layout(self.version, self.layout_hash)?;

        if self.names.len() != FEATURE_COUNT {
            return Err(ArtifactError::Invalid {
                model: "feature columns",
                reason: format!(
                    "expected {} columns, found {}",
                    FEATURE_COUNT,
                    self.names.len()
                ),
            });
        }
        for (found, expected) in self.names.iter().zip(FEATURE_LAYOUT) {
            if found.as_str() != *expected {
                return Err(ArtifactError::Invalid {
                    model: "feature columns",
                    reason: format!("column {:?} does not match layout name {:?}", found, expected),
                });
            }
        }
        Ok(())
    }
}

// ============================================================================
// ARTIFACT SET
// ============================================================================

#[derive(Debug, Clone)]
pub struct ModelArtifacts {
    pub scaler: StandardScaler,
    pub binary_model: RandomForest,
    pub family_model: RandomForest,
    pub label_encoder: LabelEncoder,
    pub feature_columns: FeatureColumns,
}

impl ModelArtifacts {
    /// Load and validate the full artifact set from a model directory
    pub fn load(dir: &Path) -> Result<Self, ArtifactError> {
        let artifacts = Self {
            scaler: load_json(&dir.join(SCALER_FILE))?,
            binary_model: load_json(&dir.join(BINARY_MODEL_FILE))?,
            family_model: load_json(&dir.join(FAMILY_MODEL_FILE))?,
            label_encoder: load_json(&dir.join(LABEL_ENCODER_FILE))?,
            feature_columns: load_json(&dir.join(FEATURE_COLUMNS_FILE))?,
        };
        artifacts.validate()?;
        Ok(artifacts)
    }

    /// Write all five artifact files, creating the directory if needed
    pub fn save(&self, dir: &Path) -> Result<(), ArtifactError> {
        fs::create_dir_all(dir).map_err(|source| ArtifactError::Io {
            path: dir.display().to_string(),
            source,
        })?;
        save_json(&dir.join(SCALER_FILE), &self.scaler)?;
        save_json(&dir.join(BINARY_MODEL_FILE), &self.binary_model)?;
        save_json(&dir.join(FAMILY_MODEL_FILE), &self.family_model)?;
        save_json(&dir.join(LABEL_ENCODER_FILE), &self.label_encoder)?;
        save_json(&dir.join(FEATURE_COLUMNS_FILE), &self.feature_columns)?;
        Ok(())
    }

    /// Cross-check the set: layout, shapes, class counts
    pub fn validate(&self) -> Result<(), ArtifactError> {
        self.feature_columns.validate()?;
        self.scaler.validate(FEATURE_COUNT)?;
        self.label_encoder.validate()?;
        self.binary_model.validate("binary model", FEATURE_COUNT)?;
        self.family_model.validate("family model", FEATURE_COUNT)?;

        if self.binary_model.n_classes != 2 {
            return Err(ArtifactError::Invalid {
                model: "binary model",
                reason: format!("expected 2 classes, found {}", self.binary_model.n_classes),
            });
        }
        if self.family_model.n_classes != self.label_encoder.len() {
            return Err(ArtifactError::Invalid {
                model: "family model",
                reason: format!(
                    "{} classes does not match {} encoder labels",
                    self.family_model.n_classes,
                    self.label_encoder.len()
                ),
            });
        }
        Ok(())
    }
}

// ============================================================================
// JSON HELPERS
// ============================================================================

fn load_json<T: DeserializeOwned>(path: &Path) -> Result<T, ArtifactError> {
    let raw = fs::read_to_string(path).map_err(|source| ArtifactError::Io {
        path: path.display().to_string(),
        source,
    })?;
    serde_json::from_str(&raw).map_err(|source| ArtifactError::Parse {
        path: path.display().to_string(),
        source,
    })
}

fn save_json<T: Serialize>(path: &Path, value: &T) -> Result<(), ArtifactError> {
    let raw = serde_json::to_string_pretty(value).map_err(|source| ArtifactError::Parse {
        path: path.display().to_string(),
        source,
    })?;
    fs::write(path, raw).map_err(|source| ArtifactError::Io {
        path: path.display().to_string(),
        source,
    })
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::forest::ForestParams;
    use ndarray::Array2;

    fn tiny_artifacts() -> ModelArtifacts {
        let rows = 12;
        let mut flat = Vec::with_capacity(rows * FEATURE_COUNT);
        for i in 0..rows {
            let base = i as f64;
            flat.extend_from_slice(&[
                10_000.0 + base * 40_000.0,
                4.0 + base * 0.3,
                3.0 + base,
                10.0 + base * 15.0,
                (i % 2) as f64,
                ((i + 1) % 2) as f64,
            ]);
        }
        let x = Array2::from_shape_vec((rows, FEATURE_COUNT), flat).unwrap();
        let binary_y: Vec<usize> = (0..rows).map(|i| usize::from(i >= rows / 2)).collect();
        let family_y: Vec<usize> = (0..rows).map(|i| i % 3).collect();

        let scaler = StandardScaler::fit(&x);
        let scaled = scaler.transform(&x);
        let params = ForestParams {
            n_trees: 5,
            ..ForestParams::default()
        };

        ModelArtifacts {
            scaler,
            binary_model: RandomForest::fit(&scaled, &binary_y, 2, &params),
            family_model: RandomForest::fit(&scaled, &family_y, 3, &params),
            label_encoder: LabelEncoder::fit(&["benign", "trojan", "worm"]),
            feature_columns: FeatureColumns::current(),
        }
    }

    #[test]
    fn test_save_load_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let original = tiny_artifacts();
        original.save(dir.path()).unwrap();

        for file in [
            SCALER_FILE,
            BINARY_MODEL_FILE,
            FAMILY_MODEL_FILE,
            LABEL_ENCODER_FILE,
            FEATURE_COLUMNS_FILE,
        ] {
            assert!(dir.path().join(file).exists(), "missing {}", file);
        }

        let loaded = ModelArtifacts::load(dir.path()).unwrap();
        assert_eq!(loaded.feature_columns, original.feature_columns);
        assert_eq!(loaded.label_encoder.decode(1), Some("trojan"));
        assert_eq!(loaded.binary_model.trees.len(), 5);
    }

    #[test]
    fn test_load_missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = ModelArtifacts::load(dir.path()).unwrap_err();
        assert!(matches!(err, ArtifactError::Io { .. }));
    }

    #[test]
    fn test_load_rejects_garbage_json() {
        let dir = tempfile::tempdir().unwrap();
        tiny_artifacts().save(dir.path()).unwrap();
        fs::write(dir.path().join(BINARY_MODEL_FILE), "{ not json").unwrap();

        let err = ModelArtifacts::load(dir.path()).unwrap_err();
        assert!(matches!(err, ArtifactError::Parse { .. }));
    }

    #[test]
    fn test_validate_rejects_stale_layout() {
        let mut artifacts = tiny_artifacts();
        artifacts.feature_columns.version = 99;
        assert!(matches!(
            artifacts.validate(),
            Err(ArtifactError::Layout(_))
        ));
    }

    #[test]
    fn test_validate_rejects_renamed_column() {
        let mut artifacts = tiny_artifacts();
        artifacts.feature_columns.names[0] = "byte_count".to_string();
        assert!(matches!(
            artifacts.validate(),
            Err(ArtifactError::Invalid { .. })
        ));
    }

    #[test]
    fn test_validate_rejects_encoder_class_mismatch() {
        let mut artifacts = tiny_artifacts();
        artifacts.label_encoder = LabelEncoder::fit(&["benign", "trojan"]);
        assert!(matches!(
            artifacts.validate(),
            Err(ArtifactError::Invalid { model: "family model", .. })
        ));
    }
}
