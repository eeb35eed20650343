//! Inference backends
//!
//! The scanning pipeline talks to a [`InferenceBackend`] trait object chosen
//! once at startup: [`ModelBackend`] when the trained artifacts load and
//! validate, [`MockBackend`] otherwise. The fallback is deliberate and loud
//! (a WARN at selection time, and the backend name is reported by the
//! server's health endpoint) so demo deployments cannot silently serve
//! random verdicts while claiming to use the model.

use std::path::Path;

use log::{info, warn};
use rand::seq::SliceRandom;
use rand::Rng;

use crate::family::MALWARE_FAMILY_NAMES;
use crate::features::FeatureVector;
use crate::model::ModelArtifacts;

// ============================================================================
// CLASSIFICATION RESULT
// ============================================================================

/// Raw model output, before verdict assembly
#[derive(Debug, Clone, PartialEq)]
pub enum Classification {
    Benign { confidence: f64 },
    Malware { confidence: f64, family: String },
}

impl Classification {
    pub fn is_malware(&self) -> bool {
        matches!(self, Classification::Malware { .. })
    }

    pub fn confidence(&self) -> f64 {
        match self {
            Classification::Benign { confidence } => *confidence,
            Classification::Malware { confidence, .. } => *confidence,
        }
    }

    pub fn family(&self) -> Option<&str> {
        match self {
            Classification::Benign { .. } => None,
            Classification::Malware { family, .. } => Some(family),
        }
    }
}

// ============================================================================
// BACKEND TRAIT
// ============================================================================

pub trait InferenceBackend: Send + Sync {
    /// Classify one feature vector
    fn classify(&self, features: &FeatureVector) -> Classification;

    /// Short backend name for health reporting ("model" or "mock")
    fn name(&self) -> &'static str;
}

// ============================================================================
// MODEL BACKEND
// ============================================================================

/// Scores features with the trained artifact set.
///
/// Artifacts are validated at construction time, so classification itself
/// cannot fail: unknown family indices decode to "unknown" rather than
/// panicking on a malformed model.
pub struct ModelBackend {
    artifacts: ModelArtifacts,
}

impl ModelBackend {
    pub fn new(artifacts: ModelArtifacts) -> Self {
        Self { artifacts }
    }
}

impl InferenceBackend for ModelBackend {
    fn classify(&self, features: &FeatureVector) -> Classification {
        let scaled = self.artifacts.scaler.transform_row(features.as_array());
        let proba = self.artifacts.binary_model.predict_proba(&scaled);

        // Confidence is the winning probability, for benign verdicts too
        let confidence = proba.iter().copied().fold(0.0f64, f64::max);
        let is_malware = self.artifacts.binary_model.predict(&scaled) == 1;

        if !is_malware {
            return Classification::Benign { confidence };
        }

        let family_index = self.artifacts.family_model.predict(&scaled);
        let family = self
            .artifacts
            .label_encoder
            .decode(family_index)
            .unwrap_or("unknown")
            .to_string();

        Classification::Malware { confidence, family }
    }

    fn name(&self) -> &'static str {
        "model"
    }
}

// ============================================================================
// MOCK BACKEND
// ============================================================================

/// Coin-flip verdicts for when no usable model is on disk.
///
/// Keeps the demo driveable before anyone has run the training binary: the
/// verdict shape is identical, only the numbers are random.
pub struct MockBackend;

impl InferenceBackend for MockBackend {
    fn classify(&self, _features: &FeatureVector) -> Classification {
        let mut rng = rand::thread_rng();
        let confidence = rng.gen_range(0.7..0.98);

        if rng.gen_bool(0.5) {
            let family = MALWARE_FAMILY_NAMES
                .choose(&mut rng)
                .copied()
                .unwrap_or("trojan")
                .to_string();
            Classification::Malware { confidence, family }
        } else {
            Classification::Benign { confidence }
        }
    }

    fn name(&self) -> &'static str {
        "mock"
    }
}

// ============================================================================
// SELECTION
// ============================================================================

/// Pick the backend for this process: trained artifacts if they load and
/// validate, mock otherwise.
pub fn select_backend(model_dir: &Path) -> Box<dyn InferenceBackend> {
    match ModelArtifacts::load(model_dir) {
        Ok(artifacts) => {
            info!(
                "✅ Loaded model artifacts from {} ({} families)",
                model_dir.display(),
                artifacts.label_encoder.len()
            );
            Box::new(ModelBackend::new(artifacts))
        }
        Err(err) => {
            warn!(
                "⚠️ Model artifacts unavailable ({}), serving mock predictions",
                err
            );
            Box::new(MockBackend)
        }
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::{FeatureVector, FEATURE_COUNT};
    use crate::model::{FeatureColumns, ForestParams, LabelEncoder, RandomForest, StandardScaler};
    use ndarray::Array2;

    /// Benign rows are small/low-entropy, malware rows large/high-entropy.
    /// Families split on section count so the family forest has signal too.
    fn separable_artifacts() -> ModelArtifacts {
        let mut flat = Vec::new();
        let mut binary_y = Vec::new();
        let mut family_rows = Vec::new();
        let mut family_y = Vec::new();

        let encoder = LabelEncoder::fit(&["benign", "ransomware", "trojan"]);

        for i in 0..20 {
            let jitter = (i % 5) as f64;
            flat.extend_from_slice(&[
                20_000.0 + jitter * 1_000.0,
                4.2 + jitter * 0.05,
                4.0,
                20.0 + jitter,
                1.0,
                1.0,
            ]);
            binary_y.push(0);
        }
        for i in 0..20 {
            let jitter = (i % 5) as f64;
            let sections = if i % 2 == 0 { 9.0 } else { 4.0 };
            let row = [
                400_000.0 + jitter * 1_000.0,
                7.5 + jitter * 0.05,
                sections,
                150.0 + jitter,
                0.0,
                0.0,
            ];
            flat.extend_from_slice(&row);
            binary_y.push(1);
            family_rows.push(row);
            family_y.push(if i % 2 == 0 {
                encoder.encode("ransomware").unwrap()
            } else {
                encoder.encode("trojan").unwrap()
            });
        }

        let x = Array2::from_shape_vec((40, FEATURE_COUNT), flat).unwrap();
        let scaler = StandardScaler::fit(&x);
        let scaled = scaler.transform(&x);

        let malware_flat: Vec<f64> = family_rows
            .iter()
            .flat_map(|row| scaler.transform_row(row).to_vec())
            .collect();
        let malware_x = Array2::from_shape_vec((20, FEATURE_COUNT), malware_flat).unwrap();

        let params = ForestParams {
            n_trees: 15,
            ..ForestParams::default()
        };

        ModelArtifacts {
            binary_model: RandomForest::fit(&scaled, &binary_y, 2, &params),
            family_model: RandomForest::fit(&malware_x, &family_y, encoder.len(), &params),
            label_encoder: encoder,
            scaler,
            feature_columns: FeatureColumns::current(),
        }
    }

    fn benign_features() -> FeatureVector {
        FeatureVector::from_values([21_000.0, 4.3, 4.0, 22.0, 1.0, 1.0])
    }

    fn ransomware_features() -> FeatureVector {
        FeatureVector::from_values([410_000.0, 7.6, 9.0, 155.0, 0.0, 0.0])
    }

    #[test]
    fn test_model_backend_flags_malware_with_family() {
        let backend = ModelBackend::new(separable_artifacts());

        let verdict = backend.classify(&ransomware_features());
        assert!(verdict.is_malware());
        assert_eq!(verdict.family(), Some("ransomware"));
        assert!(verdict.confidence() > 0.5);
    }

    #[test]
    fn test_model_backend_clears_benign() {
        let backend = ModelBackend::new(separable_artifacts());

        let verdict = backend.classify(&benign_features());
        assert!(!verdict.is_malware());
        assert_eq!(verdict.family(), None);
        assert!(verdict.confidence() >= 0.5);
    }

    #[test]
    fn test_mock_backend_stays_in_contract() {
        let backend = MockBackend;
        let features = benign_features();

        for _ in 0..50 {
            let verdict = backend.classify(&features);
            let confidence = verdict.confidence();
            assert!((0.7..0.98).contains(&confidence));
            if let Some(family) = verdict.family() {
                assert!(MALWARE_FAMILY_NAMES.contains(&family));
            }
        }
    }

    #[test]
    fn test_select_backend_falls_back_without_artifacts() {
        let dir = tempfile::tempdir().unwrap();
        let backend = select_backend(dir.path());
        assert_eq!(backend.name(), "mock");
    }

    #[test]
    fn test_select_backend_uses_saved_artifacts() {
        let dir = tempfile::tempdir().unwrap();
        separable_artifacts().save(dir.path()).unwrap();

        let backend = select_backend(dir.path());
        assert_eq!(backend.name(), "model");
    }
}
