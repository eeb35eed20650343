//! Standard Scaler
//!
//! Per-column standardization to zero mean / unit variance. Fitted once
//! during training, applied read-only at request time.

use ndarray::Array2;
use serde::{Deserialize, Serialize};

use super::artifacts::ArtifactError;
use crate::features::FEATURE_COUNT;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StandardScaler {
    /// Per-column mean
    pub mean: Vec<f64>,
    /// Per-column standard deviation (population), 1.0 where variance is zero
    pub scale: Vec<f64>,
}

impl StandardScaler {
    /// Fit mean and scale from a samples-by-features matrix
    pub fn fit(x: &Array2<f64>) -> Self {
        let n = x.nrows().max(1) as f64;
        let mut mean = Vec::with_capacity(x.ncols());
        let mut scale = Vec::with_capacity(x.ncols());

        for col in x.columns() {
            let m = col.sum() / n;
            let var = col.iter().map(|v| (v - m).powi(2)).sum::<f64>() / n;
            let s = var.sqrt();
            mean.push(m);
            scale.push(if s > 0.0 { s } else { 1.0 });
        }

        Self { mean, scale }
    }

    /// Standardize a single row in layout order
    pub fn transform_row(&self, row: &[f64; FEATURE_COUNT]) -> [f64; FEATURE_COUNT] {
        let mut out = [0.0f64; FEATURE_COUNT];
        for (i, value) in row.iter().enumerate() {
            let m = self.mean.get(i).copied().unwrap_or(0.0);
            let s = self.scale.get(i).copied().unwrap_or(1.0);
            out[i] = (value - m) / s;
        }
        out
    }

    /// Standardize a full matrix
    pub fn transform(&self, x: &Array2<f64>) -> Array2<f64> {
        let mut out = x.clone();
        for (j, mut col) in out.columns_mut().into_iter().enumerate() {
            let m = self.mean.get(j).copied().unwrap_or(0.0);
            let s = self.scale.get(j).copied().unwrap_or(1.0);
            col.mapv_inplace(|v| (v - m) / s);
        }
        out
    }

    /// Check dimensions and parameter sanity before use
    pub fn validate(&self, expected_columns: usize) -> Result<(), ArtifactError> {
        if self.mean.len() != expected_columns || self.scale.len() != expected_columns {
            return Err(ArtifactError::Invalid {
                model: "scaler",
                reason: format!(
                    "expected {} columns, found {} mean / {} scale",
                    expected_columns,
                    self.mean.len(),
                    self.scale.len()
                ),
            });
        }
        if self.mean.iter().chain(self.scale.iter()).any(|v| !v.is_finite()) {
            return Err(ArtifactError::Invalid {
                model: "scaler",
                reason: "non-finite parameter".to_string(),
            });
        }
        if let Some(column) = self.scale.iter().position(|s| *s == 0.0) {
            return Err(ArtifactError::Invalid {
                model: "scaler",
                reason: format!("zero scale factor at column {}", column),
            });
        }
        Ok(())
    }
}

// ============================================================================
// TESTS
// ============================================================================
