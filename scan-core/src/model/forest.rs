//! Random Forest
//!
//! Bagged ensemble of CART trees: each tree fits a bootstrap sample with
//! sqrt-feature subsampling per split, and the forest probability is the
//! mean of the per-tree leaf distributions. Fitting is deterministic for a
//! given seed.

use ndarray::Array2;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};

use super::artifacts::ArtifactError;
use super::tree::{DecisionTree, TreeNode, TreeParams};

/// Ensemble hyperparameters
#[derive(Debug, Clone)]
pub struct ForestParams {
    pub n_trees: usize,
    pub max_depth: Option<usize>,
    pub min_samples_split: usize,
    pub seed: u64,
}

impl Default for ForestParams {
    fn default() -> Self {
        Self {
            n_trees: 100,
            max_depth: None,
            min_samples_split: 2,
            seed: 42,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RandomForest {
    pub n_classes: usize,
    pub trees: Vec<DecisionTree>,
}

impl RandomForest {
    /// Fit the ensemble on a samples-by-features matrix
    pub fn fit(x: &Array2<f64>, y: &[usize], n_classes: usize, params: &ForestParams) -> Self {
        let mut rng = StdRng::seed_from_u64(params.seed);
        let n = x.nrows();
        let max_features = ((x.ncols() as f64).sqrt().floor() as usize).max(1);
        let tree_params = TreeParams {
            max_depth: params.max_depth,
            min_samples_split: params.min_samples_split,
            max_features: Some(max_features),
        };

        let mut trees = Vec::with_capacity(params.n_trees);
        for _ in 0..params.n_trees {
            let bootstrap: Vec<usize> = (0..n).map(|_| rng.gen_range(0..n)).collect();
            trees.push(DecisionTree::fit_indices(
                x,
                y,
                &bootstrap,
                n_classes,
                &tree_params,
                &mut rng,
            ));
        }

        Self { n_classes, trees }
    }

    /// Mean class probabilities across trees
    pub fn predict_proba(&self, row: &[f64]) -> Vec<f64> {
        let mut proba = vec![0.0f64; self.n_classes];
        for tree in &self.trees {
            for (slot, p) in proba.iter_mut().zip(tree.predict_dist(row)) {
                *slot += p;
            }
        }
        if !self.trees.is_empty() {
            let n = self.trees.len() as f64;
            for slot in proba.iter_mut() {
                *slot /= n;
            }
        }
        proba
    }

    /// Predicted class (argmax of probabilities, first on ties)
    pub fn predict(&self, row: &[f64]) -> usize {
        let proba = self.predict_proba(row);
        let mut best = 0;
        for (class, p) in proba.iter().enumerate() {
            if *p > proba[best] {
                best = class;
            }
        }
        best
    }

    /// Fraction of rows classified correctly
    pub fn accuracy(&self, x: &Array2<f64>, y: &[usize]) -> f64 {
        if x.nrows() == 0 {
            return 0.0;
        }
        let correct = x
            .rows()
            .into_iter()
            .zip(y)
            .filter(|(row, label)| {
                self.predict(row.as_slice().unwrap_or(&[])) == **label
            })
            .count();
        correct as f64 / x.nrows() as f64
    }

    /// Structural sanity check before use
    pub fn validate(&self, model: &'static str, n_features: usize) -> Result<(), ArtifactError> {
        if self.trees.is_empty() {
            return Err(ArtifactError::Invalid {
                model,
                reason: "no trees".to_string(),
            });
        }
        if self.n_classes == 0 {
            return Err(ArtifactError::Invalid {
                model,
                reason: "zero classes".to_string(),
            });
        }
        for tree in &self.trees {
            if tree.nodes.is_empty() {
                return Err(ArtifactError::Invalid {
                    model,
                    reason: "empty tree".to_string(),
                });
            }
            for node in &tree.nodes {
                match node {
                    TreeNode::Leaf { dist } => {
                        if dist.len() != self.n_classes {
                            return Err(ArtifactError::Invalid {
                                model,
                                reason: format!(
                                    "leaf has {} classes, expected {}",
                                    dist.len(),
                                    self.n_classes
                                ),
                            });
                        }
                        if dist.iter().any(|p| !p.is_finite()) {
                            return Err(ArtifactError::Invalid {
                                model,
                                reason: "non-finite leaf probability".to_string(),
                            });
                        }
                    }
                    TreeNode::Split {
                        feature,
                        threshold,
                        left,
                        right,
                    } => {
                        if *feature >= n_features {
                            return Err(ArtifactError::Invalid {
                                model,
                                reason: format!("split on unknown feature {}", feature),
                            });
                        }
                        if !threshold.is_finite() {
                            return Err(ArtifactError::Invalid {
                                model,
                                reason: "non-finite split threshold".to_string(),
                            });
                        }
                        if *left >= tree.nodes.len() || *right >= tree.nodes.len() {
                            return Err(ArtifactError::Invalid {
                                model,
                                reason: "node reference out of range".to_string(),
                            });
                        }
                    }
                }
            }
        }
        Ok(())
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::Array2;

    /// Two well-separated clusters on both features
    fn clustered_data() -> (Array2<f64>, Vec<usize>) {
        let mut rows = Vec::new();
        let mut labels = Vec::new();
        for i in 0..20 {
            rows.push([i as f64 * 0.1, 1.0 + i as f64 * 0.05]);
            labels.push(0);
        }
        for i in 0..20 {
            rows.push([10.0 + i as f64 * 0.1, 20.0 + i as f64 * 0.05]);
            labels.push(1);
        }
        let flat: Vec<f64> = rows.iter().flat_map(|r| r.to_vec()).collect();
        let x = Array2::from_shape_vec((40, 2), flat).unwrap();
        (x, labels)
    }

    #[test]
    fn test_separable_data_fits_perfectly() {
        let (x, y) = clustered_data();
        let params = ForestParams {
            n_trees: 25,
            ..ForestParams::default()
        };
        let forest = RandomForest::fit(&x, &y, 2, &params);

        assert_eq!(forest.accuracy(&x, &y), 1.0);
        assert_eq!(forest.predict(&[0.5, 1.2]), 0);
        assert_eq!(forest.predict(&[11.0, 21.0]), 1);
    }

    #[test]
    fn test_proba_sums_to_one() {
        let (x, y) = clustered_data();
        let forest = RandomForest::fit(&x, &y, 2, &ForestParams::default());

        let proba = forest.predict_proba(&[5.0, 10.0]);
        assert_eq!(proba.len(), 2);
        let sum: f64 = proba.iter().sum();
        assert!((sum - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_same_seed_same_forest() {
        let (x, y) = clustered_data();
        let params = ForestParams {
            n_trees: 10,
            ..ForestParams::default()
        };
        let a = RandomForest::fit(&x, &y, 2, &params);
        let b = RandomForest::fit(&x, &y, 2, &params);

        let a_json = serde_json::to_string(&a).unwrap();
        let b_json = serde_json::to_string(&b).unwrap();
        assert_eq!(a_json, b_json);
    }

    #[test]
    fn test_different_seed_different_forest() {
        let (x, y) = clustered_data();
        let a = RandomForest::fit(
            &x,
            &y,
            2,
            &ForestParams {
                n_trees: 10,
                seed: 1,
                ..ForestParams::default()
            },
        );
        let b = RandomForest::fit(
            &x,
            &y,
            2,
            &ForestParams {
                n_trees: 10,
                seed: 2,
                ..ForestParams::default()
            },
        );

        let a_json = serde_json::to_string(&a).unwrap();
        let b_json = serde_json::to_string(&b).unwrap();
        assert_ne!(a_json, b_json);
    }

    #[test]
    fn test_validate_catches_feature_out_of_range() {
        let (x, y) = clustered_data();
        let mut forest = RandomForest::fit(
            &x,
            &y,
            2,
            &ForestParams {
                n_trees: 3,
                ..ForestParams::default()
            },
        );
        assert!(forest.validate("binary model", 2).is_ok());

        // Corrupt a split to reference a feature the layout doesn't have
        for tree in forest.trees.iter_mut() {
            for node in tree.nodes.iter_mut() {
                if let TreeNode::Split { feature, .. } = node {
                    *feature = 99;
                }
            }
        }
        assert!(forest.validate("binary model", 2).is_err());
    }

    #[test]
    fn test_validate_rejects_empty_forest() {
        let forest = RandomForest {
            n_classes: 2,
            trees: vec![],
        };
        assert!(forest.validate("binary model", 2).is_err());
    }
}
