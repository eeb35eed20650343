//! Decision Tree (CART)
//!
//! Gini-impurity binary tree over a samples-by-features matrix. Thresholds
//! are midpoints between consecutive distinct values of the sorted feature
//! column; `row[feature] <= threshold` goes left. Nodes live in a flat
//! arena so the tree serializes as one compact blob.

use ndarray::Array2;
use rand::Rng;
use serde::{Deserialize, Serialize};

/// One node in the flattened tree arena
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum TreeNode {
    /// Terminal node holding the class distribution of its training samples
    Leaf { dist: Vec<f64> },
    /// Binary split on one feature
    Split {
        feature: usize,
        threshold: f64,
        left: usize,
        right: usize,
    },
}

/// Growth limits for a single tree
#[derive(Debug, Clone)]
pub struct TreeParams {
    /// Maximum depth; None grows until pure
    pub max_depth: Option<usize>,
    /// Minimum samples required to attempt a split
    pub min_samples_split: usize,
    /// Features considered per split; None considers all
    pub max_features: Option<usize>,
}

impl Default for TreeParams {
    fn default() -> Self {
        Self {
            max_depth: None,
            min_samples_split: 2,
            max_features: None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DecisionTree {
    /// Arena of nodes; index 0 is the root
    pub nodes: Vec<TreeNode>,
}

impl DecisionTree {
    /// Fit on all rows of `x`
    pub fn fit<R: Rng>(
        x: &Array2<f64>,
        y: &[usize],
        n_classes: usize,
        params: &TreeParams,
        rng: &mut R,
    ) -> Self {
        let indices: Vec<usize> = (0..x.nrows()).collect();
        Self::fit_indices(x, y, &indices, n_classes, params, rng)
    }

    /// Fit on a row subset (possibly with repeats, for bootstrap samples)
    pub fn fit_indices<R: Rng>(
        x: &Array2<f64>,
        y: &[usize],
        indices: &[usize],
        n_classes: usize,
        params: &TreeParams,
        rng: &mut R,
    ) -> Self {
        let mut nodes = Vec::new();
        grow(x, y, indices, n_classes, params, rng, 0, &mut nodes);
        Self { nodes }
    }

    /// Walk the tree and return the leaf class distribution
    pub fn predict_dist(&self, row: &[f64]) -> &[f64] {
        let mut index = 0;
        loop {
            match &self.nodes[index] {
                TreeNode::Leaf { dist } => return dist,
                TreeNode::Split {
                    feature,
                    threshold,
                    left,
                    right,
                } => {
                    let value = row.get(*feature).copied().unwrap_or(0.0);
                    index = if value <= *threshold { *left } else { *right };
                }
            }
        }
    }
}

// ============================================================================
// GROWTH
// ============================================================================

#[allow(clippy::too_many_arguments)]
fn grow<R: Rng>(
    x: &Array2<f64>,
    y: &[usize],
    indices: &[usize],
    n_classes: usize,
    params: &TreeParams,
    rng: &mut R,
    depth: usize,
    nodes: &mut Vec<TreeNode>,
) -> usize {
    let counts = class_counts(y, indices, n_classes);
    let at_depth_limit = params.max_depth.map_or(false, |d| depth >= d);
    let pure = counts.iter().filter(|c| **c > 0.0).count() <= 1;

    if at_depth_limit || indices.len() < params.min_samples_split || pure {
        return push_leaf(nodes, &counts);
    }

    let (feature, threshold) = match best_split(x, y, indices, n_classes, params, rng) {
        Some(split) => split,
        None => return push_leaf(nodes, &counts),
    };

    let (left_rows, right_rows): (Vec<usize>, Vec<usize>) = indices
        .iter()
        .copied()
        .partition(|&i| x[[i, feature]] <= threshold);

    // Reserve the split slot before recursing so the root stays at index 0
    let node_id = nodes.len();
    nodes.push(TreeNode::Leaf { dist: Vec::new() });

    let left = grow(x, y, &left_rows, n_classes, params, rng, depth + 1, nodes);
    let right = grow(x, y, &right_rows, n_classes, params, rng, depth + 1, nodes);

    nodes[node_id] = TreeNode::Split {
        feature,
        threshold,
        left,
        right,
    };
    node_id
}

/// Best (feature, threshold) by weighted Gini over a random feature subset
fn best_split<R: Rng>(
    x: &Array2<f64>,
    y: &[usize],
    indices: &[usize],
    n_classes: usize,
    params: &TreeParams,
    rng: &mut R,
) -> Option<(usize, f64)> {
    if indices.len() < 2 {
        return None;
    }

    let n_features = x.ncols();
    let k = params.max_features.unwrap_or(n_features).clamp(1, n_features);
    let candidates: Vec<usize> = if k < n_features {
        rand::seq::index::sample(rng, n_features, k).into_vec()
    } else {
        (0..n_features).collect()
    };

    let total = indices.len() as f64;
    let parent_counts = class_counts(y, indices, n_classes);
    let parent_impurity = gini(&parent_counts, total);

    let mut best: Option<(usize, f64, f64)> = None;

    for &feature in &candidates {
        let mut ordered: Vec<(f64, usize)> =
            indices.iter().map(|&i| (x[[i, feature]], y[i])).collect();
        ordered.sort_by(|a, b| a.0.partial_cmp(&b.0).unwrap_or(std::cmp::Ordering::Equal));

        let mut left_counts = vec![0.0f64; n_classes];
        let mut right_counts = parent_counts.clone();
        let mut n_left = 0.0f64;

        for w in 0..ordered.len() - 1 {
            let (value, class) = ordered[w];
            if let Some(slot) = left_counts.get_mut(class) {
                *slot += 1.0;
            }
            if let Some(slot) = right_counts.get_mut(class) {
                *slot -= 1.0;
            }
            n_left += 1.0;

            // Split only between distinct values
            if value == ordered[w + 1].0 {
                continue;
            }

            let n_right = total - n_left;
            let impurity = (n_left / total) * gini(&left_counts, n_left)
                + (n_right / total) * gini(&right_counts, n_right);

            if best.map_or(true, |(_, _, s)| impurity < s) {
                let threshold = (value + ordered[w + 1].0) / 2.0;
                best = Some((feature, threshold, impurity));
            }
        }
    }

    best.filter(|&(_, _, impurity)| impurity + 1e-12 < parent_impurity)
        .map(|(feature, threshold, _)| (feature, threshold))
}

fn class_counts(y: &[usize], indices: &[usize], n_classes: usize) -> Vec<f64> {
    let mut counts = vec![0.0f64; n_classes];
    for &i in indices {
        if let Some(slot) = counts.get_mut(y[i]) {
            *slot += 1.0;
        }
    }
    counts
}

fn push_leaf(nodes: &mut Vec<TreeNode>, counts: &[f64]) -> usize {
    let total: f64 = counts.iter().sum();
    let dist = if total > 0.0 {
        counts.iter().map(|c| c / total).collect()
    } else {
        vec![1.0 / counts.len().max(1) as f64; counts.len()]
    };
    nodes.push(TreeNode::Leaf { dist });
    nodes.len() - 1
}

fn gini(counts: &[f64], total: f64) -> f64 {
    if total <= 0.0 {
        return 0.0;
    }
    1.0 - counts.iter().map(|c| (c / total).powi(2)).sum::<f64>()
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn fit_default(x: &Array2<f64>, y: &[usize], n_classes: usize) -> DecisionTree {
        let mut rng = StdRng::seed_from_u64(0);
        DecisionTree::fit(x, y, n_classes, &TreeParams::default(), &mut rng)
    }

    #[test]
    fn test_pure_labels_yield_single_leaf() {
        let x = array![[1.0], [2.0], [3.0]];
        let tree = fit_default(&x, &[1, 1, 1], 2);

        assert_eq!(tree.nodes.len(), 1);
        assert_eq!(tree.predict_dist(&[2.0]), &[0.0, 1.0]);
    }

    #[test]
    fn test_separable_split() {
        let x = array![[1.0], [2.0], [3.0], [10.0], [11.0], [12.0]];
        let y = [0, 0, 0, 1, 1, 1];
        let tree = fit_default(&x, &y, 2);

        assert_eq!(tree.predict_dist(&[0.5]), &[1.0, 0.0]);
        assert_eq!(tree.predict_dist(&[100.0]), &[0.0, 1.0]);
        // Threshold lands between the two clusters
        assert_eq!(tree.predict_dist(&[3.0]), &[1.0, 0.0]);
        assert_eq!(tree.predict_dist(&[10.0]), &[0.0, 1.0]);
    }

    #[test]
    fn test_max_depth_zero_is_a_stump() {
        let x = array![[1.0], [10.0]];
        let params = TreeParams {
            max_depth: Some(0),
            ..TreeParams::default()
        };
        let mut rng = StdRng::seed_from_u64(0);
        let tree = DecisionTree::fit(&x, &[0, 1], 2, &params, &mut rng);

        assert_eq!(tree.nodes.len(), 1);
        assert_eq!(tree.predict_dist(&[1.0]), &[0.5, 0.5]);
    }

    #[test]
    fn test_leaf_distributions_sum_to_one() {
        let x = array![
            [1.0, 5.0],
            [2.0, 4.0],
            [3.0, 3.0],
            [4.0, 2.0],
            [5.0, 1.0],
            [6.0, 0.0]
        ];
        let y = [0, 1, 0, 1, 2, 2];
        let tree = fit_default(&x, &y, 3);

        for node in &tree.nodes {
            if let TreeNode::Leaf { dist } = node {
                let sum: f64 = dist.iter().sum();
                assert!((sum - 1.0).abs() < 1e-9);
            }
        }
    }

    #[test]
    fn test_identical_rows_do_not_split() {
        let x = array![[5.0, 5.0], [5.0, 5.0], [5.0, 5.0], [5.0, 5.0]];
        let y = [0, 1, 0, 1];
        let tree = fit_default(&x, &y, 2);

        // No distinct values anywhere, so the root must stay a leaf
        assert_eq!(tree.nodes.len(), 1);
        assert_eq!(tree.predict_dist(&[5.0, 5.0]), &[0.5, 0.5]);
    }
}
