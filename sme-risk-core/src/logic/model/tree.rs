//! Regression tree used as the weak learner of the boosting ensemble
//!
//! Nodes live in a flat vector; node 0 is the root and children always have
//! a larger index than their parent, so traversal of a validated tree
//! terminates.

use ndarray::ArrayView2;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use serde::{Deserialize, Serialize};

use crate::error::ModelError;

/// Values closer than this are treated as identical when placing thresholds
const FEATURE_THRESHOLD: f64 = 1e-7;

/// Denominators below this produce a zero leaf instead of an overflow
const MIN_HESSIAN: f64 = 1e-150;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Node {
    /// `row[feature] <= threshold` goes left
    Split {
        feature: usize,
        threshold: f64,
        left: usize,
        right: usize,
    },
    Leaf {
        value: f64,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegressionTree {
    nodes: Vec<Node>,
}

impl RegressionTree {
    /// Build from raw nodes, rejecting anything that could loop or index out of range
    pub fn from_nodes(nodes: Vec<Node>, n_features: usize) -> Result<Self, ModelError> {
        let tree = Self { nodes };
        tree.validate(n_features)?;
        Ok(tree)
    }

    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    pub fn validate(&self, n_features: usize) -> Result<(), ModelError> {
        if self.nodes.is_empty() {
            return Err(ModelError::Corrupt("tree has no nodes".to_string()));
        }

        for (id, node) in self.nodes.iter().enumerate() {
            match *node {
                Node::Split {
                    feature,
                    threshold,
                    left,
                    right,
                } => {
                    if feature >= n_features {
                        return Err(ModelError::Corrupt(format!(
                            "node {} splits on feature {} of {}",
                            id, feature, n_features
                        )));
                    }
                    if !threshold.is_finite() {
                        return Err(ModelError::Corrupt(format!("node {} has a non-finite threshold", id)));
                    }
                    if left <= id || right <= id || left >= self.nodes.len() || right >= self.nodes.len() {
                        return Err(ModelError::Corrupt(format!("node {} has invalid children", id)));
                    }
                }
                Node::Leaf { value } => {
                    if !value.is_finite() {
                        return Err(ModelError::Corrupt(format!("leaf {} has a non-finite value", id)));
                    }
                }
            }
        }

        Ok(())
    }

    pub fn predict(&self, row: &[f64]) -> f64 {
        self.leaf_value(|feature| row[feature])
    }

    /// Walk from the root using `value_of(feature)` for lookups
    fn leaf_value(&self, value_of: impl Fn(usize) -> f64) -> f64 {
        let mut id = 0;
        loop {
            match self.nodes[id] {
                Node::Leaf { value } => return value,
                Node::Split {
                    feature,
                    threshold,
                    left,
                    right,
                } => {
                    id = if value_of(feature) <= threshold { left } else { right };
                }
            }
        }
    }

    pub(crate) fn predict_row_of(&self, x: &ArrayView2<'_, f64>, row: usize) -> f64 {
        self.leaf_value(|feature| x[[row, feature]])
    }

    pub fn depth(&self) -> usize {
        fn walk(nodes: &[Node], id: usize) -> usize {
            match nodes[id] {
                Node::Leaf { .. } => 0,
                Node::Split { left, right, .. } => 1 + walk(nodes, left).max(walk(nodes, right)),
            }
        }
        walk(&self.nodes, 0)
    }

    pub fn leaf_count(&self) -> usize {
        self.nodes.iter().filter(|n| matches!(n, Node::Leaf { .. })).count()
    }
}

// ============================================================================
// TREE GROWING
// ============================================================================

#[derive(Debug, Clone, Copy)]
pub(crate) struct TreeParams {
    pub max_depth: usize,
    pub min_samples_split: usize,
    pub min_samples_leaf: usize,
}

struct SplitCandidate {
    feature: usize,
    threshold: f64,
    improvement: f64,
}

/// Grows one tree on the negative gradient with Newton-step leaves
pub(crate) struct TreeBuilder<'x, 'b> {
    x: ArrayView2<'x, f64>,
    residual: &'b [f64],
    hessian: &'b [f64],
    params: TreeParams,
    rng: &'b mut StdRng,
    nodes: Vec<Node>,
}

impl<'x, 'b> TreeBuilder<'x, 'b> {
    pub fn new(
        x: ArrayView2<'x, f64>,
        residual: &'b [f64],
        hessian: &'b [f64],
        params: TreeParams,
        rng: &'b mut StdRng,
    ) -> Self {
        Self {
            x,
            residual,
            hessian,
            params,
            rng,
            nodes: Vec::new(),
        }
    }

    pub fn build(mut self) -> RegressionTree {
        let indices: Vec<usize> = (0..self.x.nrows()).collect();
        self.grow(indices, 0);
        RegressionTree { nodes: self.nodes }
    }

    fn grow(&mut self, indices: Vec<usize>, depth: usize) -> usize {
        let id = self.nodes.len();
        self.nodes.push(Node::Leaf { value: 0.0 });

        let candidate = if depth < self.params.max_depth && indices.len() >= self.params.min_samples_split {
            self.best_split(&indices)
        } else {
            None
        };

        match candidate {
            None => {
                self.nodes[id] = Node::Leaf {
                    value: self.newton_value(&indices),
                };
            }
            Some(split) => {
                let x = self.x;
                let (left_idx, right_idx): (Vec<usize>, Vec<usize>) = indices
                    .into_iter()
                    .partition(|&i| x[[i, split.feature]] <= split.threshold);

                let left = self.grow(left_idx, depth + 1);
                let right = self.grow(right_idx, depth + 1);
                self.nodes[id] = Node::Split {
                    feature: split.feature,
                    threshold: split.threshold,
                    left,
                    right,
                };
            }
        }

        id
    }

    /// Best split by Friedman's improvement `n_l * n_r / n * (mean_l - mean_r)^2`.
    /// Features are visited in a seeded random order; ties keep the first one found.
    fn best_split(&mut self, indices: &[usize]) -> Option<SplitCandidate> {
        let n = indices.len();
        let total: f64 = indices.iter().map(|&i| self.residual[i]).sum();

        let mut features: Vec<usize> = (0..self.x.ncols()).collect();
        features.shuffle(&mut *self.rng);

        let mut best: Option<SplitCandidate> = None;
        let mut order = indices.to_vec();

        for feature in features {
            let x = self.x;
            order.sort_by(|&a, &b| x[[a, feature]].total_cmp(&x[[b, feature]]).then(a.cmp(&b)));

            let mut left_sum = 0.0;
            for pos in 0..n - 1 {
                left_sum += self.residual[order[pos]];

                let current = x[[order[pos], feature]];
                let next = x[[order[pos + 1], feature]];
                if next <= current + FEATURE_THRESHOLD {
                    continue;
                }

                let n_left = pos + 1;
                let n_right = n - n_left;
                if n_left < self.params.min_samples_leaf || n_right < self.params.min_samples_leaf {
                    continue;
                }

                let right_sum = total - left_sum;
                let diff = left_sum / n_left as f64 - right_sum / n_right as f64;
                let improvement = (n_left * n_right) as f64 / n as f64 * diff * diff;

                if improvement > best.as_ref().map_or(0.0, |b| b.improvement) {
                    let mut threshold = current / 2.0 + next / 2.0;
                    if threshold == next || !threshold.is_finite() {
                        threshold = current;
                    }
                    best = Some(SplitCandidate {
                        feature,
                        threshold,
                        improvement,
                    });
                }
            }
        }

        best
    }

    /// One Newton-Raphson step for binomial deviance: sum(y - p) / sum(p(1 - p))
    fn newton_value(&self, indices: &[usize]) -> f64 {
        let numerator: f64 = indices.iter().map(|&i| self.residual[i]).sum();
        let denominator: f64 = indices.iter().map(|&i| self.hessian[i]).sum();

        if denominator.abs() < MIN_HESSIAN {
            0.0
        } else {
            numerator / denominator
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;
    use rand::SeedableRng;

    fn stump() -> Vec<Node> {
        vec![
            Node::Split {
                feature: 1,
                threshold: 0.5,
                left: 1,
                right: 2,
            },
            Node::Leaf { value: -1.0 },
            Node::Leaf { value: 2.0 },
        ]
    }

    #[test]
    fn test_predict_follows_threshold() {
        let tree = RegressionTree::from_nodes(stump(), 2).unwrap();
        assert_eq!(tree.predict(&[9.0, 0.5]), -1.0);
        assert_eq!(tree.predict(&[9.0, 0.6]), 2.0);
        assert_eq!(tree.depth(), 1);
        assert_eq!(tree.leaf_count(), 2);
    }

    #[test]
    fn test_validate_rejects_cycles_and_bad_features() {
        let mut cyclic = stump();
        cyclic[0] = Node::Split {
            feature: 0,
            threshold: 0.0,
            left: 0,
            right: 2,
        };
        assert!(RegressionTree::from_nodes(cyclic, 2).is_err());
        assert!(RegressionTree::from_nodes(stump(), 1).is_err());
        assert!(RegressionTree::from_nodes(Vec::new(), 2).is_err());
    }

    #[test]
    fn test_builder_separates_residuals() {
        let x = array![[0.0], [1.0], [2.0], [3.0]];
        let residual = [-0.5, -0.5, 0.5, 0.5];
        let hessian = [0.25; 4];
        let mut rng = StdRng::seed_from_u64(42);
        let params = TreeParams {
            max_depth: 3,
            min_samples_split: 2,
            min_samples_leaf: 1,
        };

        let tree = TreeBuilder::new(x.view(), &residual, &hessian, params, &mut rng).build();

        // One split at 1.5 is enough; both children are pure
        assert_eq!(tree.depth(), 1);
        assert_eq!(tree.predict(&[0.0]), -2.0);
        assert_eq!(tree.predict(&[3.0]), 2.0);
        assert!(tree.validate(1).is_ok());
    }

    #[test]
    fn test_builder_respects_max_depth() {
        let x = array![[0.0], [1.0], [2.0], [3.0], [4.0], [5.0], [6.0], [7.0]];
        let residual = [0.1, -0.2, 0.3, -0.4, 0.5, -0.6, 0.7, -0.8];
        let hessian = [0.25; 8];
        let mut rng = StdRng::seed_from_u64(42);
        let params = TreeParams {
            max_depth: 2,
            min_samples_split: 2,
            min_samples_leaf: 1,
        };

        let tree = TreeBuilder::new(x.view(), &residual, &hessian, params, &mut rng).build();
        assert!(tree.depth() <= 2);
    }
}
