//! Random-forest regression over flat, array-encoded decision trees.
//!
//! Each tree is a node array rooted at index 0. A split sends the row left
//! when `row[feature] <= threshold`, right otherwise. Children always sit
//! after their parent, which is what the exporter produces and what lets
//! [`DecisionTree::validate`] rule out cycles cheaply.

use serde::{Deserialize, Serialize};

use crate::{Model, ModelError};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TreeNode {
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
pub struct DecisionTree {
    pub nodes: Vec<TreeNode>,
}

impl DecisionTree {
    pub fn new(nodes: Vec<TreeNode>) -> Self {
        Self { nodes }
    }

    /// Single-leaf tree that always predicts `value`.
    pub fn constant(value: f64) -> Self {
        Self::new(vec![TreeNode::Leaf { value }])
    }

    pub fn validate(&self, n_features: usize) -> Result<(), String> {
        if self.nodes.is_empty() {
            return Err("tree has no nodes".into());
        }
        let len = self.nodes.len();
        for (idx, node) in self.nodes.iter().enumerate() {
            match node {
                TreeNode::Split {
                    feature,
                    threshold,
                    left,
                    right,
                } => {
                    if *feature >= n_features {
                        return Err(format!(
                            "node {idx} splits on feature {feature}, but only {n_features} exist"
                        ));
                    }
                    if !threshold.is_finite() {
                        return Err(format!("node {idx} has a non-finite threshold"));
                    }
                    for child in [*left, *right] {
                        if child <= idx || child >= len {
                            return Err(format!(
                                "node {idx} points at child {child}, outside {}..{len}",
                                idx + 1
                            ));
                        }
                    }
                }
                TreeNode::Leaf { value } => {
                    if !value.is_finite() {
                        return Err(format!("leaf {idx} has a non-finite value"));
                    }
                }
            }
        }
        Ok(())
    }

    /// Walks the tree for one row.
    pub fn evaluate(&self, row: &[f64]) -> Result<f64, ModelError> {
        let mut idx = 0;
        // A well-formed tree reaches a leaf in fewer steps than it has nodes.
        for _ in 0..self.nodes.len() {
            match self.nodes.get(idx) {
                Some(TreeNode::Leaf { value }) => return Ok(*value),
                Some(TreeNode::Split {
                    feature,
                    threshold,
                    left,
                    right,
                }) => {
                    let x = row.get(*feature).ok_or_else(|| {
                        ModelError::Malformed(format!("node {idx} reads missing feature {feature}"))
                    })?;
                    idx = if *x <= *threshold { *left } else { *right };
                }
                None => {
                    return Err(ModelError::Malformed(format!("node {idx} does not exist")));
                }
            }
        }
        Err(ModelError::Malformed("tree walk did not reach a leaf".into()))
    }
}

/// Averages the predictions of its trees.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RandomForestRegressor {
    pub n_features_in: usize,
    pub trees: Vec<DecisionTree>,
}

impl RandomForestRegressor {
    pub fn new(n_features_in: usize, trees: Vec<DecisionTree>) -> Self {
        Self {
            n_features_in,
            trees,
        }
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.n_features_in == 0 {
            return Err("n_features_in must be at least 1".into());
        }
        if self.trees.is_empty() {
            return Err("forest has no trees".into());
        }
        for (idx, tree) in self.trees.iter().enumerate() {
            tree.validate(self.n_features_in)
                .map_err(|reason| format!("tree {idx}: {reason}"))?;
        }
        Ok(())
    }
}

impl Model for RandomForestRegressor {
    fn name(&self) -> &str {
        "random_forest"
    }

    fn n_features(&self) -> usize {
        self.n_features_in
    }

    fn predict(&self, row: &[f64]) -> Result<f64, ModelError> {
        if row.len() != self.n_features_in {
            return Err(ModelError::ShapeMismatch {
                expected: self.n_features_in,
                got: row.len(),
            });
        }
        if self.trees.is_empty() {
            return Err(ModelError::Malformed("forest has no trees".into()));
        }
        let mut sum = 0.0;
        for tree in &self.trees {
            sum += tree.evaluate(row)?;
        }
        Ok(sum / self.trees.len() as f64)
    }
}
