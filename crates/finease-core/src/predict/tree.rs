//! Regression trees stored as flat node arrays

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// A node of a fitted regression tree
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TreeNode {
    /// Go to `left` when `x[feature] <= threshold`, else `right`
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

/// A fitted regression tree; node 0 is the root
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DecisionTree {
    pub nodes: Vec<TreeNode>,
}

impl DecisionTree {
    pub fn new(nodes: Vec<TreeNode>) -> Self {
        Self { nodes }
    }

    /// A tree that always predicts `value`
    pub fn constant(value: f64) -> Self {
        Self {
            nodes: vec![TreeNode::Leaf { value }],
        }
    }

    /// Check structure once at load time
    ///
    /// Children always point forward, so a valid tree has no cycles and
    /// traversal visits at most `nodes.len()` nodes.
    pub fn validate(&self, n_features: usize) -> Result<()> {
        if self.nodes.is_empty() {
            return Err(Error::Artifact("Tree has no nodes".to_string()));
        }

        for (index, node) in self.nodes.iter().enumerate() {
            match *node {
                TreeNode::Split {
                    feature,
                    threshold,
                    left,
                    right,
                } => {
                    if feature >= n_features {
                        return Err(Error::Artifact(format!(
                            "Node {} splits on feature {}, model has {} features",
                            index, feature, n_features
                        )));
                    }
                    if !threshold.is_finite() {
                        return Err(Error::Artifact(format!(
                            "Node {} has a non-finite threshold",
                            index
                        )));
                    }
                    for child in [left, right] {
                        if child <= index || child >= self.nodes.len() {
                            return Err(Error::Artifact(format!(
                                "Node {} has invalid child index {}",
                                index, child
                            )));
                        }
                    }
                }
                TreeNode::Leaf { value } => {
                    if !value.is_finite() {
                        return Err(Error::Artifact(format!(
                            "Leaf {} has a non-finite value",
                            index
                        )));
                    }
                }
            }
        }
        Ok(())
    }

    /// Predict for one feature vector
    pub fn predict_one(&self, features: &[f64]) -> Result<f64> {
        let mut index = 0;
        // Bounded walk: a malformed tree errors instead of looping
        for _ in 0..self.nodes.len() {
            match self.nodes.get(index) {
                Some(TreeNode::Leaf { value }) => return Ok(*value),
                Some(TreeNode::Split {
                    feature,
                    threshold,
                    left,
                    right,
                }) => {
                    let x = features.get(*feature).ok_or_else(|| {
                        Error::Inference(format!(
                            "Feature vector has {} values, tree needs index {}",
                            features.len(),
                            feature
                        ))
                    })?;
                    index = if *x <= *threshold { *left } else { *right };
                }
                None => {
                    return Err(Error::Inference(format!(
                        "Tree node {} does not exist",
                        index
                    )))
                }
            }
        }
        Err(Error::Inference(
            "Tree traversal did not reach a leaf".to_string(),
        ))
    }

    /// Number of nodes
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}
