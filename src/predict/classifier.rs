use std::collections::BTreeMap;
use std::fmt;

use anyhow::{Result, bail, ensure};
use serde::Deserialize;

use super::encoder::ClassCode;
use super::features::FeatureVector;

/// A trained model that maps a feature vector to a class code.
pub trait Classifier: fmt::Debug {
    fn predict(&self, features: &FeatureVector) -> ClassCode;
}

// ---------------------------------------------------------------------------
// Serialized model artifact
// ---------------------------------------------------------------------------

/// On-disk form of the classifier: the feature schema it was trained on and
/// the model itself.
///
/// ```json
/// {
///   "schema_version": 1,
///   "feature_names": ["Discount Applied", "Days Since Last Purchase",
///                     "Items Purchased", "Membership Type"],
///   "model": { "kind": "decision_tree", "nodes": [ ... ] }
/// }
/// ```
#[derive(Debug, Clone, Deserialize)]
pub struct ModelArtifact {
    pub schema_version: u32,
    pub feature_names: Vec<String>,
    pub model: Model,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Model {
    DecisionTree(DecisionTree),
    RandomForest { trees: Vec<DecisionTree> },
    LogisticRegression(LogisticRegression),
}

impl Model {
    /// Structural checks so `predict` can index without bounds failures.
    pub fn validate(&self, n_features: usize) -> Result<()> {
        match self {
            Model::DecisionTree(tree) => tree.validate(n_features),
            Model::RandomForest { trees } => {
                ensure!(!trees.is_empty(), "random forest has no trees");
                for (i, tree) in trees.iter().enumerate() {
                    tree.validate(n_features)
                        .map_err(|e| e.context(format!("tree {i}")))?;
                }
                Ok(())
            }
            Model::LogisticRegression(lr) => lr.validate(n_features),
        }
    }
}

impl Classifier for Model {
    fn predict(&self, features: &FeatureVector) -> ClassCode {
        match self {
            Model::DecisionTree(tree) => tree.predict(features),
            Model::RandomForest { trees } => {
                let mut votes: BTreeMap<ClassCode, usize> = BTreeMap::new();
                for tree in trees {
                    *votes.entry(tree.predict(features)).or_default() += 1;
                }
                // max_by_key returns the last maximum; iterate in reverse so
                // ties go to the lowest class code
                votes
                    .into_iter()
                    .rev()
                    .max_by_key(|&(_, n)| n)
                    .map(|(code, _)| code)
                    .unwrap_or_default()
            }
            Model::LogisticRegression(lr) => lr.predict(features),
        }
    }
}

// ---------------------------------------------------------------------------
// Decision tree
// ---------------------------------------------------------------------------

/// A tree node. Splits send `x[feature] <= threshold` left.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum Node {
    Split {
        feature: usize,
        threshold: f64,
        left: usize,
        right: usize,
    },
    Leaf {
        class: ClassCode,
    },
}

/// Flat node array with the root at index 0.
#[derive(Debug, Clone, Deserialize)]
pub struct DecisionTree {
    pub nodes: Vec<Node>,
}

impl DecisionTree {
    /// Children must come after their parent, which also rules out cycles.
    fn validate(&self, n_features: usize) -> Result<()> {
        ensure!(!self.nodes.is_empty(), "decision tree has no nodes");
        for (i, node) in self.nodes.iter().enumerate() {
            if let Node::Split {
                feature,
                threshold,
                left,
                right,
            } = node
            {
                if *feature >= n_features {
                    bail!("node {i} splits on feature {feature}, model has {n_features}");
                }
                ensure!(threshold.is_finite(), "node {i} has a non-finite threshold");
                for child in [left, right] {
                    ensure!(
                        *child > i && *child < self.nodes.len(),
                        "node {i} points at invalid child {child}"
                    );
                }
            }
        }
        Ok(())
    }

    /// Walk from the root to a leaf. A tree that skipped `validate` and has a
    /// dangling child or a cycle yields class 0 instead of panicking or
    /// looping.
    fn predict(&self, features: &FeatureVector) -> ClassCode {
        let x = features.as_slice();
        let mut idx = 0;
        // a valid path visits each node at most once
        for _ in 0..self.nodes.len() {
            match self.nodes.get(idx) {
                Some(Node::Leaf { class }) => return *class,
                Some(Node::Split {
                    feature,
                    threshold,
                    left,
                    right,
                }) => {
                    let value = x.get(*feature).copied().unwrap_or(f64::NAN);
                    // NaN compares false and goes right
                    idx = if value <= *threshold { *left } else { *right };
                }
                None => break,
            }
        }
        log::warn!("decision tree walk did not reach a leaf from node {idx}");
        ClassCode::default()
    }
}

// ---------------------------------------------------------------------------
// Logistic regression
// ---------------------------------------------------------------------------

/// One coefficient row per class (multinomial), or a single row for a binary
/// model where a positive score means class 1.
#[derive(Debug, Clone, Deserialize)]
pub struct LogisticRegression {
    pub coefficients: Vec<Vec<f64>>,
    pub intercepts: Vec<f64>,
}

impl LogisticRegression {
    fn validate(&self, n_features: usize) -> Result<()> {
        ensure!(!self.coefficients.is_empty(), "logistic regression has no coefficients");
        ensure!(
            self.coefficients.len() == self.intercepts.len(),
            "{} coefficient rows but {} intercepts",
            self.coefficients.len(),
            self.intercepts.len()
        );
        for (i, row) in self.coefficients.iter().enumerate() {
            ensure!(
                row.len() == n_features,
                "coefficient row {i} has {} weights, model has {n_features} features",
                row.len()
            );
        }
        Ok(())
    }

    fn scores<'a>(&'a self, x: &'a [f64]) -> impl Iterator<Item = f64> + 'a {
        self.coefficients
            .iter()
            .zip(&self.intercepts)
            .map(move |(row, b)| row.iter().zip(x).map(|(w, v)| w * v).sum::<f64>() + b)
    }

    fn predict(&self, features: &FeatureVector) -> ClassCode {
        let x = features.as_slice();
        if self.coefficients.len() == 1 {
            let z = self.scores(x).next().unwrap_or_default();
            return ClassCode::from(z > 0.0);
        }
        let mut best: Option<(usize, f64)> = None;
        for (i, z) in self.scores(x).enumerate() {
            match best {
                Some((_, top)) if z <= top => {}
                _ => best = Some((i, z)),
            }
        }
        best.map(|(i, _)| i as ClassCode).unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn features(v: &[f64]) -> FeatureVector {
        FeatureVector::new(v.to_vec())
    }

    fn stump(feature: usize, threshold: f64, left: ClassCode, right: ClassCode) -> DecisionTree {
        DecisionTree {
            nodes: vec![
                Node::Split {
                    feature,
                    threshold,
                    left: 1,
                    right: 2,
                },
                Node::Leaf { class: left },
                Node::Leaf { class: right },
            ],
        }
    }

    #[test]
    fn tree_sends_less_or_equal_left() {
        let model = Model::DecisionTree(stump(1, 20.0, 1, 0));
        assert_eq!(model.predict(&features(&[0.0, 20.0, 0.0, 0.0])), 1);
        assert_eq!(model.predict(&features(&[0.0, 20.5, 0.0, 0.0])), 0);
    }

    #[test]
    fn forest_majority_vote_ties_to_lowest_code() {
        let model = Model::RandomForest {
            trees: vec![stump(0, 5.0, 2, 1), stump(0, 5.0, 2, 1), stump(0, 5.0, 0, 0)],
        };
        assert_eq!(model.predict(&features(&[1.0, 0.0, 0.0, 0.0])), 2);

        let tied = Model::RandomForest {
            trees: vec![stump(0, 5.0, 2, 2), stump(0, 5.0, 1, 1)],
        };
        assert_eq!(tied.predict(&features(&[1.0, 0.0, 0.0, 0.0])), 1);
    }

    #[test]
    fn binary_logistic_uses_sign() {
        let model = Model::LogisticRegression(LogisticRegression {
            coefficients: vec![vec![0.1, -0.2, 0.0, 0.0]],
            intercepts: vec![0.0],
        });
        assert_eq!(model.predict(&features(&[10.0, 1.0, 0.0, 0.0])), 1);
        assert_eq!(model.predict(&features(&[0.0, 10.0, 0.0, 0.0])), 0);
    }

    #[test]
    fn multinomial_logistic_takes_arg_max() {
        let model = Model::LogisticRegression(LogisticRegression {
            coefficients: vec![vec![1.0, 0.0], vec![0.0, 1.0], vec![0.0, 0.0]],
            intercepts: vec![0.0, 0.0, 0.5],
        });
        assert_eq!(model.predict(&features(&[2.0, 1.0])), 0);
        assert_eq!(model.predict(&features(&[0.0, 3.0])), 1);
        assert_eq!(model.predict(&features(&[0.0, 0.0])), 2);
    }

    #[test]
    fn validation_rejects_broken_structures() {
        let bad_feature = Model::DecisionTree(stump(9, 1.0, 0, 1));
        assert!(bad_feature.validate(4).is_err());

        let backwards = Model::DecisionTree(DecisionTree {
            nodes: vec![Node::Split {
                feature: 0,
                threshold: 1.0,
                left: 0,
                right: 0,
            }],
        });
        assert!(backwards.validate(4).is_err());

        let empty_forest = Model::RandomForest { trees: vec![] };
        assert!(empty_forest.validate(4).is_err());

        let short_row = Model::LogisticRegression(LogisticRegression {
            coefficients: vec![vec![1.0]],
            intercepts: vec![0.0],
        });
        assert!(short_row.validate(4).is_err());

        assert!(Model::DecisionTree(stump(3, 1.0, 0, 1)).validate(4).is_ok());
    }

    #[test]
    fn unvalidated_trees_fall_back_instead_of_panicking() {
        let x = features(&[0.0, 0.0, 0.0, 0.0]);

        let empty = Model::DecisionTree(DecisionTree { nodes: vec![] });
        assert_eq!(empty.predict(&x), 0);

        let self_loop = Model::DecisionTree(DecisionTree {
            nodes: vec![Node::Split {
                feature: 0,
                threshold: 1.0,
                left: 0,
                right: 0,
            }],
        });
        assert_eq!(self_loop.predict(&x), 0);

        let dangling = Model::DecisionTree(DecisionTree {
            nodes: vec![Node::Split {
                feature: 0,
                threshold: 1.0,
                left: 7,
                right: 7,
            }],
        });
        assert_eq!(dangling.predict(&x), 0);
    }

    #[test]
    fn parses_tagged_artifact() {
        let artifact: ModelArtifact = serde_json::from_str(
            r#"{
                "schema_version": 1,
                "feature_names": ["a", "b"],
                "model": {
                    "kind": "decision_tree",
                    "nodes": [
                        {"feature": 0, "threshold": 0.5, "left": 1, "right": 2},
                        {"class": 0},
                        {"class": 1}
                    ]
                }
            }"#,
        )
        .unwrap();
        assert!(matches!(artifact.model, Model::DecisionTree(_)));
        assert!(artifact.model.validate(2).is_ok());
        assert_eq!(artifact.model.predict(&features(&[1.0, 0.0])), 1);
    }
}
