//! Schema types for the JSON model file.
//!
//! These mirror the file layout exactly and are kept separate from the
//! runtime types in [`crate::repr`]: the file uses sentinel values
//! (`feature_index == -1` for leaves, `-1` children) that the runtime
//! representation encodes as an enum instead.
//!
//! ```json
//! {
//!   "feature_names": ["sepal_length", "sepal_width"],
//!   "target_names": ["setosa", "versicolor"],
//!   "n_classes": 2,
//!   "forest": [
//!     [
//!       {"feature_index": 0, "threshold": 5.45, "children_left": 1, "children_right": 2, "value": [[45, 6]]},
//!       {"feature_index": -1, "threshold": -2.0, "children_left": -1, "children_right": -1, "value": [[45, 6]]},
//!       {"feature_index": -1, "threshold": -2.0, "children_left": -1, "children_right": -1, "value": [[0, 44]]}
//!     ]
//!   ]
//! }
//! ```

use serde::{Deserialize, Serialize};

/// `feature_index` value marking a leaf.
pub const LEAF_FEATURE_INDEX: i64 = -1;

/// Child id written for leaves.
pub const NO_CHILD: i64 = -1;

/// Threshold written for leaves.
pub const LEAF_THRESHOLD: f64 = -2.0;

fn default_leaf_threshold() -> f64 {
    LEAF_THRESHOLD
}

fn default_no_child() -> i64 {
    NO_CHILD
}

/// Full model file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelSchema {
    /// Input feature names, in feature-vector order.
    pub feature_names: Vec<String>,
    /// Class names, indexed by class id.
    pub target_names: Vec<String>,
    /// Number of classes. Taken from `target_names` when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub n_classes: Option<usize>,
    /// Trees, each a flat node array with the root at index 0.
    pub forest: Vec<Vec<NodeSchema>>,
}

/// One tree node.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NodeSchema {
    /// Split feature, or [`LEAF_FEATURE_INDEX`] for a leaf.
    pub feature_index: i64,
    /// Split threshold (`<=` goes left).
    #[serde(default = "default_leaf_threshold")]
    pub threshold: f64,
    #[serde(default = "default_no_child")]
    pub children_left: i64,
    #[serde(default = "default_no_child")]
    pub children_right: i64,
    /// Per-class weights. Only read for leaves.
    #[serde(default)]
    pub value: NodeValueSchema,
}

/// Class weights, either flat or as a single-row matrix.
///
/// scikit-learn exports `tree_.value` with shape `(n_outputs, n_classes)`,
/// which lands in JSON as `[[w0, w1, ...]]`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum NodeValueSchema {
    Flat(Vec<f64>),
    Nested(Vec<Vec<f64>>),
}

impl Default for NodeValueSchema {
    fn default() -> Self {
        NodeValueSchema::Flat(Vec::new())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn leaf_defaults() {
        let node: NodeSchema = serde_json::from_str(r#"{"feature_index": -1, "value": [1, 2]}"#).unwrap();
        assert_eq!(node.threshold, LEAF_THRESHOLD);
        assert_eq!(node.children_left, NO_CHILD);
        assert_eq!(node.children_right, NO_CHILD);
        assert_eq!(node.value, NodeValueSchema::Flat(vec![1.0, 2.0]));
    }

    #[test]
    fn nested_value() {
        let node: NodeSchema =
            serde_json::from_str(r#"{"feature_index": -1, "value": [[0.5, 1.5]]}"#).unwrap();
        assert_eq!(node.value, NodeValueSchema::Nested(vec![vec![0.5, 1.5]]));
    }

    #[test]
    fn n_classes_optional() {
        let json = r#"{"feature_names": [], "target_names": ["a"], "forest": []}"#;
        let model: ModelSchema = serde_json::from_str(json).unwrap();
        assert_eq!(model.n_classes, None);

        let out = serde_json::to_string(&model).unwrap();
        assert!(!out.contains("n_classes"));
    }

    #[test]
    fn unknown_fields_ignored() {
        let json = r#"{"feature_index": 1, "threshold": 0.5, "children_left": 1,
                       "children_right": 2, "value": [], "impurity": 0.3}"#;
        let node: NodeSchema = serde_json::from_str(json).unwrap();
        assert_eq!(node.feature_index, 1);
    }
}
