//! Testing utilities for forest-vote.
//!
//! Tree-building macro, fixture models and seeded random data, shared by unit
//! tests, integration tests and benchmarks.
//!
//! # Usage
//!
//! ```ignore
//! use forest_vote::forest_tree;
//!
//! let tree = forest_tree! {
//!     0 => split(2, 2.45) -> 1, 2,
//!     1 => leaf[50.0, 0.0, 0.0],
//!     2 => leaf[0.0, 49.0, 5.0],
//! };
//! ```

use rand::prelude::*;

use crate::repr::{ForestModel, Node, NodeId, Tree};

// =============================================================================
// Tree Macro
// =============================================================================

/// Build a [`Tree`](crate::repr::Tree) from `id => node` lines.
///
/// Ids must be listed in order starting at 0. `split(feature, threshold) ->
/// left, right` creates a split; `leaf[w0, w1, ...]` creates a leaf. The
/// result is not validated, so broken trees can be written on purpose.
#[macro_export]
macro_rules! forest_tree {
    (@node split ($feature:expr, $threshold:expr) -> $left:literal, $right:literal) => {
        $crate::repr::Node::split($feature, $threshold, $left, $right)
    };
    (@node leaf [$($w:expr),* $(,)?]) => {{
        let value: ::std::vec::Vec<f64> = ::std::vec![$(($w) as f64),*];
        $crate::repr::Node::leaf(value)
    }};
    ($($id:literal => $kind:ident $body:tt $(-> $left:literal, $right:literal)?),+ $(,)?) => {{
        let mut nodes: ::std::vec::Vec<$crate::repr::Node> = ::std::vec::Vec::new();
        $(
            assert_eq!($id as usize, nodes.len(), "forest_tree! ids must be sequential from 0");
            nodes.push($crate::forest_tree!(@node $kind $body $(-> $left, $right)?));
        )+
        $crate::repr::Tree::new(nodes)
    }};
}

// =============================================================================
// Fixture Models
// =============================================================================

/// Feature names of the iris fixture.
pub const IRIS_FEATURES: [&str; 4] = ["sepal_length", "sepal_width", "petal_length", "petal_width"];

/// Class names of the iris fixture.
pub const IRIS_CLASSES: [&str; 3] = ["setosa", "versicolor", "virginica"];

/// Small three-tree iris classifier.
///
/// Matches `tests/test-cases/iris.model.json`.
pub fn iris_model() -> ForestModel {
    let a = crate::forest_tree! {
        0 => split(2, 2.45) -> 1, 2,
        1 => leaf[50.0, 0.0, 0.0],
        2 => split(3, 1.75) -> 3, 4,
        3 => leaf[0.0, 49.0, 5.0],
        4 => leaf[0.0, 1.0, 45.0],
    };
    let b = crate::forest_tree! {
        0 => split(3, 0.8) -> 1, 2,
        1 => leaf[48.0, 0.0, 0.0],
        2 => split(2, 4.95) -> 3, 4,
        3 => leaf[0.0, 47.0, 1.0],
        4 => leaf[0.0, 3.0, 51.0],
    };
    let c = crate::forest_tree! {
        0 => split(0, 5.45) -> 1, 2,
        1 => leaf[45.0, 6.0, 1.0],
        2 => split(3, 1.65) -> 3, 4,
        3 => leaf[5.0, 44.0, 4.0],
        4 => leaf[0.0, 0.0, 45.0],
    };
    model_from_trees(&IRIS_FEATURES, &IRIS_CLASSES, vec![a, b, c])
}

/// Build a validated model from string slices.
///
/// # Panics
///
/// Panics if the model is malformed.
pub fn model_from_trees(features: &[&str], classes: &[&str], trees: Vec<Tree>) -> ForestModel {
    ForestModel::new(
        features.iter().map(|s| s.to_string()).collect(),
        classes.iter().map(|s| s.to_string()).collect(),
        trees,
    )
    .unwrap_or_else(|e| panic!("fixture model is malformed: {e}"))
}

// =============================================================================
// Random Data
// =============================================================================

/// Random valid forest with `n_trees` trees of depth at most 6.
///
/// Leaf weights are small integers so ties are common.
pub fn random_model(seed: u64, n_trees: usize, n_features: usize, n_classes: usize) -> ForestModel {
    let mut rng = StdRng::seed_from_u64(seed);
    let trees = (0..n_trees)
        .map(|_| random_tree(&mut rng, n_features, n_classes, 6))
        .collect();
    let features: Vec<String> = (0..n_features).map(|i| format!("f{i}")).collect();
    let classes: Vec<String> = (0..n_classes).map(|i| format!("class_{i}")).collect();
    ForestModel::new(features, classes, trees)
        .unwrap_or_else(|e| panic!("random model is malformed: {e}"))
}

/// Random feature rows, uniform in `[-1.5, 1.5]`.
pub fn random_rows(seed: u64, rows: usize, n_features: usize) -> Vec<Vec<f64>> {
    let mut rng = StdRng::seed_from_u64(seed);
    (0..rows)
        .map(|_| (0..n_features).map(|_| rng.gen_range(-1.5..=1.5)).collect())
        .collect()
}

fn random_tree(rng: &mut StdRng, n_features: usize, n_classes: usize, max_depth: usize) -> Tree {
    let mut nodes = Vec::new();
    grow(rng, &mut nodes, 0, max_depth, n_features, n_classes);
    Tree::new(nodes)
}

/// Append a subtree in preorder and return its root id.
fn grow(
    rng: &mut StdRng,
    nodes: &mut Vec<Node>,
    depth: usize,
    max_depth: usize,
    n_features: usize,
    n_classes: usize,
) -> NodeId {
    let id = nodes.len();
    let is_leaf = n_features == 0 || depth == max_depth || (depth > 0 && rng.gen_bool(0.25));

    if is_leaf {
        let value: Vec<f64> = (0..n_classes).map(|_| f64::from(rng.gen_range(0u8..8))).collect();
        nodes.push(Node::leaf(value));
        return id as NodeId;
    }

    let feature = rng.gen_range(0..n_features) as u32;
    let threshold = rng.gen_range(-1.0..1.0);
    nodes.push(Node::leaf(Vec::new()));
    let left = grow(rng, nodes, depth + 1, max_depth, n_features, n_classes);
    let right = grow(rng, nodes, depth + 1, max_depth, n_features, n_classes);
    nodes[id] = Node::split(feature, threshold, left, right);
    id as NodeId
}
