//! Bounded tree traversal.
//!
//! Validated trees cannot fail here, but a tree built with
//! [`ForestModel::from_parts_unchecked`](crate::ForestModel::from_parts_unchecked)
//! may. Every failure is returned, never a panic: out-of-range child ids,
//! split features outside the feature vector, wrong leaf widths, and cycles
//! (caught by a step budget of `n_nodes + 1`).

use crate::repr::{Node, NodeId, Tree, TreeValidationError};

use super::argmax::stable_argmax;

/// Walk from the root to a leaf.
///
/// At each split, `features[feature] <= threshold` goes left and anything
/// else goes right. Returns the leaf id and its class weights.
pub fn traverse_to_leaf<'t>(
    tree: &'t Tree,
    features: &[f64],
) -> Result<(NodeId, &'t [f64]), TreeValidationError> {
    let n_nodes = tree.n_nodes();
    let budget = n_nodes + 1;
    let mut id: NodeId = 0;

    for _ in 0..budget {
        let node = tree.node(id).ok_or(TreeValidationError::EmptyTree)?;
        match *node {
            Node::Leaf { ref value } => return Ok((id, &value[..])),
            Node::Split {
                feature,
                threshold,
                left,
                right,
            } => {
                let fvalue = features.get(feature as usize).copied().ok_or(
                    TreeValidationError::FeatureOutOfRange {
                        node: id,
                        feature,
                        n_features: features.len(),
                    },
                )?;

                let (side, next) = if fvalue <= threshold {
                    ("left", left)
                } else {
                    ("right", right)
                };

                if next as usize >= n_nodes {
                    return Err(TreeValidationError::ChildOutOfBounds {
                        node: id,
                        side,
                        child: i64::from(next),
                        n_nodes,
                    });
                }
                id = next;
            }
        }
    }

    Err(TreeValidationError::StepBudgetExceeded { budget })
}

/// The class this tree votes for: stable argmax of the reached leaf.
///
/// `Ok(None)` only when the leaf is empty, which a leaf of the right width can
/// only be for a model without classes.
pub fn tree_vote(tree: &Tree, features: &[f64], n_classes: usize) -> Result<Option<usize>, TreeValidationError> {
    let (leaf, value) = traverse_to_leaf(tree, features)?;
    if value.len() != n_classes {
        return Err(TreeValidationError::LeafWidthMismatch {
            node: leaf,
            len: value.len(),
            n_classes,
        });
    }
    Ok(stable_argmax(value))
}
