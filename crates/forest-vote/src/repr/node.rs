//! Tree node types.

use super::NodeId;

/// A single node of a decision tree.
///
/// Split nodes send a sample left when `features[feature] <= threshold` and
/// right otherwise. Leaves carry one weight per class.
#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    /// Numeric split on one feature.
    Split {
        feature: u32,
        threshold: f64,
        left: NodeId,
        right: NodeId,
    },
    /// Terminal node with a per-class weight vector.
    Leaf { value: Box<[f64]> },
}

impl Node {
    /// Create a split node.
    #[inline]
    pub fn split(feature: u32, threshold: f64, left: NodeId, right: NodeId) -> Self {
        Node::Split {
            feature,
            threshold,
            left,
            right,
        }
    }

    /// Create a leaf node.
    #[inline]
    pub fn leaf(value: impl Into<Box<[f64]>>) -> Self {
        Node::Leaf {
            value: value.into(),
        }
    }

    #[inline]
    pub fn is_leaf(&self) -> bool {
        matches!(self, Node::Leaf { .. })
    }

    /// Leaf weights, or `None` for split nodes.
    #[inline]
    pub fn leaf_value(&self) -> Option<&[f64]> {
        match self {
            Node::Leaf { value } => Some(&value[..]),
            Node::Split { .. } => None,
        }
    }

    /// Child ids of a split node, `(left, right)`.
    #[inline]
    pub fn children(&self) -> Option<(NodeId, NodeId)> {
        match *self {
            Node::Split { left, right, .. } => Some((left, right)),
            Node::Leaf { .. } => None,
        }
    }
}
