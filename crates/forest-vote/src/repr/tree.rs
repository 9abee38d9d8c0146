//! Decision tree storage and structural validation.
//!
//! A [`Tree`] is a flat array of [`Node`]s addressed by [`NodeId`], with the
//! root at id `0`. Construction does not check anything; [`Tree::validate`]
//! walks the structure once and reports the first problem it finds.

use super::node::Node;
use super::NodeId;

// ============================================================================
// TreeValidationError
// ============================================================================

/// Structural problems in a single tree.
///
/// Raised by [`Tree::validate`] at load time, and by the traversal guard when
/// an unchecked tree turns out to be broken at predict time.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum TreeValidationError {
    /// Tree has no nodes.
    #[error("tree has no nodes")]
    EmptyTree,
    /// A child pointer references a node id outside the tree.
    #[error("node {node} has {side} child {child} but tree has {n_nodes} nodes")]
    ChildOutOfBounds {
        node: NodeId,
        side: &'static str,
        child: i64,
        n_nodes: usize,
    },
    /// A node lies on a cycle.
    #[error("cycle detected at node {node}")]
    CycleDetected { node: NodeId },
    /// A node is reachable by more than one path.
    #[error("node {node} is reachable by more than one path")]
    DuplicateVisit { node: NodeId },
    /// A node exists in storage but is unreachable from the root.
    #[error("node {node} is unreachable from the root")]
    UnreachableNode { node: NodeId },
    /// Negative feature index other than the leaf marker.
    #[error("node {node} has invalid feature index {feature}")]
    InvalidFeatureIndex { node: NodeId, feature: i64 },
    /// Split feature is not a valid index into the feature vector.
    #[error("node {node} splits on feature {feature} but model has {n_features} features")]
    FeatureOutOfRange {
        node: NodeId,
        feature: u32,
        n_features: usize,
    },
    /// Split threshold is NaN, so every comparison would fail.
    #[error("node {node} has a NaN threshold")]
    NanThreshold { node: NodeId },
    /// Leaf weight vector has the wrong number of classes.
    #[error("leaf {node} has {len} class weights, expected {n_classes}")]
    LeafWidthMismatch {
        node: NodeId,
        len: usize,
        n_classes: usize,
    },
    /// Leaf weight is NaN or infinite.
    #[error("leaf {node} has non-finite weight for class {class}")]
    NonFiniteLeafValue { node: NodeId, class: usize },
    /// Leaf stores more than one output row.
    #[error("leaf {node} stores {rows} output rows, expected 1")]
    MultiOutputLeaf { node: NodeId, rows: usize },
    /// Traversal did not reach a leaf within the step budget.
    #[error("traversal exceeded {budget} steps without reaching a leaf")]
    StepBudgetExceeded { budget: usize },
}

// ============================================================================
// Tree
// ============================================================================

/// Immutable decision tree.
#[derive(Debug, Clone, PartialEq)]
pub struct Tree {
    nodes: Box<[Node]>,
}

impl Tree {
    /// Create a tree from nodes in id order. Nothing is checked here.
    pub fn new(nodes: Vec<Node>) -> Self {
        Self {
            nodes: nodes.into_boxed_slice(),
        }
    }

    /// Number of nodes (splits + leaves).
    #[inline]
    pub fn n_nodes(&self) -> usize {
        self.nodes.len()
    }

    /// Number of leaves.
    pub fn n_leaves(&self) -> usize {
        self.nodes.iter().filter(|n| n.is_leaf()).count()
    }

    /// Node by id, or `None` if the id is out of range.
    #[inline]
    pub fn node(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id as usize)
    }

    /// All nodes in id order.
    #[inline]
    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    /// Length of the longest root-to-leaf path, in edges.
    ///
    /// Only meaningful for a validated tree.
    pub fn depth(&self) -> usize {
        let mut max_depth = 0;
        let mut stack: Vec<(NodeId, usize)> = vec![(0, 0)];
        while let Some((id, depth)) = stack.pop() {
            match self.node(id) {
                Some(Node::Split { left, right, .. }) => {
                    stack.push((*left, depth + 1));
                    stack.push((*right, depth + 1));
                }
                Some(Node::Leaf { .. }) => max_depth = max_depth.max(depth),
                None => {}
            }
        }
        max_depth
    }

    // =========================================================================
    // Validation
    // =========================================================================

    /// Validate structure against the model's feature and class counts.
    ///
    /// Checks child bounds, cycles, shared or orphaned nodes, feature indices,
    /// thresholds and leaf widths.
    pub fn validate(&self, n_features: usize, n_classes: usize) -> Result<(), TreeValidationError> {
        let n_nodes = self.n_nodes();
        if n_nodes == 0 {
            return Err(TreeValidationError::EmptyTree);
        }

        for (i, node) in self.nodes.iter().enumerate() {
            let id = i as NodeId;
            match node {
                Node::Split {
                    feature, threshold, ..
                } => {
                    if *feature as usize >= n_features {
                        return Err(TreeValidationError::FeatureOutOfRange {
                            node: id,
                            feature: *feature,
                            n_features,
                        });
                    }
                    if threshold.is_nan() {
                        return Err(TreeValidationError::NanThreshold { node: id });
                    }
                }
                Node::Leaf { value } => {
                    if value.len() != n_classes {
                        return Err(TreeValidationError::LeafWidthMismatch {
                            node: id,
                            len: value.len(),
                            n_classes,
                        });
                    }
                    if let Some(class) = value.iter().position(|w| !w.is_finite()) {
                        return Err(TreeValidationError::NonFiniteLeafValue { node: id, class });
                    }
                }
            }
        }

        // Iterative DFS with color marking.
        // 0 = unvisited, 1 = visiting, 2 = done
        let mut color = vec![0u8; n_nodes];
        let mut stack: Vec<(NodeId, u8)> = vec![(0, 0)];

        while let Some((node, phase)) = stack.pop() {
            let node_usize = node as usize;

            match phase {
                0 => {
                    match color[node_usize] {
                        0 => {}
                        1 => return Err(TreeValidationError::CycleDetected { node }),
                        _ => return Err(TreeValidationError::DuplicateVisit { node }),
                    }

                    color[node_usize] = 1;
                    stack.push((node, 1));

                    if let Some((left, right)) = self.nodes[node_usize].children() {
                        for (side, child) in [("left", left), ("right", right)] {
                            if child as usize >= n_nodes {
                                return Err(TreeValidationError::ChildOutOfBounds {
                                    node,
                                    side,
                                    child: i64::from(child),
                                    n_nodes,
                                });
                            }
                        }

                        // Visit children
                        stack.push((right, 0));
                        stack.push((left, 0));
                    }
                }
                _ => {
                    color[node_usize] = 2;
                }
            }
        }

        if let Some(i) = color.iter().position(|&c| c == 0) {
            return Err(TreeValidationError::UnreachableNode { node: i as NodeId });
        }

        Ok(())
    }
}
