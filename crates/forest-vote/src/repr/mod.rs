//! Runtime forest representation.

/// Node identifier within a single tree.
///
/// Index into the tree's node array; the root is always `0`.
pub type NodeId = u32;

pub mod model;
pub mod node;
pub mod tree;

pub use model::ForestModel;
pub use node::Node;
pub use tree::{Tree, TreeValidationError};
