//! Forest inference: traversal, per-tree votes and majority aggregation.
//!
//! # Module Structure
//!
//! - [`traversal`]: bounded root-to-leaf walk for one tree
//! - [`argmax`]: stable argmax (ties go to the lowest index)
//! - [`votes`]: per-class vote counts, mergeable across workers
//! - [`predictor`]: [`ForestPredictor`] and the [`predict`] shortcut

pub mod argmax;
pub mod predictor;
pub mod traversal;
pub mod votes;

pub use argmax::stable_argmax;
pub use predictor::{predict, ForestPredictor};
pub use traversal::{traverse_to_leaf, tree_vote};
pub use votes::VoteTally;
