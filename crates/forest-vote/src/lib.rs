//! forest-vote: majority-vote inference for pre-serialized decision forests.
//!
//! A forest is loaded once from JSON, validated, and then shared read-only by
//! every prediction. Each tree walks a feature vector down to a leaf and votes
//! for the class with the largest leaf weight; the class with the most votes
//! wins. Ties always resolve to the lowest class index.
//!
//! # Key Types
//!
//! - [`ForestModel`] - Validated, immutable model (feature names, class names, trees)
//! - [`ForestPredictor`] - Runs the vote, optionally on a rayon pool
//! - [`ModelSlot`] - Load-once holder used by form/CLI front ends
//! - [`PredictError`] - `ModelNotLoaded`, `InvalidInput` or `MalformedModel`
//!
//! # Loading and Predicting
//!
//! ```ignore
//! use forest_vote::{ForestModel, predict};
//!
//! let model = ForestModel::read_path("model_data.json")?;
//! let label = predict(&model, &[5.1, 3.5, 1.4, 0.2])?;
//! ```

// Re-export approx traits for users who want to compare vote fractions
pub use approx;

pub mod config;
pub mod error;
pub mod form;
pub mod inference;
pub mod persist;
pub mod repr;
pub mod session;
pub mod testing;
pub mod utils;

// =============================================================================
// Convenience Re-exports
// =============================================================================

pub use config::{ConfigError, PredictorConfig, ReportConfig};
pub use error::{InvalidInputError, MalformedModelError, PredictError};
pub use form::{feature_label, read_features, FieldSource, PredictionReport};
pub use inference::{predict, stable_argmax, ForestPredictor, VoteTally};
pub use persist::ReadError;
pub use repr::{ForestModel, Node, NodeId, Tree, TreeValidationError};
pub use session::{LoadError, ModelSlot};
pub use utils::{Execution, Parallelism};
