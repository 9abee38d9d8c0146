//! Prediction error types.
//!
//! Every failure is a value the caller can match on; nothing here is fatal.

use crate::repr::TreeValidationError;

/// Error returned by prediction entry points.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum PredictError {
    /// No model has been loaded yet. Retry once loading has finished.
    #[error("model not loaded yet, please try again in a moment")]
    ModelNotLoaded,

    /// The caller's feature input is unusable.
    #[error(transparent)]
    InvalidInput(#[from] InvalidInputError),

    /// The model data is corrupt.
    #[error("malformed model: {0}")]
    MalformedModel(#[from] MalformedModelError),
}

/// Problems with a caller-supplied feature vector or form fields.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum InvalidInputError {
    /// Wrong number of feature values.
    #[error("expected {expected} feature values, got {actual}")]
    LengthMismatch { expected: usize, actual: usize },

    /// A required form field is absent.
    #[error("missing value for {feature}")]
    Missing { feature: String },

    /// A form field does not hold a number.
    #[error("invalid value for {feature}: {raw:?}")]
    Unparseable { feature: String, raw: String },

    /// A feature value is NaN or infinite.
    #[error("invalid value for {feature}: {value}")]
    NonFinite { feature: String, value: f64 },
}

impl InvalidInputError {
    /// Name of the offending feature, if the error is about a single one.
    pub fn feature(&self) -> Option<&str> {
        match self {
            Self::LengthMismatch { .. } => None,
            Self::Missing { feature }
            | Self::Unparseable { feature, .. }
            | Self::NonFinite { feature, .. } => Some(feature),
        }
    }
}

/// Corrupt or inconsistent model data.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum MalformedModelError {
    /// The model declares no classes.
    #[error("model has no target classes")]
    NoClasses,

    /// Declared class count disagrees with the class names.
    #[error("n_classes is {n_classes} but {n_target_names} target names were given")]
    ClassCountMismatch {
        n_classes: usize,
        n_target_names: usize,
    },

    /// The forest has no trees to vote.
    #[error("forest has no trees")]
    EmptyForest,

    /// A tree failed validation or traversal.
    #[error("tree {tree}: {error}")]
    InvalidTree {
        tree: usize,
        #[source]
        error: TreeValidationError,
    },
}
