//! Majority-vote predictor for forest models.
//!
//! [`ForestPredictor`] borrows a [`ForestModel`] and runs the vote for one
//! feature vector or a batch of them.
//!
//! # Usage
//!
//! ```ignore
//! use forest_vote::{ForestPredictor, PredictorConfig};
//!
//! // Sequential or global-pool predictor with default settings
//! let predictor = ForestPredictor::new(&model);
//! let label = predictor.predict(&[5.1, 3.5, 1.4, 0.2])?;
//!
//! // Dedicated pool
//! let config = PredictorConfig::builder().n_threads(4.try_into()?).build()?;
//! let predictor = ForestPredictor::with_config(&model, &config)?;
//! let votes = predictor.predict_votes(&[5.1, 3.5, 1.4, 0.2])?;
//! ```
//!
//! # Parallelism
//!
//! For a single row, trees are folded into per-worker [`VoteTally`]s that are
//! merged at the end, so there is no shared counter. For batches, rows are
//! spread across workers and each row's trees run sequentially.

use rayon::prelude::*;
use tracing::debug;

use crate::config::{ConfigError, PredictorConfig};
use crate::error::{InvalidInputError, MalformedModelError, PredictError};
use crate::repr::{ForestModel, Tree};
use crate::utils::Execution;

use super::traversal::tree_vote;
use super::votes::VoteTally;

/// Default smallest forest that is split across threads.
pub const DEFAULT_PARALLEL_MIN_TREES: usize = 32;

/// Predict the class name for one feature vector, on the calling thread.
///
/// Shortcut for a sequential [`ForestPredictor`].
pub fn predict<'m>(model: &'m ForestModel, features: &[f64]) -> Result<&'m str, PredictError> {
    ForestPredictor::sequential(model).predict(features)
}

/// Majority-vote predictor.
#[derive(Debug, Clone)]
pub struct ForestPredictor<'m> {
    model: &'m ForestModel,
    execution: Execution,
    parallel_min_trees: usize,
}

impl<'m> ForestPredictor<'m> {
    /// Predictor using rayon's global pool for large forests.
    pub fn new(model: &'m ForestModel) -> Self {
        Self::with_execution(model, Execution::default(), DEFAULT_PARALLEL_MIN_TREES)
    }

    /// Predictor that never leaves the calling thread.
    pub fn sequential(model: &'m ForestModel) -> Self {
        Self::with_execution(model, Execution::sequential(), DEFAULT_PARALLEL_MIN_TREES)
    }

    /// Predictor configured from a [`PredictorConfig`].
    ///
    /// Builds a dedicated thread pool when `n_threads > 1`.
    pub fn with_config(model: &'m ForestModel, config: &PredictorConfig) -> Result<Self, ConfigError> {
        Ok(Self::with_execution(
            model,
            config.execution()?,
            config.parallel_min_trees,
        ))
    }

    /// Predictor sharing an existing [`Execution`].
    pub fn with_execution(model: &'m ForestModel, execution: Execution, parallel_min_trees: usize) -> Self {
        Self {
            model,
            execution,
            parallel_min_trees: parallel_min_trees.max(1),
        }
    }

    /// The underlying model.
    #[inline]
    pub fn model(&self) -> &'m ForestModel {
        self.model
    }

    /// Whether a single-row vote will be split across threads.
    #[inline]
    pub fn splits_trees(&self) -> bool {
        self.execution.parallelism().is_parallel() && self.model.n_trees() >= self.parallel_min_trees
    }

    /// Predicted class name.
    pub fn predict(&self, features: &[f64]) -> Result<&'m str, PredictError> {
        let class = self.predict_index(features)?;
        self.class_name(class)
    }

    /// Predicted class index.
    pub fn predict_index(&self, features: &[f64]) -> Result<usize, PredictError> {
        let tally = self.predict_votes(features)?;
        let class = tally.winner().ok_or(MalformedModelError::NoClasses)?;
        debug!(
            class,
            votes = tally.count(class),
            n_trees = self.model.n_trees(),
            "forest vote"
        );
        Ok(class)
    }

    /// Per-class vote counts.
    pub fn predict_votes(&self, features: &[f64]) -> Result<VoteTally, PredictError> {
        self.check_features(features)?;
        let tally = if self.splits_trees() {
            self.execution.install(|| self.tally_parallel(features))
        } else {
            self.tally_sequential(features)
        }?;
        Ok(tally)
    }

    /// Predict every row; one result per row, in order.
    ///
    /// A bad row does not affect the others.
    pub fn predict_batch<R>(&self, rows: &[R]) -> Vec<Result<&'m str, PredictError>>
    where
        R: AsRef<[f64]> + Sync,
    {
        let predict_row = |row: &R| -> Result<&'m str, PredictError> {
            let features = row.as_ref();
            self.check_features(features)?;
            let tally = self.tally_sequential(features)?;
            let class = tally.winner().ok_or(MalformedModelError::NoClasses)?;
            self.class_name(class)
        };

        if self.execution.parallelism().is_parallel() && rows.len() > 1 {
            self.execution
                .install(|| rows.par_iter().map(predict_row).collect())
        } else {
            rows.iter().map(predict_row).collect()
        }
    }

    // =========================================================================
    // Internals
    // =========================================================================

    fn check_features(&self, features: &[f64]) -> Result<(), InvalidInputError> {
        let expected = self.model.n_features();
        if features.len() != expected {
            return Err(InvalidInputError::LengthMismatch {
                expected,
                actual: features.len(),
            });
        }
        if let Some((name, &value)) = self
            .model
            .feature_names()
            .iter()
            .zip(features)
            .find(|(_, v)| !v.is_finite())
        {
            return Err(InvalidInputError::NonFinite {
                feature: name.clone(),
                value,
            });
        }
        Ok(())
    }

    fn class_name(&self, class: usize) -> Result<&'m str, PredictError> {
        self.model
            .target_name(class)
            .ok_or(PredictError::MalformedModel(MalformedModelError::NoClasses))
    }

    /// Forest shape checks from [`ForestModel::validate`], repeated for models
    /// built without validation.
    fn check_model(&self) -> Result<(), MalformedModelError> {
        if self.model.n_classes() == 0 {
            return Err(MalformedModelError::NoClasses);
        }
        if self.model.n_trees() == 0 {
            return Err(MalformedModelError::EmptyForest);
        }
        Ok(())
    }

    fn vote(&self, idx: usize, tree: &Tree, features: &[f64]) -> Result<usize, MalformedModelError> {
        tree_vote(tree, features, self.model.n_classes())
            .map_err(|error| MalformedModelError::InvalidTree { tree: idx, error })?
            .ok_or(MalformedModelError::NoClasses)
    }

    fn tally_sequential(&self, features: &[f64]) -> Result<VoteTally, MalformedModelError> {
        self.check_model()?;
        let mut tally = VoteTally::new(self.model.n_classes());
        for (idx, tree) in self.model.trees().iter().enumerate() {
            tally.record(self.vote(idx, tree, features)?);
        }
        Ok(tally)
    }

    fn tally_parallel(&self, features: &[f64]) -> Result<VoteTally, MalformedModelError> {
        self.check_model()?;
        let n_classes = self.model.n_classes();
        self.model
            .trees()
            .par_iter()
            .enumerate()
            .try_fold(
                || VoteTally::new(n_classes),
                |mut tally, (idx, tree)| {
                    tally.record(self.vote(idx, tree, features)?);
                    Ok::<_, MalformedModelError>(tally)
                },
            )
            .try_reduce(|| VoteTally::new(n_classes), |a, b| Ok(a.merged(b)))
    }
}
