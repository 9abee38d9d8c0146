//! Load-once model holder for form and CLI front ends.
//!
//! A [`ModelSlot`] starts empty and accepts exactly one model. Predictions
//! made before the model arrives fail immediately with
//! [`PredictError::ModelNotLoaded`]; nothing ever blocks waiting for a load.
//!
//! ```ignore
//! use std::sync::Arc;
//! use forest_vote::ModelSlot;
//!
//! let slot = Arc::new(ModelSlot::new());
//! let loading = slot.spawn_load("model_data.json");
//!
//! // Too early: Err(PredictError::ModelNotLoaded)
//! let _ = slot.predict(&[5.1, 3.5, 1.4, 0.2]);
//!
//! loading.join().unwrap()?;
//! let report = slot.submit(&[("sepal_length", "5.1"), /* ... */])?;
//! println!("{report}");
//! ```

use std::path::PathBuf;
use std::sync::{Arc, OnceLock};
use std::thread::JoinHandle;

use tracing::{debug, info, warn};

use crate::config::{ConfigError, PredictorConfig, ReportConfig};
use crate::error::{MalformedModelError, PredictError};
use crate::form::{read_features, FieldSource, PredictionReport};
use crate::inference::{ForestPredictor, VoteTally};
use crate::persist::ReadError;
use crate::repr::ForestModel;
use crate::utils::Execution;

/// Errors from installing a model into a [`ModelSlot`].
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    /// Reading or validating the model file failed.
    #[error(transparent)]
    Read(#[from] ReadError),

    /// A model is already installed; models are immutable once loaded.
    #[error("a model is already loaded")]
    AlreadyLoaded,
}

/// Holds at most one model, installed once and shared read-only afterwards.
#[derive(Debug)]
pub struct ModelSlot {
    model: OnceLock<Arc<ForestModel>>,
    execution: Execution,
    parallel_min_trees: usize,
    report: ReportConfig,
}

impl ModelSlot {
    /// Empty slot with default configuration.
    pub fn new() -> Self {
        let defaults = PredictorConfig::default();
        Self {
            model: OnceLock::new(),
            execution: Execution::default(),
            parallel_min_trees: defaults.parallel_min_trees,
            report: ReportConfig::default(),
        }
    }

    /// Empty slot with explicit predictor and report settings.
    ///
    /// A dedicated thread pool, if requested, is built once here and shared
    /// by every prediction.
    pub fn with_config(predictor: &PredictorConfig, report: ReportConfig) -> Result<Self, ConfigError> {
        Ok(Self {
            model: OnceLock::new(),
            execution: predictor.execution()?,
            parallel_min_trees: predictor.parallel_min_trees,
            report,
        })
    }

    /// Install an already-built model.
    pub fn install(&self, model: ForestModel) -> Result<(), LoadError> {
        self.model
            .set(Arc::new(model))
            .map_err(|_| LoadError::AlreadyLoaded)?;
        info!("model installed");
        Ok(())
    }

    /// Read, validate and install a model file.
    pub fn load_path(&self, path: impl Into<PathBuf>) -> Result<(), LoadError> {
        if self.is_loaded() {
            return Err(LoadError::AlreadyLoaded);
        }
        let path = path.into();
        let model = ForestModel::read_path(&path).map_err(|e| {
            warn!(path = %path.display(), error = %e, "failed to load model");
            e
        })?;
        self.install(model)
    }

    /// Load a model file on a background thread.
    ///
    /// Once the handle reports success, every later call on this slot sees the
    /// model.
    pub fn spawn_load(self: &Arc<Self>, path: impl Into<PathBuf>) -> JoinHandle<Result<(), LoadError>> {
        let slot = Arc::clone(self);
        let path = path.into();
        std::thread::spawn(move || slot.load_path(path))
    }

    /// Whether a model has been installed.
    #[inline]
    pub fn is_loaded(&self) -> bool {
        self.model.get().is_some()
    }

    /// The installed model, or [`PredictError::ModelNotLoaded`].
    pub fn model(&self) -> Result<Arc<ForestModel>, PredictError> {
        self.model.get().cloned().ok_or(PredictError::ModelNotLoaded)
    }

    /// Report rendering settings.
    #[inline]
    pub fn report_config(&self) -> &ReportConfig {
        &self.report
    }

    /// Predicted class name for a feature vector.
    pub fn predict(&self, features: &[f64]) -> Result<String, PredictError> {
        let model = self.model()?;
        let label = self.predictor(&model).predict(features)?;
        Ok(label.to_string())
    }

    /// Per-class votes for a feature vector.
    pub fn predict_votes(&self, features: &[f64]) -> Result<VoteTally, PredictError> {
        let model = self.model()?;
        self.predictor(&model).predict_votes(features)
    }

    /// Full form flow: read fields, vote, and build a report.
    pub fn submit<F>(&self, source: &F) -> Result<PredictionReport, PredictError>
    where
        F: FieldSource + ?Sized,
    {
        let model = self.model().map_err(|e| {
            debug!("prediction requested before model was loaded");
            e
        })?;
        let features = read_features(&model, source)?;

        let predictor = self.predictor(&model);
        let tally = predictor.predict_votes(&features)?;
        let class = tally
            .winner()
            .ok_or(MalformedModelError::NoClasses)?;
        let label = model
            .target_name(class)
            .ok_or(MalformedModelError::NoClasses)?;

        Ok(PredictionReport::new(&model, &features, label, &tally, &self.report))
    }

    fn predictor<'m>(&self, model: &'m ForestModel) -> ForestPredictor<'m> {
        ForestPredictor::with_execution(model, self.execution.clone(), self.parallel_min_trees)
    }
}

impl Default for ModelSlot {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::iris_model;

    #[test]
    fn predict_before_load_fails_fast() {
        let slot = ModelSlot::new();
        assert!(!slot.is_loaded());
        assert_eq!(slot.predict(&[5.1, 3.5, 1.4, 0.2]), Err(PredictError::ModelNotLoaded));
        assert_eq!(
            slot.submit(&[("sepal_length", "5.1")][..]).unwrap_err(),
            PredictError::ModelNotLoaded
        );
    }

    #[test]
    fn install_once() {
        let slot = ModelSlot::new();
        slot.install(iris_model()).unwrap();
        assert!(matches!(slot.install(iris_model()), Err(LoadError::AlreadyLoaded)));
        assert_eq!(slot.predict(&[6.3, 3.3, 6.0, 2.5]).unwrap(), "virginica");
    }

    #[test]
    fn submit_builds_report() {
        let slot = ModelSlot::new();
        slot.install(iris_model()).unwrap();
        let fields = vec![
            ("sepal_length", "6.4"),
            ("sepal_width", "3.2"),
            ("petal_length", "4.5"),
            ("petal_width", "1.5"),
        ];
        let report = slot.submit(&fields).unwrap();
        assert_eq!(report.prediction, "versicolor");
        assert_eq!(report.votes[1].votes, 3);
        assert_eq!(report.features[2].label, "Petal Length");
    }

    #[test]
    fn submit_reports_bad_field() {
        let slot = ModelSlot::new();
        slot.install(iris_model()).unwrap();
        let fields = vec![
            ("sepal_length", "6.4"),
            ("sepal_width", "wide"),
            ("petal_length", "4.5"),
            ("petal_width", "1.5"),
        ];
        match slot.submit(&fields).unwrap_err() {
            PredictError::InvalidInput(e) => assert_eq!(e.feature(), Some("sepal_width")),
            other => panic!("unexpected error: {other:?}"),
        }
    }
}
