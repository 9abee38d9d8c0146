//! Predictor and report configuration with builder pattern.
//!
//! Both configs use the `bon` crate for builder generation; `build()`
//! validates before returning.
//!
//! # Example
//!
//! ```
//! use std::num::NonZeroUsize;
//! use forest_vote::{PredictorConfig, ReportConfig};
//!
//! // All defaults
//! let config = PredictorConfig::builder().build().unwrap();
//!
//! // Dedicated 4-thread pool, parallel from 16 trees up
//! let config = PredictorConfig::builder()
//!     .n_threads(NonZeroUsize::new(4).unwrap())
//!     .parallel_min_trees(16)
//!     .build()
//!     .unwrap();
//!
//! let report = ReportConfig::builder().unit("mm").build().unwrap();
//! ```

use std::num::NonZeroUsize;

use bon::Builder;

use crate::inference::predictor::DEFAULT_PARALLEL_MIN_TREES;
use crate::utils::Execution;

// =============================================================================
// ConfigError
// =============================================================================

/// Errors raised while validating configuration or building thread pools.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// `parallel_min_trees` must be at least 1.
    #[error("parallel_min_trees must be at least 1")]
    InvalidParallelMinTrees,

    /// The measurement unit contains control characters.
    #[error("unit must not contain control characters, got {0:?}")]
    InvalidUnit(String),

    /// The dedicated rayon pool could not be created.
    #[error("failed to build thread pool: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),
}

// =============================================================================
// PredictorConfig
// =============================================================================

/// How predictions are executed.
#[derive(Debug, Clone, Builder)]
#[builder(
    derive(Clone, Debug),
    finish_fn(vis = "", name = __build_internal)
)]
pub struct PredictorConfig {
    /// Number of threads. `None` uses rayon's global pool, `1` is sequential.
    pub n_threads: Option<NonZeroUsize>,

    /// Smallest forest that is split across threads. Default:
    /// [`DEFAULT_PARALLEL_MIN_TREES`].
    ///
    /// Smaller forests are voted on the calling thread.
    #[builder(default = DEFAULT_PARALLEL_MIN_TREES)]
    pub parallel_min_trees: usize,
}

impl<S: predictor_config_builder::IsComplete> PredictorConfigBuilder<S> {
    /// Build and validate the configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidParallelMinTrees`] if
    /// `parallel_min_trees == 0`.
    pub fn build(self) -> Result<PredictorConfig, ConfigError> {
        let config = self.__build_internal();
        config.validate()?;
        Ok(config)
    }
}

impl PredictorConfig {
    fn validate(&self) -> Result<(), ConfigError> {
        if self.parallel_min_trees == 0 {
            return Err(ConfigError::InvalidParallelMinTrees);
        }
        Ok(())
    }

    /// Resolve the thread count into an [`Execution`].
    pub fn execution(&self) -> Result<Execution, ConfigError> {
        Execution::from_threads(self.n_threads)
    }
}

impl Default for PredictorConfig {
    fn default() -> Self {
        Self {
            n_threads: None,
            parallel_min_trees: DEFAULT_PARALLEL_MIN_TREES,
        }
    }
}

// =============================================================================
// ReportConfig
// =============================================================================

/// How prediction reports are rendered.
#[derive(Debug, Clone, Builder)]
#[builder(
    derive(Clone, Debug),
    finish_fn(vis = "", name = __build_internal)
)]
pub struct ReportConfig {
    /// Unit appended to every feature value. Default: `cm`.
    ///
    /// An empty unit prints bare values.
    #[builder(into, default = String::from("cm"))]
    pub unit: String,
}

impl<S: report_config_builder::IsComplete> ReportConfigBuilder<S> {
    /// Build and validate the configuration.
    pub fn build(self) -> Result<ReportConfig, ConfigError> {
        let config = self.__build_internal();
        config.validate()?;
        Ok(config)
    }
}

impl ReportConfig {
    fn validate(&self) -> Result<(), ConfigError> {
        if self.unit.chars().any(char::is_control) {
            return Err(ConfigError::InvalidUnit(self.unit.clone()));
        }
        Ok(())
    }
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            unit: String::from("cm"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let config = PredictorConfig::builder().build().unwrap();
        assert_eq!(config.n_threads, None);
        assert_eq!(config.parallel_min_trees, DEFAULT_PARALLEL_MIN_TREES);
        assert_eq!(
            PredictorConfig::default().parallel_min_trees,
            config.parallel_min_trees
        );

        let report = ReportConfig::builder().build().unwrap();
        assert_eq!(report.unit, "cm");
        assert_eq!(ReportConfig::default().unit, "cm");
    }

    #[test]
    fn zero_min_trees_rejected() {
        let err = PredictorConfig::builder()
            .parallel_min_trees(0)
            .build()
            .unwrap_err();
        assert!(matches!(err, ConfigError::InvalidParallelMinTrees));
    }

    #[test]
    fn control_characters_in_unit_rejected() {
        let err = ReportConfig::builder().unit("c\nm").build().unwrap_err();
        assert!(matches!(err, ConfigError::InvalidUnit(_)));
        assert!(ReportConfig::builder().unit("").build().is_ok());
    }

    #[test]
    fn single_thread_execution_is_sequential() {
        let config = PredictorConfig::builder()
            .n_threads(NonZeroUsize::MIN)
            .build()
            .unwrap();
        let exec = config.execution().unwrap();
        assert!(!exec.parallelism().is_parallel());
    }
}
