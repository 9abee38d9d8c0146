//! JSON model persistence.
//!
//! Loading always validates: a [`ForestModel`] returned from any reader here
//! satisfies every structural invariant, so later predictions can only fail on
//! bad input.
//!
//! # Example
//!
//! ```ignore
//! use forest_vote::ForestModel;
//!
//! let model = ForestModel::read_path("model_data.json")?;
//! let mut out = Vec::new();
//! model.write_json(&mut out)?;
//! ```

pub mod convert;
pub mod schema;

use std::fs::File;
use std::io::{BufReader, BufWriter, Read, Write};
use std::path::{Path, PathBuf};

use tracing::{debug, info, warn};

use crate::error::MalformedModelError;
use crate::repr::ForestModel;

pub use schema::{ModelSchema, NodeSchema, NodeValueSchema};

/// Errors that can occur when reading a model.
#[derive(Debug, thiserror::Error)]
pub enum ReadError {
    #[error("failed to open {path}: {source}")]
    Open {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid model JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("model validation failed: {0}")]
    Validation(#[from] MalformedModelError),
}

impl ForestModel {
    /// Read and validate a model from JSON.
    pub fn read_json<R: Read>(reader: R) -> Result<Self, ReadError> {
        let schema: ModelSchema = serde_json::from_reader(reader)?;
        Self::from_schema(schema)
    }

    /// Parse and validate a model from a JSON string.
    pub fn from_json_str(json: &str) -> Result<Self, ReadError> {
        let schema: ModelSchema = serde_json::from_str(json)?;
        Self::from_schema(schema)
    }

    /// Read and validate a model file.
    pub fn read_path(path: impl AsRef<Path>) -> Result<Self, ReadError> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|source| ReadError::Open {
            path: path.to_path_buf(),
            source,
        })?;
        let model = Self::read_json(BufReader::new(file))?;
        info!(
            path = %path.display(),
            n_trees = model.n_trees(),
            n_features = model.n_features(),
            n_classes = model.n_classes(),
            "loaded forest model"
        );
        Ok(model)
    }

    /// Write the model as JSON.
    pub fn write_json<W: Write>(&self, writer: W) -> Result<(), serde_json::Error> {
        let mut writer = BufWriter::new(writer);
        serde_json::to_writer(&mut writer, &self.to_schema())?;
        writer.flush().map_err(serde_json::Error::io)
    }

    /// Schema view of this model.
    pub fn to_schema(&self) -> ModelSchema {
        ModelSchema::from(self)
    }

    fn from_schema(schema: ModelSchema) -> Result<Self, ReadError> {
        debug!(
            n_trees = schema.forest.len(),
            n_features = schema.feature_names.len(),
            "validating forest model"
        );
        ForestModel::try_from(schema).map_err(|e| {
            warn!(error = %e, "rejected malformed model");
            ReadError::Validation(e)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn write_then_read() {
        let model = crate::testing::iris_model();
        let mut buf = Vec::new();
        model.write_json(&mut buf).unwrap();
        let loaded = ForestModel::read_json(buf.as_slice()).unwrap();
        assert_eq!(loaded, model);
    }

    #[test]
    fn syntax_error_is_json_error() {
        let err = ForestModel::from_json_str("{ not json").unwrap_err();
        assert!(matches!(err, ReadError::Json(_)), "got: {err:?}");
    }

    #[test]
    fn missing_file_names_the_path() {
        let err = ForestModel::read_path("/definitely/not/here.json").unwrap_err();
        match err {
            ReadError::Open { path, .. } => assert_eq!(path, PathBuf::from("/definitely/not/here.json")),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn empty_forest_is_validation_error() {
        let json = r#"{"feature_names": ["x"], "target_names": ["a"], "forest": []}"#;
        let err = ForestModel::from_json_str(json).unwrap_err();
        assert!(
            matches!(err, ReadError::Validation(MalformedModelError::EmptyForest)),
            "got: {err:?}"
        );
    }
}
