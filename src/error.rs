use std::path::PathBuf;

use thiserror::Error;

/// Failure of a single prediction. Adapters report every variant the same way.
#[derive(Debug, Error)]
pub enum PredictError {
    #[error("{0}")]
    Validation(String),
    #[error("model artifacts are not loaded")]
    ModelUnavailable,
    #[error("{0}")]
    Transform(String),
}

impl From<serde_json::Error> for PredictError {
    fn from(err: serde_json::Error) -> Self {
        PredictError::Validation(err.to_string())
    }
}

#[derive(Debug, Error)]
pub enum ArtifactError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("failed to load model {path}: {message}")]
    Model { path: PathBuf, message: String },
    #[error("{path}: fitted on columns [{found}], expected [{expected}]")]
    FeatureOrder {
        path: PathBuf,
        expected: String,
        found: String,
    },
    #[error("{path}: expected {expected} values in `{field}`, found {found}")]
    Shape {
        path: PathBuf,
        field: &'static str,
        expected: usize,
        found: usize,
    },
}
