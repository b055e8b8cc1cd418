pub mod advisory;
pub mod artifacts;
pub mod config;
pub mod error;
pub mod features;
pub mod handlers;
pub mod irrigation;
pub mod models;
pub mod predictor;
pub mod routes;

pub use artifacts::{Artifacts, Classifier, LabelDecoder, Scaler};
pub use error::{ArtifactError, PredictError};
pub use predictor::Predictor;
