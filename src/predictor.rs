use std::path::Path;

use tracing::{error, info};

use crate::artifacts::Artifacts;
use crate::error::PredictError;
use crate::features::FeatureVector;
use crate::irrigation::IrrigationLevel;
use crate::models::{Prediction, PredictionRequest};

/// Service context shared by every request handler.
///
/// Built once at startup and never mutated. When the artifacts could not be
/// loaded the predictor still exists, but every prediction fails with
/// [`PredictError::ModelUnavailable`].
pub struct Predictor {
    artifacts: Option<Artifacts>,
}

impl Predictor {
    pub fn new(artifacts: Artifacts) -> Self {
        Predictor {
            artifacts: Some(artifacts),
        }
    }

    pub fn unavailable() -> Self {
        Predictor { artifacts: None }
    }

    /// Loads the artifacts from `dir`, falling back to a degraded predictor
    /// instead of refusing to start.
    pub fn load(dir: &Path) -> Self {
        match Artifacts::load(dir) {
            Ok(artifacts) => {
                info!(dir = %dir.display(), "model and transformers loaded");
                Predictor::new(artifacts)
            }
            Err(err) => {
                error!(dir = %dir.display(), error = %err, "error loading model");
                Predictor::unavailable()
            }
        }
    }

    pub fn is_loaded(&self) -> bool {
        self.artifacts.is_some()
    }

    pub fn predict(&self, request: &PredictionRequest) -> Result<Prediction, PredictError> {
        let artifacts = self
            .artifacts
            .as_ref()
            .ok_or(PredictError::ModelUnavailable)?;

        let features = FeatureVector::from(request);
        let crop = artifacts.infer(&features)?;
        let irrigation = IrrigationLevel::from_conditions(request.rainfall, request.humidity);

        Ok(Prediction { crop, irrigation })
    }

    /// Parses a raw JSON body and predicts. Field errors are reported before
    /// artifact availability.
    pub fn predict_json(
        &self,
        body: &[u8],
    ) -> Result<(PredictionRequest, Prediction), PredictError> {
        let request: PredictionRequest = serde_json::from_slice(body)?;
        let prediction = self.predict(&request)?;
        Ok((request, prediction))
    }
}
