use ndarray::Array1;

use crate::models::PredictionRequest;

pub const FEATURE_COUNT: usize = 7;

/// Column order the scaler and classifier were trained on.
pub const FEATURE_NAMES: [&str; FEATURE_COUNT] =
    ["N", "P", "K", "temperature", "humidity", "ph", "rainfall"];

#[derive(Debug, Clone, PartialEq)]
pub struct FeatureVector(Array1<f64>);

impl FeatureVector {
    pub fn as_array(&self) -> &Array1<f64> {
        &self.0
    }

    pub fn to_vec(&self) -> Vec<f64> {
        self.0.to_vec()
    }
}

impl From<&PredictionRequest> for FeatureVector {
    fn from(request: &PredictionRequest) -> Self {
        // must stay in FEATURE_NAMES order
        FeatureVector(Array1::from(vec![
            request.nitrogen,
            request.phosphorus,
            request.potassium,
            request.temperature,
            request.humidity,
            request.ph,
            request.rainfall,
        ]))
    }
}
