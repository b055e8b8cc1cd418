use serde::{Deserialize, Serialize};

use crate::advisory::FertilizerAdvice;
use crate::irrigation::IrrigationLevel;

/// Soil and weather readings for a single field sample.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PredictionRequest {
    #[serde(rename = "N")]
    pub nitrogen: f64,
    #[serde(rename = "P")]
    pub phosphorus: f64,
    #[serde(rename = "K")]
    pub potassium: f64,
    pub temperature: f64,
    pub humidity: f64,
    pub ph: f64,
    pub rainfall: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Prediction {
    pub crop: String,
    pub irrigation: IrrigationLevel,
}

#[derive(Debug, Serialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum PredictionResponse {
    Success {
        crop: String,
        irrigation: IrrigationLevel,
    },
    Error {
        message: String,
    },
}

impl From<Prediction> for PredictionResponse {
    fn from(prediction: Prediction) -> Self {
        PredictionResponse::Success {
            crop: prediction.crop,
            irrigation: prediction.irrigation,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub service: &'static str,
}

impl HealthResponse {
    pub fn ok() -> Self {
        HealthResponse {
            status: "ok",
            service: "ml-prediction",
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RecommendationResponse {
    pub status: &'static str,
    pub crop: String,
    pub irrigation: IrrigationLevel,
    #[serde(rename = "yield")]
    pub estimated_yield: f64,
    pub fertilizer: FertilizerAdvice,
    pub market_price: f64,
    pub estimated_revenue: i64,
}
