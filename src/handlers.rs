use actix_web::http::StatusCode;
use actix_web::{web, HttpResponse, ResponseError};
use tracing::debug;

use crate::advisory;
use crate::error::PredictError;
use crate::models::{HealthResponse, PredictionResponse, RecommendationResponse};
use crate::predictor::Predictor;

impl ResponseError for PredictError {
    fn status_code(&self) -> StatusCode {
        StatusCode::BAD_REQUEST
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code()).json(PredictionResponse::Error {
            message: self.to_string(),
        })
    }
}

fn rejected(err: PredictError) -> PredictError {
    debug!(error = %err, "prediction rejected");
    err
}

// The body is taken raw so that malformed JSON is reported in the same shape
// as every other prediction failure.
pub async fn predict(
    predictor: web::Data<Predictor>,
    body: web::Bytes,
) -> Result<HttpResponse, PredictError> {
    let (_, prediction) = predictor.predict_json(&body).map_err(rejected)?;
    Ok(HttpResponse::Ok().json(PredictionResponse::from(prediction)))
}

pub async fn recommend(
    predictor: web::Data<Predictor>,
    body: web::Bytes,
) -> Result<HttpResponse, PredictError> {
    let (request, prediction) = predictor.predict_json(&body).map_err(rejected)?;
    let advice = advisory::advise(&prediction.crop, &request);

    Ok(HttpResponse::Ok().json(RecommendationResponse {
        status: "success",
        crop: prediction.crop,
        irrigation: prediction.irrigation,
        estimated_yield: advice.estimated_yield,
        fertilizer: advice.fertilizer,
        market_price: advice.market_price,
        estimated_revenue: advice.estimated_revenue,
    }))
}

pub async fn health() -> HttpResponse {
    HttpResponse::Ok().json(HealthResponse::ok())
}
