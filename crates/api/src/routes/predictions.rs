//! Prediction Routes

use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use feature_engine::FeatureVector;
use inference_engine::{DeliveryLabel, CLASS_COUNT};
use order_types::OrderForm;
use serde::Serialize;
use std::sync::Arc;
use tracing::{debug, error};

use crate::pipeline::PipelineError;
use crate::AppState;

/// Response for a successful prediction
#[derive(Debug, Serialize)]
pub struct PredictionResponse {
    pub label: DeliveryLabel,
    pub message: &'static str,
    pub class_id: i64,
    pub probabilities: Option<[f64; CLASS_COUNT]>,
    pub confidence: Option<f64>,
    pub date_diff: f64,
    pub features: FeatureVector,
    pub latency_ms: u64,
}

/// Error body
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: &'static str,
    pub message: String,
}

/// Failed prediction request
#[derive(Debug)]
pub enum PredictError {
    /// Body could not be decoded into a form
    Body(JsonRejection),
    Pipeline(PipelineError),
    Internal(String),
}

impl IntoResponse for PredictError {
    fn into_response(self) -> Response {
        let (status, error, message) = match self {
            PredictError::Body(rejection) => {
                (rejection.status(), "invalid_body", rejection.body_text())
            }
            PredictError::Pipeline(e) => {
                let status = match e {
                    PipelineError::Validation(_) | PipelineError::CityNotInState { .. } => {
                        StatusCode::UNPROCESSABLE_ENTITY
                    }
                    PipelineError::Encoding(_) => StatusCode::INTERNAL_SERVER_ERROR,
                    PipelineError::Inference(_) => StatusCode::SERVICE_UNAVAILABLE,
                };
                (status, e.reason(), e.to_string())
            }
            PredictError::Internal(message) => {
                (StatusCode::INTERNAL_SERVER_ERROR, "internal", message)
            }
        };

        (status, Json(ErrorResponse { error, message })).into_response()
    }
}

/// Predict delivery punctuality for a submitted form
pub async fn predict(
    State(state): State<Arc<AppState>>,
    body: Result<Json<OrderForm>, JsonRejection>,
) -> Result<Json<PredictionResponse>, PredictError> {
    let Json(form) = body.map_err(|rejection| {
        debug!("Rejecting undecodable form: {}", rejection.body_text());
        PredictError::Body(rejection)
    })?;

    let outcome = tokio::task::spawn_blocking(move || state.service.predict(form))
        .await
        .map_err(|e| {
            error!("Prediction task failed: {}", e);
            PredictError::Internal("prediction task failed".to_string())
        })?
        .map_err(PredictError::Pipeline)?;

    let prediction = outcome.result.prediction;
    Ok(Json(PredictionResponse {
        label: prediction.label,
        message: prediction.label.message(),
        class_id: prediction.class_id,
        probabilities: prediction.probabilities,
        confidence: prediction.confidence,
        date_diff: outcome.features.date_diff(),
        features: outcome.features,
        latency_ms: outcome.result.latency_ms,
    }))
}
