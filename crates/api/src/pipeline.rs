//! Prediction Pipeline
//!
//! validate → check city → encode → infer, stopping at the first failure.

use feature_engine::{CategoryIndex, EncodeError, FeatureEncoder, FeatureVector};
use inference_engine::{InferenceEngine, InferenceError, InferenceResult};
use metrics::{counter, histogram};
use order_types::{OrderForm, OrderInput};
use order_validator::{ValidationError, Validator};
use reference_data::ReferenceData;
use std::sync::Arc;
use thiserror::Error;
use tracing::{info, warn};

/// Errors that abort a prediction request
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error("City {city} is not in {state}")]
    CityNotInState { state: String, city: String },
    #[error(transparent)]
    Encoding(#[from] EncodeError),
    #[error("Prediction unavailable: {0}")]
    Inference(#[from] InferenceError),
}

impl PipelineError {
    /// Metric label for the rejection
    pub fn reason(&self) -> &'static str {
        match self {
            PipelineError::Validation(e) => e.code(),
            PipelineError::CityNotInState { .. } => "city_not_in_state",
            PipelineError::Encoding(_) => "unknown_category",
            PipelineError::Inference(_) => "prediction_unavailable",
        }
    }
}

/// Successful prediction with the vector that produced it
#[derive(Debug, Clone)]
pub struct PredictionOutcome {
    pub features: FeatureVector,
    pub result: InferenceResult,
}

/// Request-scoped prediction over shared, read-only components
pub struct PredictionService {
    validator: Validator,
    reference: Arc<ReferenceData>,
    encoder: FeatureEncoder,
    engine: InferenceEngine,
}

impl PredictionService {
    /// Create a new service
    pub fn new(reference: Arc<ReferenceData>, engine: InferenceEngine) -> Self {
        let index = Arc::new(CategoryIndex::from_reference(&reference));
        Self {
            validator: Validator::new(),
            reference,
            encoder: FeatureEncoder::new(index),
            engine,
        }
    }

    /// Inference engine in use
    pub fn engine(&self) -> &InferenceEngine {
        &self.engine
    }

    /// Run one form through the whole pipeline (blocking)
    pub fn predict(&self, form: OrderForm) -> Result<PredictionOutcome, PipelineError> {
        match self.run(form) {
            Ok(outcome) => {
                let label = outcome.result.prediction.label;
                counter!("predictions_total", "label" => label.as_str()).increment(1);
                histogram!("prediction_latency_ms").record(outcome.result.latency_ms as f64);
                info!(
                    "Predicted {} (class {}, {}ms)",
                    label.as_str(),
                    outcome.result.prediction.class_id,
                    outcome.result.latency_ms
                );
                Ok(outcome)
            }
            Err(e) => {
                counter!("prediction_rejections_total", "reason" => e.reason()).increment(1);
                match &e {
                    PipelineError::Validation(_) | PipelineError::CityNotInState { .. } => {
                        info!("Prediction rejected: {}", e)
                    }
                    _ => warn!("Prediction failed: {}", e),
                }
                Err(e)
            }
        }
    }

    fn run(&self, form: OrderForm) -> Result<PredictionOutcome, PipelineError> {
        let input = self.validator.validate(form)?;
        self.check_city(&input)?;
        let features = self.encoder.encode(&input)?;
        let result = self.engine.predict(&features)?;
        Ok(PredictionOutcome { features, result })
    }

    /// Reject a known city submitted under a known state it does not belong to
    ///
    /// Values missing from the reference tables are left to the encoder,
    /// which reports them as unknown categories.
    fn check_city(&self, input: &OrderInput) -> Result<(), PipelineError> {
        let reference = &self.reference;
        let known = reference.order_states().binary_search(&input.order_state).is_ok()
            && reference.order_cities().binary_search(&input.order_city).is_ok();

        if known
            && reference
                .cities_for_state(&input.order_state)
                .binary_search(&input.order_city)
                .is_err()
        {
            return Err(PipelineError::CityNotInState {
                state: input.order_state.clone(),
                city: input.order_city.clone(),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use inference_engine::DeliveryLabel;
    use order_types::{Market, NonNegative, OrderStatus, PaymentType, ShippingMode};
    use reference_data::ReferenceData;
    use std::path::Path;

    fn date(y: i32, m: u32, d: u32) -> Option<NaiveDate> {
        NaiveDate::from_ymd_opt(y, m, d)
    }

    fn amount(v: f64) -> Option<NonNegative> {
        NonNegative::new(v).ok()
    }

    fn bundled_reference() -> ReferenceData {
        ReferenceData::load(Path::new(env!("CARGO_MANIFEST_DIR")).join("../../data")).unwrap()
    }

    fn service(engine: InferenceEngine) -> (PredictionService, Arc<ReferenceData>) {
        let reference = Arc::new(bundled_reference());
        (PredictionService::new(reference.clone(), engine), reference)
    }

    fn scenario_form(reference: &ReferenceData) -> OrderForm {
        OrderForm {
            payment_type: Some(PaymentType::Cash),
            category_name: reference.categories().first().cloned(),
            order_state: Some("California".to_string()),
            order_city: Some("Los Angeles".to_string()),
            customer_state: Some("Texas".to_string()),
            department_name: reference.departments().first().cloned(),
            market: Some(Market::Usca),
            order_item_quantity: amount(2.0),
            order_item_discount: amount(5.0),
            order_item_total_amount: amount(100.0),
            order_status: Some(OrderStatus::Complete),
            shipping_mode: Some(ShippingMode::StandardClass),
            order_date: date(2024, 1, 1),
            ship_date: date(2024, 1, 5),
        }
    }

    #[test]
    fn test_end_to_end_scenario() {
        let (service, reference) = service(InferenceEngine::mock());
        let form = scenario_form(&reference);

        let first = service.predict(form.clone()).unwrap();
        assert_eq!(first.features.date_diff(), 4.0);
        assert_eq!(first.features.values[0], 0.0); // CASH
        assert_eq!(first.features.values[1], 0.0); // first category
        assert_eq!(first.features.values[12], 0.0); // first department
        assert_eq!(first.features.values[9], 4.0); // USCA
        assert_eq!(first.result.prediction.label, DeliveryLabel::Late);

        let second = service.predict(form).unwrap();
        assert_eq!(first.features, second.features);
        assert_eq!(first.result.prediction.label, second.result.prediction.label);
    }

    #[test]
    fn test_validation_stops_pipeline() {
        let (service, reference) = service(InferenceEngine::mock());
        let form = OrderForm {
            order_date: date(2024, 1, 2),
            ship_date: date(2024, 1, 1),
            ..scenario_form(&reference)
        };
        let err = service.predict(form).unwrap_err();
        assert!(matches!(
            err,
            PipelineError::Validation(ValidationError::InvalidDateOrder { .. })
        ));
        assert_eq!(err.reason(), "invalid_date_order");
    }

    #[test]
    fn test_unknown_city_is_encoding_error() {
        let (service, reference) = service(InferenceEngine::mock());
        let form = OrderForm {
            order_city: Some("Springfield".to_string()),
            ..scenario_form(&reference)
        };
        let err = service.predict(form).unwrap_err();
        assert!(matches!(err, PipelineError::Encoding(_)));
        assert_eq!(err.reason(), "unknown_category");
    }

    #[test]
    fn test_city_from_another_state_is_rejected() {
        let (service, reference) = service(InferenceEngine::mock());
        let form = OrderForm {
            order_state: Some("Texas".to_string()),
            order_city: Some("Los Angeles".to_string()),
            ..scenario_form(&reference)
        };
        let err = service.predict(form).unwrap_err();
        assert!(matches!(
            &err,
            PipelineError::CityNotInState { state, city }
                if state == "Texas" && city == "Los Angeles"
        ));
        assert_eq!(err.reason(), "city_not_in_state");
    }

    #[test]
    fn test_missing_model() {
        let (service, reference) = service(InferenceEngine::unavailable());
        let err = service.predict(scenario_form(&reference)).unwrap_err();
        assert!(matches!(
            err,
            PipelineError::Inference(InferenceError::ModelUnavailable)
        ));
    }
}
