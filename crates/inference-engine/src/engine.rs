//! Inference Engine Implementation

use crate::classifier::{interpret_class, Classifier, DeliveryLabel, CLASS_COUNT};
use crate::mock::MockClassifier;
use crate::onnx::OnnxClassifier;
use crate::InferenceError;
use feature_engine::FeatureVector;
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::{debug, info, warn};

/// Prediction result from inference
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Prediction {
    /// Raw class id from the model
    pub class_id: i64,
    /// Interpreted delivery outcome
    pub label: DeliveryLabel,
    /// Probabilities for each class, when the model provides them
    pub probabilities: Option<[f64; CLASS_COUNT]>,
    /// Probability of the predicted class
    pub confidence: Option<f64>,
}

/// Result of inference operation
#[derive(Debug, Clone)]
pub struct InferenceResult {
    /// The prediction
    pub prediction: Prediction,
    /// Inference latency in milliseconds
    pub latency_ms: u64,
}

/// Delivery classifier host
///
/// Holds at most one classifier for the lifetime of the process. With no
/// classifier every prediction fails with `ModelUnavailable`.
pub struct InferenceEngine {
    classifier: Option<Box<dyn Classifier>>,
}

impl InferenceEngine {
    /// Create an engine around an ONNX model on disk
    pub fn new(model_path: impl AsRef<Path>) -> Result<Self, InferenceError> {
        let classifier = OnnxClassifier::load(model_path)?;
        Ok(Self::with_classifier(Box::new(classifier)))
    }

    /// Create an engine around any classifier
    pub fn with_classifier(classifier: Box<dyn Classifier>) -> Self {
        info!("Creating inference engine with classifier: {}", classifier.name());
        Self {
            classifier: Some(classifier),
        }
    }

    /// Create a mock inference engine for development and testing
    pub fn mock() -> Self {
        Self::with_classifier(Box::new(MockClassifier))
    }

    /// Create an engine with no model; predictions report unavailability
    pub fn unavailable() -> Self {
        warn!("Inference engine created without a model; predictions are unavailable");
        Self { classifier: None }
    }

    /// Run inference on a feature vector
    ///
    /// Blocking. Probabilities are informational: a model that can label but
    /// not score still yields a prediction.
    pub fn predict(&self, features: &FeatureVector) -> Result<InferenceResult, InferenceError> {
        let start = std::time::Instant::now();
        let classifier = self
            .classifier
            .as_deref()
            .ok_or(InferenceError::ModelUnavailable)?;

        let (class_id, probabilities) = match classifier.predict_with_proba(features) {
            Ok((class_id, probabilities)) => (class_id, Some(probabilities)),
            Err(InferenceError::InvalidOutput(reason)) => {
                warn!("Probabilities unavailable ({}), falling back to label only", reason);
                (classifier.predict(features)?, None)
            }
            Err(e) => return Err(e),
        };

        let label = interpret_class(class_id);
        let confidence = probabilities.and_then(|p| {
            usize::try_from(class_id)
                .ok()
                .and_then(|i| p.get(i).copied())
        });

        let latency_ms = start.elapsed().as_millis() as u64;
        debug!(
            "Inference completed in {}ms: class={} label={:?}",
            latency_ms, class_id, label
        );

        Ok(InferenceResult {
            prediction: Prediction {
                class_id,
                label,
                probabilities,
                confidence,
            },
            latency_ms,
        })
    }

    /// Check if a classifier is loaded
    pub fn is_loaded(&self) -> bool {
        self.classifier.is_some()
    }

    /// Name of the loaded classifier
    pub fn model_name(&self) -> Option<&str> {
        self.classifier.as_deref().map(|c| c.name())
    }
}
