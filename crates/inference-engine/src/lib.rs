//! Delivery Classifier Inference
//!
//! Wraps the trained delivery classifier behind the [`Classifier`] trait and
//! maps its class ids to [`DeliveryLabel`]s. The production classifier is an
//! ONNX export run through tract-onnx.

mod classifier;
mod engine;
mod mock;
mod onnx;

pub use classifier::{interpret_class, Classifier, DeliveryLabel, CLASS_COUNT};
pub use engine::{InferenceEngine, InferenceResult, Prediction};
pub use mock::MockClassifier;
pub use onnx::OnnxClassifier;

use thiserror::Error;

/// Errors during inference
#[derive(Debug, Error)]
pub enum InferenceError {
    #[error("Model load failed: {0}")]
    ModelLoadError(String),
    #[error("Inference failed: {0}")]
    InferenceFailed(String),
    #[error("Invalid model output: {0}")]
    InvalidOutput(String),
    #[error("No classifier is loaded")]
    ModelUnavailable,
}
