//! ONNX classifier backed by tract

use crate::classifier::{Classifier, CLASS_COUNT};
use crate::InferenceError;
use feature_engine::{FeatureVector, FEATURE_DIMENSION};
use std::path::{Path, PathBuf};
use tracing::{debug, info};
use tract_onnx::prelude::*;

type OnnxPlan = SimplePlan<TypedFact, Box<dyn TypedOp>, Graph<TypedFact, Box<dyn TypedOp>>>;

/// Classifier exported to ONNX (label output first, probabilities second)
///
/// Expects a `[1, 13]` `f32` input, an `i64` label tensor as output 0 and a
/// `[1, 3]` `f32` probability tensor as output 1, which is how scikit-learn
/// classifiers export with the probability zipmap disabled.
pub struct OnnxClassifier {
    plan: OnnxPlan,
    path: PathBuf,
}

impl OnnxClassifier {
    /// Load and optimize a model from disk
    pub fn load(path: impl AsRef<Path>) -> Result<Self, InferenceError> {
        let path = path.as_ref();
        info!("Loading ONNX model from {}", path.display());

        let plan = tract_onnx::onnx()
            .model_for_path(path)
            .and_then(|model| model.with_input_fact(0, f32::fact([1, FEATURE_DIMENSION]).into()))
            .and_then(|model| model.into_optimized())
            .and_then(|model| model.into_runnable())
            .map_err(|e| InferenceError::ModelLoadError(format!("{}: {}", path.display(), e)))?;

        info!("Model loaded successfully");
        Ok(Self {
            plan,
            path: path.to_path_buf(),
        })
    }

    fn run(&self, features: &FeatureVector) -> Result<TVec<TValue>, InferenceError> {
        let input: Tensor = tract_ndarray::Array2::from_shape_vec(
            (1, FEATURE_DIMENSION),
            features.to_f32().to_vec(),
        )
        .map_err(|e| InferenceError::InferenceFailed(e.to_string()))?
        .into();

        self.plan
            .run(tvec!(input.into()))
            .map_err(|e| InferenceError::InferenceFailed(e.to_string()))
    }

    fn label_from(outputs: &TVec<TValue>) -> Result<i64, InferenceError> {
        let labels = outputs
            .first()
            .ok_or_else(|| InferenceError::InvalidOutput("model produced no outputs".into()))?
            .to_array_view::<i64>()
            .map_err(|e| InferenceError::InvalidOutput(format!("label tensor: {}", e)))?;

        labels
            .iter()
            .next()
            .copied()
            .ok_or_else(|| InferenceError::InvalidOutput("empty label tensor".into()))
    }

    fn probabilities_from(outputs: &TVec<TValue>) -> Result<[f64; CLASS_COUNT], InferenceError> {
        let view = outputs
            .get(1)
            .ok_or_else(|| InferenceError::InvalidOutput("missing probability output".into()))?
            .to_array_view::<f32>()
            .map_err(|e| InferenceError::InvalidOutput(format!("probability tensor: {}", e)))?;

        if view.len() < CLASS_COUNT {
            return Err(InferenceError::InvalidOutput(format!(
                "expected {} probabilities, got {}",
                CLASS_COUNT,
                view.len()
            )));
        }

        let mut probabilities = [0.0; CLASS_COUNT];
        for (slot, p) in probabilities.iter_mut().zip(view.iter()) {
            *slot = *p as f64;
        }
        Ok(probabilities)
    }
}

impl Classifier for OnnxClassifier {
    fn name(&self) -> &str {
        self.path
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or("onnx")
    }

    fn predict(&self, features: &FeatureVector) -> Result<i64, InferenceError> {
        let outputs = self.run(features)?;
        Self::label_from(&outputs)
    }

    fn predict_proba(
        &self,
        features: &FeatureVector,
    ) -> Result<[f64; CLASS_COUNT], InferenceError> {
        let outputs = self.run(features)?;
        Self::probabilities_from(&outputs)
    }

    fn predict_with_proba(
        &self,
        features: &FeatureVector,
    ) -> Result<(i64, [f64; CLASS_COUNT]), InferenceError> {
        let outputs = self.run(features)?;
        debug!("ONNX model returned {} outputs", outputs.len());
        Ok((Self::label_from(&outputs)?, Self::probabilities_from(&outputs)?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_model_file() {
        let result = OnnxClassifier::load("/nonexistent/delivery_classifier.onnx");
        assert!(matches!(result, Err(InferenceError::ModelLoadError(_))));
    }
}
