//! Rule-based stand-in classifier

use crate::classifier::{Classifier, CLASS_COUNT};
use crate::InferenceError;
use feature_engine::FeatureVector;

/// Deterministic classifier for development and tests
///
/// Labels by shipping delay alone: up to one day is early, two or three days
/// on time, anything longer late.
#[derive(Debug, Clone, Copy, Default)]
pub struct MockClassifier;

impl MockClassifier {
    fn class_for(features: &FeatureVector) -> i64 {
        let days = features.date_diff();
        if days <= 1.0 {
            0
        } else if days <= 3.0 {
            1
        } else {
            2
        }
    }
}

impl Classifier for MockClassifier {
    fn name(&self) -> &str {
        "mock"
    }

    fn predict(&self, features: &FeatureVector) -> Result<i64, InferenceError> {
        Ok(Self::class_for(features))
    }

    fn predict_proba(
        &self,
        features: &FeatureVector,
    ) -> Result<[f64; CLASS_COUNT], InferenceError> {
        let mut probabilities = [0.05; CLASS_COUNT];
        probabilities[Self::class_for(features) as usize] = 0.90;
        Ok(probabilities)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use feature_engine::DATE_DIFF_INDEX;

    fn with_delay(days: f64) -> FeatureVector {
        let mut features = FeatureVector::default();
        features.values[DATE_DIFF_INDEX] = days;
        features
    }

    #[test]
    fn test_mock_thresholds() {
        let mock = MockClassifier;
        assert_eq!(mock.predict(&with_delay(0.0)).unwrap(), 0);
        assert_eq!(mock.predict(&with_delay(3.0)).unwrap(), 1);
        assert_eq!(mock.predict(&with_delay(4.0)).unwrap(), 2);
    }

    #[test]
    fn test_mock_probabilities_sum_to_one() {
        let (class_id, probabilities) = MockClassifier.predict_with_proba(&with_delay(2.0)).unwrap();
        assert_eq!(class_id, 1);
        assert!((probabilities.iter().sum::<f64>() - 1.0).abs() < 1e-9);
        assert_eq!(probabilities[1], 0.90);
    }
}
