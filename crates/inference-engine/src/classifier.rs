//! Classifier Seam and Delivery Labels

use crate::InferenceError;
use feature_engine::FeatureVector;
use serde::{Deserialize, Serialize};

/// Number of classes the delivery model predicts
pub const CLASS_COUNT: usize = 3;

/// Predicted delivery outcome
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DeliveryLabel {
    Early,
    #[serde(rename = "On Time")]
    OnTime,
    Late,
}

impl DeliveryLabel {
    /// Display name
    pub fn as_str(&self) -> &'static str {
        match self {
            DeliveryLabel::Early => "Early",
            DeliveryLabel::OnTime => "On Time",
            DeliveryLabel::Late => "Late",
        }
    }

    /// User-facing sentence
    pub fn message(&self) -> &'static str {
        match self {
            DeliveryLabel::Early => "The order is likely to be delivered early",
            DeliveryLabel::OnTime => "The order is likely to be delivered on time",
            DeliveryLabel::Late => "The order is likely to be late",
        }
    }
}

/// Map a model class id to a label
///
/// Total over `i64`: any id other than 0 or 1 is treated as late.
pub fn interpret_class(class_id: i64) -> DeliveryLabel {
    match class_id {
        0 => DeliveryLabel::Early,
        1 => DeliveryLabel::OnTime,
        _ => DeliveryLabel::Late,
    }
}

/// A trained delivery classifier
///
/// Implementations are loaded once and shared across requests, so they must
/// not need `&mut self` to predict.
pub trait Classifier: Send + Sync {
    /// Short identifier for logs and health output
    fn name(&self) -> &str;

    /// Predicted class id
    fn predict(&self, features: &FeatureVector) -> Result<i64, InferenceError>;

    /// Per-class probabilities, indexed by class id
    fn predict_proba(&self, features: &FeatureVector)
        -> Result<[f64; CLASS_COUNT], InferenceError>;

    /// Class id and probabilities together. Runtimes that produce both from
    /// one forward pass should override this.
    fn predict_with_proba(
        &self,
        features: &FeatureVector,
    ) -> Result<(i64, [f64; CLASS_COUNT]), InferenceError> {
        Ok((self.predict(features)?, self.predict_proba(features)?))
    }
}
