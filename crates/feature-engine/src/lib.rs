//! Feature Engineering Engine
//!
//! Encodes a validated order into the fixed 13-feature vector the delivery
//! classifier was trained on. Categorical values are replaced by their
//! zero-based alphabetical rank; numeric values pass through unchanged.

mod features;
mod index;

pub use features::{
    FeatureEncoder, FeatureVector, DATE_DIFF_INDEX, FEATURE_DIMENSION, FEATURE_NAMES,
};
pub use index::{CategoricalField, CategoryIndex, RankTable};

use thiserror::Error;

/// Errors during feature encoding
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EncodeError {
    /// Value has no rank in the category index; reference data and the form
    /// disagree
    #[error("Unknown {field} value '{value}' (not present in reference data)")]
    UnknownCategory { field: &'static str, value: String },
}
