//! Feature Vector Assembly

use crate::index::{CategoricalField, CategoryIndex};
use crate::EncodeError;
use order_types::{FixedCategory, OrderInput};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::debug;

/// Number of features the classifier expects
pub const FEATURE_DIMENSION: usize = 13;

/// Feature names in vector order. The order is the model's input contract.
pub const FEATURE_NAMES: [&str; FEATURE_DIMENSION] = [
    "payment_type",
    "category_name",
    "order_city",
    "order_item_quantity",
    "order_item_total_amount",
    "order_state",
    "order_status",
    "shipping_mode",
    "date_diff",
    "market",
    "customer_state",
    "order_item_discount",
    "department_name",
];

/// Position of the shipping delay (days) in the vector
pub const DATE_DIFF_INDEX: usize = 8;

/// Feature vector for ML inference
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FeatureVector {
    /// Raw feature values, ordered as [`FEATURE_NAMES`]
    pub values: [f64; FEATURE_DIMENSION],
}

impl Default for FeatureVector {
    fn default() -> Self {
        Self {
            values: [0.0; FEATURE_DIMENSION],
        }
    }
}

impl FeatureVector {
    /// Look a feature up by name
    pub fn get(&self, name: &str) -> Option<f64> {
        FEATURE_NAMES
            .iter()
            .position(|n| *n == name)
            .map(|i| self.values[i])
    }

    /// Days between order and shipment
    pub fn date_diff(&self) -> f64 {
        self.values[DATE_DIFF_INDEX]
    }

    /// Single-precision copy for model runtimes
    pub fn to_f32(&self) -> [f32; FEATURE_DIMENSION] {
        self.values.map(|v| v as f32)
    }
}

/// Encodes validated orders against a shared category index
#[derive(Debug, Clone)]
pub struct FeatureEncoder {
    index: Arc<CategoryIndex>,
}

impl FeatureEncoder {
    /// Create a new encoder
    pub fn new(index: Arc<CategoryIndex>) -> Self {
        Self { index }
    }

    /// Category index in use
    pub fn index(&self) -> &CategoryIndex {
        &self.index
    }

    /// Encode a validated order
    ///
    /// All lookups happen before the vector is assembled, so an unknown
    /// category never yields a partial vector.
    pub fn encode(&self, input: &OrderInput) -> Result<FeatureVector, EncodeError> {
        let index = &self.index;
        let category = index.rank(CategoricalField::CategoryName, &input.category_name)?;
        let city = index.rank(CategoricalField::OrderCity, &input.order_city)?;
        let state = index.rank(CategoricalField::OrderState, &input.order_state)?;
        let customer_state = index.rank(CategoricalField::CustomerState, &input.customer_state)?;
        let department = index.rank(CategoricalField::DepartmentName, &input.department_name)?;
        let date_diff = input.date_diff_days();

        let values = [
            input.payment_type.rank() as f64,
            category as f64,
            city as f64,
            input.order_item_quantity.get(),
            input.order_item_total_amount.get(),
            state as f64,
            input.order_status.rank() as f64,
            input.shipping_mode.rank() as f64,
            date_diff as f64,
            input.market.rank() as f64,
            customer_state as f64,
            input.order_item_discount.get(),
            department as f64,
        ];

        debug!("Encoded order: date_diff={}, vector={:?}", date_diff, values);
        Ok(FeatureVector { values })
    }
}
