//! Validation Error Types

use chrono::NaiveDate;
use thiserror::Error;

/// Errors during order form validation
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// Required field left unset or unselected
    #[error("Missing required field: {0}")]
    MissingField(&'static str),

    /// Ship date precedes order date
    #[error("Ship date cannot be before order date")]
    InvalidDateOrder {
        order_date: NaiveDate,
        ship_date: NaiveDate,
    },
}

impl ValidationError {
    /// Stable machine-readable code
    pub fn code(&self) -> &'static str {
        match self {
            ValidationError::MissingField(_) => "missing_field",
            ValidationError::InvalidDateOrder { .. } => "invalid_date_order",
        }
    }
}
