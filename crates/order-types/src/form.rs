//! Order Form and Validated Input

use crate::enums::{Market, OrderStatus, PaymentType, ShippingMode};
use chrono::NaiveDate;
use serde::de::{self, Deserializer};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Placeholder older clients send for an untouched dropdown
pub const NOT_SELECTED: &str = "-- Select --";

/// A numeric field was negative or not a number
#[derive(Debug, Clone, Copy, PartialEq, Error)]
#[error("value {0} must be a non-negative number")]
pub struct NegativeValue(pub f64);

/// Non-negative real number, never NaN
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(try_from = "f64", into = "f64")]
pub struct NonNegative(f64);

impl NonNegative {
    /// Wrap a value, rejecting negatives and NaN
    pub fn new(value: f64) -> Result<Self, NegativeValue> {
        if value.is_nan() || value < 0.0 {
            Err(NegativeValue(value))
        } else {
            Ok(Self(value))
        }
    }

    /// Raw value
    pub fn get(self) -> f64 {
        self.0
    }
}

impl TryFrom<f64> for NonNegative {
    type Error = NegativeValue;

    fn try_from(value: f64) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<NonNegative> for f64 {
    fn from(value: NonNegative) -> Self {
        value.0
    }
}

fn is_selected(value: &str) -> bool {
    let trimmed = value.trim();
    !trimmed.is_empty() && trimmed != NOT_SELECTED
}

fn deserialize_choice<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<String>::deserialize(deserializer)?;
    Ok(raw.filter(|v| is_selected(v)))
}

fn deserialize_fixed<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: FromStr,
    T::Err: fmt::Display,
{
    match deserialize_choice(deserializer)? {
        Some(raw) => raw.parse().map(Some).map_err(de::Error::custom),
        None => Ok(None),
    }
}

/// Raw order form as submitted by the client
///
/// Every field may be absent. An absent categorical field means the user has
/// not made a choice yet; the placeholder text and blank strings decode to
/// `None` as well.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OrderForm {
    #[serde(deserialize_with = "deserialize_fixed")]
    pub payment_type: Option<PaymentType>,
    #[serde(deserialize_with = "deserialize_choice")]
    pub category_name: Option<String>,
    #[serde(deserialize_with = "deserialize_choice")]
    pub order_state: Option<String>,
    #[serde(deserialize_with = "deserialize_choice")]
    pub order_city: Option<String>,
    /// Product location
    #[serde(deserialize_with = "deserialize_choice")]
    pub customer_state: Option<String>,
    #[serde(deserialize_with = "deserialize_choice")]
    pub department_name: Option<String>,
    #[serde(deserialize_with = "deserialize_fixed")]
    pub market: Option<Market>,
    pub order_item_quantity: Option<NonNegative>,
    pub order_item_discount: Option<NonNegative>,
    pub order_item_total_amount: Option<NonNegative>,
    #[serde(deserialize_with = "deserialize_fixed")]
    pub order_status: Option<OrderStatus>,
    #[serde(deserialize_with = "deserialize_fixed")]
    pub shipping_mode: Option<ShippingMode>,
    pub order_date: Option<NaiveDate>,
    pub ship_date: Option<NaiveDate>,
}

/// Complete order record, ready for encoding
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderInput {
    pub payment_type: PaymentType,
    pub category_name: String,
    pub order_state: String,
    pub order_city: String,
    pub customer_state: String,
    pub department_name: String,
    pub market: Market,
    pub order_item_quantity: NonNegative,
    pub order_item_discount: NonNegative,
    pub order_item_total_amount: NonNegative,
    pub order_status: OrderStatus,
    pub shipping_mode: ShippingMode,
    pub order_date: NaiveDate,
    pub ship_date: NaiveDate,
}

impl OrderInput {
    /// Whole days between order and shipment
    pub fn date_diff_days(&self) -> i64 {
        (self.ship_date - self.order_date).num_days()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_empty_body_is_all_absent() {
        let form: OrderForm = serde_json::from_str("{}").unwrap();
        assert_eq!(form, OrderForm::default());
    }

    #[test]
    fn test_placeholder_decodes_to_absent() {
        let form: OrderForm = serde_json::from_str(
            r#"{
                "payment_type": "-- Select --",
                "category_name": "-- Select --",
                "order_city": "   ",
                "market": "USCA",
                "department_name": "Fan Shop"
            }"#,
        )
        .unwrap();

        assert_eq!(form.payment_type, None);
        assert_eq!(form.category_name, None);
        assert_eq!(form.order_city, None);
        assert_eq!(form.market, Some(Market::Usca));
        assert_eq!(form.department_name.as_deref(), Some("Fan Shop"));
    }

    #[test]
    fn test_unknown_fixed_value_is_rejected() {
        let result: Result<OrderForm, _> =
            serde_json::from_str(r#"{ "shipping_mode": "Overnight" }"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_negative_amount_is_rejected() {
        let result: Result<OrderForm, _> =
            serde_json::from_str(r#"{ "order_item_discount": -1.5 }"#);
        assert!(result.is_err());
        assert!(NonNegative::new(f64::NAN).is_err());
        assert_eq!(NonNegative::new(0.0).unwrap().get(), 0.0);
    }

    #[test]
    fn test_dates_decode_from_iso() {
        let form: OrderForm = serde_json::from_str(
            r#"{ "order_date": "2024-01-01", "ship_date": "2024-01-03" }"#,
        )
        .unwrap();
        assert_eq!(form.order_date, NaiveDate::from_ymd_opt(2024, 1, 1));
        assert_eq!(form.ship_date, NaiveDate::from_ymd_opt(2024, 1, 3));
    }

    proptest! {
        #[test]
        fn prop_non_negative_accepts_exactly_non_negatives(v in -1.0e9f64..1.0e9) {
            prop_assert_eq!(NonNegative::new(v).is_ok(), v >= 0.0);
        }
    }
}
