//! Order Form Validator

use crate::error::ValidationError;
use order_types::{OrderForm, OrderInput};
use tracing::debug;

fn required<T>(field: &'static str, value: Option<T>) -> Result<T, ValidationError> {
    value.ok_or(ValidationError::MissingField(field))
}

/// Validator for submitted order forms
///
/// Only completeness and date order are checked. Membership of categorical
/// values in the reference tables is the encoder's concern, and numeric
/// non-negativity is enforced when the form is decoded.
#[derive(Debug, Clone, Copy, Default)]
pub struct Validator;

impl Validator {
    /// Create a new validator
    pub fn new() -> Self {
        Self
    }

    /// Turn a raw form into a complete order, failing on the first problem
    pub fn validate(&self, form: OrderForm) -> Result<OrderInput, ValidationError> {
        let payment_type = required("payment_type", form.payment_type)?;
        let category_name = required("category_name", form.category_name)?;
        let order_state = required("order_state", form.order_state)?;
        let order_city = required("order_city", form.order_city)?;
        let customer_state = required("customer_state", form.customer_state)?;
        let department_name = required("department_name", form.department_name)?;
        let market = required("market", form.market)?;
        let order_item_quantity = required("order_item_quantity", form.order_item_quantity)?;
        let order_item_discount = required("order_item_discount", form.order_item_discount)?;
        let order_item_total_amount =
            required("order_item_total_amount", form.order_item_total_amount)?;
        let order_status = required("order_status", form.order_status)?;
        let shipping_mode = required("shipping_mode", form.shipping_mode)?;
        let order_date = required("order_date", form.order_date)?;
        let ship_date = required("ship_date", form.ship_date)?;

        if ship_date < order_date {
            debug!("Rejecting order: ship date {} before order date {}", ship_date, order_date);
            return Err(ValidationError::InvalidDateOrder {
                order_date,
                ship_date,
            });
        }

        Ok(OrderInput {
            payment_type,
            category_name,
            order_state,
            order_city,
            customer_state,
            department_name,
            market,
            order_item_quantity,
            order_item_discount,
            order_item_total_amount,
            order_status,
            shipping_mode,
            order_date,
            ship_date,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use order_types::{Market, NonNegative, OrderStatus, PaymentType, ShippingMode};
    use proptest::prelude::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn complete_form() -> OrderForm {
        OrderForm {
            payment_type: Some(PaymentType::Cash),
            category_name: Some("Accessories".to_string()),
            order_state: Some("California".to_string()),
            order_city: Some("Los Angeles".to_string()),
            customer_state: Some("Texas".to_string()),
            department_name: Some("Apparel".to_string()),
            market: Some(Market::Usca),
            order_item_quantity: Some(NonNegative::new(2.0).unwrap()),
            order_item_discount: Some(NonNegative::new(5.0).unwrap()),
            order_item_total_amount: Some(NonNegative::new(100.0).unwrap()),
            order_status: Some(OrderStatus::Complete),
            shipping_mode: Some(ShippingMode::StandardClass),
            order_date: Some(date(2024, 1, 1)),
            ship_date: Some(date(2024, 1, 5)),
        }
    }

    #[test]
    fn test_complete_form_validates() {
        let input = Validator::new().validate(complete_form()).unwrap();
        assert_eq!(input.order_city, "Los Angeles");
        assert_eq!(input.date_diff_days(), 4);
    }

    #[test]
    fn test_same_day_shipment_is_valid() {
        let form = OrderForm {
            ship_date: Some(date(2024, 1, 1)),
            ..complete_form()
        };
        let input = Validator::new().validate(form).unwrap();
        assert_eq!(input.date_diff_days(), 0);
    }

    #[test]
    fn test_ship_before_order_is_rejected() {
        let form = OrderForm {
            order_date: Some(date(2024, 1, 2)),
            ship_date: Some(date(2024, 1, 1)),
            ..complete_form()
        };
        let err = Validator::new().validate(form).unwrap_err();
        assert_eq!(
            err,
            ValidationError::InvalidDateOrder {
                order_date: date(2024, 1, 2),
                ship_date: date(2024, 1, 1),
            }
        );
        assert_eq!(err.code(), "invalid_date_order");
        assert_eq!(err.to_string(), "Ship date cannot be before order date");
    }

    #[test]
    fn test_first_missing_field_is_reported() {
        let form = OrderForm {
            order_city: None,
            shipping_mode: None,
            ..complete_form()
        };
        let err = Validator::new().validate(form).unwrap_err();
        assert_eq!(err, ValidationError::MissingField("order_city"));
    }

    #[test]
    fn test_missing_field_wins_over_date_order() {
        let form = OrderForm {
            market: None,
            order_date: Some(date(2024, 1, 9)),
            ..complete_form()
        };
        let err = Validator::new().validate(form).unwrap_err();
        assert_eq!(err, ValidationError::MissingField("market"));
    }

    #[test]
    fn test_empty_form_reports_first_field() {
        let err = Validator::new().validate(OrderForm::default()).unwrap_err();
        assert_eq!(err, ValidationError::MissingField("payment_type"));
        assert_eq!(err.code(), "missing_field");
    }

    proptest! {
        #[test]
        fn prop_date_order_decides_validity(order_offset in 0i64..3650, ship_offset in 0i64..3650) {
            let base = date(2015, 1, 1);
            let form = OrderForm {
                order_date: Some(base + chrono::Duration::days(order_offset)),
                ship_date: Some(base + chrono::Duration::days(ship_offset)),
                ..complete_form()
            };
            let result = Validator::new().validate(form);
            prop_assert_eq!(result.is_ok(), ship_offset >= order_offset);
            if let Ok(input) = result {
                prop_assert_eq!(input.date_diff_days(), ship_offset - order_offset);
            }
        }
    }
}
