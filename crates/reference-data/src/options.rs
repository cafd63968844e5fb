//! Form Option Lists

use crate::tables::ReferenceData;
use order_types::{FixedCategory, Market, OrderStatus, PaymentType, ShippingMode};
use serde::Serialize;

fn form_strings<T: FixedCategory>() -> Vec<&'static str> {
    T::FORM_ORDER.iter().map(|v| v.as_str()).collect()
}

/// Every dropdown's choices, in the order the form shows them
///
/// Order cities are not included here since they depend on the chosen
/// state; see [`ReferenceData::cities_for_state`].
#[derive(Debug, Clone, Serialize)]
pub struct FormOptions {
    pub payment_type: Vec<&'static str>,
    pub category_name: Vec<String>,
    pub order_state: Vec<String>,
    pub customer_state: Vec<String>,
    pub department_name: Vec<String>,
    pub market: Vec<&'static str>,
    pub order_status: Vec<&'static str>,
    pub shipping_mode: Vec<&'static str>,
}

impl FormOptions {
    pub fn from_reference(data: &ReferenceData) -> Self {
        Self {
            payment_type: form_strings::<PaymentType>(),
            category_name: data.categories().to_vec(),
            order_state: data.order_states().to_vec(),
            customer_state: data.customer_states().to_vec(),
            department_name: data.departments().to_vec(),
            market: form_strings::<Market>(),
            order_status: form_strings::<OrderStatus>(),
            shipping_mode: form_strings::<ShippingMode>(),
        }
    }
}
