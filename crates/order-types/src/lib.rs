//! Order Types
//!
//! Typed order attributes shared by validation, encoding and the HTTP layer.
//! The raw [`OrderForm`] keeps every field optional; [`OrderInput`] is the
//! complete, validated record the encoder consumes.

mod enums;
mod form;

pub use enums::{FixedCategory, Market, OrderStatus, PaymentType, ShippingMode, UnknownVariant};
pub use form::{NegativeValue, NonNegative, OrderForm, OrderInput, NOT_SELECTED};
