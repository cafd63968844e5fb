//! Fixed Enumerations
//!
//! The four categorical fields whose domain is fixed in code rather than
//! loaded from reference files. Each carries a hardcoded rank table in
//! alphabetical order of its wire string.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// A value was not a member of its fixed enumeration
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("'{value}' is not a valid {field}")]
pub struct UnknownVariant {
    pub field: &'static str,
    pub value: String,
}

/// Common surface of the fixed enumerations
pub trait FixedCategory: Copy + Sized + 'static {
    /// Field name as it appears on the form
    const FIELD: &'static str;
    /// All variants in alphabetical (rank) order
    const ALL: &'static [Self];
    /// All variants in the order the form presents them
    const FORM_ORDER: &'static [Self];

    /// Wire string
    fn as_str(&self) -> &'static str;

    /// Zero-based encoding rank
    fn rank(&self) -> usize;
}

fn parse_variant<T: FixedCategory>(s: &str) -> Result<T, UnknownVariant> {
    T::ALL
        .iter()
        .copied()
        .find(|v| v.as_str() == s)
        .ok_or_else(|| UnknownVariant {
            field: T::FIELD,
            value: s.to_string(),
        })
}

/// How the order was paid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PaymentType {
    #[serde(rename = "CASH")]
    Cash,
    #[serde(rename = "DEBIT")]
    Debit,
    #[serde(rename = "PAYMENT")]
    Payment,
    #[serde(rename = "TRANSFER")]
    Transfer,
}

impl FixedCategory for PaymentType {
    const FIELD: &'static str = "payment_type";
    const ALL: &'static [Self] = &[Self::Cash, Self::Debit, Self::Payment, Self::Transfer];
    const FORM_ORDER: &'static [Self] = Self::ALL;

    fn as_str(&self) -> &'static str {
        match self {
            PaymentType::Cash => "CASH",
            PaymentType::Debit => "DEBIT",
            PaymentType::Payment => "PAYMENT",
            PaymentType::Transfer => "TRANSFER",
        }
    }

    fn rank(&self) -> usize {
        match self {
            PaymentType::Cash => 0,
            PaymentType::Debit => 1,
            PaymentType::Payment => 2,
            PaymentType::Transfer => 3,
        }
    }
}

/// Order lifecycle status at the time of the request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OrderStatus {
    Closed,
    Complete,
    OnHold,
    PaymentReview,
    Pending,
    PendingPayment,
    Processing,
}

impl FixedCategory for OrderStatus {
    const FIELD: &'static str = "order_status";
    const ALL: &'static [Self] = &[
        Self::Closed,
        Self::Complete,
        Self::OnHold,
        Self::PaymentReview,
        Self::Pending,
        Self::PendingPayment,
        Self::Processing,
    ];
    const FORM_ORDER: &'static [Self] = Self::ALL;

    fn as_str(&self) -> &'static str {
        match self {
            OrderStatus::Closed => "CLOSED",
            OrderStatus::Complete => "COMPLETE",
            OrderStatus::OnHold => "ON_HOLD",
            OrderStatus::PaymentReview => "PAYMENT_REVIEW",
            OrderStatus::Pending => "PENDING",
            OrderStatus::PendingPayment => "PENDING_PAYMENT",
            OrderStatus::Processing => "PROCESSING",
        }
    }

    fn rank(&self) -> usize {
        match self {
            OrderStatus::Closed => 0,
            OrderStatus::Complete => 1,
            OrderStatus::OnHold => 2,
            OrderStatus::PaymentReview => 3,
            OrderStatus::Pending => 4,
            OrderStatus::PendingPayment => 5,
            OrderStatus::Processing => 6,
        }
    }
}

/// Shipping service level
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ShippingMode {
    #[serde(rename = "First Class")]
    FirstClass,
    #[serde(rename = "Same Day")]
    SameDay,
    #[serde(rename = "Second Class")]
    SecondClass,
    #[serde(rename = "Standard Class")]
    StandardClass,
}

impl FixedCategory for ShippingMode {
    const FIELD: &'static str = "shipping_mode";
    const ALL: &'static [Self] = &[
        Self::FirstClass,
        Self::SameDay,
        Self::SecondClass,
        Self::StandardClass,
    ];
    // The form lists classes by service tier; ranks stay alphabetical.
    const FORM_ORDER: &'static [Self] = &[
        Self::FirstClass,
        Self::SecondClass,
        Self::SameDay,
        Self::StandardClass,
    ];

    fn as_str(&self) -> &'static str {
        match self {
            ShippingMode::FirstClass => "First Class",
            ShippingMode::SameDay => "Same Day",
            ShippingMode::SecondClass => "Second Class",
            ShippingMode::StandardClass => "Standard Class",
        }
    }

    fn rank(&self) -> usize {
        match self {
            ShippingMode::FirstClass => 0,
            ShippingMode::SameDay => 1,
            ShippingMode::SecondClass => 2,
            ShippingMode::StandardClass => 3,
        }
    }
}

/// Sales market the order belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Market {
    Africa,
    Europe,
    #[serde(rename = "LATAM")]
    Latam,
    #[serde(rename = "Pacific Asia")]
    PacificAsia,
    #[serde(rename = "USCA")]
    Usca,
}

impl FixedCategory for Market {
    const FIELD: &'static str = "market";
    const ALL: &'static [Self] = &[
        Self::Africa,
        Self::Europe,
        Self::Latam,
        Self::PacificAsia,
        Self::Usca,
    ];
    const FORM_ORDER: &'static [Self] = Self::ALL;

    fn as_str(&self) -> &'static str {
        match self {
            Market::Africa => "Africa",
            Market::Europe => "Europe",
            Market::Latam => "LATAM",
            Market::PacificAsia => "Pacific Asia",
            Market::Usca => "USCA",
        }
    }

    fn rank(&self) -> usize {
        match self {
            Market::Africa => 0,
            Market::Europe => 1,
            Market::Latam => 2,
            Market::PacificAsia => 3,
            Market::Usca => 4,
        }
    }
}

macro_rules! impl_str_conversions {
    ($($ty:ty),*) => {$(
        impl FromStr for $ty {
            type Err = UnknownVariant;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                parse_variant(s)
            }
        }

        impl fmt::Display for $ty {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }
    )*};
}

impl_str_conversions!(PaymentType, OrderStatus, ShippingMode, Market);
