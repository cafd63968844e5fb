//! Order Validation
//!
//! Completeness and date-order checks that gate the encoder. Nothing past
//! this point ever sees a partially filled form.

mod error;
mod validator;

pub use error::ValidationError;
pub use validator::Validator;
