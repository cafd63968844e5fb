//! HTTP Route Handlers

pub mod options;
pub mod predictions;
