//! Reference Data
//!
//! Loads the externally supplied reference tables the order form draws its
//! choices from, and exposes them as sorted, de-duplicated option lists.

mod loader;
mod options;
mod tables;

pub use loader::{
    read_single_column, read_state_city_pairs, StateCityPair, CATEGORIES_FILE,
    CUSTOMER_STATES_FILE, DEPARTMENTS_FILE, STATE_CITY_PAIRS_FILE,
};
pub use options::FormOptions;
pub use tables::ReferenceData;

use std::path::PathBuf;
use thiserror::Error;

/// Reference data errors
#[derive(Debug, Error)]
pub enum ReferenceDataError {
    #[error("Failed to open {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Malformed CSV in {table}: {source}")]
    Csv {
        table: &'static str,
        #[source]
        source: csv::Error,
    },
    #[error("Column '{column}' not found in {table}")]
    MissingColumn {
        table: &'static str,
        column: &'static str,
    },
}
