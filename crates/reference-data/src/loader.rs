//! CSV Table Readers

use crate::ReferenceDataError;
use std::io::Read;
use tracing::debug;

/// Category list, one value per line, no header
pub const CATEGORIES_FILE: &str = "categories.csv";
/// Department list, one value per line, no header
pub const DEPARTMENTS_FILE: &str = "departments.csv";
/// Customer (product location) state list, one value per line, no header
pub const CUSTOMER_STATES_FILE: &str = "cust_states.csv";
/// Order state/city pairs with an `order_state,order_city` header
pub const STATE_CITY_PAIRS_FILE: &str = "state_city_pairs.csv";

const STATE_COLUMN: &str = "order_state";
const CITY_COLUMN: &str = "order_city";

/// One row of the state/city table; either side may be blank
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StateCityPair {
    pub order_state: Option<String>,
    pub order_city: Option<String>,
}

fn non_empty(field: Option<&str>) -> Option<String> {
    field.filter(|v| !v.is_empty()).map(str::to_string)
}

/// Read the first column of a headerless CSV, dropping blank cells
pub fn read_single_column<R: Read>(
    table: &'static str,
    reader: R,
) -> Result<Vec<String>, ReferenceDataError> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(reader);

    let mut values = Vec::new();
    for record in csv_reader.records() {
        let record = record.map_err(|source| ReferenceDataError::Csv { table, source })?;
        if let Some(value) = non_empty(record.get(0)) {
            values.push(value);
        }
    }

    debug!("Read {} values from {}", values.len(), table);
    Ok(values)
}

/// Read the state/city table, locating its columns by header name
pub fn read_state_city_pairs<R: Read>(
    table: &'static str,
    reader: R,
) -> Result<Vec<StateCityPair>, ReferenceDataError> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(reader);

    let headers = csv_reader
        .headers()
        .map_err(|source| ReferenceDataError::Csv { table, source })?
        .clone();
    let column = |name: &'static str| {
        headers
            .iter()
            .position(|h| h.trim() == name)
            .ok_or(ReferenceDataError::MissingColumn { table, column: name })
    };
    let state_idx = column(STATE_COLUMN)?;
    let city_idx = column(CITY_COLUMN)?;

    let mut pairs = Vec::new();
    for record in csv_reader.records() {
        let record = record.map_err(|source| ReferenceDataError::Csv { table, source })?;
        pairs.push(StateCityPair {
            order_state: non_empty(record.get(state_idx)),
            order_city: non_empty(record.get(city_idx)),
        });
    }

    debug!("Read {} state/city rows from {}", pairs.len(), table);
    Ok(pairs)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_column_drops_blanks() {
        let data = "Fishing\n\nCleats\n\"Golf Balls\"\nCleats\n";
        let values = read_single_column(CATEGORIES_FILE, data.as_bytes()).unwrap();
        assert_eq!(values, vec!["Fishing", "Cleats", "Golf Balls", "Cleats"]);
    }

    #[test]
    fn test_single_column_ignores_extra_columns() {
        let data = "Texas,TX\nOhio,OH\n";
        let values = read_single_column(CUSTOMER_STATES_FILE, data.as_bytes()).unwrap();
        assert_eq!(values, vec!["Texas", "Ohio"]);
    }

    #[test]
    fn test_pairs_found_by_header() {
        let data = "order_city,order_state\nLos Angeles,California\n,Oregon\nAustin,\n";
        let pairs = read_state_city_pairs(STATE_CITY_PAIRS_FILE, data.as_bytes()).unwrap();
        assert_eq!(pairs.len(), 3);
        assert_eq!(pairs[0].order_state.as_deref(), Some("California"));
        assert_eq!(pairs[0].order_city.as_deref(), Some("Los Angeles"));
        assert_eq!(pairs[1].order_city, None);
        assert_eq!(pairs[2].order_state, None);
    }

    #[test]
    fn test_pairs_missing_column() {
        let data = "state,city\nCalifornia,Los Angeles\n";
        let err = read_state_city_pairs(STATE_CITY_PAIRS_FILE, data.as_bytes()).unwrap_err();
        assert!(matches!(
            err,
            ReferenceDataError::MissingColumn { column: "order_state", .. }
        ));
    }
}
