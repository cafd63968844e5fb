//! Reference Tables

use crate::loader::{
    read_single_column, read_state_city_pairs, StateCityPair, CATEGORIES_FILE,
    CUSTOMER_STATES_FILE, DEPARTMENTS_FILE, STATE_CITY_PAIRS_FILE,
};
use crate::ReferenceDataError;
use std::collections::{BTreeMap, BTreeSet};
use std::fs::File;
use std::path::Path;
use tracing::info;

fn sorted_unique<I>(values: I) -> Vec<String>
where
    I: IntoIterator<Item = String>,
{
    values.into_iter().collect::<BTreeSet<_>>().into_iter().collect()
}

fn open(dir: &Path, name: &str) -> Result<File, ReferenceDataError> {
    let path = dir.join(name);
    File::open(&path).map_err(|source| ReferenceDataError::Io { path, source })
}

/// Loaded reference tables, sorted and de-duplicated
///
/// Built once at startup and only read afterwards.
#[derive(Debug, Clone, Default)]
pub struct ReferenceData {
    categories: Vec<String>,
    departments: Vec<String>,
    customer_states: Vec<String>,
    order_states: Vec<String>,
    order_cities: Vec<String>,
    cities_by_state: BTreeMap<String, Vec<String>>,
}

impl ReferenceData {
    /// Build from already-parsed tables
    pub fn from_tables(
        categories: Vec<String>,
        departments: Vec<String>,
        customer_states: Vec<String>,
        pairs: Vec<StateCityPair>,
    ) -> Self {
        let order_states = sorted_unique(pairs.iter().filter_map(|p| p.order_state.clone()));
        let order_cities = sorted_unique(pairs.iter().filter_map(|p| p.order_city.clone()));

        let mut grouped: BTreeMap<String, BTreeSet<String>> = BTreeMap::new();
        for pair in pairs {
            if let (Some(state), Some(city)) = (pair.order_state, pair.order_city) {
                grouped.entry(state).or_default().insert(city);
            }
        }
        let cities_by_state = grouped
            .into_iter()
            .map(|(state, cities)| (state, cities.into_iter().collect()))
            .collect();

        Self {
            categories: sorted_unique(categories),
            departments: sorted_unique(departments),
            customer_states: sorted_unique(customer_states),
            order_states,
            order_cities,
            cities_by_state,
        }
    }

    /// Load the four reference CSV files from a directory
    pub fn load(dir: impl AsRef<Path>) -> Result<Self, ReferenceDataError> {
        let dir = dir.as_ref();
        info!("Loading reference data from {}", dir.display());

        let categories = read_single_column(CATEGORIES_FILE, open(dir, CATEGORIES_FILE)?)?;
        let departments = read_single_column(DEPARTMENTS_FILE, open(dir, DEPARTMENTS_FILE)?)?;
        let customer_states =
            read_single_column(CUSTOMER_STATES_FILE, open(dir, CUSTOMER_STATES_FILE)?)?;
        let pairs = read_state_city_pairs(STATE_CITY_PAIRS_FILE, open(dir, STATE_CITY_PAIRS_FILE)?)?;

        let data = Self::from_tables(categories, departments, customer_states, pairs);
        info!(
            "Reference data loaded: {} categories, {} departments, {} customer states, {} order states, {} cities",
            data.categories.len(),
            data.departments.len(),
            data.customer_states.len(),
            data.order_states.len(),
            data.order_cities.len()
        );
        Ok(data)
    }

    /// Product categories
    pub fn categories(&self) -> &[String] {
        &self.categories
    }

    /// Departments
    pub fn departments(&self) -> &[String] {
        &self.departments
    }

    /// Customer (product location) states
    pub fn customer_states(&self) -> &[String] {
        &self.customer_states
    }

    /// States appearing in the state/city table
    pub fn order_states(&self) -> &[String] {
        &self.order_states
    }

    /// Every city in the state/city table, across all states
    pub fn order_cities(&self) -> &[String] {
        &self.order_cities
    }

    /// Cities paired with `state`; empty for an unknown state
    pub fn cities_for_state(&self, state: &str) -> &[String] {
        self.cities_by_state
            .get(state)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }
}
