//! Category Index

use crate::EncodeError;
use reference_data::ReferenceData;
use std::collections::{BTreeSet, HashMap};
use tracing::info;

/// Rank lookup for one categorical field
///
/// Ranks are positions in the ascending, de-duplicated list of values,
/// compared by Unicode code point.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RankTable {
    sorted: Vec<String>,
    ranks: HashMap<String, usize>,
}

impl RankTable {
    /// Build a table from raw (possibly unsorted, duplicated) values
    pub fn from_values<I, S>(values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let sorted: Vec<String> = values
            .into_iter()
            .map(Into::into)
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect();
        let ranks = sorted
            .iter()
            .enumerate()
            .map(|(rank, value)| (value.clone(), rank))
            .collect();
        Self { sorted, ranks }
    }

    /// Rank of `value`, if present
    pub fn rank(&self, value: &str) -> Option<usize> {
        self.ranks.get(value).copied()
    }

    pub fn len(&self) -> usize {
        self.sorted.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sorted.is_empty()
    }
}

/// Categorical fields whose ranks come from reference data
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CategoricalField {
    CategoryName,
    OrderCity,
    OrderState,
    CustomerState,
    DepartmentName,
}

impl CategoricalField {
    /// Form field name
    pub fn as_str(&self) -> &'static str {
        match self {
            CategoricalField::CategoryName => "category_name",
            CategoricalField::OrderCity => "order_city",
            CategoricalField::OrderState => "order_state",
            CategoricalField::CustomerState => "customer_state",
            CategoricalField::DepartmentName => "department_name",
        }
    }
}

/// Read-only rank tables for every reference-driven field
///
/// Built once at startup; share it behind an `Arc`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CategoryIndex {
    category_name: RankTable,
    order_city: RankTable,
    order_state: RankTable,
    customer_state: RankTable,
    department_name: RankTable,
}

impl CategoryIndex {
    /// Build the index from loaded reference tables
    pub fn from_reference(data: &ReferenceData) -> Self {
        let index = Self {
            category_name: RankTable::from_values(data.categories().iter().cloned()),
            order_city: RankTable::from_values(data.order_cities().iter().cloned()),
            order_state: RankTable::from_values(data.order_states().iter().cloned()),
            customer_state: RankTable::from_values(data.customer_states().iter().cloned()),
            department_name: RankTable::from_values(data.departments().iter().cloned()),
        };
        info!(
            "Category index built: categories={}, cities={}, states={}, customer_states={}, departments={}",
            index.category_name.len(),
            index.order_city.len(),
            index.order_state.len(),
            index.customer_state.len(),
            index.department_name.len()
        );
        index
    }

    /// Rank table for a field
    pub fn table(&self, field: CategoricalField) -> &RankTable {
        match field {
            CategoricalField::CategoryName => &self.category_name,
            CategoricalField::OrderCity => &self.order_city,
            CategoricalField::OrderState => &self.order_state,
            CategoricalField::CustomerState => &self.customer_state,
            CategoricalField::DepartmentName => &self.department_name,
        }
    }

    /// Rank of `value` in `field`, or `UnknownCategory`
    pub fn rank(&self, field: CategoricalField, value: &str) -> Result<usize, EncodeError> {
        self.table(field)
            .rank(value)
            .ok_or_else(|| EncodeError::UnknownCategory {
                field: field.as_str(),
                value: value.to_string(),
            })
    }
}
