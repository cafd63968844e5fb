//! Form Option Routes

use axum::{
    extract::{Query, State},
    Json,
};
use reference_data::FormOptions;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::AppState;

/// Query parameters for the cities endpoint
#[derive(Debug, Deserialize)]
pub struct CityQuery {
    /// Selected order state
    pub state: String,
}

/// Response for the cities endpoint
#[derive(Debug, Serialize)]
pub struct CityResponse {
    pub state: String,
    pub cities: Vec<String>,
    pub count: usize,
}

/// Get every dropdown's choices
pub async fn get_options(State(state): State<Arc<AppState>>) -> Json<FormOptions> {
    Json(state.options.clone())
}

/// Get the cities for a selected order state
pub async fn get_cities(
    State(state): State<Arc<AppState>>,
    Query(params): Query<CityQuery>,
) -> Json<CityResponse> {
    let cities = state.reference.cities_for_state(&params.state).to_vec();

    Json(CityResponse {
        count: cities.len(),
        state: params.state,
        cities,
    })
}
