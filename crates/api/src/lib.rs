//! Delivery Prediction API Server
//!
//! REST API backing the delivery punctuality form: dropdown options, the
//! dependent state/city list, and predictions.

use axum::{
    extract::State,
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use inference_engine::InferenceEngine;
use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};
use reference_data::{FormOptions, ReferenceData, ReferenceDataError};
use serde::Serialize;
use std::sync::Arc;
use thiserror::Error;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{info, warn};
use tracing_subscriber::FmtSubscriber;

mod pipeline;
mod routes;
mod settings;

pub use pipeline::{PipelineError, PredictionOutcome, PredictionService};
pub use settings::{AppConfig, ConfigError, DataConfig, LoggingConfig, ModelConfig, ServerConfig};

/// Errors that stop the server from starting
#[derive(Debug, Error)]
pub enum ServerError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("Reference data unavailable: {0}")]
    ReferenceData(#[from] ReferenceDataError),
    #[error("Failed to initialize logging: {0}")]
    Logging(String),
    #[error("Failed to install metrics recorder: {0}")]
    Metrics(String),
    #[error("Server I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Application state shared across handlers
///
/// Built once at startup and never mutated.
pub struct AppState {
    /// Prediction pipeline
    pub service: PredictionService,
    /// Loaded reference tables
    pub reference: Arc<ReferenceData>,
    /// Precomputed dropdown choices
    pub options: FormOptions,
    /// Prometheus exposition handle
    pub metrics: Option<PrometheusHandle>,
    /// Version string
    pub version: String,
    /// Start time
    pub start_time: std::time::Instant,
}

impl AppState {
    /// Create new application state
    pub fn new(
        reference: ReferenceData,
        engine: InferenceEngine,
        metrics: Option<PrometheusHandle>,
    ) -> Self {
        let reference = Arc::new(reference);
        Self {
            service: PredictionService::new(reference.clone(), engine),
            options: FormOptions::from_reference(&reference),
            reference,
            metrics,
            version: env!("CARGO_PKG_VERSION").to_string(),
            start_time: std::time::Instant::now(),
        }
    }
}

/// Health response
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub timestamp: u64,
    pub version: String,
    pub uptime_seconds: u64,
    pub components: ComponentStatus,
}

/// Component status
#[derive(Debug, Serialize)]
pub struct ComponentStatus {
    pub inference: InferenceHealth,
    pub reference_data: ReferenceHealth,
}

/// Classifier health
#[derive(Debug, Serialize)]
pub struct InferenceHealth {
    pub status: String,
    pub model: Option<String>,
}

/// Reference table sizes
#[derive(Debug, Serialize)]
pub struct ReferenceHealth {
    pub categories: usize,
    pub departments: usize,
    pub customer_states: usize,
    pub order_states: usize,
    pub order_cities: usize,
}

/// Create the application router
pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/api/v1/health", get(health_handler))
        .route("/api/v1/options", get(routes::options::get_options))
        .route("/api/v1/options/cities", get(routes::options::get_cities))
        .route("/api/v1/predict", post(routes::predictions::predict))
        .route("/metrics", get(metrics_handler))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Health check handler
async fn health_handler(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let timestamp = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0);
    let engine = state.service.engine();
    let reference = &state.reference;

    let response = HealthResponse {
        status: if engine.is_loaded() { "healthy" } else { "degraded" }.to_string(),
        timestamp,
        version: state.version.clone(),
        uptime_seconds: state.start_time.elapsed().as_secs(),
        components: ComponentStatus {
            inference: InferenceHealth {
                status: if engine.is_loaded() { "ok" } else { "unavailable" }.to_string(),
                model: engine.model_name().map(str::to_string),
            },
            reference_data: ReferenceHealth {
                categories: reference.categories().len(),
                departments: reference.departments().len(),
                customer_states: reference.customer_states().len(),
                order_states: reference.order_states().len(),
                order_cities: reference.order_cities().len(),
            },
        },
    };

    Json(response)
}

/// Prometheus exposition
async fn metrics_handler(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    match &state.metrics {
        Some(handle) => (StatusCode::OK, handle.render()),
        None => (StatusCode::NOT_FOUND, "metrics recorder not installed".to_string()),
    }
}

/// Initialize logging
pub fn init_logging(config: &LoggingConfig) -> Result<(), ServerError> {
    let level = config.max_level()?;
    let builder = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(true);

    let result = if config.json {
        tracing::subscriber::set_global_default(builder.json().finish())
    } else {
        tracing::subscriber::set_global_default(builder.finish())
    };

    result.map_err(|e| ServerError::Logging(e.to_string()))
}

/// Pick the classifier the configuration asks for
///
/// A model that fails to load leaves the service up without predictions
/// rather than refusing to start.
pub fn build_engine(config: &ModelConfig) -> InferenceEngine {
    match &config.path {
        Some(path) => match InferenceEngine::new(path) {
            Ok(engine) => engine,
            Err(e) => {
                warn!("Continuing without a classifier: {}", e);
                InferenceEngine::unavailable()
            }
        },
        None if config.mock => InferenceEngine::mock(),
        None => InferenceEngine::unavailable(),
    }
}

/// Run the server
pub async fn run_server(config: AppConfig) -> Result<(), ServerError> {
    let reference = ReferenceData::load(&config.data.dir)?;
    let engine = build_engine(&config.model);
    let metrics = PrometheusBuilder::new()
        .install_recorder()
        .map_err(|e| ServerError::Metrics(e.to_string()))?;

    let state = Arc::new(AppState::new(reference, engine, Some(metrics)));
    let app = create_router(state);

    let addr = config.server.addr();
    info!("Starting API server on {}", addr);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
