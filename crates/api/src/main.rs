//! Delivery Predictor - Main Entry Point

use api::{init_logging, run_server, AppConfig};
use tracing::info;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = AppConfig::load()?;
    init_logging(&config.logging)?;

    info!("=== Delivery Predictor v{} ===", env!("CARGO_PKG_VERSION"));
    info!(
        "Reference data: {}, model: {}",
        config.data.dir.display(),
        config
            .model
            .path
            .as_ref()
            .map(|p| p.display().to_string())
            .unwrap_or_else(|| if config.model.mock { "mock".into() } else { "none".into() })
    );

    run_server(config).await?;

    Ok(())
}
