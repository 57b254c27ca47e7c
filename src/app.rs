use tracing_subscriber::EnvFilter;

use crate::domain::error::{AppError, Result};
use crate::infrastructure::config::AppConfig;

pub async fn run() -> Result<()> {
    let _ = dotenvy::dotenv();

    let config = AppConfig::load()?;

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(config.log_filter.as_str()));
    let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();

    let state = crate::infrastructure::bootstrap::setup(&config).await?;

    let server = crate::interfaces::http::start_server(state, &config).map_err(|e| {
        AppError::IoError(format!(
            "Failed to bind {}:{}: {}",
            config.bind_address, config.port, e
        ))
    })?;

    tracing::info!(
        bind_address = %config.bind_address,
        port = config.port,
        "Location import server started"
    );

    server
        .await
        .map_err(|e| AppError::IoError(format!("HTTP server stopped: {}", e)))
}
