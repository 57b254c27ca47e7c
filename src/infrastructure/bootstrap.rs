use std::sync::Arc;

use tracing::{error, info};

use crate::application::use_cases::location_import::LocationImportUseCase;
use crate::domain::error::Result;
use crate::infrastructure::config::AppConfig;
use crate::infrastructure::db::{LocationStore, SqliteLocationStore};
use crate::interfaces::http::HttpState;

/// Open the store and wire the import pipeline behind the HTTP state
pub async fn setup(config: &AppConfig) -> Result<HttpState> {
    let store = SqliteLocationStore::connect(&config.database_url, config.max_connections)
        .await
        .map_err(|err| {
            error!(error = %err, database_url = %config.database_url, "Failed to open location store");
            err
        })?;

    info!(
        database_url = %config.database_url,
        batch_size = config.batch_size,
        "Location store ready"
    );

    let store: Arc<dyn LocationStore> = Arc::new(store);
    let import_use_case = Arc::new(LocationImportUseCase::new(store, config.batch_size));

    Ok(HttpState { import_use_case })
}
