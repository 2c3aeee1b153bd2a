//! Tasgeel event registration server
//!
//! Main application entry point

use std::sync::Arc;

use tracing::info;

use Tasgeel::{
    config::Settings,
    handlers::{self, AppState},
    services::ServiceFactory,
    sheets::HttpSheetStore,
    utils::logging,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();

    // Load configuration
    let settings = Settings::new()?;
    settings.validate()?;

    // Initialize logging; the guard keeps the file writer flushing
    let _guard = logging::init_logging(&settings.logging)?;

    info!("Starting {}...", Tasgeel::info());

    // Initialize the sheet store adapter
    info!("Connecting to spreadsheet service...");
    let store = Arc::new(HttpSheetStore::new(settings.sheets.clone())?);

    // Initialize services
    info!("Initializing services...");
    let services = ServiceFactory::new(store, settings.clone())?;

    let health = services.health_check().await;
    if !health.is_healthy() {
        tracing::warn!(
            store_reachable = health.store_reachable,
            "Spreadsheet service is not reachable yet"
        );
    }

    let state = AppState {
        services: Arc::new(services),
        settings: settings.clone(),
    };

    let app = handlers::router(state);

    let address = format!("{}:{}", settings.server.host, settings.server.port);
    let listener = tokio::net::TcpListener::bind(&address).await?;
    info!(address = %address, "Tasgeel is ready");

    axum::serve(listener, app).await?;

    info!("Tasgeel has been shut down.");
    Ok(())
}
