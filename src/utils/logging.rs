//! Logging configuration and setup
//!
//! This module provides logging initialization and structured logging utilities
//! for the Tasgeel application.

use tracing::{info, warn};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::LoggingConfig;
use crate::utils::errors::Result;

/// Initialize logging based on configuration
///
/// The returned guard must stay alive for the duration of the process so the
/// file writer keeps flushing.
pub fn init_logging(config: &LoggingConfig) -> Result<WorkerGuard> {
    let file_appender = tracing_appender::rolling::daily(&config.file_path, "tasgeel.log");
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(&config.level))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stdout))
        .with(tracing_subscriber::fmt::layer().with_writer(non_blocking))
        .init();

    info!("Logging initialized with level: {}", config.level);
    Ok(guard)
}

/// Log admin actions with structured data
pub fn log_admin_action(admin: &str, action: &str, target: Option<&str>) {
    warn!(
        admin = admin,
        action = action,
        target = target,
        "Admin action performed"
    );
}

/// Log a registration attempt outcome
pub fn log_registration(company: &str, event: &str, accepted: bool) {
    info!(
        company = company,
        event = event,
        accepted = accepted,
        "Registration processed"
    );
}

/// Log upstream API errors with context
pub fn log_upstream_error(service: &str, error: &str, context: Option<&str>) {
    tracing::error!(
        service = service,
        error = error,
        context = context,
        "Upstream API error occurred"
    );
}
