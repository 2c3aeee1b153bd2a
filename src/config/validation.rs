//! Configuration validation module
//!
//! This module provides validation functions for application configuration
//! to ensure all required settings are properly configured.

use url::Url;

use super::Settings;
use crate::utils::errors::{Result, TasgeelError};

/// Validate all configuration settings
pub fn validate_settings(settings: &Settings) -> Result<()> {
    validate_server_config(&settings.server)?;
    validate_sheets_config(&settings.sheets)?;
    validate_images_config(&settings.images)?;
    validate_auth_config(&settings.auth)?;
    validate_logging_config(&settings.logging)?;

    Ok(())
}

/// Validate HTTP server configuration
fn validate_server_config(config: &super::ServerConfig) -> Result<()> {
    if config.host.is_empty() {
        return Err(TasgeelError::Config("Server host is required".to_string()));
    }

    if config.port == 0 {
        return Err(TasgeelError::Config(
            "Server port must be greater than 0".to_string(),
        ));
    }

    Url::parse(&config.public_url)?;

    Ok(())
}

/// Validate spreadsheet provider configuration
fn validate_sheets_config(config: &super::SheetsConfig) -> Result<()> {
    if config.api_url.is_empty() {
        return Err(TasgeelError::Config(
            "Spreadsheet service URL is required".to_string(),
        ));
    }

    Url::parse(&config.api_url)?;

    if config.companies_sheet.is_empty() {
        return Err(TasgeelError::Config(
            "Company registry sheet name is required".to_string(),
        ));
    }

    if config.timeout_seconds == 0 {
        return Err(TasgeelError::Config(
            "Spreadsheet service timeout must be greater than 0".to_string(),
        ));
    }

    Ok(())
}

/// Validate image host configuration
fn validate_images_config(config: &super::ImagesConfig) -> Result<()> {
    if config.api_url.is_empty() {
        return Err(TasgeelError::Config(
            "Image host URL is required".to_string(),
        ));
    }

    Url::parse(&config.api_url)?;

    if config.timeout_seconds == 0 {
        return Err(TasgeelError::Config(
            "Image host timeout must be greater than 0".to_string(),
        ));
    }

    Ok(())
}

/// Validate session token configuration
fn validate_auth_config(config: &super::AuthConfig) -> Result<()> {
    if config.session_secret.is_empty() {
        return Err(TasgeelError::Config(
            "Session secret is required".to_string(),
        ));
    }

    Ok(())
}

/// Validate logging configuration
fn validate_logging_config(config: &super::LoggingConfig) -> Result<()> {
    if config.level.is_empty() {
        return Err(TasgeelError::Config("Log level is required".to_string()));
    }

    let valid_levels = ["trace", "debug", "info", "warn", "error"];
    if !valid_levels.contains(&config.level.as_str()) {
        return Err(TasgeelError::Config(format!(
            "Invalid log level: {}. Valid levels: {:?}",
            config.level, valid_levels
        )));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_settings() -> Settings {
        let mut settings = Settings::default();
        settings.auth.session_secret = "secret".to_string();
        settings
    }

    #[test]
    fn test_default_settings_need_secret() {
        let settings = Settings::default();
        assert!(validate_settings(&settings).is_err());
        assert!(validate_settings(&valid_settings()).is_ok());
    }

    #[test]
    fn test_rejects_bad_urls() {
        let mut settings = valid_settings();
        settings.sheets.api_url = "not a url".to_string();
        assert!(validate_settings(&settings).is_err());
    }

    #[test]
    fn test_rejects_zero_timeout() {
        let mut settings = valid_settings();
        settings.sheets.timeout_seconds = 0;
        assert!(validate_settings(&settings).is_err());
    }

    #[test]
    fn test_rejects_unknown_log_level() {
        let mut settings = valid_settings();
        settings.logging.level = "verbose".to_string();
        assert!(validate_settings(&settings).is_err());
    }
}
