//! Application settings management
//!
//! This module defines the configuration structure and provides methods
//! for loading settings from TOML files and environment variables.

use serde::{Deserialize, Serialize};

/// Main application configuration structure
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Settings {
    pub server: ServerConfig,
    pub sheets: SheetsConfig,
    pub images: ImagesConfig,
    pub auth: AuthConfig,
    pub logging: LoggingConfig,
}

/// HTTP server configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Public base URL used to build registration links for created events
    pub public_url: String,
}

/// Spreadsheet provider configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SheetsConfig {
    pub api_url: String,
    pub api_key: String,
    /// Name of the reserved sheet holding the company registry
    pub companies_sheet: String,
    pub timeout_seconds: u64,
}

/// External content host configuration for image uploads
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ImagesConfig {
    pub api_url: String,
    pub token: String,
    pub timeout_seconds: u64,
}

/// Session token configuration
///
/// Tokens are issued by the external session provider; this server only
/// decodes and trusts them.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AuthConfig {
    pub session_secret: String,
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LoggingConfig {
    pub level: String,
    pub file_path: String,
}

impl Settings {
    /// Load settings from configuration file and environment variables
    pub fn new() -> Result<Self, config::ConfigError> {
        let settings = config::Config::builder()
            .add_source(config::File::with_name("config").required(false))
            .add_source(config::Environment::with_prefix("TASGEEL").separator("__"))
            .build()?;

        settings.try_deserialize()
    }

    /// Validate configuration settings
    pub fn validate(&self) -> Result<(), crate::utils::errors::TasgeelError> {
        super::validation::validate_settings(self)
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            server: ServerConfig {
                host: "0.0.0.0".to_string(),
                port: 8080,
                public_url: "http://localhost:8080".to_string(),
            },
            sheets: SheetsConfig {
                api_url: "http://localhost:9090".to_string(),
                api_key: String::new(),
                companies_sheet: "companies".to_string(),
                timeout_seconds: 10,
            },
            images: ImagesConfig {
                api_url: "https://content.example.com/uploads".to_string(),
                token: String::new(),
                timeout_seconds: 15,
            },
            auth: AuthConfig {
                session_secret: String::new(),
            },
            logging: LoggingConfig {
                level: "info".to_string(),
                file_path: "/var/log/tasgeel".to_string(),
            },
        }
    }
}
