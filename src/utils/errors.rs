//! Error handling for Tasgeel
//!
//! This module defines the main error types used throughout the application
//! and provides a unified error handling strategy.

use thiserror::Error;

/// Main error type for the Tasgeel application
#[derive(Error, Debug)]
pub enum TasgeelError {
    #[error("Missing or invalid session token")]
    Unauthorized,

    #[error("Permission denied: {0}")]
    Forbidden(String),

    #[error("Company not found: {name}")]
    CompanyNotFound { name: String },

    #[error("Event not found: {name}")]
    EventNotFound { name: String },

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Sheet store error: {0}")]
    Store(#[from] StoreError),

    #[error("Image host error: {0}")]
    ImageHost(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("HTTP request error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Session token error: {0}")]
    Token(#[from] jsonwebtoken::errors::Error),

    #[error("Password hashing failed")]
    PasswordHash,

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("URL parsing error: {0}")]
    UrlParse(#[from] url::ParseError),
}

/// Spreadsheet provider specific errors
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Sheet not found: {0}")]
    SheetMissing(String),

    #[error("Spreadsheet service request failed: {0}")]
    RequestFailed(String),

    #[error("Spreadsheet service timeout")]
    Timeout,

    #[error("Invalid response from spreadsheet service: {0}")]
    InvalidResponse(String),

    #[error("Spreadsheet service unavailable")]
    ServiceUnavailable,
}

/// Result type alias for Tasgeel operations
pub type Result<T> = std::result::Result<T, TasgeelError>;

/// Result type alias for sheet store operations
pub type StoreResult<T> = std::result::Result<T, StoreError>;

impl TasgeelError {
    /// HTTP status code this error maps to
    pub fn status_code(&self) -> u16 {
        match self {
            TasgeelError::Unauthorized => 401,
            TasgeelError::Token(_) => 401,
            TasgeelError::Forbidden(_) => 403,
            TasgeelError::CompanyNotFound { .. } => 404,
            TasgeelError::EventNotFound { .. } => 404,
            TasgeelError::Store(StoreError::SheetMissing(_)) => 404,
            TasgeelError::InvalidInput(_) => 400,
            TasgeelError::Conflict(_) => 409,
            TasgeelError::Store(_) => 502,
            TasgeelError::ImageHost(_) => 502,
            TasgeelError::Http(_) => 502,
            _ => 500,
        }
    }

    /// Check if the error was caused by the caller rather than an upstream
    pub fn is_client_error(&self) -> bool {
        let status = self.status_code();
        (400..500).contains(&status)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes() {
        assert_eq!(TasgeelError::Unauthorized.status_code(), 401);
        assert_eq!(TasgeelError::Forbidden("nope".to_string()).status_code(), 403);
        assert_eq!(
            TasgeelError::CompanyNotFound { name: "acme".to_string() }.status_code(),
            404
        );
        assert_eq!(TasgeelError::InvalidInput("bad phone".to_string()).status_code(), 400);
        assert_eq!(TasgeelError::Conflict("duplicate".to_string()).status_code(), 409);
        assert_eq!(
            TasgeelError::Store(StoreError::Timeout).status_code(),
            502
        );
    }

    #[test]
    fn test_missing_sheet_is_not_found() {
        let err = TasgeelError::Store(StoreError::SheetMissing("acme".to_string()));
        assert_eq!(err.status_code(), 404);
        assert!(err.is_client_error());
    }
}
