//! Tasgeel event registration platform
//!
//! Companies create events, end users register through a public form, and an
//! admin panel manages companies, events and registrations. All persistent
//! state lives in an external spreadsheet service accessed through row and
//! column manipulation; this crate provides the store adapter, the table
//! scanner that recovers logical event tables from flat sheets, and the HTTP
//! API on top of them.

#![allow(non_snake_case)]

pub mod config;
pub mod handlers;
pub mod middleware;
pub mod models;
pub mod services;
pub mod sheets;
pub mod utils;

// Re-export commonly used types
pub use config::Settings;
pub use utils::errors::{Result, TasgeelError};

// Re-export main components for easy access
pub use handlers::AppState;
pub use services::ServiceFactory;
pub use sheets::{HttpSheetStore, MemorySheetStore, SheetStore};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name
pub const NAME: &str = env!("CARGO_PKG_NAME");

/// Get library information
pub fn info() -> String {
    format!("{} v{}", NAME, VERSION)
}
