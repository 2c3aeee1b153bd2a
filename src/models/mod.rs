//! Data models module
//!
//! This module contains all data structures used throughout the application

pub mod company;
pub mod event;
pub mod registration;

// Re-export commonly used models
pub use company::{Company, CreateCompanyRequest, UpdateCompanyRequest};
pub use event::{CreateEventRequest, Event, UpdateEventRequest};
pub use registration::{AcademicStatus, Gender, RegisterRequest, Registration};
