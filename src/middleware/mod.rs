//! Middleware module
//!
//! Request-level concerns applied before handlers run.

pub mod auth;

pub use auth::{ActorType, AuthContext, SessionClaims};
