//! HTTP handlers module
//!
//! Thin request/response mapping onto the domain services. No business rules
//! live here beyond parameter presence checks.

pub mod companies;
pub mod events;
pub mod health;
pub mod registrations;

use std::sync::Arc;

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde_json::json;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::config::Settings;
use crate::services::ServiceFactory;
use crate::utils::errors::TasgeelError;

/// Shared application state handed to every handler
#[derive(Clone)]
pub struct AppState {
    pub services: Arc<ServiceFactory>,
    pub settings: Settings,
}

/// Build the full API router
pub fn router(state: AppState) -> Router {
    Router::new()
        .route(
            "/api/companies",
            get(companies::list_or_get)
                .post(companies::create)
                // Older admin panel revisions used PUT; both verbs patch
                .put(companies::update)
                .patch(companies::update)
                .delete(companies::delete),
        )
        .route(
            "/api/events",
            get(events::list)
                .post(events::create)
                .patch(events::update)
                .delete(events::delete),
        )
        .route("/api/events/registrations", get(registrations::list))
        .route("/api/events/register", post(registrations::register))
        .route("/health", get(health::health))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

impl IntoResponse for TasgeelError {
    fn into_response(self) -> Response {
        let status = StatusCode::from_u16(self.status_code())
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

        let message = if self.is_client_error() {
            self.to_string()
        } else {
            tracing::error!(error = %self, "Request failed");
            match status {
                StatusCode::BAD_GATEWAY => "Upstream service failure".to_string(),
                _ => "Internal server error".to_string(),
            }
        };

        (status, Json(json!({ "error": message }))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::errors::StoreError;

    #[test]
    fn test_client_errors_keep_their_message() {
        let response = TasgeelError::InvalidInput("Invalid phone number format".to_string())
            .into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn test_upstream_errors_are_masked() {
        let response =
            TasgeelError::Store(StoreError::RequestFailed("secret detail".to_string()))
                .into_response();
        assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
    }

    #[test]
    fn test_conflict_maps_to_409() {
        let response = TasgeelError::Conflict("duplicate".to_string()).into_response();
        assert_eq!(response.status(), StatusCode::CONFLICT);
    }
}
