//! Registration endpoints

use axum::extract::{Query, State};
use axum::Json;
use serde::Deserialize;
use serde_json::{json, Value};

use crate::handlers::AppState;
use crate::middleware::auth::AuthContext;
use crate::models::{RegisterRequest, Registration};
use crate::utils::errors::{Result, TasgeelError};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListQuery {
    pub event_id: Option<String>,
    pub company_name: Option<String>,
}

/// GET /api/events/registrations?eventId=&companyName= — list an event's
/// registrations (admin, or the owning company)
pub async fn list(
    ctx: AuthContext,
    State(state): State<AppState>,
    Query(query): Query<ListQuery>,
) -> Result<Json<Vec<Registration>>> {
    let event_id = query
        .event_id
        .ok_or_else(|| TasgeelError::InvalidInput("Event ID is required".to_string()))?;
    let company_name = query
        .company_name
        .ok_or_else(|| TasgeelError::InvalidInput("Company name is required".to_string()))?;

    let registrations = state
        .services
        .registration_service
        .list(&ctx, &company_name, &event_id)
        .await?;

    Ok(Json(registrations))
}

/// POST /api/events/register — public registration submission, no session
/// required
pub async fn register(
    State(state): State<AppState>,
    Json(mut request): Json<RegisterRequest>,
) -> Result<Json<Value>> {
    // Company names arrive percent-encoded from the public form URL
    if let Ok(decoded) = urlencoding::decode(&request.company_name) {
        request.company_name = decoded.into_owned();
    }

    state.services.registration_service.register(request).await?;

    Ok(Json(json!({
        "success": true,
        "message": "Registration successful",
    })))
}
