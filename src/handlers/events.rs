//! Event endpoints

use axum::extract::{Query, State};
use axum::Json;
use serde::Deserialize;
use serde_json::{json, Value};

use crate::handlers::AppState;
use crate::middleware::auth::AuthContext;
use crate::models::{CreateEventRequest, UpdateEventRequest};
use crate::utils::errors::{Result, TasgeelError};

#[derive(Debug, Deserialize)]
pub struct ListQuery {
    pub company: Option<String>,
}

/// GET /api/events?company= — list one company's events, or every company's
/// when no filter is given; registration counts are computed by scanning
pub async fn list(
    State(state): State<AppState>,
    Query(query): Query<ListQuery>,
) -> Result<Json<Value>> {
    let events = state
        .services
        .event_service
        .list(query.company.as_deref())
        .await?;
    Ok(Json(json!({ "events": events })))
}

/// POST /api/events — create an event table for a company
pub async fn create(
    ctx: AuthContext,
    State(state): State<AppState>,
    Json(request): Json<CreateEventRequest>,
) -> Result<Json<Value>> {
    let event = state.services.event_service.create(&ctx, request).await?;
    Ok(Json(json!({ "success": true, "event": event })))
}

/// PATCH /api/events — update an event's image and/or enabled flag
pub async fn update(
    ctx: AuthContext,
    State(state): State<AppState>,
    Json(request): Json<UpdateEventRequest>,
) -> Result<Json<Value>> {
    let event = state.services.event_service.update(&ctx, request).await?;
    Ok(Json(json!({ "success": true, "event": event })))
}

#[derive(Debug, Deserialize)]
pub struct DeleteQuery {
    pub company: Option<String>,
    pub event: Option<String>,
}

/// DELETE /api/events?company=&event= — remove an event's table region
pub async fn delete(
    ctx: AuthContext,
    State(state): State<AppState>,
    Query(query): Query<DeleteQuery>,
) -> Result<Json<Value>> {
    let (company, event) = match (query.company, query.event) {
        (Some(company), Some(event)) => (company, event),
        _ => {
            return Err(TasgeelError::InvalidInput(
                "Company name and event name are required".to_string(),
            ))
        }
    };

    state
        .services
        .event_service
        .delete(&ctx, &company, &event)
        .await?;

    Ok(Json(json!({
        "success": true,
        "message": format!("Event {} deleted successfully", event),
    })))
}
