//! Company endpoints

use axum::extract::{Query, State};
use axum::Json;
use serde::Deserialize;
use serde_json::{json, Value};

use crate::handlers::AppState;
use crate::middleware::auth::AuthContext;
use crate::models::{CreateCompanyRequest, UpdateCompanyRequest};
use crate::utils::errors::{Result, TasgeelError};
use crate::utils::logging::log_admin_action;

#[derive(Debug, Deserialize)]
pub struct CompanyQuery {
    pub id: Option<String>,
    pub name: Option<String>,
}

/// GET /api/companies — single lookup by `id`/`name` for any authenticated
/// actor, full listing for admins only
pub async fn list_or_get(
    ctx: AuthContext,
    State(state): State<AppState>,
    Query(query): Query<CompanyQuery>,
) -> Result<Json<Value>> {
    if let Some(id) = query.id {
        let company = state.services.company_service.get_by_id(&id).await?;
        return Ok(Json(json!({ "company": company })));
    }

    if let Some(name) = query.name {
        let company = state.services.company_service.get_by_name(&name).await?;
        return Ok(Json(json!({ "company": company })));
    }

    ctx.require_admin()?;
    let companies = state.services.company_service.list().await?;
    Ok(Json(json!({ "companies": companies })))
}

/// POST /api/companies — create a company account (admin only)
pub async fn create(
    ctx: AuthContext,
    State(state): State<AppState>,
    Json(request): Json<CreateCompanyRequest>,
) -> Result<Json<Value>> {
    ctx.require_admin()?;
    log_admin_action(&ctx.name, "create_company", Some(&request.username));

    let company = state.services.company_service.create(request).await?;
    Ok(Json(json!({ "success": true, "company": company })))
}

/// PUT/PATCH /api/companies?id= — partial update, including the enabled flag
/// (admin only)
pub async fn update(
    ctx: AuthContext,
    State(state): State<AppState>,
    Query(query): Query<CompanyQuery>,
    Json(request): Json<UpdateCompanyRequest>,
) -> Result<Json<Value>> {
    ctx.require_admin()?;
    let id = query
        .id
        .ok_or_else(|| TasgeelError::InvalidInput("Company ID is required".to_string()))?;
    log_admin_action(&ctx.name, "update_company", Some(&id));

    let company = state.services.company_service.update(&id, request).await?;
    Ok(Json(json!({ "success": true, "company": company })))
}

/// DELETE /api/companies?id= — remove the registry row (admin only); the
/// company's event data is retained
pub async fn delete(
    ctx: AuthContext,
    State(state): State<AppState>,
    Query(query): Query<CompanyQuery>,
) -> Result<Json<Value>> {
    ctx.require_admin()?;
    let id = query
        .id
        .ok_or_else(|| TasgeelError::InvalidInput("Company ID is required".to_string()))?;
    log_admin_action(&ctx.name, "delete_company", Some(&id));

    let company = state.services.company_service.delete(&id).await?;
    Ok(Json(json!({
        "success": true,
        "message": format!("Company {} deleted successfully", company.name),
    })))
}
