//! Shared helpers for integration tests
//!
//! Builds the full router over an in-memory sheet store and mints session
//! tokens the way the external auth provider would.

use std::sync::Arc;

use axum::body::Body;
use axum::http::{header, Request};
use jsonwebtoken::{encode, EncodingKey, Header};
use serde_json::Value;

use Tasgeel::config::Settings;
use Tasgeel::handlers::{router, AppState};
use Tasgeel::middleware::auth::{ActorType, SessionClaims};
use Tasgeel::services::ServiceFactory;
use Tasgeel::sheets::MemorySheetStore;

pub const TEST_SECRET: &str = "test-session-secret";

pub fn test_settings() -> Settings {
    let mut settings = Settings::default();
    settings.auth.session_secret = TEST_SECRET.to_string();
    settings
}

/// Build the application router backed by the given in-memory store
pub fn build_app(store: &MemorySheetStore) -> axum::Router {
    let settings = test_settings();
    let services =
        ServiceFactory::new(Arc::new(store.clone()), settings.clone()).expect("service factory");

    router(AppState {
        services: Arc::new(services),
        settings,
    })
}

pub fn mint_token(actor_type: ActorType, name: &str) -> String {
    let claims = SessionClaims {
        sub: "actor_1".to_string(),
        name: name.to_string(),
        actor_type,
        exp: (chrono::Utc::now().timestamp() + 3600) as usize,
    };

    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(TEST_SECRET.as_bytes()),
    )
    .expect("token encoding")
}

pub fn admin_token() -> String {
    mint_token(ActorType::Admin, "Admin")
}

pub fn company_token(name: &str) -> String {
    mint_token(ActorType::Company, name)
}

/// Build a JSON request, optionally authenticated
pub fn json_request(method: &str, uri: &str, token: Option<&str>, body: Value) -> Request<Body> {
    let mut builder = Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json");

    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
    }

    builder
        .body(Body::from(body.to_string()))
        .expect("request build")
}

/// Build a bodyless request, optionally authenticated
pub fn get_request(method: &str, uri: &str, token: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder().method(method).uri(uri);

    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
    }

    builder.body(Body::empty()).expect("request build")
}

/// Read a response body as JSON
pub async fn response_json(response: axum::response::Response) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("body bytes");
    serde_json::from_slice(&bytes).expect("json body")
}
