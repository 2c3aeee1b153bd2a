//! Session token middleware
//!
//! Sessions are issued by the external auth provider; this module only
//! decodes the token and exposes the actor identity to handlers and
//! services. Credentials are never re-validated here.

use axum::extract::{FromRef, FromRequestParts};
use axum::http::header::AUTHORIZATION;
use axum::http::request::Parts;
use jsonwebtoken::{decode, DecodingKey, Validation};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::handlers::AppState;
use crate::utils::errors::{Result, TasgeelError};

/// Kind of actor a session token represents
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ActorType {
    Admin,
    Company,
}

/// Claims carried by the externally-issued session token
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionClaims {
    pub sub: String,
    pub name: String,
    #[serde(rename = "type")]
    pub actor_type: ActorType,
    pub exp: usize,
}

/// Authenticated actor identity attached to a request
#[derive(Debug, Clone)]
pub struct AuthContext {
    pub id: String,
    pub name: String,
    pub actor_type: ActorType,
}

impl AuthContext {
    /// Check if the actor is an admin
    pub fn is_admin(&self) -> bool {
        self.actor_type == ActorType::Admin
    }

    /// Company actors may only touch their own company; admins may touch any
    pub fn can_manage(&self, company_name: &str) -> bool {
        match self.actor_type {
            ActorType::Admin => true,
            ActorType::Company => self.name == company_name,
        }
    }

    /// Reject non-admin actors
    pub fn require_admin(&self) -> Result<()> {
        if self.is_admin() {
            Ok(())
        } else {
            Err(TasgeelError::Forbidden(
                "Admin privileges required".to_string(),
            ))
        }
    }
}

/// Decode and verify a session token
pub fn decode_session(token: &str, secret: &str) -> Result<AuthContext> {
    let data = decode::<SessionClaims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &Validation::default(),
    )?;

    debug!(actor = %data.claims.name, actor_type = ?data.claims.actor_type, "Session decoded");

    Ok(AuthContext {
        id: data.claims.sub,
        name: data.claims.name,
        actor_type: data.claims.actor_type,
    })
}

impl<S> FromRequestParts<S> for AuthContext
where
    AppState: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = TasgeelError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &S,
    ) -> std::result::Result<Self, Self::Rejection> {
        let state = AppState::from_ref(state);

        let header = parts
            .headers
            .get(AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .ok_or(TasgeelError::Unauthorized)?;

        let token = header
            .strip_prefix("Bearer ")
            .ok_or(TasgeelError::Unauthorized)?;

        decode_session(token, &state.settings.auth.session_secret)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use jsonwebtoken::{encode, EncodingKey, Header};

    fn mint(actor_type: ActorType, name: &str, secret: &str, exp_offset: i64) -> String {
        let claims = SessionClaims {
            sub: "actor_1".to_string(),
            name: name.to_string(),
            actor_type,
            exp: (chrono::Utc::now().timestamp() + exp_offset) as usize,
        };
        encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(secret.as_bytes()),
        )
        .unwrap()
    }

    #[test]
    fn test_decode_round_trip() {
        let token = mint(ActorType::Company, "Acme", "secret", 3600);
        let ctx = decode_session(&token, "secret").unwrap();

        assert_eq!(ctx.name, "Acme");
        assert_eq!(ctx.actor_type, ActorType::Company);
        assert!(!ctx.is_admin());
    }

    #[test]
    fn test_wrong_secret_rejected() {
        let token = mint(ActorType::Admin, "Admin", "secret", 3600);
        assert!(decode_session(&token, "other").is_err());
    }

    #[test]
    fn test_expired_token_rejected() {
        let token = mint(ActorType::Admin, "Admin", "secret", -3600);
        assert!(decode_session(&token, "secret").is_err());
    }

    #[test]
    fn test_company_can_only_manage_itself() {
        let ctx = AuthContext {
            id: "c1".to_string(),
            name: "Acme".to_string(),
            actor_type: ActorType::Company,
        };

        assert!(ctx.can_manage("Acme"));
        assert!(!ctx.can_manage("Other"));
        assert!(ctx.require_admin().is_err());
    }

    #[test]
    fn test_admin_can_manage_any_company() {
        let ctx = AuthContext {
            id: "admin".to_string(),
            name: "Admin".to_string(),
            actor_type: ActorType::Admin,
        };

        assert!(ctx.can_manage("Acme"));
        assert!(ctx.can_manage("Other"));
        assert!(ctx.require_admin().is_ok());
    }
}
