//! Company model

use serde::{Deserialize, Serialize};

/// A company account as stored in the reserved registry sheet
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Company {
    pub id: String,
    pub name: String,
    pub username: String,
    /// Argon2 hash; never serialized into API responses
    #[serde(skip_serializing, default)]
    pub password_hash: String,
    pub image: Option<String>,
    pub enabled: bool,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CreateCompanyRequest {
    pub name: String,
    pub username: String,
    pub password: String,
    /// Base64 image payload forwarded to the content host
    pub image: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateCompanyRequest {
    pub name: Option<String>,
    pub username: Option<String>,
    pub password: Option<String>,
    pub image: Option<String>,
    pub enabled: Option<bool>,
}
