//! Event model

use serde::{Deserialize, Serialize};

/// An event recovered from a table region inside its company's sheet
///
/// The event name doubles as its identifier; names are unique per company.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Event {
    pub id: String,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub company: Option<String>,
    pub registrations: usize,
    pub image: Option<String>,
    pub enabled: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub registration_url: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateEventRequest {
    pub company_name: String,
    pub event_name: String,
    /// Base64 image payload forwarded to the content host
    pub image: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateEventRequest {
    pub company_name: String,
    pub event_name: String,
    pub image: Option<String>,
    pub enabled: Option<bool>,
}
