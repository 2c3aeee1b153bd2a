//! Registration model

use serde::{Deserialize, Serialize};

/// A single registration row inside an event's table region
///
/// Gender and status are kept as raw strings so that legacy rows decode
/// without failing; incoming submissions are validated against the enums
/// below before anything is written.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Registration {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub name: String,
    pub phone: String,
    pub email: String,
    pub gender: String,
    pub college: String,
    pub status: String,
    pub national_id: String,
    pub registered_at: String,
}

/// Public registration submission
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    pub company_name: String,
    pub event_name: String,
    pub name: String,
    pub phone: String,
    pub email: String,
    pub gender: String,
    pub college: String,
    pub status: String,
    pub national_id: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Gender {
    Male,
    Female,
}

impl Gender {
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "male" => Some(Gender::Male),
            "female" => Some(Gender::Female),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AcademicStatus {
    Student,
    Graduate,
}

impl AcademicStatus {
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "student" => Some(AcademicStatus::Student),
            "graduate" => Some(AcademicStatus::Graduate),
            _ => None,
        }
    }
}
