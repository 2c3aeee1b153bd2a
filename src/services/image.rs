//! Image upload service
//!
//! Image hosting is delegated to an external content host: this service
//! forwards base64 payloads and stores nothing but the returned URL.

use std::time::Duration;

use chrono::Utc;
use reqwest::Client;
use serde::Deserialize;
use serde_json::json;
use tracing::{debug, info};

use crate::config::ImagesConfig;
use crate::utils::errors::{Result, TasgeelError};
use crate::utils::logging::log_upstream_error;
use crate::utils::validation::sanitize_filename;

/// Upload response returned by the content host
#[derive(Debug, Deserialize)]
struct UploadResponse {
    content: UploadedContent,
}

#[derive(Debug, Deserialize)]
struct UploadedContent {
    download_url: String,
}

/// Service for uploading images to the external content host
#[derive(Debug, Clone)]
pub struct ImageService {
    client: Client,
    config: ImagesConfig,
}

impl ImageService {
    /// Create a new ImageService instance
    pub fn new(config: ImagesConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .user_agent("Tasgeel/0.1")
            .build()
            .map_err(TasgeelError::Http)?;

        Ok(Self { client, config })
    }

    /// Check if an upload token is configured
    pub fn is_configured(&self) -> bool {
        !self.config.token.is_empty()
    }

    /// Upload a base64 image payload and return its public URL
    pub async fn upload(&self, file_name: &str, content: &str, folder: &str) -> Result<String> {
        let file_name = sanitize_filename(file_name);
        let url = format!(
            "{}/{}/{}",
            self.config.api_url.trim_end_matches('/'),
            folder,
            file_name
        );

        debug!(file = %file_name, folder = folder, "Uploading image");

        let response = self
            .client
            .put(&url)
            .bearer_auth(&self.config.token)
            .json(&json!({
                "message": format!("Upload {}", file_name),
                "content": content,
            }))
            .send()
            .await
            .map_err(|e| {
                log_upstream_error("image-host", &e.to_string(), Some(&file_name));
                TasgeelError::ImageHost(e.to_string())
            })?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().await.unwrap_or_default();
            log_upstream_error("image-host", &error_text, Some(&file_name));
            return Err(TasgeelError::ImageHost(format!(
                "HTTP {}: {}",
                status, error_text
            )));
        }

        let payload: UploadResponse = response
            .json()
            .await
            .map_err(|e| TasgeelError::ImageHost(e.to_string()))?;

        info!(file = %file_name, url = %payload.content.download_url, "Image uploaded");
        Ok(payload.content.download_url)
    }

    /// File name for a company image
    pub fn company_file_name(company_id: &str) -> String {
        format!("company_{}_{}.jpg", company_id, Utc::now().timestamp_millis())
    }

    /// File name for an event banner
    pub fn event_file_name(company_name: &str, event_name: &str) -> String {
        format!(
            "event_{}_{}_{}.jpg",
            company_name,
            event_name,
            Utc::now().timestamp_millis()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_file_names_are_distinct_per_entity() {
        let company = ImageService::company_file_name("company_1");
        let event = ImageService::event_file_name("Acme", "Job Fair");

        assert!(company.starts_with("company_company_1_"));
        assert!(event.starts_with("event_Acme_Job Fair_"));
        assert!(company.ends_with(".jpg"));
    }
}
