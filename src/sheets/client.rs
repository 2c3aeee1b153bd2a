//! HTTP sheet store implementation
//!
//! This adapter talks to the external spreadsheet service's REST surface,
//! including HTTP client setup, response parsing and error mapping. The
//! provider offers no transactions and no row-level locking; callers own
//! every consistency guarantee.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, Response, StatusCode};
use serde::Deserialize;
use serde_json::json;
use tracing::debug;

use crate::config::SheetsConfig;
use crate::sheets::store::SheetStore;
use crate::utils::errors::{Result, StoreError, StoreResult, TasgeelError};

/// Row payload returned by the provider
#[derive(Debug, Deserialize)]
struct RowsResponse {
    rows: Vec<Vec<String>>,
}

/// Sheet store backed by the external spreadsheet service
#[derive(Debug, Clone)]
pub struct HttpSheetStore {
    client: Client,
    config: SheetsConfig,
}

impl HttpSheetStore {
    /// Create a new HttpSheetStore instance
    pub fn new(config: SheetsConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .user_agent("Tasgeel/0.1")
            .build()
            .map_err(TasgeelError::Http)?;

        Ok(Self { client, config })
    }

    fn sheet_url(&self, sheet: &str) -> String {
        format!(
            "{}/sheets/{}",
            self.config.api_url.trim_end_matches('/'),
            urlencoding::encode(sheet)
        )
    }

    fn rows_url(&self, sheet: &str, table: Option<&str>) -> String {
        match table {
            Some(table) => format!(
                "{}/tables/{}/rows",
                self.sheet_url(sheet),
                urlencoding::encode(table)
            ),
            None => format!("{}/rows", self.sheet_url(sheet)),
        }
    }

    fn map_send_error(error: reqwest::Error) -> StoreError {
        if error.is_timeout() {
            StoreError::Timeout
        } else if error.is_connect() {
            StoreError::ServiceUnavailable
        } else {
            StoreError::RequestFailed(error.to_string())
        }
    }

    /// Map provider status codes onto store errors
    async fn check_status(response: Response, target: &str) -> StoreResult<Response> {
        if response.status() == StatusCode::NOT_FOUND {
            return Err(StoreError::SheetMissing(target.to_string()));
        }

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().await.unwrap_or_default();
            return Err(StoreError::RequestFailed(format!(
                "HTTP {}: {}",
                status, error_text
            )));
        }

        Ok(response)
    }

    fn target(sheet: &str, table: Option<&str>) -> String {
        match table {
            Some(table) => format!("{}/{}", sheet, table),
            None => sheet.to_string(),
        }
    }
}

#[async_trait]
impl SheetStore for HttpSheetStore {
    async fn get_rows(&self, sheet: &str, table: Option<&str>) -> StoreResult<Vec<Vec<String>>> {
        let url = self.rows_url(sheet, table);
        debug!(sheet = sheet, table = ?table, "Fetching rows");

        let response = self
            .client
            .get(&url)
            .bearer_auth(&self.config.api_key)
            .send()
            .await
            .map_err(Self::map_send_error)?;

        let response = Self::check_status(response, &Self::target(sheet, table)).await?;
        let payload: RowsResponse = response
            .json()
            .await
            .map_err(|e| StoreError::InvalidResponse(e.to_string()))?;

        Ok(payload.rows)
    }

    async fn append_rows(
        &self,
        sheet: &str,
        table: Option<&str>,
        rows: Vec<Vec<String>>,
    ) -> StoreResult<()> {
        let url = self.rows_url(sheet, table);
        debug!(sheet = sheet, table = ?table, count = rows.len(), "Appending rows");

        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.config.api_key)
            .json(&json!({ "rows": rows }))
            .send()
            .await
            .map_err(Self::map_send_error)?;

        Self::check_status(response, &Self::target(sheet, table)).await?;
        Ok(())
    }

    async fn update_row(
        &self,
        sheet: &str,
        table: Option<&str>,
        row_index: usize,
        new_row: Vec<String>,
    ) -> StoreResult<()> {
        let url = format!("{}/{}", self.rows_url(sheet, table), row_index);
        debug!(sheet = sheet, table = ?table, row = row_index, "Updating row");

        let response = self
            .client
            .put(&url)
            .bearer_auth(&self.config.api_key)
            .json(&json!({ "row": new_row }))
            .send()
            .await
            .map_err(Self::map_send_error)?;

        Self::check_status(response, &Self::target(sheet, table)).await?;
        Ok(())
    }

    async fn delete_row(&self, sheet: &str, row_index: usize) -> StoreResult<()> {
        let url = format!("{}/{}", self.rows_url(sheet, None), row_index);
        debug!(sheet = sheet, row = row_index, "Deleting row");

        let response = self
            .client
            .delete(&url)
            .bearer_auth(&self.config.api_key)
            .send()
            .await
            .map_err(Self::map_send_error)?;

        Self::check_status(response, sheet).await?;
        Ok(())
    }

    async fn create_sheet(&self, sheet: &str) -> StoreResult<()> {
        let url = format!("{}/sheets", self.config.api_url.trim_end_matches('/'));
        debug!(sheet = sheet, "Creating sheet");

        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.config.api_key)
            .json(&json!({ "title": sheet }))
            .send()
            .await
            .map_err(Self::map_send_error)?;

        Self::check_status(response, sheet).await?;
        Ok(())
    }

    async fn create_table(&self, sheet: &str, table: &str, headers: &[String]) -> StoreResult<()> {
        let url = format!("{}/tables", self.sheet_url(sheet));
        debug!(sheet = sheet, table = table, "Creating table");

        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.config.api_key)
            .json(&json!({ "name": table, "headers": headers }))
            .send()
            .await
            .map_err(Self::map_send_error)?;

        Self::check_status(response, sheet).await?;
        Ok(())
    }

    async fn delete_table(&self, sheet: &str, table: &str) -> StoreResult<()> {
        let url = format!("{}/tables/{}", self.sheet_url(sheet), urlencoding::encode(table));
        debug!(sheet = sheet, table = table, "Deleting table");

        let response = self
            .client
            .delete(&url)
            .bearer_auth(&self.config.api_key)
            .send()
            .await
            .map_err(Self::map_send_error)?;

        Self::check_status(response, &Self::target(sheet, Some(table))).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_config(api_url: &str) -> SheetsConfig {
        SheetsConfig {
            api_url: api_url.to_string(),
            api_key: "key".to_string(),
            companies_sheet: "companies".to_string(),
            timeout_seconds: 5,
        }
    }

    #[test]
    fn test_urls_are_percent_encoded() {
        let store = HttpSheetStore::new(test_config("http://localhost:9090/")).unwrap();

        assert_eq!(
            store.rows_url("My Company", None),
            "http://localhost:9090/sheets/My%20Company/rows"
        );
        assert_eq!(
            store.rows_url("Acme", Some("Job Fair")),
            "http://localhost:9090/sheets/Acme/tables/Job%20Fair/rows"
        );
    }
}
