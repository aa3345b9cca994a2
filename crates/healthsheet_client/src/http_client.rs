//! HTTP client implementations for the spreadsheet record store and the
//! nutrition estimation service.
//!
//! [`ReqwestSheetStore`] implements both [`RecordStore`](crate::RecordStore)
//! and [`ConfigStore`](crate::ConfigStore) against a spreadsheet-service
//! style API; [`ReqwestEstimatorClient`] implements
//! [`NutritionEstimator`](crate::NutritionEstimator).

use crate::schema;
use crate::{ConfigStore, ConfigValue, EstimateResponse, NutritionEstimator, RecordStore, Row, SheetError, Table};
use async_trait::async_trait;
use base64::{Engine as _, engine::general_purpose::STANDARD};
use secrecy::{ExposeSecret, SecretString};
use std::collections::HashMap;

const CONFIG_TAB: &str = "Config";
const CONFIG_HEADER: [&str; 2] = ["key", "value"];

/// Client for a spreadsheet-service API using reqwest.
#[derive(Clone, Debug)]
pub struct ReqwestSheetStore {
    base_url: String,
    spreadsheet_id: String,
    api_key: SecretString,
    client: reqwest::Client,
}

impl ReqwestSheetStore {
    /// Create a new store client.
    ///
    /// # Arguments
    /// * `base_url` - Base URL of the spreadsheet service
    /// * `spreadsheet_id` - Identifier of the health spreadsheet
    /// * `api_key` - The API key for authentication
    pub fn new(base_url: &str, spreadsheet_id: impl Into<String>, api_key: SecretString) -> Self {
        let client = reqwest::Client::builder()
            .build()
            .expect("reqwest client build should not fail");
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            spreadsheet_id: spreadsheet_id.into(),
            api_key,
            client,
        }
    }

    fn tab_url(&self, tab: &str, suffix: &str) -> String {
        format!(
            "{}/v1/spreadsheets/{}/tables/{}/{}",
            self.base_url, self.spreadsheet_id, tab, suffix
        )
    }

    /// Build an authenticated GET request.
    fn get_request(&self, url: &str) -> reqwest::RequestBuilder {
        self.client
            .get(url)
            .basic_auth("API_KEY", Some(self.api_key.expose_secret()))
    }

    /// Build an authenticated POST request.
    fn post_request(&self, url: &str) -> reqwest::RequestBuilder {
        self.client
            .post(url)
            .basic_auth("API_KEY", Some(self.api_key.expose_secret()))
    }

    /// Build an authenticated PUT request.
    fn put_request(&self, url: &str) -> reqwest::RequestBuilder {
        self.client
            .put(url)
            .basic_auth("API_KEY", Some(self.api_key.expose_secret()))
    }

    /// Execute a request and expect a JSON response.
    async fn execute_json<T: serde::de::DeserializeOwned>(
        &self,
        request: reqwest::RequestBuilder,
    ) -> Result<T, SheetError> {
        let resp = request.send().await?;
        handle_response(resp).await
    }

    /// Execute a request with no expected response body.
    async fn execute_empty(&self, request: reqwest::RequestBuilder) -> Result<(), SheetError> {
        let resp = request.send().await?;
        if !resp.status().is_success() {
            return Err(error_from_response(resp).await);
        }
        Ok(())
    }

    /// Write the canonical header row when the tab is still empty; a fresh
    /// sheet bootstraps itself on the first append.
    async fn ensure_header(&self, tab: &str, header: &[&str]) -> Result<(), SheetError> {
        let url = self.tab_url(tab, "values");
        let values: Vec<Vec<serde_json::Value>> = self.execute_json(self.get_request(&url)).await?;
        if values.is_empty() {
            tracing::debug!(tab, "empty tab, writing header row");
            let body = serde_json::json!({ "values": header });
            self.execute_empty(self.post_request(&self.tab_url(tab, "rows")).json(&body))
                .await?;
        }
        Ok(())
    }

    async fn read_records(&self, tab: &str) -> Result<Vec<Row>, SheetError> {
        let url = self.tab_url(tab, "records");
        match self.execute_json(self.get_request(&url)).await {
            Ok(rows) => Ok(rows),
            // A tab that was never written has no records to offer.
            Err(SheetError::NotFound(_)) => Ok(vec![]),
            Err(e) => Err(e),
        }
    }
}

/// Handle a response, converting status codes to appropriate errors.
async fn handle_response<T: serde::de::DeserializeOwned>(
    resp: reqwest::Response,
) -> Result<T, SheetError> {
    let status = resp.status();
    if !status.is_success() {
        return Err(error_from_response(resp).await);
    }
    Ok(resp.json::<T>().await?)
}

/// Extract error information from a failed response.
async fn error_from_response(resp: reqwest::Response) -> SheetError {
    let status = resp.status().as_u16();
    let body = resp.text().await.unwrap_or_default();
    let body_snippet: String = body.chars().take(256).collect();
    SheetError::from_status(status, body_snippet)
}

#[async_trait]
impl RecordStore for ReqwestSheetStore {
    async fn append(&self, table: Table, row: Row) -> Result<(), SheetError> {
        let header = schema::header(table);
        self.ensure_header(table.tab_name(), &header).await?;

        // Values are sent in canonical column order; absent fields become
        // blank cells rather than shifting the row.
        let values: Vec<serde_json::Value> = header
            .iter()
            .map(|col| row.get(*col).cloned().unwrap_or(serde_json::Value::Null))
            .collect();
        let body = serde_json::json!({ "values": values });
        self.execute_empty(
            self.post_request(&self.tab_url(table.tab_name(), "rows"))
                .json(&body),
        )
        .await
    }

    async fn read_all(&self, table: Table) -> Result<Vec<Row>, SheetError> {
        let raw = self.read_records(table.tab_name()).await?;
        Ok(raw
            .iter()
            .map(|row| schema::normalize_row(table, row))
            .collect())
    }
}

#[async_trait]
impl ConfigStore for ReqwestSheetStore {
    async fn get_all(&self) -> Result<HashMap<String, ConfigValue>, SheetError> {
        let rows = self.read_records(CONFIG_TAB).await?;
        let mut out = HashMap::new();
        for row in rows {
            let Some(key) = row.get("key").and_then(|v| v.as_str()) else {
                continue;
            };
            if let Some(value) = row.get("value") {
                out.insert(key.to_string(), ConfigValue::from_raw(value));
            }
        }
        Ok(out)
    }

    async fn set(&self, key: &str, value: &ConfigValue) -> Result<(), SheetError> {
        self.ensure_header(CONFIG_TAB, &CONFIG_HEADER).await?;
        let rows = self.read_records(CONFIG_TAB).await?;
        let existing = rows
            .iter()
            .position(|row| row.get("key").and_then(|v| v.as_str()) == Some(key));

        let body = serde_json::json!({ "values": [key, value.to_string()] });
        match existing {
            Some(index) => {
                let url = self.tab_url(CONFIG_TAB, &format!("rows/{index}"));
                self.execute_empty(self.put_request(&url).json(&body)).await
            }
            None => {
                self.execute_empty(
                    self.post_request(&self.tab_url(CONFIG_TAB, "rows")).json(&body),
                )
                .await
            }
        }
    }
}

/// Client for the nutrition estimation service using reqwest.
#[derive(Clone, Debug)]
pub struct ReqwestEstimatorClient {
    base_url: String,
    api_key: SecretString,
    client: reqwest::Client,
}

impl ReqwestEstimatorClient {
    pub fn new(base_url: &str, api_key: SecretString) -> Self {
        let client = reqwest::Client::builder()
            .build()
            .expect("reqwest client build should not fail");
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key,
            client,
        }
    }
}

#[async_trait]
impl NutritionEstimator for ReqwestEstimatorClient {
    async fn estimate(
        &self,
        image: Option<&[u8]>,
        text: Option<&str>,
    ) -> Result<EstimateResponse, SheetError> {
        if image.is_none() && text.is_none_or(|t| t.trim().is_empty()) {
            return Err(SheetError::InvalidInput(
                "estimate needs an image or a description".into(),
            ));
        }

        // The submission instant lets the model resolve relative phrases
        // like "yesterday's lunch" in the free text.
        let body = serde_json::json!({
            "text": text,
            "image_base64": image.map(|bytes| STANDARD.encode(bytes)),
            "submitted_at": chrono::Local::now().to_rfc3339(),
        });
        let url = format!("{}/v1/estimate", self.base_url);
        let resp = self
            .client
            .post(&url)
            .basic_auth("API_KEY", Some(self.api_key.expose_secret()))
            .json(&body)
            .send()
            .await?;
        handle_response(resp).await
    }
}
