//! HTTP list store.
//!
//! Reads power records from a SharePoint-style list REST endpoint:
//!
//! ```text
//! GET {site}/_api/web/lists/getbytitle('{list}')/items?$select=Title,Icons,...&$top=N
//! Accept: application/json;odata=nometadata
//!
//! { "value": [ { "Title": "Flight", "Icons": "Airplane\nCloud", ... } ] }
//! ```

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use serde_json::Value;

use super::errors::StoreError;
use super::rows::records_from_rows;
use super::{ListFields, PowerStore, Result};
use crate::core::hero::models::PowerRecord;

/// Default request timeout.
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Upper bound on rows requested per fetch.
pub const MAX_ROWS: u32 = 5000;

const ACCEPT_NOMETADATA: &str = "application/json;odata=nometadata";

#[derive(Debug, Deserialize)]
struct ItemsResponse {
    #[serde(default)]
    value: Vec<Value>,
}

/// Power store backed by a remote list service.
pub struct HttpListStore {
    site_url: String,
    access_token: Option<String>,
    client: Client,
}

impl HttpListStore {
    pub fn new(site_url: impl Into<String>, timeout: Duration) -> Result<Self> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            site_url: site_url.into().trim_end_matches('/').to_string(),
            access_token: None,
            client,
        })
    }

    /// Send `Authorization: Bearer {token}` with every request.
    pub fn with_access_token(mut self, token: impl Into<String>) -> Self {
        self.access_token = Some(token.into());
        self
    }

    pub fn site_url(&self) -> &str {
        &self.site_url
    }

    /// Items endpoint for `list`. Quotes in the title are doubled per OData.
    pub fn items_url(&self, list: &str) -> String {
        let escaped = list.replace('\'', "''");
        format!(
            "{}/_api/web/lists/getbytitle('{}')/items",
            self.site_url,
            urlencoding::encode(&escaped)
        )
    }
}

#[async_trait]
impl PowerStore for HttpListStore {
    async fn fetch_all(&self, list: &str, fields: &ListFields) -> Result<Vec<PowerRecord>> {
        let url = self.items_url(list);
        let top = MAX_ROWS.to_string();

        let mut request = self
            .client
            .get(&url)
            .header("Accept", ACCEPT_NOMETADATA)
            .query(&[("$select", fields.select_clause().as_str()), ("$top", top.as_str())]);
        if let Some(token) = &self.access_token {
            request = request.bearer_auth(token);
        }

        let start = std::time::Instant::now();
        let resp = request.send().await?;
        let status = resp.status();
        let latency = start.elapsed().as_millis() as u64;

        if status == StatusCode::NOT_FOUND {
            return Err(StoreError::list_not_found(list));
        }
        if !status.is_success() {
            let text = resp.text().await.unwrap_or_default();
            log::warn!("List '{}' request failed with {} after {}ms", list, status, latency);
            return Err(StoreError::Status {
                status: status.as_u16(),
                message: text,
            });
        }

        let body: ItemsResponse = resp.json().await?;
        let records = records_from_rows(list, body.value, fields);
        log::info!(
            "Fetched {} records from list '{}' in {}ms",
            records.len(),
            list,
            latency
        );
        Ok(records)
    }
}
