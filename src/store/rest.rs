//! Remote record-store client over a PostgREST-style endpoint.
//!
//! The remote table is the same two-column contract as the local backend:
//! `key` text primary key, `value` JSON document, plus timestamp columns
//! this layer maintains from the document's own fields.

use std::time::Duration;

use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::config::StoreConfig;

use super::{KvStore, StoreError};

pub struct RestStore {
    client: reqwest::Client,
    base_url: String,
    table: String,
}

impl RestStore {
    pub fn new(config: &StoreConfig) -> Self {
        let mut headers = HeaderMap::new();
        let key = HeaderValue::from_str(&config.api_key)
            .expect("API key contains non-header characters");
        headers.insert("apikey", key);
        let bearer = HeaderValue::from_str(&format!("Bearer {}", config.api_key))
            .expect("API key contains non-header characters");
        headers.insert(AUTHORIZATION, bearer);

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .expect("Failed to create HTTP client");

        Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            table: config.table.clone(),
        }
    }

    fn table_url(&self) -> String {
        format!("{}/{}", self.base_url, self.table)
    }

    async fn rows_from(response: reqwest::Response) -> Result<Vec<ValueRow>, StoreError> {
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(StoreError::Backend {
                status: status.as_u16(),
                body,
            });
        }
        response.json().await.map_err(|e| StoreError::Backend {
            status: status.as_u16(),
            body: format!("unparseable response body: {e}"),
        })
    }

    fn map_transport(&self, e: reqwest::Error) -> StoreError {
        if e.is_connect() {
            StoreError::Unavailable(format!("cannot reach store at {}", self.base_url))
        } else if e.is_timeout() {
            StoreError::Unavailable("store request timed out".to_string())
        } else {
            StoreError::Unavailable(e.to_string())
        }
    }
}

#[derive(Deserialize)]
struct ValueRow {
    value: Value,
}

/// Upsert body; the timestamp columns mirror the document's own fields.
#[derive(Serialize)]
struct UpsertRow<'a> {
    key: &'a str,
    value: &'a Value,
    #[serde(skip_serializing_if = "Option::is_none")]
    created_at: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    updated_at: Option<&'a str>,
}

impl KvStore for RestStore {
    async fn get(&self, key: &str) -> Result<Option<Value>, StoreError> {
        let filter = format!("eq.{key}");
        let response = self
            .client
            .get(self.table_url())
            .query(&[("select", "value"), ("key", filter.as_str())])
            .send()
            .await
            .map_err(|e| self.map_transport(e))?;

        let rows = Self::rows_from(response).await?;
        Ok(rows.into_iter().next().map(|row| row.value))
    }

    async fn set(&self, key: &str, value: Value) -> Result<(), StoreError> {
        let row = UpsertRow {
            key,
            value: &value,
            created_at: value.get("created_at").and_then(Value::as_str),
            updated_at: value.get("updated_at").and_then(Value::as_str),
        };
        let response = self
            .client
            .post(self.table_url())
            .header("Prefer", "resolution=merge-duplicates")
            .json(&[row])
            .send()
            .await
            .map_err(|e| self.map_transport(e))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(StoreError::Backend {
                status: status.as_u16(),
                body,
            });
        }
        Ok(())
    }

    async fn delete(&self, key: &str) -> Result<(), StoreError> {
        let filter = format!("eq.{key}");
        let response = self
            .client
            .delete(self.table_url())
            .query(&[("key", filter.as_str())])
            .send()
            .await
            .map_err(|e| self.map_transport(e))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(StoreError::Backend {
                status: status.as_u16(),
                body,
            });
        }
        Ok(())
    }

    /// Prefix match via the PostgREST `like` operator (`*` is the wildcard).
    /// `_` inside the prefix is a single-char wildcard to LIKE; the entity
    /// prefixes are distinct enough that this cannot cross-match them.
    async fn scan_by_prefix(&self, prefix: &str) -> Result<Vec<Value>, StoreError> {
        let filter = format!("like.{prefix}*");
        let response = self
            .client
            .get(self.table_url())
            .query(&[("select", "value"), ("key", filter.as_str())])
            .send()
            .await
            .map_err(|e| self.map_transport(e))?;

        let rows = Self::rows_from(response).await?;
        Ok(rows.into_iter().map(|row| row.value).collect())
    }
}
