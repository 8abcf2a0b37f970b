//! HTTP client for the remote record store.
//!
//! One method per endpoint of the `record` resource. Methods report every
//! failure as a [`StoreError`]; deciding what a failure means for local state
//! is left to the sync units.

use reqwest::{Response, StatusCode};
use serde::de::DeserializeOwned;

use super::error::StoreError;
use crate::config::Config;
use crate::models::{Record, RecordId};

const RECORD_PATH: &str = "/record";

/// Client for the remote record store.
///
/// Cheap to clone; clones share one connection pool.
#[derive(Debug, Clone)]
pub struct RecordStore {
    http: reqwest::Client,
    base_url: String,
}

impl RecordStore {
    /// Creates a client from an explicit configuration value.
    pub fn new(config: &Config) -> Result<Self, StoreError> {
        let http = reqwest::Client::builder()
            .timeout(config.timeout())
            .build()?;

        Ok(Self {
            http,
            base_url: config.base_url.value.trim_end_matches('/').to_string(),
        })
    }

    /// Returns the base URL, without trailing slash.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// `GET /record`
    pub async fn list(&self) -> Result<Vec<Record>, StoreError> {
        let response = self.http.get(self.collection_url()).send().await?;
        let response = check_status(response)?;
        decode(&response.text().await?)
    }

    /// `GET /record/{id}`
    ///
    /// An empty or `null` body is [`StoreError::NotFound`].
    pub async fn get(&self, id: &RecordId) -> Result<Record, StoreError> {
        let response = self.http.get(self.record_url(id)).send().await?;
        let response = check_status(response)?;
        let body = response.text().await?;

        let record: Option<Record> = if body.trim().is_empty() {
            None
        } else {
            decode(&body)?
        };
        record.ok_or(StoreError::NotFound)
    }

    /// `POST /record` with the full draft. The store assigns the id.
    pub async fn create(&self, record: &Record) -> Result<(), StoreError> {
        let response = self
            .http
            .post(self.collection_url())
            .json(record)
            .send()
            .await?;
        check_status(response)?;
        Ok(())
    }

    /// `PATCH /record/{id}` with the full draft.
    pub async fn update(&self, id: &RecordId, record: &Record) -> Result<(), StoreError> {
        let response = self
            .http
            .patch(self.record_url(id))
            .json(record)
            .send()
            .await?;
        check_status(response)?;
        Ok(())
    }

    /// `DELETE /record/{id}`
    pub async fn delete(&self, id: &RecordId) -> Result<(), StoreError> {
        let response = self.http.delete(self.record_url(id)).send().await?;
        check_status(response)?;
        Ok(())
    }

    fn collection_url(&self) -> String {
        format!("{}{}", self.base_url, RECORD_PATH)
    }

    fn record_url(&self, id: &RecordId) -> String {
        format!(
            "{}{}/{}",
            self.base_url,
            RECORD_PATH,
            urlencoding::encode(id.as_str())
        )
    }
}

fn check_status(response: Response) -> Result<Response, StoreError> {
    let status: StatusCode = response.status();
    if status.is_success() {
        Ok(response)
    } else {
        Err(StoreError::Status(status))
    }
}

fn decode<T: DeserializeOwned>(body: &str) -> Result<T, StoreError> {
    Ok(serde_json::from_str(body)?)
}
