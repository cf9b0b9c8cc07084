//! Link store backends.
//!
//! `LinkStore` is an enum over concrete backends, mirroring how the rest of
//! the crate avoids `dyn` + `async-trait` for async capabilities. `build`
//! is the factory called at startup.

use std::sync::Arc;
use std::time::Duration;

use reqwest::Client;
use serde::Deserialize;
use thiserror::Error;
use tracing::{debug, error};

use crate::config::Config;

use super::record::LinkRecord;

/// Columns requested from the table, in display order.
const SELECT_COLUMNS: &str = "url,notion_timestamp,title";
const ORDER: &str = "notion_timestamp.desc";

// ── Error ─────────────────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("link store not configured: {0}")]
    NotConfigured(String),
    #[error("link store request failed: {0}")]
    Request(String),
    #[error("link store returned HTTP {status}: {message}")]
    Status { status: u16, message: String },
    #[error("link store response could not be decoded: {0}")]
    Decode(String),
}

// ── Store enum ────────────────────────────────────────────────────────────────

#[derive(Debug, Clone)]
pub enum LinkStore {
    Supabase(SupabaseStore),
    Fixed(FixedStore),
    /// No usable backend; every fetch fails with the stored reason.
    Disabled(String),
}

impl LinkStore {
    /// Fetch every record, newest first as ordered by the backend.
    pub async fn fetch_all(&self) -> Result<Vec<LinkRecord>, StoreError> {
        match self {
            LinkStore::Supabase(s) => s.fetch_all().await,
            LinkStore::Fixed(s) => s.fetch_all().await,
            LinkStore::Disabled(reason) => Err(StoreError::NotConfigured(reason.clone())),
        }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            LinkStore::Supabase(_) => "supabase",
            LinkStore::Fixed(_) => "fixed",
            LinkStore::Disabled(_) => "disabled",
        }
    }
}

/// Construct the configured store.
///
/// Missing credentials are not a startup error: the reading page simply
/// renders empty, the same as when the remote table is unreachable.
pub fn build(config: &Config) -> LinkStore {
    let reading = &config.reading;
    if !reading.enabled {
        return LinkStore::Disabled("reading list disabled in config".into());
    }
    let (Some(url), Some(key)) = (&reading.url, &reading.api_key) else {
        return LinkStore::Disabled("SUPABASE_URL / SUPABASE_KEY not set".into());
    };
    let table = reading.table.clone();
    match SupabaseStore::new(url.clone(), table, key.clone(), reading.timeout_seconds) {
        Ok(store) => LinkStore::Supabase(store),
        Err(e) => LinkStore::Disabled(e.to_string()),
    }
}

// ── Supabase (PostgREST) ──────────────────────────────────────────────────────

/// Reads the table through the PostgREST endpoint of a hosted project.
///
/// Cheap to clone: `reqwest::Client` is an `Arc` internally.
#[derive(Debug, Clone)]
pub struct SupabaseStore {
    client: Client,
    base_url: String,
    table: String,
    api_key: String,
}

impl SupabaseStore {
    pub fn new(
        base_url: String,
        table: String,
        api_key: String,
        timeout_seconds: u64,
    ) -> Result<Self, StoreError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_seconds))
            .build()
            .map_err(|e| StoreError::Request(format!("failed to build HTTP client: {e}")))?;
        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            table,
            api_key,
        })
    }

    pub fn endpoint(&self) -> String {
        format!("{}/rest/v1/{}", self.base_url, self.table)
    }

    pub async fn fetch_all(&self) -> Result<Vec<LinkRecord>, StoreError> {
        let endpoint = self.endpoint();
        debug!(%endpoint, "fetching reading list");

        let response = self
            .client
            .get(&endpoint)
            .query(&[("select", SELECT_COLUMNS), ("order", ORDER)])
            .header("apikey", &self.api_key)
            .bearer_auth(&self.api_key)
            .header(reqwest::header::ACCEPT, "application/json")
            .send()
            .await
            .map_err(|e| {
                error!(%endpoint, error = %e, "reading list request failed (transport)");
                StoreError::Request(e.to_string())
            })?;

        let response = check_status(response).await?;

        let records = response
            .json::<Vec<LinkRecord>>()
            .await
            .map_err(|e| StoreError::Decode(e.to_string()))?;

        debug!(count = records.len(), "reading list fetched");
        Ok(records)
    }
}

// Error envelope returned by PostgREST.
#[derive(Debug, Deserialize)]
struct ErrorEnvelope {
    message: String,
    #[serde(default)]
    code: Option<String>,
}

/// Consume the response and return it if successful, or a structured error.
async fn check_status(response: reqwest::Response) -> Result<reqwest::Response, StoreError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body = response
        .text()
        .await
        .unwrap_or_else(|_| "<failed to read error body>".to_string());

    let message = match serde_json::from_str::<ErrorEnvelope>(&body) {
        Ok(env) => match env.code {
            Some(code) => format!("{} [code={code}]", env.message),
            None => env.message,
        },
        Err(_) => body,
    };

    Err(StoreError::Status { status: status.as_u16(), message })
}

// ── Fixed (in-memory) ─────────────────────────────────────────────────────────

/// A canned set of records, or a canned failure.
///
/// Backs offline previews and lets tests observe the loader without a network.
#[derive(Debug, Clone, Default)]
pub struct FixedStore {
    records: Arc<Vec<LinkRecord>>,
    failure: Option<String>,
    delay: Option<Duration>,
}

impl FixedStore {
    pub fn new(records: Vec<LinkRecord>) -> Self {
        Self { records: Arc::new(records), ..Self::default() }
    }

    pub fn failing(reason: impl Into<String>) -> Self {
        Self { failure: Some(reason.into()), ..Self::default() }
    }

    /// Hold each fetch for `delay` before answering.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    pub async fn fetch_all(&self) -> Result<Vec<LinkRecord>, StoreError> {
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        match &self.failure {
            Some(reason) => Err(StoreError::Request(reason.clone())),
            None => Ok(self.records.as_ref().clone()),
        }
    }
}
