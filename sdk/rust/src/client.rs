use std::fmt;

use reqwest::header::CONTENT_TYPE;
use reqwest::{Client, Response, StatusCode};
use serde::{Deserialize, Serialize};

/// One platform record for `load_records`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Record {
    pub name: String,
    pub locations: Vec<String>,
}

impl Record {
    pub fn new(name: &str, locations: &[&str]) -> Self {
        Self {
            name: name.to_string(),
            locations: locations.iter().map(|l| l.to_string()).collect(),
        }
    }
}

/// Why the service dropped a record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SkipReason {
    BlankName,
    NoValidLocations,
    MalformedLine,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SkippedRecord {
    /// 1-based feed line; absent for JSON uploads.
    pub line: Option<usize>,
    /// Absent for malformed lines and blank names.
    pub name: Option<String>,
    pub reason: SkipReason,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoadSummary {
    pub loaded: usize,
    pub skipped: usize,
    pub skipped_records: Vec<SkippedRecord>,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct IndexStats {
    pub generation: u64,
    pub platforms: usize,
    pub locations: usize,
    pub nodes: usize,
    pub cached_paths: usize,
}

#[derive(Debug)]
pub enum ClientError {
    /// Transport or decoding failure.
    Http(reqwest::Error),
    /// The service answered with a non-success status.
    Status { status: StatusCode, body: String },
}

impl fmt::Display for ClientError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ClientError::Http(e) => write!(f, "request failed: {}", e),
            ClientError::Status { status, body } => {
                write!(f, "service returned error status {}: {}", status, body)
            }
        }
    }
}

impl std::error::Error for ClientError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ClientError::Http(e) => Some(e),
            ClientError::Status { .. } => None,
        }
    }
}

impl From<reqwest::Error> for ClientError {
    fn from(e: reqwest::Error) -> Self {
        ClientError::Http(e)
    }
}

pub struct AdMatchClient {
    client: Client,
    base_url: String,
    api_key: Option<String>,
}

impl AdMatchClient {
    pub fn new(base_url: &str) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key: None,
        }
    }

    /// Key sent as a Bearer token on admin calls.
    pub fn with_api_key(mut self, key: &str) -> Self {
        self.api_key = Some(key.to_string());
        self
    }

    /// Upload a feed in the `name:/loc1,/loc2` line format.
    pub async fn load_feed(&self, feed: &str) -> Result<LoadSummary, ClientError> {
        let resp = self
            .client
            .post(format!("{}/api/advertising/load", self.base_url))
            .header(CONTENT_TYPE, "text/plain; charset=utf-8")
            .body(feed.to_string())
            .send()
            .await?;
        Self::json(resp).await
    }

    /// Upload structured records as JSON.
    pub async fn load_records(&self, records: &[Record]) -> Result<LoadSummary, ClientError> {
        let resp = self
            .client
            .post(format!("{}/api/advertising/load", self.base_url))
            .json(records)
            .send()
            .await?;
        Self::json(resp).await
    }

    /// Platforms active at `location`, sorted.
    pub async fn search(&self, location: &str) -> Result<Vec<String>, ClientError> {
        let resp = self
            .client
            .get(format!("{}/api/advertising/search", self.base_url))
            .query(&[("location", location)])
            .send()
            .await?;
        Self::json(resp).await
    }

    pub async fn index_stats(&self) -> Result<IndexStats, ClientError> {
        let resp = self
            .admin(self.client.get(format!("{}/admin/index", self.base_url)))
            .send()
            .await?;
        Self::json(resp).await
    }

    /// Ask the service to reload its configured feed file.
    pub async fn reload(&self) -> Result<LoadSummary, ClientError> {
        let resp = self
            .admin(self.client.post(format!("{}/admin/reload", self.base_url)))
            .send()
            .await?;
        Self::json(resp).await
    }

    fn admin(&self, req: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        match &self.api_key {
            Some(key) => req.bearer_auth(key),
            None => req,
        }
    }

    async fn json<T: serde::de::DeserializeOwned>(resp: Response) -> Result<T, ClientError> {
        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(ClientError::Status { status, body });
        }
        Ok(resp.json::<T>().await?)
    }
}
