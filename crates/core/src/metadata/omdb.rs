//! OMDb (Open Movie Database) API client.
//!
//! OMDb serves both search and detail lookups from a single endpoint,
//! selected by query parameters (`s=` for search, `i=` for a single title).
//! An API key is required on every call.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, Response};
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::types::{DetailRecord, SearchResponse};
use super::{MetadataError, MetadataSource};

const DEFAULT_BASE_URL: &str = "https://www.omdbapi.com/";
const DEFAULT_POSTER_PREFIX: &str = "https://m.media-amazon.com/images/M/";

/// OMDb API client configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OmdbConfig {
    /// OMDb API key (required).
    pub api_key: String,
    /// Endpoint URL (default: https://www.omdbapi.com/).
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Storage-domain prefix stripped from poster URLs.
    #[serde(default = "default_poster_prefix")]
    pub poster_prefix: String,
    /// Per-request timeout in seconds. Unset means no timeout.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timeout_secs: Option<u64>,
}

impl OmdbConfig {
    /// Config with the given key and every other field at its default.
    pub fn with_api_key(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: default_base_url(),
            poster_prefix: default_poster_prefix(),
            timeout_secs: None,
        }
    }
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

fn default_poster_prefix() -> String {
    DEFAULT_POSTER_PREFIX.to_string()
}

/// OMDb API client.
pub struct OmdbClient {
    client: Client,
    base_url: String,
    api_key: String,
}

impl OmdbClient {
    /// Create a new OMDb client.
    pub fn new(config: OmdbConfig) -> Result<Self, MetadataError> {
        if config.api_key.is_empty() {
            return Err(MetadataError::NotConfigured(
                "OMDb API key is required".to_string(),
            ));
        }

        let mut builder = Client::builder();
        if let Some(secs) = config.timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }
        let client = builder.build()?;

        Ok(Self {
            client,
            base_url: config.base_url,
            api_key: config.api_key,
        })
    }

    /// Endpoint this client talks to.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    async fn get(&self, params: &[(&str, &str)]) -> Result<Response, MetadataError> {
        let response = self
            .client
            .get(&self.base_url)
            .query(&[("apikey", self.api_key.as_str())])
            .query(params)
            .send()
            .await?;

        let status = response.status();
        if status == 401 {
            return Err(MetadataError::NotConfigured(
                "Invalid OMDb API key".to_string(),
            ));
        }
        if status == 429 {
            return Err(MetadataError::RateLimitExceeded);
        }
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(MetadataError::ApiError {
                status: status.as_u16(),
                message: body,
            });
        }

        Ok(response)
    }
}

#[async_trait]
impl MetadataSource for OmdbClient {
    async fn search(
        &self,
        term: &str,
        media_type: &str,
    ) -> Result<SearchResponse, MetadataError> {
        debug!("OMDb search: term='{}', type='{}'", term, media_type);

        let response = self.get(&[("s", term), ("type", media_type)]).await?;

        response.json().await.map_err(|e| {
            MetadataError::ParseError(format!("Failed to parse search response: {}", e))
        })
    }

    async fn get_detail(&self, imdb_id: &str) -> Result<DetailRecord, MetadataError> {
        debug!("OMDb get title: id={}", imdb_id);

        let response = self.get(&[("i", imdb_id)]).await?;

        let record: DetailRecord = response.json().await.map_err(|e| {
            MetadataError::ParseError(format!("Failed to parse title response: {}", e))
        })?;

        if !record.is_success() {
            return Err(MetadataError::NotFound(
                record
                    .error
                    .unwrap_or_else(|| format!("Title ID {}", imdb_id)),
            ));
        }

        Ok(record)
    }
}
