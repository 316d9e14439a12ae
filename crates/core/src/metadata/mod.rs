//! Movie metadata API integration.
//!
//! The fetch pipeline talks to the upstream API through the
//! [`MetadataSource`] trait so it can be driven by [`OmdbClient`] in
//! production and by a mock in tests.

mod omdb;
mod types;

pub use omdb::{OmdbClient, OmdbConfig};
pub use types::*;

use async_trait::async_trait;
use thiserror::Error;

/// Errors that can occur when talking to the metadata API.
#[derive(Debug, Error)]
pub enum MetadataError {
    /// HTTP request failed.
    #[error("HTTP request failed: {0}")]
    HttpError(#[from] reqwest::Error),

    /// Rate limit exceeded.
    #[error("Rate limit exceeded, please wait before retrying")]
    RateLimitExceeded,

    /// Title not found upstream.
    #[error("Resource not found: {0}")]
    NotFound(String),

    /// API returned an error status.
    #[error("API error: {status} - {message}")]
    ApiError { status: u16, message: String },

    /// Response did not have the expected shape.
    #[error("Failed to parse response: {0}")]
    ParseError(String),

    /// Client not configured (missing API key, etc.).
    #[error("Client not configured: {0}")]
    NotConfigured(String),
}

/// Source of search results and title details.
#[async_trait]
pub trait MetadataSource: Send + Sync {
    /// Search titles by term, restricted to one media type (e.g. "movie").
    async fn search(
        &self,
        term: &str,
        media_type: &str,
    ) -> Result<SearchResponse, MetadataError>;

    /// Fetch the full record for one title.
    async fn get_detail(&self, imdb_id: &str) -> Result<DetailRecord, MetadataError>;
}
