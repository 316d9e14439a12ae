//! Mock metadata source for testing.

use std::collections::{HashMap, HashSet};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::metadata::{DetailRecord, MetadataError, MetadataSource, SearchHit, SearchResponse};

use super::fixtures;

/// A recorded metadata query for test assertions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecordedMetadataQuery {
    Search { term: String, media_type: String },
    GetDetail { imdb_id: String },
}

/// Mock implementation of the MetadataSource trait.
///
/// Provides controllable behavior for testing:
/// - Return configurable search hits and detail records
/// - Track queries for assertions
/// - Simulate failures, globally or per title
/// - Delay individual detail responses to reorder arrivals
#[derive(Debug, Default)]
pub struct MockMetadataSource {
    /// Search hits in the order the search returns them.
    hits: Arc<RwLock<Vec<SearchHit>>>,
    /// Replaces the hit-derived search response when set.
    search_override: Arc<RwLock<Option<SearchResponse>>>,
    /// Detail records by IMDb ID.
    details: Arc<RwLock<HashMap<String, DetailRecord>>>,
    /// IDs whose detail call fails.
    failing: Arc<RwLock<HashSet<String>>>,
    /// Per-ID detail response delay.
    delays: Arc<RwLock<HashMap<String, Duration>>>,
    /// Recorded queries.
    queries: Arc<RwLock<Vec<RecordedMetadataQuery>>>,
    /// If set, the next operation will fail with this error.
    next_error: Arc<RwLock<Option<MetadataError>>>,
}

impl MockMetadataSource {
    /// Create a new empty mock. Searches return `Response: "False"` until
    /// titles are added.
    pub fn new() -> Self {
        Self::default()
    }

    // =========================================================================
    // Configuration
    // =========================================================================

    /// Add a movie to both the search results and the detail records.
    pub async fn add_movie(&self, imdb_id: &str, title: &str, year: i32) {
        let year = year.to_string();
        self.hits
            .write()
            .await
            .push(fixtures::search_hit(imdb_id, title, &year));
        self.add_detail(fixtures::detail_record(imdb_id, title, &year))
            .await;
    }

    /// Add or replace a detail record.
    pub async fn add_detail(&self, record: DetailRecord) {
        self.details
            .write()
            .await
            .insert(record.imdb_id.clone(), record);
    }

    /// Return this response from every search instead of the added movies.
    pub async fn set_search_response(&self, response: SearchResponse) {
        *self.search_override.write().await = Some(response);
    }

    /// Make the detail call for `imdb_id` fail with a 503.
    pub async fn fail_detail(&self, imdb_id: &str) {
        self.failing.write().await.insert(imdb_id.to_string());
    }

    /// Delay the detail response for `imdb_id`.
    pub async fn set_detail_delay(&self, imdb_id: &str, delay: Duration) {
        self.delays
            .write()
            .await
            .insert(imdb_id.to_string(), delay);
    }

    // =========================================================================
    // Query Recording
    // =========================================================================

    /// Get all recorded queries.
    pub async fn recorded_queries(&self) -> Vec<RecordedMetadataQuery> {
        self.queries.read().await.clone()
    }

    /// Clear recorded queries.
    pub async fn clear_recorded(&self) {
        self.queries.write().await.clear();
    }

    /// Get the number of queries performed.
    pub async fn query_count(&self) -> usize {
        self.queries.read().await.len()
    }

    /// Number of detail queries performed.
    pub async fn detail_request_count(&self) -> usize {
        self.queries
            .read()
            .await
            .iter()
            .filter(|q| matches!(q, RecordedMetadataQuery::GetDetail { .. }))
            .count()
    }

    // =========================================================================
    // Error Injection
    // =========================================================================

    /// Configure the next operation to fail with the given error.
    pub async fn set_next_error(&self, error: MetadataError) {
        *self.next_error.write().await = Some(error);
    }

    /// Clear any pending error.
    pub async fn clear_next_error(&self) {
        *self.next_error.write().await = None;
    }

    async fn take_error(&self) -> Option<MetadataError> {
        self.next_error.write().await.take()
    }

    async fn record(&self, query: RecordedMetadataQuery) {
        self.queries.write().await.push(query);
    }
}

#[async_trait]
impl MetadataSource for MockMetadataSource {
    async fn search(
        &self,
        term: &str,
        media_type: &str,
    ) -> Result<SearchResponse, MetadataError> {
        if let Some(err) = self.take_error().await {
            return Err(err);
        }

        self.record(RecordedMetadataQuery::Search {
            term: term.to_string(),
            media_type: media_type.to_string(),
        })
        .await;

        if let Some(response) = self.search_override.read().await.clone() {
            return Ok(response);
        }

        let hits = self.hits.read().await.clone();
        if hits.is_empty() {
            return Ok(SearchResponse::failed("Movie not found!"));
        }
        Ok(SearchResponse::found(hits))
    }

    async fn get_detail(&self, imdb_id: &str) -> Result<DetailRecord, MetadataError> {
        if let Some(err) = self.take_error().await {
            return Err(err);
        }

        self.record(RecordedMetadataQuery::GetDetail {
            imdb_id: imdb_id.to_string(),
        })
        .await;

        let delay = self.delays.read().await.get(imdb_id).copied();
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }

        if self.failing.read().await.contains(imdb_id) {
            return Err(MetadataError::ApiError {
                status: 503,
                message: "Service Unavailable".to_string(),
            });
        }

        self.details
            .read()
            .await
            .get(imdb_id)
            .cloned()
            .ok_or_else(|| MetadataError::NotFound(format!("Title {} not found", imdb_id)))
    }
}
