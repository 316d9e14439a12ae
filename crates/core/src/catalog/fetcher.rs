//! Two-stage catalog fetch: search, then per-title detail fan-out.

use std::sync::Arc;
use std::time::Instant;

use futures::future::join_all;
use futures::stream::{self, StreamExt};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, info};

use crate::metadata::{MetadataError, MetadataSource};
use crate::metrics::{
    record_metadata_call, CATALOG_FETCHES, CATALOG_FETCH_DURATION, CATALOG_REQUESTS,
    CATALOG_TITLES,
};

use super::decade::{decade_of, decades_for, sort_by_year};
use super::normalize::{normalize_detail, normalize_hit};
use super::{CacheError, Catalog, CatalogCache, Title, TitleDetail};

/// The fixed search the catalog is built from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogQuery {
    /// Search term.
    pub term: String,
    /// Media type filter (e.g. "movie").
    pub media_type: String,
}

impl CatalogQuery {
    pub fn new(term: impl Into<String>, media_type: impl Into<String>) -> Self {
        Self {
            term: term.into(),
            media_type: media_type.into(),
        }
    }
}

/// Result of a successful fetch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchOutcome {
    /// Served from the cache; no outbound calls were made.
    Cached(Catalog),
    /// Built from upstream and stored.
    Fetched(Catalog),
    /// Upstream returned nothing; nothing was stored.
    Empty,
}

impl FetchOutcome {
    /// The catalog, unless the outcome is empty.
    pub fn catalog(&self) -> Option<&Catalog> {
        match self {
            FetchOutcome::Cached(catalog) | FetchOutcome::Fetched(catalog) => Some(catalog),
            FetchOutcome::Empty => None,
        }
    }

    /// The catalog, with `Empty` mapped to the empty sentinel.
    pub fn into_catalog(self) -> Catalog {
        match self {
            FetchOutcome::Cached(catalog) | FetchOutcome::Fetched(catalog) => catalog,
            FetchOutcome::Empty => Catalog::empty(),
        }
    }

    pub fn is_cached(&self) -> bool {
        matches!(self, FetchOutcome::Cached(_))
    }
}

/// Errors that abort a fetch. No partial catalog is stored when one occurs.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("Search failed: {0}")]
    Search(#[source] MetadataError),

    /// The search succeeded but a hit could not be normalized.
    #[error("Malformed search hit: {0}")]
    MalformedHit(#[source] MetadataError),

    #[error("Detail fetch failed for {imdb_id}: {source}")]
    Detail {
        imdb_id: String,
        #[source]
        source: MetadataError,
    },

    #[error("Failed to store catalog: {0}")]
    Cache(#[from] CacheError),
}

impl FetchError {
    /// Short label for logs and metrics.
    pub fn kind(&self) -> &'static str {
        match self {
            FetchError::Search(_) => "search",
            FetchError::MalformedHit(_) => "malformed_hit",
            FetchError::Detail { .. } => "detail",
            FetchError::Cache(_) => "cache",
        }
    }
}

/// Produces the catalog for a fixed query, short-circuiting on the cache.
pub struct CatalogFetcher {
    source: Arc<dyn MetadataSource>,
    cache: Arc<CatalogCache>,
    query: CatalogQuery,
    poster_prefix: String,
    max_concurrent_details: Option<usize>,
}

impl CatalogFetcher {
    pub fn new(
        source: Arc<dyn MetadataSource>,
        cache: Arc<CatalogCache>,
        query: CatalogQuery,
        poster_prefix: impl Into<String>,
    ) -> Self {
        Self {
            source,
            cache,
            query,
            poster_prefix: poster_prefix.into(),
            max_concurrent_details: None,
        }
    }

    /// Bound the number of in-flight detail calls. `None` issues them all at once.
    pub fn with_max_concurrent_details(mut self, limit: Option<usize>) -> Self {
        self.max_concurrent_details = limit;
        self
    }

    pub fn cache(&self) -> &Arc<CatalogCache> {
        &self.cache
    }

    pub fn query(&self) -> &CatalogQuery {
        &self.query
    }

    /// Return the cached catalog, or build, store and return a fresh one.
    pub async fn fetch(&self) -> Result<FetchOutcome, FetchError> {
        if self.cache.has_catalog() {
            CATALOG_REQUESTS.with_label_values(&["cache"]).inc();
            let catalog = self.cache.load();
            info!(titles = catalog.len(), "Serving catalog from cache");
            return Ok(FetchOutcome::Cached(catalog));
        }

        CATALOG_REQUESTS.with_label_values(&["upstream"]).inc();
        let start = Instant::now();
        let result = self.fetch_upstream().await;

        let label = match &result {
            Ok(FetchOutcome::Empty) => "empty",
            Ok(_) => "stored",
            Err(_) => "failed",
        };
        CATALOG_FETCHES.with_label_values(&[label]).inc();
        CATALOG_FETCH_DURATION
            .with_label_values(&[label])
            .observe(start.elapsed().as_secs_f64());

        result
    }

    async fn fetch_upstream(&self) -> Result<FetchOutcome, FetchError> {
        let result = self
            .source
            .search(&self.query.term, &self.query.media_type)
            .await;
        record_metadata_call("search", &result);
        let response = result.map_err(FetchError::Search)?;

        if !response.is_success() || response.search.is_empty() {
            info!(
                term = %self.query.term,
                error = response.error.as_deref().unwrap_or(""),
                "Search returned no titles"
            );
            return Ok(FetchOutcome::Empty);
        }

        let titles = response
            .search
            .into_iter()
            .map(|hit| normalize_hit(hit, &self.poster_prefix))
            .collect::<Result<Vec<Title>, _>>()
            .map_err(FetchError::MalformedHit)?;

        debug!(
            titles = titles.len(),
            decades = ?decades_for(titles.iter().map(|t| t.year)),
            "Search complete, fetching details"
        );

        let details = self.fetch_details(&titles).await?;

        let titles = sort_by_year(details);
        let decades = decades_for(titles.iter().map(|t| t.year));
        let catalog = Catalog { titles, decades };

        self.cache.store(catalog.clone())?;
        CATALOG_TITLES.set(catalog.len() as i64);

        Ok(FetchOutcome::Fetched(catalog))
    }

    /// Fan out one detail call per title and wait for all of them to settle.
    async fn fetch_details(&self, titles: &[Title]) -> Result<Vec<TitleDetail>, FetchError> {
        let requests: Vec<_> = titles.iter().map(|t| self.fetch_detail(t)).collect();

        let results: Vec<Result<TitleDetail, FetchError>> = match self.max_concurrent_details {
            None => join_all(requests).await,
            Some(limit) => {
                // Ordered so ties in the year sort keep search order
                stream::iter(requests)
                    .buffered(limit.max(1))
                    .collect()
                    .await
            }
        };

        results.into_iter().collect()
    }

    async fn fetch_detail(&self, title: &Title) -> Result<TitleDetail, FetchError> {
        debug!(
            id = %title.imdb_id,
            year = title.year,
            decade = decade_of(title.year),
            "Fetching title detail"
        );

        let result = self.source.get_detail(&title.imdb_id).await;
        record_metadata_call("detail", &result);

        result
            .and_then(|record| normalize_detail(record, &self.poster_prefix))
            .map_err(|source| FetchError::Detail {
                imdb_id: title.imdb_id.clone(),
                source,
            })
    }
}
