//! Common test utilities for API testing with mocks.
//!
//! This module provides a test fixture that creates an in-process server
//! with a mock metadata source and a temporary SQLite slot, so the HTTP
//! surface can be exercised without reaching the real API.

#![allow(dead_code)]

use std::sync::Arc;
use std::time::Duration;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use serde_json::Value;
use tempfile::TempDir;
use tower::ServiceExt;

use reelshelf_core::{
    testing::MockMetadataSource, CatalogCache, CatalogConfig, CatalogEvent, CatalogFetcher,
    CatalogService, Config, DatabaseConfig, DurableSlot, OmdbConfig, ServerConfig, SqliteSlot,
};
use reelshelf_server::{api::create_router, state::AppState};

/// Re-export fixtures for test convenience
pub use reelshelf_core::testing::fixtures;

/// Test fixture for API testing with a mock metadata source.
///
/// # Example
///
/// ```rust,ignore
/// #[tokio::test]
/// async fn test_catalog_load() {
///     let fixture = TestFixture::new();
///     fixture.source.add_movie("tt0096895", "Batman", 1989).await;
///
///     let response = fixture.post("/api/v1/catalog/load").await;
///     assert_eq!(response.status, 202);
/// }
/// ```
pub struct TestFixture {
    /// The Axum router for testing
    pub router: Router,
    /// Mock metadata source - configure search and detail responses
    pub source: Arc<MockMetadataSource>,
    /// Catalog service shared with the router
    pub catalog: CatalogService,
    /// Durable slot shared with the router's cache
    pub slot: Arc<dyn DurableSlot>,
    /// Temporary directory for the test database
    pub temp_dir: TempDir,
}

/// Response from a test request
#[derive(Debug)]
pub struct TestResponse {
    pub status: StatusCode,
    pub body: Value,
    pub text: String,
}

impl TestFixture {
    /// Create a new test fixture with an empty mock source.
    pub fn new() -> Self {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let db_path = temp_dir.path().join("test.db");

        let source = Arc::new(MockMetadataSource::new());
        let slot: Arc<dyn DurableSlot> =
            Arc::new(SqliteSlot::new(&db_path).expect("Failed to create slot database"));

        let config = Config {
            omdb: OmdbConfig::with_api_key("test-key"),
            server: ServerConfig {
                host: std::net::IpAddr::V4(std::net::Ipv4Addr::LOCALHOST),
                port: 0, // Not used for in-process testing
            },
            database: DatabaseConfig { path: db_path },
            catalog: CatalogConfig {
                preload_on_start: false,
                ..Default::default()
            },
        };

        let cache = Arc::new(CatalogCache::new(
            Arc::clone(&slot),
            config.catalog.slot_key.clone(),
        ));
        let fetcher = CatalogFetcher::new(
            Arc::clone(&source) as Arc<dyn reelshelf_core::MetadataSource>,
            cache,
            config.catalog.catalog_query(),
            fixtures::POSTER_PREFIX,
        );
        let catalog = CatalogService::new(Arc::new(fetcher));

        let state = Arc::new(AppState::new(config, catalog.clone()));
        let router = create_router(state);

        Self {
            router,
            source,
            catalog,
            slot,
            temp_dir,
        }
    }

    /// Wait for the next catalog event, failing the test after two seconds.
    pub async fn next_event(
        &self,
        rx: &mut tokio::sync::broadcast::Receiver<CatalogEvent>,
    ) -> CatalogEvent {
        tokio::time::timeout(Duration::from_secs(2), rx.recv())
            .await
            .expect("Timed out waiting for catalog event")
            .expect("Catalog event channel closed")
    }

    /// Send a GET request to the test server.
    pub async fn get(&self, path: &str) -> TestResponse {
        self.request("GET", path).await
    }

    /// Send a POST request with an empty body.
    pub async fn post(&self, path: &str) -> TestResponse {
        self.request("POST", path).await
    }

    /// Send a request to the test server.
    async fn request(&self, method: &str, path: &str) -> TestResponse {
        let request = Request::builder()
            .method(method)
            .uri(path)
            .body(Body::empty())
            .unwrap();

        let response = self
            .router
            .clone()
            .oneshot(request)
            .await
            .expect("Failed to send request");

        let status = response.status();
        let body_bytes = response
            .into_body()
            .collect()
            .await
            .expect("Failed to collect body")
            .to_bytes();

        let text = String::from_utf8_lossy(&body_bytes).to_string();
        let body: Value = if body_bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&body_bytes).unwrap_or(Value::Null)
        };

        TestResponse { status, body, text }
    }
}

/// Helper to assert a response has expected status.
#[macro_export]
macro_rules! assert_status {
    ($response:expr, $status:expr) => {
        assert_eq!(
            $response.status, $status,
            "Expected status {:?}, got {:?}. Body: {}",
            $status, $response.status, $response.text
        );
    };
}
