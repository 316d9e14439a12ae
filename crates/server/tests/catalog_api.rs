//! Catalog API integration tests.
//!
//! Drives the HTTP surface in-process: load trigger, notification and
//! filtered reads, against a mock metadata source.

mod common;

use axum::http::StatusCode;
use serde_json::json;

use common::{fixtures, TestFixture};
use reelshelf_core::{CatalogEvent, DurableSlot, MetadataError, SearchResponse};

const SLOT_KEY: &str = "storedMovies";

async fn seed_batman(fixture: &TestFixture) {
    fixture.source.add_movie("tt0372784", "Batman Begins", 2005).await;
    fixture.source.add_movie("tt0096895", "Batman", 1989).await;
    fixture.source.add_movie("tt0103776", "Batman Returns", 1992).await;
    fixture.source.add_movie("tt0112462", "Batman Forever", 1995).await;
}

#[tokio::test]
async fn test_health() {
    let fixture = TestFixture::new();

    let response = fixture.get("/api/v1/health").await;
    assert_status!(response, StatusCode::OK);
    assert_eq!(response.body["status"], "ok");
}

#[tokio::test]
async fn test_config_hides_api_key() {
    let fixture = TestFixture::new();

    let response = fixture.get("/api/v1/config").await;
    assert_status!(response, StatusCode::OK);
    assert_eq!(response.body["omdb"]["api_key_configured"], true);
    assert_eq!(response.body["catalog"]["query"], "Batman");
    assert!(!response.text.contains("test-key"));
}

#[tokio::test]
async fn test_catalog_empty_before_load() {
    let fixture = TestFixture::new();

    let response = fixture.get("/api/v1/catalog").await;
    assert_status!(response, StatusCode::OK);
    assert_eq!(response.body["titles"], json!([]));
    assert_eq!(response.body["decades"], json!([]));
    assert_eq!(response.body["total"], 0);
}

#[tokio::test]
async fn test_load_then_read_filtered() {
    let fixture = TestFixture::new();
    seed_batman(&fixture).await;
    let mut rx = fixture.catalog.subscribe();

    let response = fixture.post("/api/v1/catalog/load").await;
    assert_status!(response, StatusCode::ACCEPTED);

    let event = fixture.next_event(&mut rx).await;
    assert_eq!(
        event,
        CatalogEvent::Available {
            titles: 4,
            decades: vec![1980, 1990, 2000],
            from_cache: false,
        }
    );

    // All titles, ascending by year
    let response = fixture.get("/api/v1/catalog").await;
    assert_status!(response, StatusCode::OK);
    assert_eq!(response.body["total"], 4);
    let years: Vec<i64> = response.body["titles"]
        .as_array()
        .unwrap()
        .iter()
        .map(|t| t["Year"].as_i64().unwrap())
        .collect();
    assert_eq!(years, vec![1989, 1992, 1995, 2005]);

    // Posters are stored relative to the image domain
    assert_eq!(response.body["titles"][0]["Poster"], "tt0096895.jpg");
    assert_eq!(response.body["titles"][0]["imdbID"], "tt0096895");

    // One decade
    let response = fixture.get("/api/v1/catalog?decade=1990").await;
    assert_status!(response, StatusCode::OK);
    assert_eq!(response.body["total"], 2);
    assert_eq!(response.body["titles"][0]["Title"], "Batman Returns");
    assert_eq!(response.body["titles"][1]["Title"], "Batman Forever");
    assert_eq!(response.body["decades"], json!([1980, 1990, 2000]));

    let response = fixture.get("/api/v1/catalog/decades").await;
    assert_status!(response, StatusCode::OK);
    assert_eq!(response.body, json!([1980, 1990, 2000]));
}

#[tokio::test]
async fn test_second_load_served_from_cache() {
    let fixture = TestFixture::new();
    seed_batman(&fixture).await;
    let mut rx = fixture.catalog.subscribe();

    fixture.post("/api/v1/catalog/load").await;
    fixture.next_event(&mut rx).await;
    // 1 search + 4 details
    assert_eq!(fixture.source.query_count().await, 5);
    fixture.source.clear_recorded().await;

    fixture.post("/api/v1/catalog/load").await;
    match fixture.next_event(&mut rx).await {
        CatalogEvent::Available { from_cache, .. } => assert!(from_cache),
        other => panic!("Expected available event, got {:?}", other),
    }
    assert_eq!(fixture.source.query_count().await, 0);
    assert!(fixture.source.recorded_queries().await.is_empty());
}

#[tokio::test]
async fn test_decade_with_no_titles_is_empty() {
    let fixture = TestFixture::new();
    seed_batman(&fixture).await;
    fixture.catalog.load_catalog().await.unwrap();

    let response = fixture.get("/api/v1/catalog?decade=1950").await;
    assert_status!(response, StatusCode::OK);
    assert_eq!(response.body["total"], 0);
    assert_eq!(response.body["titles"], json!([]));
}

#[tokio::test]
async fn test_decade_zero_is_a_filter_not_all() {
    let fixture = TestFixture::new();
    seed_batman(&fixture).await;
    fixture.catalog.load_catalog().await.unwrap();

    let response = fixture.get("/api/v1/catalog?decade=0").await;
    assert_status!(response, StatusCode::OK);
    assert_eq!(response.body["total"], 0);
    assert_eq!(response.body["titles"], json!([]));
    // The decade list is still the full one
    assert_eq!(response.body["decades"], json!([1980, 1990, 2000]));
}

#[tokio::test]
async fn test_decade_at_integer_bounds() {
    let fixture = TestFixture::new();
    seed_batman(&fixture).await;
    fixture.catalog.load_catalog().await.unwrap();

    for decade in [i32::MAX, i32::MIN] {
        let response = fixture
            .get(&format!("/api/v1/catalog?decade={}", decade))
            .await;
        assert_status!(response, StatusCode::OK);
        assert_eq!(response.body["total"], 0);
    }
}

#[tokio::test]
async fn test_invalid_decade_rejected() {
    let fixture = TestFixture::new();

    let response = fixture.get("/api/v1/catalog?decade=nineties").await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_failed_load_broadcasts_failure() {
    let fixture = TestFixture::new();
    seed_batman(&fixture).await;
    fixture.source.fail_detail("tt0103776").await;
    let mut rx = fixture.catalog.subscribe();

    let response = fixture.post("/api/v1/catalog/load").await;
    assert_status!(response, StatusCode::ACCEPTED);

    match fixture.next_event(&mut rx).await {
        CatalogEvent::LoadFailed { kind, error } => {
            assert_eq!(kind, "detail");
            assert!(error.contains("tt0103776"));
        }
        other => panic!("Expected failure event, got {:?}", other),
    }

    // Nothing partial is visible or persisted
    let response = fixture.get("/api/v1/catalog").await;
    assert_eq!(response.body["total"], 0);
    assert_eq!(fixture.slot.get(SLOT_KEY).unwrap(), None);
}

#[tokio::test]
async fn test_search_failure_broadcasts_failure() {
    let fixture = TestFixture::new();
    fixture
        .source
        .set_next_error(MetadataError::RateLimitExceeded)
        .await;
    let mut rx = fixture.catalog.subscribe();

    fixture.post("/api/v1/catalog/load").await;

    match fixture.next_event(&mut rx).await {
        CatalogEvent::LoadFailed { kind, .. } => assert_eq!(kind, "search"),
        other => panic!("Expected failure event, got {:?}", other),
    }
}

#[tokio::test]
async fn test_unparsable_hit_year_broadcasts_malformed_hit() {
    let fixture = TestFixture::new();
    fixture
        .source
        .set_search_response(SearchResponse::found(vec![fixtures::search_hit(
            "tt0096895", "Batman", "N/A",
        )]))
        .await;
    let mut rx = fixture.catalog.subscribe();

    fixture.post("/api/v1/catalog/load").await;

    match fixture.next_event(&mut rx).await {
        CatalogEvent::LoadFailed { kind, error } => {
            assert_eq!(kind, "malformed_hit");
            assert!(error.contains("tt0096895"));
        }
        other => panic!("Expected failure event, got {:?}", other),
    }
    assert_eq!(fixture.source.detail_request_count().await, 0);
    assert_eq!(fixture.slot.get(SLOT_KEY).unwrap(), None);
}

#[tokio::test]
async fn test_empty_upstream_stores_nothing() {
    let fixture = TestFixture::new();

    // No movies configured: the mock answers Response "False"
    fixture.catalog.load_catalog().await.unwrap();

    assert_eq!(fixture.source.query_count().await, 1);
    assert_eq!(fixture.slot.get(SLOT_KEY).unwrap(), None);
    let response = fixture.get("/api/v1/catalog").await;
    assert_eq!(response.body["total"], 0);
}

#[tokio::test]
async fn test_persisted_catalog_loads_without_upstream_calls() {
    let fixture = TestFixture::new();
    let stored = fixtures::catalog(&[1966, 1989, 2022]);
    fixture
        .slot
        .put(SLOT_KEY, &serde_json::to_string(&stored).unwrap())
        .unwrap();

    fixture.catalog.load_catalog().await.unwrap();

    assert_eq!(fixture.source.query_count().await, 0);
    let response = fixture.get("/api/v1/catalog").await;
    assert_eq!(response.body["total"], 3);
    assert_eq!(response.body["decades"], json!([1960, 1980, 2020]));
}

#[tokio::test]
async fn test_metrics_endpoint() {
    let fixture = TestFixture::new();
    fixture.get("/api/v1/health").await;

    let response = fixture.get("/metrics").await;
    assert_status!(response, StatusCode::OK);
    assert!(response.text.contains("reelshelf_http_requests_total"));
    assert!(response.text.contains("reelshelf_catalog_cached_titles"));
}

#[tokio::test]
async fn test_metrics_record_route_templates_and_upstream_calls() {
    let fixture = TestFixture::new();
    seed_batman(&fixture).await;
    fixture.catalog.load_catalog().await.unwrap();

    fixture.get("/api/v1/catalog?decade=1990").await;
    fixture.get("/api/v1/no-such-route").await;

    let response = fixture.get("/metrics").await;
    assert_status!(response, StatusCode::OK);

    // Query strings and unknown paths never become labels
    assert!(response
        .text
        .contains(r#"path="/api/v1/catalog",status="200""#));
    assert!(response.text.contains(r#"path="unmatched""#));
    assert!(!response.text.contains("no-such-route"));

    // Upstream calls made by the load
    assert!(response
        .text
        .contains(r#"reelshelf_metadata_requests_total{call="search",result="success"}"#));
    assert!(response
        .text
        .contains(r#"reelshelf_metadata_requests_total{call="detail",result="success"}"#));
    assert!(response
        .text
        .contains(r#"reelshelf_catalog_fetches_total{result="stored"}"#));
}
