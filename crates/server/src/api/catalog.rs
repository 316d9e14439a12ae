//! Catalog API handlers.

use std::sync::Arc;

use axum::{
    extract::{Query, State},
    http::StatusCode,
    Json,
};
use reelshelf_core::TitleDetail;
use serde::{Deserialize, Serialize};

use crate::state::AppState;

// ============================================================================
// Request/Response types
// ============================================================================

#[derive(Debug, Deserialize)]
pub struct CatalogQueryParams {
    /// Decade start (e.g. 1990 for [1990, 2000)). Absent means all titles.
    ///
    /// Any present value is a real filter: `decade=0` selects [0, 10), not
    /// the whole catalog.
    #[serde(default)]
    pub decade: Option<i32>,
}

#[derive(Debug, Serialize)]
pub struct CatalogListResponse {
    pub titles: Vec<TitleDetail>,
    pub decades: Vec<i32>,
    pub total: usize,
}

#[derive(Debug, Serialize)]
pub struct LoadAcceptedResponse {
    pub message: String,
}

// ============================================================================
// Handlers
// ============================================================================

/// POST /api/v1/catalog/load
///
/// Start a catalog load. The result is announced over the WebSocket.
pub async fn load_catalog(
    State(state): State<Arc<AppState>>,
) -> (StatusCode, Json<LoadAcceptedResponse>) {
    // The handle is dropped; the load keeps running in the background
    let _ = state.catalog().load_catalog();

    (
        StatusCode::ACCEPTED,
        Json(LoadAcceptedResponse {
            message: "Catalog load started".to_string(),
        }),
    )
}

/// GET /api/v1/catalog
///
/// Titles of the in-memory catalog, optionally filtered to one decade.
/// Only an absent `decade` returns every title.
pub async fn list_catalog(
    State(state): State<Arc<AppState>>,
    Query(params): Query<CatalogQueryParams>,
) -> Json<CatalogListResponse> {
    let catalog = state.catalog();
    let titles = catalog.filtered(params.decade);
    let total = titles.len();

    Json(CatalogListResponse {
        titles,
        decades: catalog.decades(),
        total,
    })
}

/// GET /api/v1/catalog/decades
///
/// Distinct decades of the in-memory catalog, ascending.
pub async fn list_decades(State(state): State<Arc<AppState>>) -> Json<Vec<i32>> {
    Json(state.catalog().decades())
}
