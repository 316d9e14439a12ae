//! Catalog access for UI-facing callers.
//!
//! Loads are fire-and-forget: [`CatalogService::load_catalog`] spawns the
//! fetch and callers learn about the result through [`CatalogEvent`]s.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tokio::sync::broadcast;
use tokio::task::JoinHandle;
use tracing::{info, warn};

use super::{CatalogFetcher, FetchOutcome, TitleDetail};

/// Default capacity of the notification channel.
pub const DEFAULT_EVENT_CAPACITY: usize = 64;

/// Notification sent to subscribers when a load settles.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum CatalogEvent {
    /// A catalog is available (from cache or freshly fetched).
    Available {
        titles: usize,
        decades: Vec<i32>,
        from_cache: bool,
    },
    /// The load failed; no catalog was stored.
    LoadFailed { kind: String, error: String },
}

/// Fire-and-forget loading plus filtered reads over the catalog cache.
#[derive(Clone)]
pub struct CatalogService {
    fetcher: Arc<CatalogFetcher>,
    sender: broadcast::Sender<CatalogEvent>,
}

impl CatalogService {
    pub fn new(fetcher: Arc<CatalogFetcher>) -> Self {
        Self::with_capacity(fetcher, DEFAULT_EVENT_CAPACITY)
    }

    pub fn with_capacity(fetcher: Arc<CatalogFetcher>, capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity.max(1));
        Self { fetcher, sender }
    }

    /// Subscribe to catalog notifications.
    pub fn subscribe(&self) -> broadcast::Receiver<CatalogEvent> {
        self.sender.subscribe()
    }

    /// Start a load in the background.
    ///
    /// An empty upstream result emits nothing. The handle is returned for
    /// callers that want to wait; dropping it does not cancel the load.
    pub fn load_catalog(&self) -> JoinHandle<()> {
        let fetcher = Arc::clone(&self.fetcher);
        let sender = self.sender.clone();

        tokio::spawn(async move {
            let event = match fetcher.fetch().await {
                Ok(FetchOutcome::Empty) => {
                    info!("Catalog load finished with no titles");
                    return;
                }
                Ok(outcome) => {
                    let from_cache = outcome.is_cached();
                    let catalog = outcome.into_catalog();
                    CatalogEvent::Available {
                        titles: catalog.len(),
                        decades: catalog.decades,
                        from_cache,
                    }
                }
                Err(e) => {
                    warn!(kind = e.kind(), error = %e, "Catalog load failed");
                    CatalogEvent::LoadFailed {
                        kind: e.kind().to_string(),
                        error: e.to_string(),
                    }
                }
            };

            // Ignore send errors - they just mean no one is listening
            let _ = sender.send(event);
        })
    }

    /// Cached titles in the given decade, or all of them when `None`.
    pub fn filtered(&self, decade: Option<i32>) -> Vec<TitleDetail> {
        self.fetcher.cache().load().filtered(decade)
    }

    /// Decades of the cached catalog.
    pub fn decades(&self) -> Vec<i32> {
        self.fetcher.cache().load().decades
    }
}
