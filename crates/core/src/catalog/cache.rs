//! In-memory catalog backed by a durable slot.

use std::sync::{Arc, RwLock};

use tracing::{debug, info, warn};

use super::{CacheError, Catalog, DurableSlot};

/// Holds the last computed catalog.
///
/// The in-memory copy is only trusted once [`CatalogCache::has_catalog`] or
/// [`CatalogCache::store`] has run; until then [`CatalogCache::load`] serves
/// the empty sentinel.
pub struct CatalogCache {
    slot: Arc<dyn DurableSlot>,
    key: String,
    memory: RwLock<Option<Catalog>>,
}

impl CatalogCache {
    /// Create a cache over the given slot, storing the catalog under `key`.
    pub fn new(slot: Arc<dyn DurableSlot>, key: impl Into<String>) -> Self {
        Self {
            slot,
            key: key.into(),
            memory: RwLock::new(None),
        }
    }

    /// Key the catalog is stored under.
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Check the durable slot for a non-empty catalog.
    ///
    /// Re-hydrates the in-memory copy from whatever the slot holds. Missing,
    /// unreadable or malformed content counts as absence and clears it.
    pub fn has_catalog(&self) -> bool {
        let parsed = match self.slot.get(&self.key) {
            Ok(Some(raw)) => match serde_json::from_str::<Catalog>(&raw) {
                Ok(catalog) => Some(catalog),
                Err(e) => {
                    warn!(key = %self.key, error = %e, "Discarding malformed stored catalog");
                    None
                }
            },
            Ok(None) => None,
            Err(e) => {
                warn!(key = %self.key, error = %e, "Failed to read catalog slot");
                None
            }
        };

        let present = parsed.as_ref().is_some_and(|c| !c.is_empty());
        debug!(key = %self.key, present, "Catalog presence check");

        self.set_memory(parsed);
        present
    }

    /// The in-memory catalog, or the empty sentinel.
    pub fn load(&self) -> Catalog {
        match self.memory.read() {
            Ok(guard) => guard.clone().unwrap_or_default(),
            Err(poisoned) => poisoned.into_inner().clone().unwrap_or_default(),
        }
    }

    /// Replace the stored catalog.
    ///
    /// The durable slot is written first; the in-memory copy is only updated
    /// once that succeeds.
    pub fn store(&self, catalog: Catalog) -> Result<(), CacheError> {
        let raw = serde_json::to_string(&catalog)?;
        self.slot.put(&self.key, &raw)?;

        info!(
            key = %self.key,
            titles = catalog.titles.len(),
            decades = catalog.decades.len(),
            "Stored catalog"
        );

        self.set_memory(Some(catalog));
        Ok(())
    }

    fn set_memory(&self, value: Option<Catalog>) {
        match self.memory.write() {
            Ok(mut guard) => *guard = value,
            Err(poisoned) => *poisoned.into_inner() = value,
        }
    }
}
