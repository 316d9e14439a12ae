//! Movie catalog: fetch, cache and serve titles grouped by decade.
//!
//! [`CatalogFetcher`] builds the catalog from the metadata API and stores it
//! in [`CatalogCache`], which keeps an in-memory copy over a
//! [`DurableSlot`] so the catalog survives restarts.

mod cache;
pub mod decade;
mod fetcher;
pub mod normalize;
mod service;
mod slot;
mod sqlite;
mod types;

pub use cache::CatalogCache;
pub use decade::{checked_decade_of, decade_of, decades_for, filter_by_decade};
pub use fetcher::{CatalogFetcher, CatalogQuery, FetchError, FetchOutcome};
pub use service::{CatalogEvent, CatalogService, DEFAULT_EVENT_CAPACITY};
pub use slot::{DurableSlot, MemorySlot};
pub use sqlite::SqliteSlot;
pub use types::*;
