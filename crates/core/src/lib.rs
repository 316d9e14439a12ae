pub mod catalog;
pub mod config;
pub mod metadata;
pub mod metrics;
pub mod testing;

pub use catalog::{
    checked_decade_of, decade_of, decades_for, filter_by_decade, CacheError, Catalog,
    CatalogCache, CatalogEvent, CatalogFetcher, CatalogQuery, CatalogService, DurableSlot,
    FetchError, FetchOutcome, MemorySlot, SlotError, SqliteSlot, Title, TitleDetail,
};
pub use config::{
    load_config, load_config_from_str, validate_config, CatalogConfig, Config, ConfigError,
    DatabaseConfig, SanitizedConfig, ServerConfig,
};
pub use metadata::{
    DetailRecord, MetadataError, MetadataSource, OmdbClient, OmdbConfig, SearchHit,
    SearchResponse,
};
