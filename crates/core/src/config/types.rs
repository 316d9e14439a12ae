use serde::{Deserialize, Serialize};
use std::net::IpAddr;
use std::path::PathBuf;

use crate::catalog::CatalogQuery;
use crate::metadata::OmdbConfig;

/// Root configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Config {
    pub omdb: OmdbConfig,
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub database: DatabaseConfig,
    #[serde(default)]
    pub catalog: CatalogConfig,
}

/// Server configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: IpAddr,
    #[serde(default = "default_port")]
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

fn default_host() -> IpAddr {
    IpAddr::V4(std::net::Ipv4Addr::UNSPECIFIED)
}

fn default_port() -> u16 {
    8080
}

/// Database configuration (holds the durable catalog slot)
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct DatabaseConfig {
    #[serde(default = "default_db_path")]
    pub path: PathBuf,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            path: default_db_path(),
        }
    }
}

fn default_db_path() -> PathBuf {
    PathBuf::from("reelshelf.db")
}

/// Catalog configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CatalogConfig {
    /// Fixed search term the catalog is built from
    #[serde(default = "default_query")]
    pub query: String,
    /// Media type filter sent with the search
    #[serde(default = "default_media_type")]
    pub media_type: String,
    /// Key of the durable slot holding the catalog
    #[serde(default = "default_slot_key")]
    pub slot_key: String,
    /// Trigger a catalog load when the server starts
    #[serde(default = "default_preload")]
    pub preload_on_start: bool,
    /// Cap on in-flight detail calls (unset = all at once)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_concurrent_details: Option<usize>,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            query: default_query(),
            media_type: default_media_type(),
            slot_key: default_slot_key(),
            preload_on_start: default_preload(),
            max_concurrent_details: None,
        }
    }
}

impl CatalogConfig {
    pub fn catalog_query(&self) -> CatalogQuery {
        CatalogQuery::new(&self.query, &self.media_type)
    }
}

fn default_query() -> String {
    "Batman".to_string()
}

fn default_media_type() -> String {
    "movie".to_string()
}

fn default_slot_key() -> String {
    "storedMovies".to_string()
}

fn default_preload() -> bool {
    true
}

/// Sanitized config for API responses (secrets redacted)
#[derive(Debug, Clone, Serialize)]
pub struct SanitizedConfig {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub catalog: CatalogConfig,
    pub omdb: SanitizedOmdbConfig,
}

/// Sanitized OMDb config (API key hidden)
#[derive(Debug, Clone, Serialize)]
pub struct SanitizedOmdbConfig {
    pub base_url: String,
    pub poster_prefix: String,
    pub api_key_configured: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timeout_secs: Option<u64>,
}

impl From<&Config> for SanitizedConfig {
    fn from(config: &Config) -> Self {
        Self {
            server: config.server.clone(),
            database: config.database.clone(),
            catalog: config.catalog.clone(),
            omdb: SanitizedOmdbConfig {
                base_url: config.omdb.base_url.clone(),
                poster_prefix: config.omdb.poster_prefix.clone(),
                api_key_configured: !config.omdb.api_key.is_empty(),
                timeout_secs: config.omdb.timeout_secs,
            },
        }
    }
}
