//! Types for the movie catalog.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A catalog entry as produced by a search hit.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Title {
    /// External identifier (IMDb ID).
    #[serde(rename = "imdbID")]
    pub imdb_id: String,
    /// Display name.
    #[serde(rename = "Title")]
    pub title: String,
    /// Release year.
    #[serde(rename = "Year")]
    pub year: i32,
    /// Poster reference relative to the image storage domain.
    #[serde(rename = "Poster")]
    pub poster: String,
    /// Media type tag ("movie", "series", ...).
    #[serde(rename = "Type")]
    pub media_type: String,
}

/// A fully enriched catalog entry.
///
/// Descriptive fields are opaque strings passed through from upstream.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TitleDetail {
    #[serde(rename = "imdbID")]
    pub imdb_id: String,
    #[serde(rename = "Title")]
    pub title: String,
    #[serde(rename = "Year")]
    pub year: i32,
    #[serde(rename = "Poster")]
    pub poster: String,
    #[serde(rename = "Type")]
    pub media_type: String,
    /// Cast.
    #[serde(rename = "Actors")]
    pub actors: String,
    #[serde(rename = "Director")]
    pub director: String,
    #[serde(rename = "Genre")]
    pub genre: String,
    /// Plot summary.
    #[serde(rename = "Plot")]
    pub plot: String,
    /// Content rating.
    #[serde(rename = "Rated")]
    pub rated: String,
    /// Release date as reported upstream.
    #[serde(rename = "Released")]
    pub released: String,
    #[serde(rename = "Runtime")]
    pub runtime: String,
    #[serde(rename = "Writer")]
    pub writer: String,
}

/// Enriched titles sorted by year, plus the decades they span.
///
/// This is also the persisted format of the durable slot.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct Catalog {
    /// Titles, ascending by year.
    #[serde(rename = "Search")]
    pub titles: Vec<TitleDetail>,
    /// Decade start years, ascending and deduplicated.
    #[serde(rename = "Decades")]
    pub decades: Vec<i32>,
}

impl Catalog {
    /// The empty sentinel served when nothing is cached.
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.titles.is_empty()
    }

    pub fn len(&self) -> usize {
        self.titles.len()
    }

    /// Titles falling in the given decade, or all titles when `None`.
    pub fn filtered(&self, decade: Option<i32>) -> Vec<TitleDetail> {
        super::decade::filter_by_decade(&self.titles, decade)
    }
}

/// Errors raised by a durable slot backend.
#[derive(Debug, Error)]
pub enum SlotError {
    #[error("Database error: {0}")]
    Database(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

/// Errors raised when writing the catalog cache.
#[derive(Debug, Error)]
pub enum CacheError {
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Slot error: {0}")]
    Slot(#[from] SlotError),
}
