//! Raw response types from the movie metadata API.
//!
//! Field names follow the upstream JSON exactly. `Year` is text here and the
//! poster is an absolute URL; normalization into catalog entries happens in
//! [`crate::catalog::normalize`].

use serde::{Deserialize, Serialize};

/// Response of a search call.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct SearchResponse {
    /// "True" or "False".
    #[serde(rename = "Response", default)]
    pub response: String,
    /// Matching entries. Absent when the search failed.
    #[serde(rename = "Search", default)]
    pub search: Vec<SearchHit>,
    /// Total number of matches upstream (text).
    #[serde(
        rename = "totalResults",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub total_results: Option<String>,
    /// Upstream error message when `Response` is "False".
    #[serde(rename = "Error", default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl SearchResponse {
    /// Whether upstream reported success.
    pub fn is_success(&self) -> bool {
        is_true_flag(&self.response)
    }

    /// A failed search with the given upstream message.
    pub fn failed(message: impl Into<String>) -> Self {
        Self {
            response: "False".to_string(),
            search: Vec::new(),
            total_results: None,
            error: Some(message.into()),
        }
    }

    /// A successful search over the given hits.
    pub fn found(hits: Vec<SearchHit>) -> Self {
        Self {
            response: "True".to_string(),
            total_results: Some(hits.len().to_string()),
            search: hits,
            error: None,
        }
    }
}

/// A single entry in a search response.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SearchHit {
    #[serde(rename = "imdbID")]
    pub imdb_id: String,
    #[serde(rename = "Title")]
    pub title: String,
    #[serde(rename = "Year")]
    pub year: String,
    #[serde(rename = "Type", default)]
    pub media_type: String,
    #[serde(rename = "Poster", default)]
    pub poster: String,
}

/// Response of a detail call.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct DetailRecord {
    #[serde(rename = "imdbID", default)]
    pub imdb_id: String,
    #[serde(rename = "Title", default)]
    pub title: String,
    #[serde(rename = "Year", default)]
    pub year: String,
    #[serde(rename = "Type", default)]
    pub media_type: String,
    #[serde(rename = "Poster", default)]
    pub poster: String,
    #[serde(rename = "Actors", default)]
    pub actors: String,
    #[serde(rename = "Director", default)]
    pub director: String,
    #[serde(rename = "Genre", default)]
    pub genre: String,
    #[serde(rename = "Plot", default)]
    pub plot: String,
    #[serde(rename = "Rated", default)]
    pub rated: String,
    #[serde(rename = "Released", default)]
    pub released: String,
    #[serde(rename = "Runtime", default)]
    pub runtime: String,
    #[serde(rename = "Writer", default)]
    pub writer: String,
    /// "True" or "False"; missing in hand-built records.
    #[serde(rename = "Response", default, skip_serializing_if = "Option::is_none")]
    pub response: Option<String>,
    #[serde(rename = "Error", default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl DetailRecord {
    /// False only when upstream explicitly said so.
    pub fn is_success(&self) -> bool {
        self.response.as_deref().map_or(true, is_true_flag)
    }
}

fn is_true_flag(flag: &str) -> bool {
    flag.eq_ignore_ascii_case("true")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_search_response_parses_upstream_shape() {
        let json = r#"{
            "Search": [
                {"Title": "Batman Begins", "Year": "2005", "imdbID": "tt0372784",
                 "Type": "movie", "Poster": "https://m.media-amazon.com/images/M/abc.jpg"}
            ],
            "totalResults": "1",
            "Response": "True"
        }"#;

        let parsed: SearchResponse = serde_json::from_str(json).unwrap();
        assert!(parsed.is_success());
        assert_eq!(parsed.search.len(), 1);
        assert_eq!(parsed.search[0].imdb_id, "tt0372784");
        assert_eq!(parsed.search[0].year, "2005");
        assert_eq!(parsed.total_results.as_deref(), Some("1"));
    }

    #[test]
    fn test_failed_search_has_no_hits() {
        let json = r#"{"Response": "False", "Error": "Movie not found!"}"#;

        let parsed: SearchResponse = serde_json::from_str(json).unwrap();
        assert!(!parsed.is_success());
        assert!(parsed.search.is_empty());
        assert_eq!(parsed.error.as_deref(), Some("Movie not found!"));
    }

    #[test]
    fn test_detail_record_success_flag() {
        let ok: DetailRecord =
            serde_json::from_str(r#"{"imdbID": "tt1", "Year": "1989", "Response": "True"}"#)
                .unwrap();
        assert!(ok.is_success());

        let missing: DetailRecord =
            serde_json::from_str(r#"{"Response": "False", "Error": "Incorrect IMDb ID."}"#)
                .unwrap();
        assert!(!missing.is_success());
        assert_eq!(missing.error.as_deref(), Some("Incorrect IMDb ID."));

        assert!(DetailRecord::default().is_success());
    }
}
