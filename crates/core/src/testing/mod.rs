//! Testing utilities and mock implementations.
//!
//! Provides a mock metadata source so the fetch pipeline and the HTTP
//! surface can be exercised without reaching the real API.
//!
//! # Example
//!
//! ```rust,ignore
//! use reelshelf_core::testing::MockMetadataSource;
//!
//! let source = MockMetadataSource::new();
//! source.add_movie("tt0096895", "Batman", 1989).await;
//! source.fail_detail("tt0096895").await;
//! ```

mod mock_metadata;

pub use mock_metadata::{MockMetadataSource, RecordedMetadataQuery};

/// Test fixtures and helper functions.
pub mod fixtures {
    use crate::catalog::{decades_for, Catalog, TitleDetail};
    use crate::metadata::{DetailRecord, SearchHit};

    /// Storage-domain prefix used on fixture posters.
    pub const POSTER_PREFIX: &str = "https://m.media-amazon.com/images/M/";

    /// Absolute poster URL for a title.
    pub fn poster_url(imdb_id: &str) -> String {
        format!("{}{}.jpg", POSTER_PREFIX, imdb_id)
    }

    /// A search hit with an absolute poster URL.
    pub fn search_hit(imdb_id: &str, title: &str, year: &str) -> SearchHit {
        SearchHit {
            imdb_id: imdb_id.to_string(),
            title: title.to_string(),
            year: year.to_string(),
            media_type: "movie".to_string(),
            poster: poster_url(imdb_id),
        }
    }

    /// A detail record as the API would return it.
    pub fn detail_record(imdb_id: &str, title: &str, year: &str) -> DetailRecord {
        DetailRecord {
            imdb_id: imdb_id.to_string(),
            title: title.to_string(),
            year: year.to_string(),
            media_type: "movie".to_string(),
            poster: poster_url(imdb_id),
            actors: "Michael Keaton, Jack Nicholson".to_string(),
            director: "Tim Burton".to_string(),
            genre: "Action, Adventure".to_string(),
            plot: format!("{} plot summary.", title),
            rated: "PG-13".to_string(),
            released: format!("23 Jun {}", year),
            runtime: "126 min".to_string(),
            writer: "Bob Kane".to_string(),
            response: Some("True".to_string()),
            error: None,
        }
    }

    /// A normalized catalog entry.
    pub fn title_detail(imdb_id: &str, title: &str, year: i32) -> TitleDetail {
        TitleDetail {
            imdb_id: imdb_id.to_string(),
            title: title.to_string(),
            year,
            poster: format!("{}.jpg", imdb_id),
            media_type: "movie".to_string(),
            actors: "Michael Keaton, Jack Nicholson".to_string(),
            director: "Tim Burton".to_string(),
            genre: "Action, Adventure".to_string(),
            plot: format!("{} plot summary.", title),
            rated: "PG-13".to_string(),
            released: format!("23 Jun {}", year),
            runtime: "126 min".to_string(),
            writer: "Bob Kane".to_string(),
        }
    }

    /// A consistent catalog over the given years.
    pub fn catalog(years: &[i32]) -> Catalog {
        let mut titles: Vec<TitleDetail> = years
            .iter()
            .enumerate()
            .map(|(i, year)| title_detail(&format!("tt{:07}", i), &format!("Title {}", i), *year))
            .collect();
        titles.sort_by_key(|t| t.year);

        Catalog {
            decades: decades_for(titles.iter().map(|t| t.year)),
            titles,
        }
    }
}
