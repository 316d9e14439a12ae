//! Conversion of raw metadata responses into catalog entries.

use crate::metadata::{DetailRecord, MetadataError, SearchHit};

use super::decade::checked_decade_of;
use super::{Title, TitleDetail};

/// Parse the leading integer of a textual year.
///
/// Accepts optional leading whitespace and sign, then reads digits until the
/// first non-digit, so `"2005"` and `"2005–2010"` both yield 2005.
pub fn parse_year(text: &str) -> Option<i32> {
    let trimmed = text.trim_start();
    let (negative, rest) = match trimmed.as_bytes().first() {
        Some(b'-') => (true, &trimmed[1..]),
        Some(b'+') => (false, &trimmed[1..]),
        _ => (false, trimmed),
    };

    let digits_len = rest.bytes().take_while(u8::is_ascii_digit).count();
    if digits_len == 0 {
        return None;
    }

    let value: i32 = rest[..digits_len].parse().ok()?;
    let year = if negative { -value } else { value };

    // Reject years without a representable decade bucket
    checked_decade_of(year)?;
    Some(year)
}

/// Remove the storage-domain prefix from a poster URL.
pub fn strip_poster_prefix(poster: &str, prefix: &str) -> String {
    if prefix.is_empty() {
        return poster.to_string();
    }
    poster.replace(prefix, "")
}

fn require_year(text: &str, imdb_id: &str) -> Result<i32, MetadataError> {
    parse_year(text).ok_or_else(|| {
        MetadataError::ParseError(format!("Invalid year '{}' for title {}", text, imdb_id))
    })
}

/// Normalize a search hit.
pub fn normalize_hit(hit: SearchHit, poster_prefix: &str) -> Result<Title, MetadataError> {
    let year = require_year(&hit.year, &hit.imdb_id)?;

    Ok(Title {
        poster: strip_poster_prefix(&hit.poster, poster_prefix),
        imdb_id: hit.imdb_id,
        title: hit.title,
        year,
        media_type: hit.media_type,
    })
}

/// Normalize a detail record.
pub fn normalize_detail(
    record: DetailRecord,
    poster_prefix: &str,
) -> Result<TitleDetail, MetadataError> {
    let year = require_year(&record.year, &record.imdb_id)?;

    Ok(TitleDetail {
        poster: strip_poster_prefix(&record.poster, poster_prefix),
        imdb_id: record.imdb_id,
        title: record.title,
        year,
        media_type: record.media_type,
        actors: record.actors,
        director: record.director,
        genre: record.genre,
        plot: record.plot,
        rated: record.rated,
        released: record.released,
        runtime: record.runtime,
        writer: record.writer,
    })
}
