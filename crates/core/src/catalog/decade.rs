//! Decade buckets and ordering over catalog entries.
//!
//! A decade is identified by its start year and covers `[decade, decade + 10)`.
//! Bucket assignment uses `ceil(year / 10) * 10 - 10`, so a year that is an
//! exact multiple of ten lands in the preceding bucket (1990 -> 1980).

use std::collections::BTreeSet;

use super::TitleDetail;

/// Decade bucket for a release year.
///
/// Years whose bucket falls outside `i32` saturate at the nearest bound; use
/// [`checked_decade_of`] to reject them instead.
pub fn decade_of(year: i32) -> i32 {
    let decade = wide_decade(year);
    decade.clamp(i64::from(i32::MIN), i64::from(i32::MAX)) as i32
}

/// Decade bucket for a release year, or `None` if it does not fit in `i32`.
pub fn checked_decade_of(year: i32) -> Option<i32> {
    i32::try_from(wide_decade(year)).ok()
}

fn wide_decade(year: i32) -> i64 {
    ceil_div(i64::from(year), 10) * 10 - 10
}

fn ceil_div(n: i64, d: i64) -> i64 {
    let q = n.div_euclid(d);
    if n.rem_euclid(d) == 0 {
        q
    } else {
        q + 1
    }
}

/// Deduplicated decades for the given years, ascending.
pub fn decades_for<I>(years: I) -> Vec<i32>
where
    I: IntoIterator<Item = i32>,
{
    years
        .into_iter()
        .map(decade_of)
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

/// Stable ascending sort by year.
pub fn sort_by_year(mut titles: Vec<TitleDetail>) -> Vec<TitleDetail> {
    titles.sort_by_key(|t| t.year);
    titles
}

/// Titles with `decade <= year < decade + 10`, or every title when `decade` is `None`.
pub fn filter_by_decade(titles: &[TitleDetail], decade: Option<i32>) -> Vec<TitleDetail> {
    match decade {
        None => titles.to_vec(),
        Some(start) => {
            let start = i64::from(start);
            let end = start + 10;
            titles
                .iter()
                .filter(|t| (start..end).contains(&i64::from(t.year)))
                .cloned()
                .collect()
        }
    }
}
