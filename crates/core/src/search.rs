//! Free-text search and categorical filter matching.

use crate::query::ListQuery;
use crate::resource::Resource;

/// Trim and lowercase a raw search term.
pub fn normalize_term(term: &str) -> String {
    term.trim().to_lowercase()
}

/// Whether any of `fields` contains the already-normalised `term`.
///
/// An empty term matches everything.
pub fn matches_term(fields: &[&str], term: &str) -> bool {
    term.is_empty()
        || fields
            .iter()
            .any(|field| field.to_lowercase().contains(term))
}

/// Whether `row` passes the search term and every active filter of `query`.
///
/// Filters are exact matches against the row's wire value. A filter the
/// resource does not know about is ignored.
pub fn matches_query<R: Resource>(row: &R::Row, query: &ListQuery) -> bool {
    let term = normalize_term(&query.search);
    if !matches_term(&R::search_fields(row), &term) {
        return false;
    }
    query
        .filters
        .iter()
        .filter(|(name, _)| R::FILTERS.contains(&name.as_str()))
        .all(|(name, value)| R::filter_value(row, name) == Some(value.as_str()))
}
