//! List query state.
//!
//! [`QueryState`] is the mutable per-view state (search term, categorical
//! filters, current page). [`ListQuery`] is the immutable snapshot handed to a
//! data collaborator for one fetch.

use std::collections::{BTreeMap, HashMap};

use serde::{Deserialize, Serialize};

use crate::pagination::{clamp_page_size, DEFAULT_PAGE_SIZE};

/// Query-string key carrying the page number.
pub const PARAM_PAGE: &str = "page";
/// Query-string key carrying the page size.
pub const PARAM_LIMIT: &str = "limit";
/// Query-string key carrying the free-text search term.
pub const PARAM_SEARCH: &str = "q";

// ---------------------------------------------------------------------------
// ListQuery
// ---------------------------------------------------------------------------

/// One fetch request: everything a collaborator needs to produce a page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListQuery {
    pub page: u32,
    pub page_size: u32,
    pub search: String,
    /// Active categorical filters. Empty values are never stored.
    pub filters: BTreeMap<String, String>,
}

impl ListQuery {
    /// First page, no search, no filters.
    pub fn new(page_size: u32) -> Self {
        Self {
            page: 1,
            page_size,
            search: String::new(),
            filters: BTreeMap::new(),
        }
    }

    /// Value of a filter, if it is active.
    pub fn filter(&self, name: &str) -> Option<&str> {
        self.filters.get(name).map(String::as_str)
    }

    /// Parse raw query-string parameters.
    ///
    /// - `page` defaults to 1 and is never below 1.
    /// - `limit` defaults to [`DEFAULT_PAGE_SIZE`] and is clamped to the
    ///   accepted range.
    /// - `q` is kept verbatim; matching normalises it.
    /// - Any key listed in `allowed_filters` with a non-empty value becomes a
    ///   filter. Unknown keys are ignored.
    pub fn from_params(params: &HashMap<String, String>, allowed_filters: &[&str]) -> Self {
        let page = params
            .get(PARAM_PAGE)
            .and_then(|v| v.trim().parse::<u32>().ok())
            .unwrap_or(1)
            .max(1);
        let page_size = clamp_page_size(
            params
                .get(PARAM_LIMIT)
                .and_then(|v| v.trim().parse::<u32>().ok()),
        );
        let search = params.get(PARAM_SEARCH).cloned().unwrap_or_default();
        let filters = allowed_filters
            .iter()
            .filter_map(|name| {
                params
                    .get(*name)
                    .filter(|v| !v.trim().is_empty())
                    .map(|v| ((*name).to_string(), v.clone()))
            })
            .collect();

        Self {
            page,
            page_size,
            search,
            filters,
        }
    }

    /// Render as query-string pairs, the inverse of [`ListQuery::from_params`].
    pub fn to_params(&self) -> Vec<(String, String)> {
        let mut params = vec![
            (PARAM_PAGE.to_string(), self.page.to_string()),
            (PARAM_LIMIT.to_string(), self.page_size.to_string()),
        ];
        if !self.search.is_empty() {
            params.push((PARAM_SEARCH.to_string(), self.search.clone()));
        }
        params.extend(self.filters.iter().map(|(k, v)| (k.clone(), v.clone())));
        params
    }
}

impl Default for ListQuery {
    fn default() -> Self {
        Self::new(DEFAULT_PAGE_SIZE)
    }
}

// ---------------------------------------------------------------------------
// ResultPage
// ---------------------------------------------------------------------------

/// One page of rows plus the size of the whole filtered set.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResultPage<T> {
    pub items: Vec<T>,
    pub total: u64,
}

impl<T> ResultPage<T> {
    pub fn empty() -> Self {
        Self {
            items: Vec::new(),
            total: 0,
        }
    }
}

// ---------------------------------------------------------------------------
// QueryState
// ---------------------------------------------------------------------------

/// Mutable query state owned by one list view.
///
/// Changing the search term or any filter resets the page to 1, since the
/// previous offset means nothing in the new result set. Every setter reports
/// whether anything changed so callers can skip redundant fetches.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryState {
    search: String,
    filters: BTreeMap<String, String>,
    page: u32,
    page_size: u32,
}

impl QueryState {
    pub fn new(page_size: u32) -> Self {
        Self {
            search: String::new(),
            filters: BTreeMap::new(),
            page: 1,
            page_size: page_size.max(1),
        }
    }

    pub fn search(&self) -> &str {
        &self.search
    }

    pub fn filters(&self) -> &BTreeMap<String, String> {
        &self.filters
    }

    pub fn page(&self) -> u32 {
        self.page
    }

    pub fn page_size(&self) -> u32 {
        self.page_size
    }

    pub fn set_search(&mut self, term: impl Into<String>) -> bool {
        let term = term.into();
        if term == self.search {
            return false;
        }
        self.search = term;
        self.page = 1;
        true
    }

    /// Set a categorical filter. An empty value clears it.
    pub fn set_filter(&mut self, name: impl Into<String>, value: impl Into<String>) -> bool {
        let name = name.into();
        let value = value.into();
        let changed = if value.is_empty() {
            self.filters.remove(&name).is_some()
        } else {
            self.filters.insert(name, value.clone()) != Some(value)
        };
        if changed {
            self.page = 1;
        }
        changed
    }

    pub fn clear_filters(&mut self) -> bool {
        if self.filters.is_empty() {
            return false;
        }
        self.filters.clear();
        self.page = 1;
        true
    }

    /// Move to `page` (never below 1). Upper bounds are enforced by the
    /// page-bounds corrector once the total is known.
    pub fn set_page(&mut self, page: u32) -> bool {
        let page = page.max(1);
        if page == self.page {
            return false;
        }
        self.page = page;
        true
    }

    /// Snapshot for one fetch.
    pub fn to_query(&self) -> ListQuery {
        ListQuery {
            page: self.page,
            page_size: self.page_size,
            search: self.search.clone(),
            filters: self.filters.clone(),
        }
    }
}

impl Default for QueryState {
    fn default() -> Self {
        Self::new(DEFAULT_PAGE_SIZE)
    }
}
