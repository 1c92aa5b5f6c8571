//! Response envelope types shared by handlers.

use serde::{Deserialize, Serialize};

/// One page of a resource collection: `{ items, total, page, limit }`.
///
/// `total` counts every row matching the search and filters, not just the
/// rows on this page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ListResponse<T> {
    pub items: Vec<T>,
    pub total: u64,
    pub page: u32,
    pub limit: u32,
}
