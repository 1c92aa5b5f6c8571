//! Page arithmetic for list views.
//!
//! Pages are 1-based. A result set always has at least one page, even when it
//! is empty, so `page = 1` is valid for every total.

/// Rows per page used by every list view.
pub const DEFAULT_PAGE_SIZE: u32 = 10;

/// Upper bound accepted from clients for the `limit` parameter.
pub const MAX_PAGE_SIZE: u32 = 100;

/// Highest page that still addresses at least one row of `total`.
///
/// Returns `max(1, ceil(total / page_size))`. A zero page size is treated as
/// a single page.
pub fn last_valid_page(total: u64, page_size: u32) -> u32 {
    if page_size == 0 {
        return 1;
    }
    let pages = total.div_ceil(u64::from(page_size)).max(1);
    u32::try_from(pages).unwrap_or(u32::MAX)
}

/// Clamp `page` into `1..=last_valid_page(total, page_size)`.
pub fn clamp_page(page: u32, total: u64, page_size: u32) -> u32 {
    page.clamp(1, last_valid_page(total, page_size))
}

/// Index of the first row of `page` in the full result set.
pub fn page_offset(page: u32, page_size: u32) -> usize {
    let page = page.max(1) as usize;
    (page - 1).saturating_mul(page_size as usize)
}

/// Clamp a client-provided page size to `1..=MAX_PAGE_SIZE`.
pub fn clamp_page_size(page_size: Option<u32>) -> u32 {
    page_size
        .unwrap_or(DEFAULT_PAGE_SIZE)
        .clamp(1, MAX_PAGE_SIZE)
}

/// Copy out the rows of `page` from an already-filtered, already-sorted set.
pub fn slice_page<T: Clone>(items: &[T], page: u32, page_size: u32) -> Vec<T> {
    let start = page_offset(page, page_size).min(items.len());
    let end = start.saturating_add(page_size as usize).min(items.len());
    items[start..end].to_vec()
}
