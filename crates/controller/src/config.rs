//! Per-list settings.

use ballie_core::pagination::DEFAULT_PAGE_SIZE;

/// Placeholder rows shown while loading when nothing has been rendered yet.
pub const DEFAULT_SKELETON_ROWS: usize = 6;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListConfig {
    pub page_size: u32,
    pub skeleton_rows: usize,
    /// Used in notices, e.g. "User created".
    pub singular: String,
    /// Used in notices, e.g. "Failed to load users".
    pub plural: String,
}

impl ListConfig {
    pub fn new(singular: impl Into<String>, plural: impl Into<String>) -> Self {
        Self {
            page_size: DEFAULT_PAGE_SIZE,
            skeleton_rows: DEFAULT_SKELETON_ROWS,
            singular: singular.into(),
            plural: plural.into(),
        }
    }

    pub fn with_page_size(mut self, page_size: u32) -> Self {
        self.page_size = page_size.max(1);
        self
    }

    pub fn with_skeleton_rows(mut self, skeleton_rows: usize) -> Self {
        self.skeleton_rows = skeleton_rows;
        self
    }

    pub fn users() -> Self {
        Self::new("User", "users")
    }

    pub fn subscribers() -> Self {
        Self::new("Subscriber", "subscribers")
    }

    pub fn products() -> Self {
        Self::new("Product", "products")
    }

    pub fn posts() -> Self {
        Self::new("Post", "posts")
    }

    pub fn integrations() -> Self {
        Self::new("Integration", "integrations")
    }

    pub fn roles() -> Self {
        Self::new("Role", "roles")
    }

    pub fn plans() -> Self {
        Self::new("Plan", "plans")
    }
}
