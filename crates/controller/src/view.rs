//! Presentation snapshot of a list view.

use std::collections::BTreeMap;

use crate::display::DisplayPhase;
use crate::drawer::DrawerState;

/// What the table area shows.
#[derive(Debug, Clone, PartialEq)]
pub enum ListBody<T> {
    /// A fetch is in flight; render this many placeholder rows.
    Loading { skeleton_rows: usize },
    /// Nothing has been rendered yet and the last fetch failed.
    Failed { message: String },
    /// The last applied fetch matched nothing.
    Empty,
    Rows { items: Vec<T>, phase: DisplayPhase },
}

impl<T> ListBody<T> {
    pub fn is_loading(&self) -> bool {
        matches!(self, Self::Loading { .. })
    }

    pub fn items(&self) -> &[T] {
        match self {
            Self::Rows { items, .. } => items,
            _ => &[],
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ListView<T, D> {
    pub body: ListBody<T>,
    pub search: String,
    pub filters: BTreeMap<String, String>,
    pub page: u32,
    pub page_count: u32,
    pub total: u64,
    pub has_prev: bool,
    pub has_next: bool,
    pub drawer: Option<DrawerState<D>>,
    /// Row awaiting delete confirmation.
    pub confirm: Option<T>,
    /// Message from the last failed fetch, cleared by the next applied one.
    pub error: Option<String>,
}
