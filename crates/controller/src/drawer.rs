//! Create/edit drawer state.
//!
//! The drawer holds a staging copy of a row (or an empty template) plus the
//! field errors from the last submit attempt. Nothing is written back until
//! submit succeeds; closing discards the draft.

use ballie_core::types::RowId;
use ballie_core::validation::FieldErrors;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DrawerMode {
    Create,
    Edit { id: RowId },
}

#[derive(Debug, Clone, PartialEq)]
pub struct DrawerState<D> {
    pub mode: DrawerMode,
    pub draft: D,
    pub errors: FieldErrors,
    pub submitting: bool,
}

impl<D> DrawerState<D> {
    pub fn create(draft: D) -> Self {
        Self {
            mode: DrawerMode::Create,
            draft,
            errors: FieldErrors::new(),
            submitting: false,
        }
    }

    pub fn edit(id: impl Into<RowId>, draft: D) -> Self {
        Self {
            mode: DrawerMode::Edit { id: id.into() },
            draft,
            errors: FieldErrors::new(),
            submitting: false,
        }
    }

    pub fn is_edit(&self) -> bool {
        matches!(self.mode, DrawerMode::Edit { .. })
    }
}
