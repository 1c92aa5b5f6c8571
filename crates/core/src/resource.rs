//! The per-resource configuration surface.
//!
//! Every list view (users, subscribers, products, posts, integrations, roles,
//! plans) runs the same controller. What differs between them is captured by
//! one [`Resource`] implementation: the row and edit-model types, the
//! collection path, the filters it understands, the fields free-text search
//! looks at, the validation rules, and how a submitted edit model becomes a
//! stored row.

use std::fmt::Debug;

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::types::{RowId, Timestamp};
use crate::validation::{evaluate_model, FieldErrors, RuleSet};

pub trait Resource: Send + Sync + 'static {
    /// A stored record as displayed in the list.
    type Row: Clone + Debug + PartialEq + Serialize + DeserializeOwned + Send + Sync + 'static;

    /// The staging copy edited in the create/edit drawer.
    type Draft: Clone
        + Debug
        + Default
        + PartialEq
        + Serialize
        + DeserializeOwned
        + Send
        + Sync
        + 'static;

    /// Display name used in errors and notices, e.g. `"User"`.
    const ENTITY: &'static str;

    /// Collection path below the API root, e.g. `"blog/posts"`.
    const PATH: &'static str;

    /// Names of the categorical filters this resource understands.
    const FILTERS: &'static [&'static str] = &[];

    fn id(row: &Self::Row) -> &str;

    /// Creation time; lists are ordered newest first by this value.
    fn created_at(row: &Self::Row) -> Timestamp;

    /// Fields matched (case-insensitively) by the free-text search term.
    fn search_fields(row: &Self::Row) -> Vec<&str>;

    /// Current value of a categorical filter field, as its wire string.
    fn filter_value<'a>(_row: &'a Self::Row, _filter: &str) -> Option<&'a str> {
        None
    }

    /// Field rules checked before any create or update.
    fn rules() -> RuleSet;

    /// Run [`Resource::rules`] against a draft.
    fn validate(draft: &Self::Draft) -> FieldErrors {
        evaluate_model(&Self::rules(), draft)
    }

    /// Staging copy of an existing row for the edit drawer.
    fn to_draft(row: &Self::Row) -> Self::Draft;

    /// Materialize a new row from a validated draft.
    fn build(id: RowId, draft: &Self::Draft, now: Timestamp) -> Self::Row;

    /// Overwrite the editable fields of `row` from a validated draft.
    ///
    /// The id and creation time are preserved.
    fn apply(row: &mut Self::Row, draft: &Self::Draft, now: Timestamp);
}
