//! The data collaborator contract.
//!
//! A collaborator is whatever actually holds the rows: the in-memory store
//! used in mock mode, or the HTTP client talking to the admin API. The list
//! controller holds one behind an `Arc<dyn Collaborator<R>>` and never knows
//! which.

use std::sync::Arc;

use async_trait::async_trait;

use crate::error::CoreError;
use crate::query::{ListQuery, ResultPage};
use crate::resource::Resource;

/// Shared, type-erased collaborator handle.
pub type SharedCollaborator<R> = Arc<dyn Collaborator<R>>;

/// CRUD operations on one resource collection.
///
/// Failures use the [`CoreError`] taxonomy: `Validation` for rejected
/// drafts, `NotFound` for ids that no longer exist, and `Collaborator` for
/// anything transport- or backend-related.
#[async_trait]
pub trait Collaborator<R: Resource>: Send + Sync {
    /// One page of rows matching `query`, newest first, plus the filtered total.
    async fn list(&self, query: &ListQuery) -> Result<ResultPage<R::Row>, CoreError>;

    async fn get(&self, id: &str) -> Result<R::Row, CoreError>;

    /// Insert a new row. The collaborator assigns the id and timestamps.
    async fn create(&self, draft: &R::Draft) -> Result<R::Row, CoreError>;

    /// Replace the editable fields of an existing row.
    async fn update(&self, id: &str, draft: &R::Draft) -> Result<R::Row, CoreError>;

    async fn delete(&self, id: &str) -> Result<(), CoreError>;
}
