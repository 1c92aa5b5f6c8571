//! In-memory collection for one resource.

use std::time::Duration;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;

use ballie_core::collaborator::Collaborator;
use ballie_core::error::CoreError;
use ballie_core::pagination::slice_page;
use ballie_core::query::{ListQuery, ResultPage};
use ballie_core::resource::Resource;
use ballie_core::search::matches_query;

/// Rows of one resource, kept newest first.
///
/// Every collaborator call optionally sleeps for a fixed latency first so
/// that loading states and request races can be observed locally.
pub struct MemoryStore<R: Resource> {
    rows: RwLock<Vec<R::Row>>,
    latency: Duration,
}

impl<R: Resource> MemoryStore<R> {
    pub fn new() -> Self {
        Self::with_rows(Vec::new())
    }

    /// A store pre-populated with `rows` (re-sorted newest first).
    pub fn with_rows(mut rows: Vec<R::Row>) -> Self {
        sort_newest_first::<R>(&mut rows);
        Self {
            rows: RwLock::new(rows),
            latency: Duration::ZERO,
        }
    }

    /// Delay every collaborator call by `latency`.
    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = latency;
        self
    }

    pub async fn len(&self) -> usize {
        self.rows.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.rows.read().await.is_empty()
    }

    /// Copy of every row, newest first.
    pub async fn all(&self) -> Vec<R::Row> {
        self.rows.read().await.clone()
    }

    async fn simulate_latency(&self) {
        if !self.latency.is_zero() {
            tokio::time::sleep(self.latency).await;
        }
    }
}

impl<R: Resource> Default for MemoryStore<R> {
    fn default() -> Self {
        Self::new()
    }
}

fn sort_newest_first<R: Resource>(rows: &mut [R::Row]) {
    rows.sort_by_key(|row| std::cmp::Reverse(R::created_at(row)));
}

fn reject_invalid<R: Resource>(draft: &R::Draft) -> Result<(), CoreError> {
    let errors = R::validate(draft);
    if !errors.is_empty() {
        tracing::debug!(entity = R::ENTITY, %errors, "Rejected invalid draft");
    }
    errors.into_result()
}

#[async_trait]
impl<R: Resource> Collaborator<R> for MemoryStore<R> {
    async fn list(&self, query: &ListQuery) -> Result<ResultPage<R::Row>, CoreError> {
        self.simulate_latency().await;
        let rows = self.rows.read().await;
        let matching: Vec<R::Row> = rows
            .iter()
            .filter(|row| matches_query::<R>(row, query))
            .cloned()
            .collect();

        Ok(ResultPage {
            total: matching.len() as u64,
            items: slice_page(&matching, query.page, query.page_size),
        })
    }

    async fn get(&self, id: &str) -> Result<R::Row, CoreError> {
        self.simulate_latency().await;
        self.rows
            .read()
            .await
            .iter()
            .find(|row| R::id(row) == id)
            .cloned()
            .ok_or_else(|| CoreError::not_found(R::ENTITY, id))
    }

    async fn create(&self, draft: &R::Draft) -> Result<R::Row, CoreError> {
        self.simulate_latency().await;
        reject_invalid::<R>(draft)?;

        let row = R::build(uuid::Uuid::new_v4().to_string(), draft, Utc::now());
        self.rows.write().await.insert(0, row.clone());
        tracing::debug!(entity = R::ENTITY, id = R::id(&row), "Row created");
        Ok(row)
    }

    async fn update(&self, id: &str, draft: &R::Draft) -> Result<R::Row, CoreError> {
        self.simulate_latency().await;
        reject_invalid::<R>(draft)?;

        let mut rows = self.rows.write().await;
        let row = rows
            .iter_mut()
            .find(|row| R::id(row) == id)
            .ok_or_else(|| CoreError::not_found(R::ENTITY, id))?;
        R::apply(row, draft, Utc::now());
        tracing::debug!(entity = R::ENTITY, id, "Row updated");
        Ok(row.clone())
    }

    async fn delete(&self, id: &str) -> Result<(), CoreError> {
        self.simulate_latency().await;
        let mut rows = self.rows.write().await;
        let before = rows.len();
        rows.retain(|row| R::id(row) != id);
        if rows.len() == before {
            return Err(CoreError::not_found(R::ENTITY, id));
        }
        tracing::debug!(entity = R::ENTITY, id, "Row deleted");
        Ok(())
    }
}
