//! Shared helpers for controller tests.

#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::{Duration, Utc};
use tokio::sync::{broadcast, Notify};

use ballie_controller::{ListConfig, ListContext, ListController};
use ballie_core::collaborator::Collaborator;
use ballie_core::error::CoreError;
use ballie_core::query::{ListQuery, ResultPage};
use ballie_core::resource::Resource;
use ballie_core::resources::user::{User, UserDraft};
use ballie_core::resources::Users;
use ballie_db::MemoryStore;
use ballie_events::{AdminEvent, NoticeLevel};

// ---------------------------------------------------------------------------
// Scripted collaborator
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Op {
    List,
    Get,
    Create,
    Update,
    Delete,
}

/// A [`MemoryStore`] wrapper that counts calls, can fail the next call of a
/// given kind, and can hold list or update calls until released.
pub struct ScriptedCollaborator<R: Resource> {
    pub store: MemoryStore<R>,
    calls: Mutex<HashMap<Op, usize>>,
    failures: Mutex<HashMap<Op, CoreError>>,
    /// List calls whose search term has a gate wait for it.
    list_gates: Mutex<HashMap<String, Arc<Notify>>>,
    update_gate: Mutex<Option<Arc<Notify>>>,
    pub lists_started: AtomicUsize,
}

impl<R: Resource> ScriptedCollaborator<R> {
    pub fn new(store: MemoryStore<R>) -> Self {
        Self {
            store,
            calls: Mutex::new(HashMap::new()),
            failures: Mutex::new(HashMap::new()),
            list_gates: Mutex::new(HashMap::new()),
            update_gate: Mutex::new(None),
            lists_started: AtomicUsize::new(0),
        }
    }

    pub fn calls(&self, op: Op) -> usize {
        self.calls.lock().unwrap().get(&op).copied().unwrap_or(0)
    }

    pub fn fail_next(&self, op: Op, error: CoreError) {
        self.failures.lock().unwrap().insert(op, error);
    }

    /// Hold list calls for `search` until the returned handle is notified.
    pub fn gate_list(&self, search: &str) -> Arc<Notify> {
        let gate = Arc::new(Notify::new());
        self.list_gates
            .lock()
            .unwrap()
            .insert(search.to_string(), Arc::clone(&gate));
        gate
    }

    pub fn gate_update(&self) -> Arc<Notify> {
        let gate = Arc::new(Notify::new());
        *self.update_gate.lock().unwrap() = Some(Arc::clone(&gate));
        gate
    }

    fn record(&self, op: Op) -> Result<(), CoreError> {
        *self.calls.lock().unwrap().entry(op).or_default() += 1;
        match self.failures.lock().unwrap().remove(&op) {
            Some(error) => Err(error),
            None => Ok(()),
        }
    }
}

#[async_trait]
impl<R: Resource> Collaborator<R> for ScriptedCollaborator<R> {
    async fn list(&self, query: &ListQuery) -> Result<ResultPage<R::Row>, CoreError> {
        self.lists_started.fetch_add(1, Ordering::SeqCst);
        let gate = self.list_gates.lock().unwrap().get(&query.search).cloned();
        if let Some(gate) = gate {
            gate.notified().await;
        }
        self.record(Op::List)?;
        self.store.list(query).await
    }

    async fn get(&self, id: &str) -> Result<R::Row, CoreError> {
        self.record(Op::Get)?;
        self.store.get(id).await
    }

    async fn create(&self, draft: &R::Draft) -> Result<R::Row, CoreError> {
        self.record(Op::Create)?;
        self.store.create(draft).await
    }

    async fn update(&self, id: &str, draft: &R::Draft) -> Result<R::Row, CoreError> {
        let gate = self.update_gate.lock().unwrap().take();
        if let Some(gate) = gate {
            gate.notified().await;
        }
        self.record(Op::Update)?;
        self.store.update(id, draft).await
    }

    async fn delete(&self, id: &str) -> Result<(), CoreError> {
        self.record(Op::Delete)?;
        self.store.delete(id).await
    }
}

// ---------------------------------------------------------------------------
// Fixtures
// ---------------------------------------------------------------------------

pub fn user_draft(name: &str, email: &str) -> UserDraft {
    UserDraft {
        name: name.into(),
        email: email.into(),
        ..UserDraft::default()
    }
}

/// `n` users with ids `U000..`, where `U000` is the oldest.
pub fn users(n: usize) -> Vec<User> {
    let base = Utc::now() - Duration::days(n as i64 + 1);
    (0..n)
        .map(|i| {
            Users::build(
                format!("U{i:03}"),
                &user_draft(&format!("User {i}"), &format!("user{i}@example.com")),
                base + Duration::days(i as i64),
            )
        })
        .collect()
}

pub struct Harness {
    pub collaborator: Arc<ScriptedCollaborator<Users>>,
    pub controller: ListController<Users>,
    pub events: broadcast::Receiver<AdminEvent>,
}

/// A mounted users list over `n` rows, page size 10.
pub async fn mounted(n: usize) -> Harness {
    let harness = unmounted(n);
    harness.controller.refresh().await;
    harness
}

/// A users list over `n` rows that has not fetched anything yet.
pub fn unmounted(n: usize) -> Harness {
    let collaborator = Arc::new(ScriptedCollaborator::new(MemoryStore::with_rows(users(n))));
    let context = ListContext::default();
    let events = context.bus.subscribe();
    let controller = ListController::new(
        Arc::clone(&collaborator) as Arc<dyn Collaborator<Users>>,
        ListConfig::users(),
        context,
    );
    Harness {
        collaborator,
        controller,
        events,
    }
}

/// Every notice published so far.
pub fn drain_notices(events: &mut broadcast::Receiver<AdminEvent>) -> Vec<(NoticeLevel, String)> {
    let mut notices = Vec::new();
    while let Ok(event) = events.try_recv() {
        if let Some((level, message)) = event.as_notice() {
            notices.push((level, message.to_string()));
        }
    }
    notices
}

/// Every event published so far.
pub fn drain(events: &mut broadcast::Receiver<AdminEvent>) -> Vec<AdminEvent> {
    let mut all = Vec::new();
    while let Ok(event) = events.try_recv() {
        all.push(event);
    }
    all
}

/// Ids of the rendered rows.
pub async fn shown_ids(controller: &ListController<Users>) -> Vec<String> {
    controller
        .snapshot()
        .await
        .body
        .items()
        .iter()
        .map(|u| u.id.clone())
        .collect()
}

/// Wait until `n` list calls have started.
pub async fn wait_for_lists(collaborator: &ScriptedCollaborator<Users>, n: usize) {
    while collaborator.lists_started.load(Ordering::SeqCst) < n {
        tokio::task::yield_now().await;
    }
}
