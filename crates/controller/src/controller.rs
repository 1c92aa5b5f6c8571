//! The list controller.
//!
//! A [`ListController`] is a cheaply cloneable handle: every clone drives
//! the same list view. State lives behind one `tokio::sync::Mutex` that is
//! never held across a collaborator call.
//!
//! # Ordering
//!
//! Each fetch takes a [`FetchTicket`] with a sequence number. A response is
//! applied only if its ticket is still the latest one issued and the view is
//! still mounted; anything else is dropped.
//!
//! # Page bounds
//!
//! After a delete is acknowledged, and after every applied fetch, the page is
//! checked against `max(1, ceil(total / page_size))` and clamped (followed by
//! another fetch) when it points past the end.

use std::sync::Arc;

use chrono::Utc;
use tokio::sync::Mutex;
use tokio_util::sync::CancellationToken;

use ballie_core::collaborator::SharedCollaborator;
use ballie_core::error::CoreError;
use ballie_core::pagination::last_valid_page;
use ballie_core::query::{QueryState, ResultPage};
use ballie_core::resource::Resource;
use ballie_core::validation::FieldErrors;
use ballie_events::{AdminEvent, EventBus, MutationAction, SessionContext};

use crate::config::ListConfig;
use crate::confirm::DeleteConfirmation;
use crate::display::{DisplayPhase, DisplayRows};
use crate::drawer::{DrawerMode, DrawerState};
use crate::error::ControllerError;
use crate::fetch::{FetchOutcome, FetchSequencer, FetchTicket};
use crate::view::{ListBody, ListView};

// ---------------------------------------------------------------------------
// Context
// ---------------------------------------------------------------------------

/// Process-wide collaborators shared by every list view.
#[derive(Clone, Default)]
pub struct ListContext {
    pub bus: Arc<EventBus>,
    pub session: SessionContext,
}

impl ListContext {
    pub fn new(bus: Arc<EventBus>, session: SessionContext) -> Self {
        Self { bus, session }
    }
}

// ---------------------------------------------------------------------------
// Outcomes
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq)]
pub enum SubmitOutcome<T> {
    Created(T),
    Updated(T),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeleteOutcome {
    Deleted,
    /// The row was gone before the delete reached the collaborator.
    AlreadyGone,
}

// ---------------------------------------------------------------------------
// State
// ---------------------------------------------------------------------------

struct ListState<R: Resource> {
    query: QueryState,
    /// Query of the rendered rows; restored when a fetch fails.
    applied: QueryState,
    rows: DisplayRows<R::Row>,
    sequencer: FetchSequencer,
    /// At least one fetch has been applied.
    loaded: bool,
    error: Option<String>,
    drawer: Option<DrawerState<R::Draft>>,
    confirm: DeleteConfirmation<R::Row>,
}

impl<R: Resource> ListState<R> {
    fn new(page_size: u32) -> Self {
        Self {
            query: QueryState::new(page_size),
            applied: QueryState::new(page_size),
            rows: DisplayRows::new(),
            sequencer: FetchSequencer::default(),
            loaded: false,
            error: None,
            drawer: None,
            confirm: DeleteConfirmation::Idle,
        }
    }

    fn last_page(&self) -> u32 {
        last_valid_page(self.rows.total(), self.query.page_size())
    }

    fn submitting(&self) -> bool {
        self.drawer.as_ref().is_some_and(|d| d.submitting)
    }

    fn displayed(&self, id: &str) -> Option<R::Row> {
        self.rows.find(|row| R::id(row) == id).cloned()
    }
}

// ---------------------------------------------------------------------------
// ListController
// ---------------------------------------------------------------------------

pub struct ListController<R: Resource> {
    collaborator: SharedCollaborator<R>,
    config: Arc<ListConfig>,
    context: ListContext,
    state: Arc<Mutex<ListState<R>>>,
    cancel: CancellationToken,
}

impl<R: Resource> Clone for ListController<R> {
    fn clone(&self) -> Self {
        Self {
            collaborator: Arc::clone(&self.collaborator),
            config: Arc::clone(&self.config),
            context: self.context.clone(),
            state: Arc::clone(&self.state),
            cancel: self.cancel.clone(),
        }
    }
}

impl<R: Resource> ListController<R> {
    /// A controller with nothing fetched yet.
    pub fn new(collaborator: SharedCollaborator<R>, config: ListConfig, context: ListContext) -> Self {
        let state = ListState::new(config.page_size);
        Self {
            collaborator,
            config: Arc::new(config),
            context,
            state: Arc::new(Mutex::new(state)),
            cancel: CancellationToken::new(),
        }
    }

    /// Create the controller and run the initial fetch.
    pub async fn mount(
        collaborator: SharedCollaborator<R>,
        config: ListConfig,
        context: ListContext,
    ) -> Self {
        let controller = Self::new(collaborator, config, context);
        tracing::debug!(entity = R::ENTITY, "List view mounted");
        controller.refresh().await;
        controller
    }

    /// Stop applying responses. In-flight calls are abandoned and anything
    /// that resolves later is ignored.
    pub fn unmount(&self) {
        tracing::debug!(entity = R::ENTITY, "List view unmounted");
        self.cancel.cancel();
    }

    pub fn is_mounted(&self) -> bool {
        !self.cancel.is_cancelled()
    }

    pub fn config(&self) -> &ListConfig {
        &self.config
    }

    fn notify(&self, event: AdminEvent) {
        self.context.bus.publish(event);
    }

    fn announce(&self, action: MutationAction, id: &str) {
        self.notify(
            AdminEvent::mutation(action, R::ENTITY, id).with_actor(self.context.session.actor()),
        );
    }

    // -- fetching -----------------------------------------------------------

    /// Issue a ticket for the current query. Supersedes every earlier ticket.
    pub async fn begin_fetch(&self) -> FetchTicket {
        let mut state = self.state.lock().await;
        let query = state.query.to_query();
        let ticket = state.sequencer.issue(query);
        tracing::debug!(
            entity = R::ENTITY,
            seq = ticket.seq,
            page = ticket.query.page,
            "Issuing list request"
        );
        ticket
    }

    /// Apply (or discard) the response to `ticket`.
    pub async fn complete_fetch(
        &self,
        ticket: FetchTicket,
        result: Result<ResultPage<R::Row>, CoreError>,
    ) -> FetchOutcome {
        let mut state = self.state.lock().await;
        if self.cancel.is_cancelled() {
            tracing::debug!(entity = R::ENTITY, seq = ticket.seq, "Ignoring response after unmount");
            if state.sequencer.is_current(&ticket) {
                state.sequencer.abandon();
            }
            return FetchOutcome::Unmounted;
        }

        if !state.sequencer.resolve(&ticket) {
            tracing::debug!(
                entity = R::ENTITY,
                seq = ticket.seq,
                latest = state.sequencer.latest(),
                "Discarding stale list response"
            );
            return FetchOutcome::Stale;
        }

        match result {
            Ok(page) => {
                let total = page.total;
                let last = last_valid_page(total, state.query.page_size());
                if state.query.page() > last {
                    // Rows vanished elsewhere; do not render a false empty page.
                    tracing::debug!(
                        entity = R::ENTITY,
                        page = state.query.page(),
                        last,
                        "Page out of bounds, clamping"
                    );
                    state.query.set_page(last);
                    return FetchOutcome::PageCorrected { total, page: last };
                }
                state.rows.reconcile(page.items, total);
                state.applied = state.query.clone();
                state.loaded = true;
                state.error = None;
                FetchOutcome::Applied { total }
            }
            Err(e) => {
                state.error = Some(e.to_string());
                if state.loaded {
                    state.query = state.applied.clone();
                }
                drop(state);
                tracing::warn!(entity = R::ENTITY, error = %e, "List request failed");
                self.notify(AdminEvent::error(format!(
                    "Failed to load {}",
                    self.config.plural
                )));
                FetchOutcome::Failed(e)
            }
        }
    }

    /// Fetch the current query, following page corrections until a response
    /// is rendered, superseded, or fails.
    pub async fn refresh(&self) -> FetchOutcome {
        loop {
            let ticket = self.begin_fetch().await;
            let result = tokio::select! {
                _ = self.cancel.cancelled() => {
                    let mut state = self.state.lock().await;
                    if state.sequencer.is_current(&ticket) {
                        state.sequencer.abandon();
                    }
                    return FetchOutcome::Unmounted;
                }
                result = self.collaborator.list(&ticket.query) => result,
            };
            match self.complete_fetch(ticket, result).await {
                FetchOutcome::PageCorrected { .. } => continue,
                outcome => return outcome,
            }
        }
    }

    // -- query state --------------------------------------------------------

    /// Change the search term. Resets the page to 1.
    pub async fn set_search(&self, term: impl Into<String>) -> FetchOutcome {
        let changed = self.state.lock().await.query.set_search(term);
        self.refetch_if(changed).await
    }

    /// Set one categorical filter; an empty value clears it. Resets the page
    /// to 1.
    pub async fn set_filter(&self, name: &str, value: impl Into<String>) -> FetchOutcome {
        let changed = self.state.lock().await.query.set_filter(name, value);
        self.refetch_if(changed).await
    }

    pub async fn clear_filters(&self) -> FetchOutcome {
        let changed = self.state.lock().await.query.clear_filters();
        self.refetch_if(changed).await
    }

    pub async fn set_page(&self, page: u32) -> FetchOutcome {
        let changed = self.state.lock().await.query.set_page(page);
        self.refetch_if(changed).await
    }

    pub async fn next_page(&self) -> FetchOutcome {
        let next = {
            let state = self.state.lock().await;
            (state.query.page() < state.last_page()).then(|| state.query.page() + 1)
        };
        match next {
            Some(page) => self.set_page(page).await,
            None => FetchOutcome::Unchanged,
        }
    }

    pub async fn prev_page(&self) -> FetchOutcome {
        let prev = {
            let state = self.state.lock().await;
            (state.query.page() > 1).then(|| state.query.page() - 1)
        };
        match prev {
            Some(page) => self.set_page(page).await,
            None => FetchOutcome::Unchanged,
        }
    }

    async fn refetch_if(&self, changed: bool) -> FetchOutcome {
        if changed {
            self.refresh().await
        } else {
            FetchOutcome::Unchanged
        }
    }

    // -- drawer -------------------------------------------------------------

    /// Open an empty create drawer. `Busy` while a submit is in flight.
    pub async fn open_create(&self) -> Result<(), ControllerError> {
        let mut state = self.state.lock().await;
        if state.submitting() {
            return Err(ControllerError::Busy);
        }
        state.drawer = Some(DrawerState::create(R::Draft::default()));
        Ok(())
    }

    /// Open the edit drawer on a staging copy of row `id`.
    ///
    /// Uses the displayed row when present and asks the collaborator
    /// otherwise. `Busy` while a submit is in flight.
    pub async fn open_edit(&self, id: &str) -> Result<(), ControllerError> {
        let cached = {
            let state = self.state.lock().await;
            if state.submitting() {
                return Err(ControllerError::Busy);
            }
            state.displayed(id)
        };
        let row = match cached {
            Some(row) => row,
            None => self.view_details(id).await?,
        };
        let mut state = self.state.lock().await;
        if state.submitting() {
            return Err(ControllerError::Busy);
        }
        state.drawer = Some(DrawerState::edit(id, R::to_draft(&row)));
        Ok(())
    }

    /// Edit the open draft in place. Returns `false` when no drawer is open
    /// or its draft is being submitted.
    pub async fn update_draft(&self, edit: impl FnOnce(&mut R::Draft)) -> bool {
        match self.state.lock().await.drawer.as_mut() {
            Some(drawer) if !drawer.submitting => {
                edit(&mut drawer.draft);
                true
            }
            _ => false,
        }
    }

    /// Discard the drawer and its draft. Returns `false` when no drawer is
    /// open or its draft is being submitted.
    pub async fn close_drawer(&self) -> bool {
        let mut state = self.state.lock().await;
        if state.submitting() {
            return false;
        }
        state.drawer.take().is_some()
    }

    /// Validate and submit the open drawer.
    ///
    /// Field errors stop the submit before the collaborator is called. On any
    /// failure the drawer stays open with the draft intact.
    pub async fn submit(&self) -> Result<SubmitOutcome<R::Row>, ControllerError> {
        let (mode, draft) = {
            let mut state = self.state.lock().await;
            let drawer = state.drawer.as_mut().ok_or(ControllerError::DrawerClosed)?;
            if drawer.submitting {
                return Err(ControllerError::Busy);
            }
            let errors = R::validate(&drawer.draft);
            if !errors.is_empty() {
                tracing::debug!(entity = R::ENTITY, %errors, "Drawer validation failed");
                drawer.errors = errors.clone();
                return Err(CoreError::Validation(errors).into());
            }
            drawer.errors = FieldErrors::new();
            drawer.submitting = true;
            (drawer.mode.clone(), drawer.draft.clone())
        };

        match mode {
            DrawerMode::Create => self.submit_create(draft).await,
            DrawerMode::Edit { id } => self.submit_update(id, draft).await,
        }
    }

    async fn submit_create(
        &self,
        draft: R::Draft,
    ) -> Result<SubmitOutcome<R::Row>, ControllerError> {
        let result = tokio::select! {
            _ = self.cancel.cancelled() => return Err(ControllerError::Unmounted),
            result = self.collaborator.create(&draft) => result,
        };

        match result {
            Ok(row) => {
                {
                    let mut state = self.state.lock().await;
                    state.drawer = None;
                    state.query.set_page(1);
                }
                tracing::info!(entity = R::ENTITY, id = R::id(&row), "Row created");
                self.notify(AdminEvent::success(format!("{} created", self.config.singular)));
                self.announce(MutationAction::Created, R::id(&row));
                self.refresh().await;
                Ok(SubmitOutcome::Created(row))
            }
            Err(e) => Err(self.submit_failed(e, "create").await),
        }
    }

    async fn submit_update(
        &self,
        id: String,
        draft: R::Draft,
    ) -> Result<SubmitOutcome<R::Row>, ControllerError> {
        // Optimistic patch of the displayed row, remembered for rollback.
        let rollback = {
            let mut state = self.state.lock().await;
            match state.displayed(&id) {
                Some(mut patched) => {
                    R::apply(&mut patched, &draft, Utc::now());
                    let before = state.rows.patch(|row| R::id(row) == id.as_str(), patched);
                    let revision = state.rows.revision();
                    before.map(|before| (before, revision))
                }
                None => None,
            }
        };

        let result = tokio::select! {
            _ = self.cancel.cancelled() => return Err(ControllerError::Unmounted),
            result = self.collaborator.update(&id, &draft) => result,
        };

        match result {
            Ok(row) => {
                {
                    let mut state = self.state.lock().await;
                    state.drawer = None;
                    state.rows.patch(|r| R::id(r) == id.as_str(), row.clone());
                }
                tracing::info!(entity = R::ENTITY, id = %id, "Row updated");
                self.notify(AdminEvent::success(format!("{} updated", self.config.singular)));
                self.announce(MutationAction::Updated, &id);
                self.refresh().await;
                Ok(SubmitOutcome::Updated(row))
            }
            Err(e) => {
                if let Some((before, revision)) = rollback {
                    self.state.lock().await.rows.rollback(before, revision);
                }
                let not_found = e.is_not_found();
                let err = self.submit_failed(e, "update").await;
                if not_found {
                    self.refresh().await;
                }
                Err(err)
            }
        }
    }

    /// Re-enable the drawer after a failed submit and tell the user.
    async fn submit_failed(&self, error: CoreError, verb: &str) -> ControllerError {
        {
            let mut state = self.state.lock().await;
            if let Some(drawer) = state.drawer.as_mut() {
                drawer.submitting = false;
                if let CoreError::Validation(errors) = &error {
                    drawer.errors = errors.clone();
                }
            }
        }
        tracing::warn!(entity = R::ENTITY, verb, error = %error, "Submit failed");
        let message = if error.is_not_found() {
            format!("{} no longer exists", self.config.singular)
        } else {
            format!("Failed to {verb} {}: {error}", self.config.singular.to_lowercase())
        };
        self.notify(AdminEvent::error(message));
        error.into()
    }

    // -- delete -------------------------------------------------------------

    /// Stage row `id` for deletion, replacing any staged target.
    ///
    /// Returns the replaced target, if there was one.
    pub async fn request_delete(&self, id: &str) -> Result<Option<R::Row>, ControllerError> {
        let mut state = self.state.lock().await;
        if state.confirm.is_pending() {
            return Err(ControllerError::Busy);
        }
        let row = state
            .displayed(id)
            .ok_or_else(|| CoreError::not_found(R::ENTITY, id))?;
        Ok(state.confirm.request(row))
    }

    /// Close the confirmation without deleting. Returns `false` when nothing
    /// was staged or the delete is already in flight.
    pub async fn cancel_delete(&self) -> bool {
        let mut state = self.state.lock().await;
        if state.confirm.is_pending() {
            return false;
        }
        state.confirm.cancel().is_some()
    }

    /// Delete the staged target.
    ///
    /// A row that is already gone counts as deleted. On any other failure the
    /// confirmation stays open on the same target.
    pub async fn confirm_delete(&self) -> Result<DeleteOutcome, ControllerError> {
        let target = {
            let mut state = self.state.lock().await;
            if state.confirm.is_pending() {
                return Err(ControllerError::Busy);
            }
            let target = state
                .confirm
                .target()
                .cloned()
                .ok_or(ControllerError::NothingToConfirm)?;
            state.confirm.set_pending(true);
            target
        };
        let id = R::id(&target).to_string();

        let result = tokio::select! {
            _ = self.cancel.cancelled() => return Err(ControllerError::Unmounted),
            result = self.collaborator.delete(&id) => result,
        };

        let outcome = match result {
            Ok(()) => DeleteOutcome::Deleted,
            Err(e) if e.is_not_found() => DeleteOutcome::AlreadyGone,
            Err(e) => {
                self.state.lock().await.confirm.set_pending(false);
                tracing::warn!(entity = R::ENTITY, id = %id, error = %e, "Delete failed");
                self.notify(AdminEvent::error(format!(
                    "Failed to delete {}: {e}",
                    self.config.singular.to_lowercase()
                )));
                return Err(e.into());
            }
        };

        {
            let mut state = self.state.lock().await;
            state.confirm.cancel();
            let total = state.rows.total().saturating_sub(1);
            let last = last_valid_page(total, state.query.page_size());
            if state.query.page() > last {
                tracing::debug!(entity = R::ENTITY, page = state.query.page(), last, "Snapping page after delete");
                state.query.set_page(last);
            }
        }

        match outcome {
            DeleteOutcome::Deleted => {
                tracing::info!(entity = R::ENTITY, id = %id, "Row deleted");
                self.notify(AdminEvent::success(format!("{} deleted", self.config.singular)));
                self.announce(MutationAction::Deleted, &id);
            }
            DeleteOutcome::AlreadyGone => {
                self.notify(AdminEvent::info(format!(
                    "{} was already deleted",
                    self.config.singular
                )));
            }
        }
        self.refresh().await;
        Ok(outcome)
    }

    // -- details ------------------------------------------------------------

    /// Fetch one row for the details view.
    pub async fn view_details(&self, id: &str) -> Result<R::Row, ControllerError> {
        let result = tokio::select! {
            _ = self.cancel.cancelled() => return Err(ControllerError::Unmounted),
            result = self.collaborator.get(id) => result,
        };
        match result {
            Ok(row) => Ok(row),
            Err(e) => {
                tracing::warn!(entity = R::ENTITY, id, error = %e, "Loading details failed");
                if e.is_not_found() {
                    self.notify(AdminEvent::info(format!(
                        "{} no longer exists",
                        self.config.singular
                    )));
                    self.refresh().await;
                } else {
                    self.notify(AdminEvent::error(format!(
                        "Failed to load {}",
                        self.config.singular.to_lowercase()
                    )));
                }
                Err(e.into())
            }
        }
    }

    // -- presentation -------------------------------------------------------

    pub async fn snapshot(&self) -> ListView<R::Row, R::Draft> {
        let state = self.state.lock().await;
        let page_count = state.last_page();
        let page = state.query.page();

        let fetching = state.sequencer.in_flight();
        let optimistic = state.rows.phase() == DisplayPhase::Optimistic;
        let body = if !state.loaded && !fetching && state.error.is_some() {
            ListBody::Failed {
                message: state.error.clone().unwrap_or_default(),
            }
        } else if (fetching && !optimistic) || !state.loaded {
            let previous = state.rows.items().len();
            ListBody::Loading {
                skeleton_rows: if previous > 0 {
                    previous
                } else {
                    self.config.skeleton_rows
                },
            }
        } else if state.rows.items().is_empty() {
            ListBody::Empty
        } else {
            ListBody::Rows {
                items: state.rows.items().to_vec(),
                phase: state.rows.phase(),
            }
        };

        ListView {
            body,
            search: state.query.search().to_string(),
            filters: state.query.filters().clone(),
            page,
            page_count,
            total: state.rows.total(),
            has_prev: page > 1,
            has_next: page < page_count,
            drawer: state.drawer.clone(),
            confirm: state.confirm.target().cloned(),
            error: state.error.clone(),
        }
    }
}
