//! The authenticated admin session.
//!
//! Signing in or out replaces the value and wakes every subscriber. List
//! controllers only read it to attribute mutation events.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tokio::sync::watch;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdminSession {
    pub user_id: String,
    pub name: String,
    pub email: String,
    pub role: String,
    pub signed_in_at: DateTime<Utc>,
}

impl AdminSession {
    pub fn new(
        user_id: impl Into<String>,
        name: impl Into<String>,
        email: impl Into<String>,
        role: impl Into<String>,
    ) -> Self {
        Self {
            user_id: user_id.into(),
            name: name.into(),
            email: email.into(),
            role: role.into(),
            signed_in_at: Utc::now(),
        }
    }
}

/// Shared holder of the current [`AdminSession`].
///
/// Cloning yields another handle to the same session.
#[derive(Clone)]
pub struct SessionContext {
    sender: std::sync::Arc<watch::Sender<Option<AdminSession>>>,
}

impl SessionContext {
    /// A context with nobody signed in.
    pub fn new() -> Self {
        let (sender, _) = watch::channel(None);
        Self {
            sender: std::sync::Arc::new(sender),
        }
    }

    pub fn signed_in(session: AdminSession) -> Self {
        let context = Self::new();
        context.sign_in(session);
        context
    }

    pub fn sign_in(&self, session: AdminSession) {
        tracing::info!(user_id = %session.user_id, "Admin signed in");
        self.sender.send_replace(Some(session));
    }

    pub fn sign_out(&self) {
        if let Some(previous) = self.sender.send_replace(None) {
            tracing::info!(user_id = %previous.user_id, "Admin signed out");
        }
    }

    pub fn current(&self) -> Option<AdminSession> {
        self.sender.borrow().clone()
    }

    /// User id of the signed-in admin, if any.
    pub fn actor(&self) -> Option<String> {
        self.sender.borrow().as_ref().map(|s| s.user_id.clone())
    }

    /// Receiver notified on every sign-in and sign-out.
    pub fn subscribe(&self) -> watch::Receiver<Option<AdminSession>> {
        self.sender.subscribe()
    }
}

impl Default for SessionContext {
    fn default() -> Self {
        Self::new()
    }
}
