//! In-process event bus backed by a `tokio::sync::broadcast` channel.
//!
//! [`EventBus`] carries every [`AdminEvent`]: user-facing notices (the toast
//! surface) and mutation events emitted after a row is created, updated or
//! deleted. Share it as `Arc<EventBus>`.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tokio::sync::broadcast;

use ballie_core::types::RowId;

// ---------------------------------------------------------------------------
// AdminEvent
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NoticeLevel {
    Success,
    Info,
    Error,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MutationAction {
    Created,
    Updated,
    Deleted,
}

/// Something the rest of the dashboard may want to react to.
///
/// Notices are built with [`AdminEvent::success`], [`AdminEvent::info`] and
/// [`AdminEvent::error`]; mutation events with [`AdminEvent::mutation`],
/// optionally attributed via [`with_actor`](AdminEvent::with_actor).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum AdminEvent {
    Notice {
        level: NoticeLevel,
        message: String,
        timestamp: DateTime<Utc>,
    },
    Mutation {
        action: MutationAction,
        /// Entity display name, e.g. `"User"`.
        entity: String,
        id: RowId,
        /// User id of the admin who made the change, when signed in.
        actor: Option<String>,
        timestamp: DateTime<Utc>,
    },
}

impl AdminEvent {
    pub fn notice(level: NoticeLevel, message: impl Into<String>) -> Self {
        Self::Notice {
            level,
            message: message.into(),
            timestamp: Utc::now(),
        }
    }

    pub fn success(message: impl Into<String>) -> Self {
        Self::notice(NoticeLevel::Success, message)
    }

    pub fn info(message: impl Into<String>) -> Self {
        Self::notice(NoticeLevel::Info, message)
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self::notice(NoticeLevel::Error, message)
    }

    pub fn mutation(action: MutationAction, entity: impl Into<String>, id: impl Into<RowId>) -> Self {
        Self::Mutation {
            action,
            entity: entity.into(),
            id: id.into(),
            actor: None,
            timestamp: Utc::now(),
        }
    }

    /// Attribute a mutation event to an admin. No effect on notices.
    pub fn with_actor(mut self, user_id: Option<String>) -> Self {
        if let Self::Mutation { actor, .. } = &mut self {
            *actor = user_id;
        }
        self
    }

    /// Level and text, if this is a notice.
    pub fn as_notice(&self) -> Option<(NoticeLevel, &str)> {
        match self {
            Self::Notice { level, message, .. } => Some((*level, message.as_str())),
            Self::Mutation { .. } => None,
        }
    }
}

// ---------------------------------------------------------------------------
// EventBus
// ---------------------------------------------------------------------------

/// Default buffer capacity for the broadcast channel.
const DEFAULT_CAPACITY: usize = 1024;

/// In-process fan-out event bus.
///
/// ```rust
/// use ballie_events::bus::{AdminEvent, EventBus};
///
/// let bus = EventBus::default();
/// let mut rx = bus.subscribe();
///
/// bus.publish(AdminEvent::success("User created"));
/// ```
pub struct EventBus {
    sender: broadcast::Sender<AdminEvent>,
}

impl EventBus {
    /// Create a bus with a specific channel capacity.
    ///
    /// When the buffer is full the oldest messages are dropped and slow
    /// receivers observe `RecvError::Lagged`.
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity);
        Self { sender }
    }

    /// Publish an event to all current subscribers.
    ///
    /// With no subscribers the event is dropped.
    pub fn publish(&self, event: AdminEvent) {
        // SendError only means there are zero receivers.
        let _ = self.sender.send(event);
    }

    pub fn subscribe(&self) -> broadcast::Receiver<AdminEvent> {
        self.sender.subscribe()
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new(DEFAULT_CAPACITY)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
