use std::sync::Arc;

use ballie_db::DataStores;
use ballie_events::EventBus;

use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc` or is already `Clone`).
#[derive(Clone)]
pub struct AppState {
    /// Every resource collection plus settings.
    pub stores: DataStores,
    pub config: Arc<ServerConfig>,
    /// Receives a mutation event for every successful create, update, delete.
    pub event_bus: Arc<EventBus>,
}
