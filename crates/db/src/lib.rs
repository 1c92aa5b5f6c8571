//! In-memory data collaborators for the Ballie admin dashboard.
//!
//! - [`MemoryStore`]: one resource collection behind a `tokio::sync::RwLock`,
//!   implementing [`Collaborator`](ballie_core::collaborator::Collaborator).
//! - [`SettingsStore`]: the four settings sections.
//! - [`ChatStore`]: support chat threads.
//! - [`DataStores`]: every collection plus settings, optionally seeded with
//!   the demo rows from [`seed`].

pub mod chat;
pub mod seed;
pub mod settings;
pub mod store;
pub mod stores;

pub use chat::ChatStore;
pub use settings::SettingsStore;
pub use store::MemoryStore;
pub use stores::{DataStores, StoredResource};
