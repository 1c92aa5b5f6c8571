//! Ballie admin domain core.
//!
//! Pure logic shared by the in-memory store, the list controller, the HTTP
//! client and the API server: the error taxonomy, list query state and page
//! arithmetic, search matching, validation rules, the seven resource
//! definitions, support chat threads and the data collaborator contracts.
//! Nothing in here performs I/O.

pub mod chat;
pub mod collaborator;
pub mod error;
pub mod pagination;
pub mod query;
pub mod resource;
#[macro_use]
pub mod resources;
pub mod search;
pub mod settings;
pub mod stats;
pub mod types;
pub mod validation;
