//! The generic Resource List Controller.
//!
//! One [`ListController`] drives any list view of the admin dashboard. It
//! owns the query state (search term, filters, page), sequences fetches so
//! that only the most recently issued request is rendered, runs create,
//! update and delete through the resource's data collaborator, keeps the page
//! inside bounds after the total changes, and exposes a presentation
//! snapshot ([`ListView`]) for whatever renders it.
//!
//! What differs between resources lives in the
//! [`Resource`](ballie_core::resource::Resource) implementation and a small
//! [`ListConfig`].

pub mod config;
pub mod confirm;
pub mod controller;
pub mod display;
pub mod drawer;
pub mod error;
pub mod fetch;
pub mod view;

pub use config::ListConfig;
pub use controller::{DeleteOutcome, ListContext, ListController, SubmitOutcome};
pub use fetch::FetchOutcome;
pub use error::ControllerError;
pub use view::{ListBody, ListView};
