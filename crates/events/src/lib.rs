//! Process-wide publish/subscribe for the admin dashboard.
//!
//! - [`EventBus`]: in-process fan-out of [`AdminEvent`]s backed by
//!   `tokio::sync::broadcast`. Toast notices and mutation events both travel
//!   over it.
//! - [`AuditLog`]: a bus subscriber that logs every mutation.
//! - [`SessionContext`]: the signed-in admin, observable through a
//!   `tokio::sync::watch` channel.

pub mod audit;
pub mod bus;
pub mod session;

pub use audit::AuditLog;
pub use bus::{AdminEvent, EventBus, MutationAction, NoticeLevel};
pub use session::{AdminSession, SessionContext};
