//! Data collaborators for list views running outside the API process.
//!
//! - [`HttpCollaborator`]: talks to `ballie-api` over REST.
//! - [`HttpChat`]: the same for support chat threads.
//! - [`Backend`]: picks mock (in-memory) or remote collaborators from
//!   [`ClientConfig`].

pub mod backend;
pub mod chat;
pub mod config;
pub mod error;
pub mod http;

pub use backend::Backend;
pub use chat::HttpChat;
pub use config::ClientConfig;
pub use error::ClientError;
pub use http::HttpCollaborator;
