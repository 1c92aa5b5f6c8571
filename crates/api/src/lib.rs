//! Ballie admin API server library.
//!
//! Exposes the in-memory collections over REST so the binary entrypoint,
//! integration tests, and the remote client's tests can all build the same
//! router.

pub mod config;
pub mod error;
pub mod handlers;
pub mod response;
pub mod router;
pub mod routes;
pub mod state;
