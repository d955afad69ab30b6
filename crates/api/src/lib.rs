//! Campaign launcher HTTP server library.
//!
//! Exposes config, state, error handling, views, and routes so the binary
//! entrypoint and the integration tests build the exact same application.

pub mod config;
pub mod error;
pub mod handlers;
pub mod router;
pub mod routes;
pub mod state;
pub mod views;
