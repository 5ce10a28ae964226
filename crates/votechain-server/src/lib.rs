//! HTTP server for votechain.
//!
//! Exposes the vote chain as JSON: `GET /vote` returns every entry and
//! `POST /vote` appends one, answering 422 when the new entry does not
//! chain from the current tail.

pub mod config;
pub mod error;
pub mod handler;
pub mod router;
pub mod server;

pub use config::{ServerConfig, DEFAULT_PORT};
pub use error::{ServerError, ServerResult};
pub use handler::{HealthResponse, VoteRequest};
pub use server::VoteServer;
