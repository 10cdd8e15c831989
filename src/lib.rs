//! Scimgate Core - multi-tenant SCIM 2.0 User provisioning
//!
//! Identity providers call the SCIM endpoints with a bearer token bound to one
//! organisation; users are stored per organisation in MySQL.

pub mod api;
pub mod config;
pub mod domain;
pub mod domains;
pub mod error;
pub mod middleware;
pub mod migration;
pub mod repository;
pub mod server;
pub mod state;
pub mod telemetry;

// Re-export commonly used types
pub use config::Config;
pub use error::{AppError, Result};
