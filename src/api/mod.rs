//! Operational HTTP endpoints (health, readiness, metrics)

pub mod health;
pub mod metrics;
