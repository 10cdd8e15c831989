//! HTTP middleware for Scimgate Core
//!
//! - SCIM bearer token authentication (tenant gate)
//! - Request ID propagation and HTTP metrics

pub mod metrics;
pub mod scim_auth;

pub use self::metrics::ObservabilityLayer;
pub use scim_auth::scim_auth_middleware;
