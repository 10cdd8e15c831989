//! Domain-oriented modules grouping API, service, and route layers by bounded context.

pub mod provisioning;
