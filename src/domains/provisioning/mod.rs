//! SCIM 2.0 User provisioning: tenant gate, mapper, directory service and routes

pub mod api;
pub mod context;
pub mod routes;
pub mod service;
