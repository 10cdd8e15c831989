//! Domain models for Scimgate Core

pub mod common;
pub mod directory;
pub mod scim;
pub mod tenant;

pub use common::*;
pub use directory::*;
pub use scim::*;
pub use tenant::*;
