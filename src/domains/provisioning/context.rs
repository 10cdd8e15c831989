//! Provisioning domain context trait

use crate::state::{HasScimServices, HasServices};

/// Context trait for SCIM provisioning domain.
pub trait ProvisioningContext: HasServices + HasScimServices {}

impl<T> ProvisioningContext for T where T: HasServices + HasScimServices {}
