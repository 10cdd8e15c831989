//! Application state traits for dependency injection
//!
//! Handlers and middleware are generic over these traits so the same code
//! runs against the production `AppState` and the in-memory test state.

use crate::config::Config;
use crate::domains::provisioning::service::{TenantAuthService, UserDirectoryService};
use crate::repository::{OrganisationTokenRepository, ScimUserRepository, UserAttributeRepository};

/// Core state shared by every route.
pub trait HasServices: Clone + Send + Sync + 'static {
    /// Get the application configuration
    fn config(&self) -> &Config;

    /// Whether the backing store answers; drives `/ready`.
    fn check_ready(&self) -> impl std::future::Future<Output = bool> + Send;
}

/// Services behind the SCIM endpoints
pub trait HasScimServices: Clone + Send + Sync + 'static {
    type OrganisationTokenRepo: OrganisationTokenRepository + 'static;
    type ScimUserRepo: ScimUserRepository + 'static;
    type UserAttributeRepo: UserAttributeRepository + 'static;

    /// Get the tenant auth service (bearer token resolution)
    fn tenant_auth_service(&self) -> &TenantAuthService<Self::OrganisationTokenRepo>;

    /// Get the user directory service
    fn user_directory_service(
        &self,
    ) -> &UserDirectoryService<Self::ScimUserRepo, Self::UserAttributeRepo>;
}
