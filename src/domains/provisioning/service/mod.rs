pub mod directory;
pub mod scim_mapper;
pub mod tenant_auth;

pub use directory::UserDirectoryService;
pub use tenant_auth::TenantAuthService;
