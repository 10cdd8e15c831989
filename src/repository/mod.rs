//! Data access layer (Repository pattern)

pub mod organisation_token;
pub mod scim_user;
pub mod user_attribute;

pub use organisation_token::OrganisationTokenRepository;
pub use scim_user::ScimUserRepository;
pub use user_attribute::UserAttributeRepository;

