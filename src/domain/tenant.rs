//! Tenant boundary: organisations and their bearer tokens

use super::common::StringUuid;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Identifier of the organisation that owns a user or token.
///
/// Kept distinct from [`StringUuid`] so a user id can never be passed where
/// the tenant scope is expected.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type,
)]
#[serde(transparent)]
#[sqlx(transparent)]
pub struct OrganisationId(pub StringUuid);

impl OrganisationId {
    pub fn new_v7() -> Self {
        OrganisationId(StringUuid::new_v7())
    }
}

impl From<StringUuid> for OrganisationId {
    fn from(id: StringUuid) -> Self {
        OrganisationId(id)
    }
}

impl std::fmt::Display for OrganisationId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}

/// Bearer credential bound to exactly one organisation. No expiry.
#[derive(Clone, FromRow)]
pub struct OrganisationToken {
    pub id: StringUuid,
    pub organisation_id: OrganisationId,
    pub token: String,
}

impl std::fmt::Debug for OrganisationToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OrganisationToken")
            .field("id", &self.id)
            .field("organisation_id", &self.organisation_id)
            .field("token", &"[REDACTED]")
            .finish()
    }
}

/// Identity resolved by the SCIM auth middleware, carried in request
/// extensions from the gate to the handler.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScimRequestContext {
    pub organisation_id: OrganisationId,
    pub token_id: StringUuid,
}

impl From<&OrganisationToken> for ScimRequestContext {
    fn from(token: &OrganisationToken) -> Self {
        Self {
            organisation_id: token.organisation_id,
            token_id: token.id,
        }
    }
}
