//! In-memory repositories for HTTP tests
//!
//! Each repository keeps its rows in a `RwLock<Vec<..>>` and can be told to
//! fail, standing in for a store fault.

pub mod http;

use async_trait::async_trait;
use scimgate_core::domain::{
    AttributeKind, NewScimUser, NewUserAttribute, OrganisationId, OrganisationToken,
    ScimUserRecord, StringUuid, UserAttributeRecord,
};
use scimgate_core::error::{AppError, Result};
use scimgate_core::repository::{
    OrganisationTokenRepository, ScimUserRepository, UserAttributeRepository,
};
use std::sync::atomic::{AtomicBool, Ordering};
use tokio::sync::RwLock;

fn store_fault() -> AppError {
    AppError::Database(sqlx::Error::PoolTimedOut)
}

// ============================================================================
// Organisation tokens
// ============================================================================

#[derive(Default)]
pub struct TestOrganisationTokenRepository {
    tokens: RwLock<Vec<OrganisationToken>>,
    fail: AtomicBool,
}

impl TestOrganisationTokenRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Bind `token` to `organisation_id`.
    pub async fn add_token(&self, organisation_id: OrganisationId, token: &str) {
        self.tokens.write().await.push(OrganisationToken {
            id: StringUuid::new_v7(),
            organisation_id,
            token: token.to_string(),
        });
    }

    pub fn set_fail(&self, fail: bool) {
        self.fail.store(fail, Ordering::SeqCst);
    }
}

#[async_trait]
impl OrganisationTokenRepository for TestOrganisationTokenRepository {
    async fn find_by_token(&self, token: &str) -> Result<Option<OrganisationToken>> {
        if self.fail.load(Ordering::SeqCst) {
            return Err(store_fault());
        }
        let tokens = self.tokens.read().await;
        Ok(tokens.iter().find(|t| t.token == token).cloned())
    }
}

// ============================================================================
// SCIM users
// ============================================================================

#[derive(Default)]
pub struct TestScimUserRepository {
    users: RwLock<Vec<ScimUserRecord>>,
    fail_create: AtomicBool,
    fail_reads: AtomicBool,
    drop_inserted_id: AtomicBool,
}

impl TestScimUserRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn add_user(&self, user: ScimUserRecord) {
        self.users.write().await.push(user);
    }

    pub async fn count(&self) -> usize {
        self.users.read().await.len()
    }

    pub fn set_fail_create(&self, fail: bool) {
        self.fail_create.store(fail, Ordering::SeqCst);
    }

    pub fn set_fail_reads(&self, fail: bool) {
        self.fail_reads.store(fail, Ordering::SeqCst);
    }

    /// Make `create` report success without an inserted id.
    pub fn set_drop_inserted_id(&self, drop: bool) {
        self.drop_inserted_id.store(drop, Ordering::SeqCst);
    }
}

#[async_trait]
impl ScimUserRepository for TestScimUserRepository {
    async fn create(&self, user: &NewScimUser) -> Result<Option<StringUuid>> {
        if self.fail_create.load(Ordering::SeqCst) {
            return Err(store_fault());
        }
        if self.drop_inserted_id.load(Ordering::SeqCst) {
            return Ok(None);
        }
        self.users.write().await.push(user.clone());
        Ok(Some(user.id))
    }

    async fn find_by_id(
        &self,
        organisation_id: OrganisationId,
        id: StringUuid,
    ) -> Result<Option<ScimUserRecord>> {
        if self.fail_reads.load(Ordering::SeqCst) {
            return Err(store_fault());
        }
        let users = self.users.read().await;
        Ok(users
            .iter()
            .find(|u| u.organisation_id == organisation_id && u.id == id)
            .cloned())
    }

    async fn list_by_organisation(
        &self,
        organisation_id: OrganisationId,
    ) -> Result<Vec<ScimUserRecord>> {
        if self.fail_reads.load(Ordering::SeqCst) {
            return Err(store_fault());
        }
        let users = self.users.read().await;
        Ok(users
            .iter()
            .filter(|u| u.organisation_id == organisation_id)
            .cloned()
            .collect())
    }
}

// ============================================================================
// Emails and phone numbers
// ============================================================================

#[derive(Default)]
pub struct TestUserAttributeRepository {
    rows: RwLock<Vec<(AttributeKind, UserAttributeRecord)>>,
    fail_inserts: RwLock<Vec<AttributeKind>>,
    fail_fetches: RwLock<Vec<AttributeKind>>,
}

impl TestUserAttributeRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn add(&self, kind: AttributeKind, row: UserAttributeRecord) {
        self.rows.write().await.push((kind, row));
    }

    pub async fn fail_inserts_of(&self, kind: AttributeKind) {
        self.fail_inserts.write().await.push(kind);
    }

    pub async fn fail_fetches_of(&self, kind: AttributeKind) {
        self.fail_fetches.write().await.push(kind);
    }
}

#[async_trait]
impl UserAttributeRepository for TestUserAttributeRepository {
    async fn create(&self, kind: AttributeKind, attribute: &NewUserAttribute) -> Result<()> {
        if self.fail_inserts.read().await.contains(&kind) {
            return Err(store_fault());
        }
        self.rows.write().await.push((kind, attribute.clone()));
        Ok(())
    }

    async fn list_by_user(
        &self,
        kind: AttributeKind,
        user_id: StringUuid,
    ) -> Result<Vec<UserAttributeRecord>> {
        if self.fail_fetches.read().await.contains(&kind) {
            return Err(store_fault());
        }
        let rows = self.rows.read().await;
        Ok(rows
            .iter()
            .filter(|(k, row)| *k == kind && row.user_id == user_id)
            .map(|(_, row)| row.clone())
            .collect())
    }
}
