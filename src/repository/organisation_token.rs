//! Organisation token repository

use crate::domain::OrganisationToken;
use crate::error::Result;
use async_trait::async_trait;
use sqlx::MySqlPool;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait OrganisationTokenRepository: Send + Sync {
    /// Exact-value lookup. `None` when no organisation holds the token.
    async fn find_by_token(&self, token: &str) -> Result<Option<OrganisationToken>>;
}

pub struct OrganisationTokenRepositoryImpl {
    pool: MySqlPool,
}

impl OrganisationTokenRepositoryImpl {
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl OrganisationTokenRepository for OrganisationTokenRepositoryImpl {
    async fn find_by_token(&self, token: &str) -> Result<Option<OrganisationToken>> {
        let token = sqlx::query_as::<_, OrganisationToken>(
            r#"
            SELECT id, organisation_id, token
            FROM organisation_tokens
            WHERE token = ?
            "#,
        )
        .bind(token)
        .fetch_optional(&self.pool)
        .await?;

        Ok(token)
    }
}
