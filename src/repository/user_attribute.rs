//! Repository for multi-valued user attributes (emails, phone numbers)

use crate::domain::{AttributeKind, NewUserAttribute, StringUuid, UserAttributeRecord};
use crate::error::Result;
use async_trait::async_trait;
use sqlx::MySqlPool;

fn table_for(kind: AttributeKind) -> &'static str {
    match kind {
        AttributeKind::Email => "scim_user_emails",
        AttributeKind::PhoneNumber => "scim_user_phone_numbers",
    }
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserAttributeRepository: Send + Sync {
    async fn create(&self, kind: AttributeKind, attribute: &NewUserAttribute) -> Result<()>;
    async fn list_by_user(
        &self,
        kind: AttributeKind,
        user_id: StringUuid,
    ) -> Result<Vec<UserAttributeRecord>>;
}

pub struct UserAttributeRepositoryImpl {
    pool: MySqlPool,
}

impl UserAttributeRepositoryImpl {
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserAttributeRepository for UserAttributeRepositoryImpl {
    async fn create(&self, kind: AttributeKind, attribute: &NewUserAttribute) -> Result<()> {
        sqlx::query(&format!(
            "INSERT INTO {} (id, user_id, value, display, type, `primary`) VALUES (?, ?, ?, ?, ?, ?)",
            table_for(kind)
        ))
        .bind(attribute.id)
        .bind(attribute.user_id)
        .bind(&attribute.value)
        .bind(&attribute.display)
        .bind(&attribute.value_type)
        .bind(attribute.is_primary)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn list_by_user(
        &self,
        kind: AttributeKind,
        user_id: StringUuid,
    ) -> Result<Vec<UserAttributeRecord>> {
        let rows = sqlx::query_as::<_, UserAttributeRecord>(&format!(
            r#"
            SELECT id, user_id, value, display, type AS value_type, `primary` AS is_primary
            FROM {}
            WHERE user_id = ?
            "#,
            table_for(kind)
        ))
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }
}
