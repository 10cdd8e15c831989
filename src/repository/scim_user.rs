//! SCIM user repository

use crate::domain::{NewScimUser, OrganisationId, ScimUserRecord, StringUuid};
use crate::error::Result;
use async_trait::async_trait;
use sqlx::MySqlPool;

const USER_COLUMNS: &str = r#"
    id, organisation_id, user_name, display_name, active, external_id,
    nick_name, profile_url, title, user_type, preferred_language, locale, timezone,
    meta_created, meta_last_modified, meta_version,
    name_formatted, name_family_name, name_given_name, name_middle_name,
    name_honorific_prefix, name_honorific_suffix,
    employee_number, organization, department, division, cost_center, manager_id
"#;

fn insert_sql() -> String {
    let placeholders = vec!["?"; USER_COLUMNS.split(',').count()].join(", ");
    format!(
        "INSERT INTO scim_users ({}) VALUES ({})",
        USER_COLUMNS, placeholders
    )
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ScimUserRepository: Send + Sync {
    /// Insert a user row. Returns the stored id, or `None` when the store
    /// reports that nothing was inserted.
    async fn create(&self, user: &NewScimUser) -> Result<Option<StringUuid>>;
    async fn find_by_id(
        &self,
        organisation_id: OrganisationId,
        id: StringUuid,
    ) -> Result<Option<ScimUserRecord>>;
    async fn list_by_organisation(
        &self,
        organisation_id: OrganisationId,
    ) -> Result<Vec<ScimUserRecord>>;
}

pub struct ScimUserRepositoryImpl {
    pool: MySqlPool,
}

impl ScimUserRepositoryImpl {
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ScimUserRepository for ScimUserRepositoryImpl {
    async fn create(&self, user: &NewScimUser) -> Result<Option<StringUuid>> {
        let result = sqlx::query(&insert_sql())
        .bind(user.id)
        .bind(user.organisation_id)
        .bind(&user.user_name)
        .bind(&user.display_name)
        .bind(user.active)
        .bind(&user.external_id)
        .bind(&user.nick_name)
        .bind(&user.profile_url)
        .bind(&user.title)
        .bind(&user.user_type)
        .bind(&user.preferred_language)
        .bind(&user.locale)
        .bind(&user.timezone)
        .bind(&user.meta_created)
        .bind(&user.meta_last_modified)
        .bind(&user.meta_version)
        .bind(&user.name_formatted)
        .bind(&user.name_family_name)
        .bind(&user.name_given_name)
        .bind(&user.name_middle_name)
        .bind(&user.name_honorific_prefix)
        .bind(&user.name_honorific_suffix)
        .bind(&user.employee_number)
        .bind(&user.organization)
        .bind(&user.department)
        .bind(&user.division)
        .bind(&user.cost_center)
        .bind(&user.manager_id)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Ok(None);
        }
        Ok(Some(user.id))
    }

    async fn find_by_id(
        &self,
        organisation_id: OrganisationId,
        id: StringUuid,
    ) -> Result<Option<ScimUserRecord>> {
        let user = sqlx::query_as::<_, ScimUserRecord>(&format!(
            "SELECT {} FROM scim_users WHERE organisation_id = ? AND id = ?",
            USER_COLUMNS
        ))
        .bind(organisation_id)
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(user)
    }

    async fn list_by_organisation(
        &self,
        organisation_id: OrganisationId,
    ) -> Result<Vec<ScimUserRecord>> {
        let users = sqlx::query_as::<_, ScimUserRecord>(&format!(
            "SELECT {} FROM scim_users WHERE organisation_id = ? ORDER BY id",
            USER_COLUMNS
        ))
        .bind(organisation_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(users)
    }
}
