//! User directory service: tenant-scoped lookup, list and create
//!
//! Parent-row failures propagate. Child-row (email, phone number) failures
//! are logged, counted and returned in [`Partial::suppressed`], never raised.

use super::scim_mapper::map_create_request;
use crate::domain::{
    AttributeKind, ChildFailure, ChildOperation, DirectoryUser, NewUserAttribute,
    OrganisationId, Partial, ScimUserCreateRequest, ScimUserRecord, StringUuid,
    UserAttributeRecord,
};
use crate::error::{AppError, Result};
use crate::repository::{ScimUserRepository, UserAttributeRepository};
use chrono::Utc;
use metrics::counter;
use std::sync::Arc;

pub struct UserDirectoryService<U, A>
where
    U: ScimUserRepository + 'static,
    A: UserAttributeRepository + 'static,
{
    user_repo: Arc<U>,
    attribute_repo: Arc<A>,
}

impl<U, A> UserDirectoryService<U, A>
where
    U: ScimUserRepository + 'static,
    A: UserAttributeRepository + 'static,
{
    pub fn new(user_repo: Arc<U>, attribute_repo: Arc<A>) -> Self {
        Self {
            user_repo,
            attribute_repo,
        }
    }

    /// Fetch one user of `organisation_id`. A user owned by another
    /// organisation is reported as not found.
    pub async fn get_user(
        &self,
        organisation_id: OrganisationId,
        user_id: StringUuid,
    ) -> Result<Partial<DirectoryUser>> {
        let record = self
            .user_repo
            .find_by_id(organisation_id, user_id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("User {} not found", user_id)))?;

        let mut suppressed = Vec::new();
        let user = self.load_children(record, &mut suppressed).await;
        Ok(Partial {
            value: user,
            suppressed,
        })
    }

    /// All users of `organisation_id`, each with whichever children loaded.
    pub async fn list_users(
        &self,
        organisation_id: OrganisationId,
    ) -> Result<Partial<Vec<DirectoryUser>>> {
        let records = self.user_repo.list_by_organisation(organisation_id).await?;

        let mut suppressed = Vec::new();
        let mut users = Vec::with_capacity(records.len());
        for record in records {
            users.push(self.load_children(record, &mut suppressed).await);
        }

        Ok(Partial {
            value: users,
            suppressed,
        })
    }

    /// Create a user and its emails and phone numbers, then read it back.
    ///
    /// No transaction spans the parent and child inserts.
    pub async fn create_user(
        &self,
        organisation_id: OrganisationId,
        request: &ScimUserCreateRequest,
    ) -> Result<Partial<DirectoryUser>> {
        let command = map_create_request(
            organisation_id,
            StringUuid::new_v7(),
            request,
            Utc::now(),
        );

        let user_id = self.user_repo.create(&command.user).await?.ok_or_else(|| {
            AppError::Internal(anyhow::anyhow!("User insert reported no inserted id"))
        })?;

        counter!("scimgate_scim_users_created_total").increment(1);
        tracing::info!(
            organisation_id = %organisation_id,
            user_id = %user_id,
            "SCIM user created"
        );

        let mut suppressed = Vec::new();
        self.insert_children(user_id, AttributeKind::Email, &command.emails, &mut suppressed)
            .await;
        self.insert_children(
            user_id,
            AttributeKind::PhoneNumber,
            &command.phone_numbers,
            &mut suppressed,
        )
        .await;

        let created = match self.get_user(organisation_id, user_id).await {
            Ok(created) => created,
            Err(AppError::NotFound(_)) => {
                return Err(AppError::Internal(anyhow::anyhow!(
                    "User {} missing after insert",
                    user_id
                )))
            }
            Err(e) => return Err(e),
        };

        suppressed.extend(created.suppressed);
        Ok(Partial {
            value: created.value,
            suppressed,
        })
    }

    async fn load_children(
        &self,
        record: ScimUserRecord,
        suppressed: &mut Vec<ChildFailure>,
    ) -> DirectoryUser {
        let emails = self
            .load_kind(record.id, AttributeKind::Email, suppressed)
            .await;
        let phone_numbers = self
            .load_kind(record.id, AttributeKind::PhoneNumber, suppressed)
            .await;

        DirectoryUser {
            user: record,
            emails,
            phone_numbers,
        }
    }

    async fn load_kind(
        &self,
        user_id: StringUuid,
        kind: AttributeKind,
        suppressed: &mut Vec<ChildFailure>,
    ) -> Vec<UserAttributeRecord> {
        match self.attribute_repo.list_by_user(kind, user_id).await {
            Ok(rows) => rows,
            Err(e) => {
                suppressed.push(child_failure(user_id, kind, ChildOperation::Fetch, &e));
                Vec::new()
            }
        }
    }

    async fn insert_children(
        &self,
        user_id: StringUuid,
        kind: AttributeKind,
        rows: &[NewUserAttribute],
        suppressed: &mut Vec<ChildFailure>,
    ) {
        for row in rows {
            if let Err(e) = self.attribute_repo.create(kind, row).await {
                suppressed.push(child_failure(user_id, kind, ChildOperation::Insert, &e));
            }
        }
    }
}

fn child_failure(
    user_id: StringUuid,
    kind: AttributeKind,
    operation: ChildOperation,
    error: &AppError,
) -> ChildFailure {
    tracing::warn!(
        user_id = %user_id,
        attribute = kind.as_str(),
        operation = operation.as_str(),
        error = %error,
        "Skipping failed SCIM child attribute"
    );
    counter!(
        "scimgate_scim_child_failures_total",
        "attribute" => kind.as_str(),
        "operation" => operation.as_str()
    )
    .increment(1);

    ChildFailure {
        user_id,
        kind,
        operation,
        detail: error.to_string(),
    }
}
