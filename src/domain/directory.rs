//! Storage-side shapes of the user directory
//!
//! A provisioned user is one `scim_users` row (core attributes, name parts
//! and enterprise extension columns) plus rows in `scim_user_emails` and
//! `scim_user_phone_numbers`.

use super::common::StringUuid;
use super::tenant::OrganisationId;
use serde::Serialize;
use sqlx::FromRow;

/// Row of `scim_users`
#[derive(Debug, Clone, Default, PartialEq, FromRow)]
pub struct ScimUserRecord {
    pub id: StringUuid,
    pub organisation_id: OrganisationId,
    pub user_name: String,
    pub display_name: Option<String>,
    pub active: bool,
    pub external_id: Option<String>,
    pub nick_name: Option<String>,
    pub profile_url: Option<String>,
    pub title: Option<String>,
    pub user_type: Option<String>,
    pub preferred_language: Option<String>,
    pub locale: Option<String>,
    pub timezone: Option<String>,
    /// RFC 3339 text as written by the store; parsed leniently on read.
    pub meta_created: String,
    pub meta_last_modified: String,
    pub meta_version: Option<String>,
    pub name_formatted: Option<String>,
    pub name_family_name: Option<String>,
    pub name_given_name: Option<String>,
    pub name_middle_name: Option<String>,
    pub name_honorific_prefix: Option<String>,
    pub name_honorific_suffix: Option<String>,
    pub employee_number: Option<String>,
    pub organization: Option<String>,
    pub department: Option<String>,
    pub division: Option<String>,
    pub cost_center: Option<String>,
    pub manager_id: Option<String>,
}

/// Insert command for a `scim_users` row. Same columns as the record.
pub type NewScimUser = ScimUserRecord;

/// Which multi-valued child table a row belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AttributeKind {
    Email,
    PhoneNumber,
}

impl AttributeKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            AttributeKind::Email => "email",
            AttributeKind::PhoneNumber => "phone_number",
        }
    }
}

impl std::fmt::Display for AttributeKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Row of `scim_user_emails` or `scim_user_phone_numbers`
#[derive(Debug, Clone, Default, PartialEq, FromRow)]
pub struct UserAttributeRecord {
    pub id: StringUuid,
    pub user_id: StringUuid,
    pub value: String,
    pub display: Option<String>,
    pub value_type: Option<String>,
    pub is_primary: Option<bool>,
}

/// Insert command for a child row
pub type NewUserAttribute = UserAttributeRecord;

/// Everything needed to provision one user: the parent row and its children.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CreateUserCommand {
    pub user: NewScimUser,
    pub emails: Vec<NewUserAttribute>,
    pub phone_numbers: Vec<NewUserAttribute>,
}

/// A user row with whichever children could be loaded.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DirectoryUser {
    pub user: ScimUserRecord,
    pub emails: Vec<UserAttributeRecord>,
    pub phone_numbers: Vec<UserAttributeRecord>,
}

/// Step that failed on a child row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ChildOperation {
    Fetch,
    Insert,
}

impl ChildOperation {
    pub fn as_str(&self) -> &'static str {
        match self {
            ChildOperation::Fetch => "fetch",
            ChildOperation::Insert => "insert",
        }
    }
}

/// A child-row failure that was logged and skipped.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChildFailure {
    pub user_id: StringUuid,
    pub kind: AttributeKind,
    pub operation: ChildOperation,
    pub detail: String,
}

/// Result of an operation whose child steps may fail without aborting it.
#[derive(Debug, Clone, PartialEq)]
pub struct Partial<T> {
    pub value: T,
    pub suppressed: Vec<ChildFailure>,
}

impl<T> Partial<T> {
    pub fn is_complete(&self) -> bool {
        self.suppressed.is_empty()
    }

    pub fn into_inner(self) -> T {
        self.value
    }
}
