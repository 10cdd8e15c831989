//! SCIM attribute mapper
//!
//! One function per direction: stored directory user to wire `ScimUser`, and
//! wire create request to the insert command.

use crate::domain::{
    CreateUserCommand, DirectoryUser, NewScimUser, NewUserAttribute, OrganisationId,
    ScimEnterpriseUser, ScimManager, ScimMeta, ScimMultiValue, ScimName, ScimUser,
    ScimUserCreateRequest, StringUuid, UserAttributeRecord,
};
use chrono::{DateTime, SecondsFormat, Utc};

/// 0001-01-01T00:00:00Z, what an unreadable stored timestamp renders as.
const ZERO_TIME_SECS: i64 = -62_135_596_800;

fn zero_time() -> DateTime<Utc> {
    DateTime::from_timestamp(ZERO_TIME_SECS, 0).unwrap_or_default()
}

/// Parse an RFC 3339 timestamp from storage; anything unreadable becomes zero time.
pub fn parse_stored_timestamp(value: &str) -> DateTime<Utc> {
    DateTime::parse_from_rfc3339(value)
        .map(|ts| ts.with_timezone(&Utc))
        .unwrap_or_else(|_| zero_time())
}

pub fn format_timestamp(ts: DateTime<Utc>) -> String {
    ts.to_rfc3339_opts(SecondsFormat::Secs, true)
}

pub fn user_location(base_url: &str, id: &str) -> String {
    format!("{}/scim/v2/Users/{}", base_url, id)
}

fn attribute_to_scim(record: &UserAttributeRecord) -> ScimMultiValue {
    ScimMultiValue {
        value: record.value.clone(),
        display: record.display.clone(),
        value_type: record.value_type.clone(),
        primary: record.is_primary.unwrap_or(false),
    }
}

fn scim_to_attribute(user_id: StringUuid, value: &ScimMultiValue) -> NewUserAttribute {
    NewUserAttribute {
        id: StringUuid::new_v7(),
        user_id,
        value: value.value.clone(),
        display: value.display.clone(),
        value_type: value.value_type.clone(),
        is_primary: Some(value.primary),
    }
}

/// Convert a stored user and its children into the SCIM User resource.
///
/// Both schema URNs are always listed and the `name` and enterprise objects
/// are always present, even when every field inside them is empty.
pub fn map_directory_user_to_scim(user: &DirectoryUser, base_url: &str) -> ScimUser {
    let record = &user.user;
    let id = record.id.to_string();

    let manager = record.manager_id.as_ref().map(|manager_id| ScimManager {
        value: manager_id.clone(),
        ref_uri: Some(user_location(base_url, manager_id)),
        display_name: None,
    });

    ScimUser {
        schemas: vec![
            ScimUser::SCHEMA.to_string(),
            ScimEnterpriseUser::SCHEMA.to_string(),
        ],
        external_id: record.external_id.clone(),
        meta: ScimMeta {
            resource_type: ScimUser::RESOURCE_TYPE.to_string(),
            created: parse_stored_timestamp(&record.meta_created),
            last_modified: parse_stored_timestamp(&record.meta_last_modified),
            location: user_location(base_url, &id),
            version: record.meta_version.clone(),
        },
        id,
        user_name: record.user_name.clone(),
        name: Some(ScimName {
            formatted: record.name_formatted.clone(),
            family_name: record.name_family_name.clone(),
            given_name: record.name_given_name.clone(),
            middle_name: record.name_middle_name.clone(),
            honorific_prefix: record.name_honorific_prefix.clone(),
            honorific_suffix: record.name_honorific_suffix.clone(),
        }),
        display_name: record.display_name.clone(),
        nick_name: record.nick_name.clone(),
        profile_url: record.profile_url.clone(),
        title: record.title.clone(),
        user_type: record.user_type.clone(),
        preferred_language: record.preferred_language.clone(),
        locale: record.locale.clone(),
        timezone: record.timezone.clone(),
        active: record.active,
        emails: user.emails.iter().map(attribute_to_scim).collect(),
        phone_numbers: user.phone_numbers.iter().map(attribute_to_scim).collect(),
        enterprise_user: Some(ScimEnterpriseUser {
            employee_number: record.employee_number.clone(),
            organization: record.organization.clone(),
            department: record.department.clone(),
            division: record.division.clone(),
            cost_center: record.cost_center.clone(),
            manager,
        }),
    }
}

/// Build the insert command for a new user from a create request.
///
/// `user_id` is minted by the caller; child ids are minted here. Created and
/// last-modified are both stamped with `now`.
pub fn map_create_request(
    organisation_id: OrganisationId,
    user_id: StringUuid,
    request: &ScimUserCreateRequest,
    now: DateTime<Utc>,
) -> CreateUserCommand {
    let stamp = format_timestamp(now);
    let name = request.name.clone().unwrap_or_default();
    let enterprise = request.enterprise_user.clone().unwrap_or_default();
    let manager_id = enterprise
        .manager
        .map(|m| m.value)
        .filter(|value| !value.is_empty());

    let user = NewScimUser {
        id: user_id,
        organisation_id,
        user_name: request.user_name.clone(),
        display_name: request.display_name.clone(),
        active: request.active,
        external_id: request.external_id.clone(),
        nick_name: request.nick_name.clone(),
        profile_url: request.profile_url.clone(),
        title: request.title.clone(),
        user_type: request.user_type.clone(),
        preferred_language: request.preferred_language.clone(),
        locale: request.locale.clone(),
        timezone: request.timezone.clone(),
        meta_version: Some(format!("W/\"{}\"", stamp)),
        meta_created: stamp.clone(),
        meta_last_modified: stamp,
        name_formatted: name.formatted,
        name_family_name: name.family_name,
        name_given_name: name.given_name,
        name_middle_name: name.middle_name,
        name_honorific_prefix: name.honorific_prefix,
        name_honorific_suffix: name.honorific_suffix,
        employee_number: enterprise.employee_number,
        organization: enterprise.organization,
        department: enterprise.department,
        division: enterprise.division,
        cost_center: enterprise.cost_center,
        manager_id,
    };

    CreateUserCommand {
        user,
        emails: request
            .emails
            .iter()
            .map(|e| scim_to_attribute(user_id, e))
            .collect(),
        phone_numbers: request
            .phone_numbers
            .iter()
            .map(|p| scim_to_attribute(user_id, p))
            .collect(),
    }
}
