//! SCIM User API handlers

use crate::domain::{
    ScimListResponse, ScimRequestContext, ScimUser, ScimUserCreateRequest, StringUuid,
};
use crate::domains::provisioning::api::ScimJson;
use crate::domains::provisioning::context::ProvisioningContext;
use crate::domains::provisioning::service::scim_mapper::map_directory_user_to_scim;
use crate::error::{AppError, Result};
use axum::body::Bytes;
use axum::extract::{Extension, Path, State};
use axum::http::{header, HeaderValue, StatusCode};
use axum::response::{IntoResponse, Response};

/// GET /Users - every user of the caller's organisation, as one page
pub async fn list_users<S: ProvisioningContext>(
    State(state): State<S>,
    Extension(ctx): Extension<ScimRequestContext>,
) -> Result<Response> {
    let users = state
        .user_directory_service()
        .list_users(ctx.organisation_id)
        .await?
        .into_inner();

    let base_url = &state.config().scim.base_url;
    let resources: Vec<ScimUser> = users
        .iter()
        .map(|user| map_directory_user_to_scim(user, base_url))
        .collect();

    Ok(ScimJson(ScimListResponse::single_page(resources)).into_response())
}

/// POST /Users - create a user
///
/// The body is parsed as JSON whatever the declared content type.
pub async fn create_user<S: ProvisioningContext>(
    State(state): State<S>,
    Extension(ctx): Extension<ScimRequestContext>,
    body: Bytes,
) -> Result<Response> {
    let request: ScimUserCreateRequest = serde_json::from_slice(&body)?;

    let created = state
        .user_directory_service()
        .create_user(ctx.organisation_id, &request)
        .await?;
    if !created.is_complete() {
        tracing::warn!(
            organisation_id = %ctx.organisation_id,
            skipped = created.suppressed.len(),
            "SCIM user created with missing child attributes"
        );
    }

    let user = map_directory_user_to_scim(&created.into_inner(), &state.config().scim.base_url);
    let location = HeaderValue::from_str(&user.meta.location).ok();

    let mut response = (StatusCode::CREATED, ScimJson(user)).into_response();
    if let Some(location) = location {
        response.headers_mut().insert(header::LOCATION, location);
    }
    Ok(response)
}

/// GET /Users/{id} - fetch one user of the caller's organisation
pub async fn get_user<S: ProvisioningContext>(
    State(state): State<S>,
    Extension(ctx): Extension<ScimRequestContext>,
    Path(id): Path<String>,
) -> Result<Response> {
    // Ids are opaque to clients; one that cannot exist is simply not found.
    let user_id = StringUuid::parse_str(&id)
        .map_err(|_| AppError::NotFound(format!("User {} not found", id)))?;

    let user = state
        .user_directory_service()
        .get_user(ctx.organisation_id, user_id)
        .await?
        .into_inner();

    Ok(ScimJson(map_directory_user_to_scim(&user, &state.config().scim.base_url)).into_response())
}
