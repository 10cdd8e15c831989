//! SCIM provisioning routes

use crate::domains::provisioning::api::scim_users;
use crate::domains::provisioning::context::ProvisioningContext;
use crate::middleware::scim_auth_middleware;
use axum::{middleware, routing::get, Router};

/// SCIM protocol routes, every one behind the bearer token gate.
///
/// Collection paths also answer with a trailing slash and in lowercase, as
/// some identity providers send them that way.
pub fn scim_routes<S>(state: S) -> Router<S>
where
    S: ProvisioningContext,
{
    let collection = || {
        get(scim_users::list_users::<S>).post(scim_users::create_user::<S>)
    };
    let member = || get(scim_users::get_user::<S>);

    Router::new()
        .route("/scim/v2/Users", collection())
        .route("/scim/v2/Users/", collection())
        .route("/scim/v2/users", collection())
        .route("/scim/v2/users/", collection())
        .route("/scim/v2/Users/{id}", member())
        .route("/scim/v2/users/{id}", member())
        .route_layer(middleware::from_fn_with_state(
            state,
            scim_auth_middleware::<S>,
        ))
}
