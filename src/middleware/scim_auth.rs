//! SCIM Bearer Token authentication middleware
//!
//! Resolves the bearer token to an organisation and injects
//! `ScimRequestContext` into request extensions.

use crate::domains::provisioning::context::ProvisioningContext;
use crate::error::AppError;
use axum::{
    extract::{Request, State},
    http::header,
    middleware::Next,
    response::{IntoResponse, Response},
};
use metrics::counter;

/// Extract the token from an `Authorization: Bearer <token>` header value.
fn bearer_token(header_value: &str) -> Option<&str> {
    header_value.strip_prefix("Bearer ")
}

/// SCIM authentication middleware.
///
/// Missing or non-Bearer credentials and unknown tokens are answered with 401,
/// a token store fault with 500. The handler is not invoked in either case.
pub async fn scim_auth_middleware<S: ProvisioningContext>(
    State(state): State<S>,
    mut request: Request,
    next: Next,
) -> Response {
    let token = request
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(bearer_token)
        .map(str::to_string);

    let Some(token) = token else {
        counter!("scimgate_scim_auth_total", "result" => "missing").increment(1);
        return AppError::Unauthorized("Missing or invalid Authorization header".to_string())
            .into_response();
    };

    match state.tenant_auth_service().authenticate(&token).await {
        Ok(ctx) => {
            request.extensions_mut().insert(ctx);
            next.run(request).await
        }
        Err(e) => e.into_response(),
    }
}
