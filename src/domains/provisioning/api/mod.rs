//! SCIM API handlers and response types

pub mod scim_users;

use axum::http::{header, HeaderValue};
use axum::response::{IntoResponse, Response};
use serde::Serialize;

pub const SCIM_CONTENT_TYPE: &str = "application/scim+json;charset=utf-8";

/// Wrapper that serializes `T` as JSON with `Content-Type: application/scim+json`.
pub struct ScimJson<T>(pub T);

impl<T: Serialize> IntoResponse for ScimJson<T> {
    fn into_response(self) -> Response {
        let mut response = axum::Json(self.0).into_response();
        response.headers_mut().insert(
            header::CONTENT_TYPE,
            HeaderValue::from_static(SCIM_CONTENT_TYPE),
        );
        response
    }
}
