//! Bearer token to organisation resolution

use crate::domain::ScimRequestContext;
use crate::error::{AppError, Result};
use crate::repository::OrganisationTokenRepository;
use metrics::counter;
use std::sync::Arc;

pub struct TenantAuthService<R: OrganisationTokenRepository + 'static> {
    repo: Arc<R>,
}

impl<R: OrganisationTokenRepository + 'static> TenantAuthService<R> {
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }

    /// Resolve a raw bearer token to the organisation it is bound to.
    ///
    /// Unknown tokens are `Unauthorized`; store faults propagate unchanged and
    /// surface as 500.
    pub async fn authenticate(&self, raw_token: &str) -> Result<ScimRequestContext> {
        if raw_token.is_empty() {
            counter!("scimgate_scim_auth_total", "result" => "invalid").increment(1);
            return Err(AppError::Unauthorized("Empty bearer token".to_string()));
        }

        let token = match self.repo.find_by_token(raw_token).await {
            Ok(Some(token)) => token,
            Ok(None) => {
                counter!("scimgate_scim_auth_total", "result" => "invalid").increment(1);
                return Err(AppError::Unauthorized("Invalid SCIM token".to_string()));
            }
            Err(e) => {
                counter!("scimgate_scim_auth_total", "result" => "error").increment(1);
                return Err(e);
            }
        };

        counter!("scimgate_scim_auth_total", "result" => "success").increment(1);
        tracing::debug!(
            organisation_id = %token.organisation_id,
            token_id = %token.id,
            "SCIM request authenticated"
        );

        Ok(ScimRequestContext::from(&token))
    }
}
