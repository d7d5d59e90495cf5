//! `AuthUser` extractor: resolves the bearer token to the calling owner.

use axum::extract::FromRequestParts;
use axum::http::header::AUTHORIZATION;
use axum::http::request::Parts;

use docstore_auth::extract_token;
use docstore_core::error::AppError;
use docstore_service::RequestContext;

use crate::error::ApiError;
use crate::state::AppState;

/// Authenticated caller. Handlers list it first so authentication is
/// decided before any query or body parsing.
#[derive(Debug, Clone)]
pub struct AuthUser(pub RequestContext);

impl std::ops::Deref for AuthUser {
    type Target = RequestContext;
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let header = parts
            .headers
            .get(AUTHORIZATION)
            .and_then(|v| v.to_str().ok())
            .ok_or_else(|| AppError::authentication("Authentication credentials were not provided."))?;

        let token = extract_token(header)
            .ok_or_else(|| AppError::authentication("Invalid Authorization header format"))?;

        let user = state.tokens.authenticate(token).await?;
        Ok(AuthUser(RequestContext::new(user.id, user.email)))
    }
}
