//! Token exchange handler.

use axum::Json;
use axum::extract::State;

use crate::dto::response::TokenResponse;
use crate::error::ApiError;
use crate::extractors::Credentials;
use crate::state::AppState;

/// POST /api/auth-token
pub async fn obtain_token(
    State(state): State<AppState>,
    Credentials(req): Credentials,
) -> Result<Json<TokenResponse>, ApiError> {
    let issued = state.tokens.obtain(&req.email, &req.password).await?;
    Ok(Json(TokenResponse {
        token: issued.token,
        expires_at: issued.expires_at,
    }))
}
