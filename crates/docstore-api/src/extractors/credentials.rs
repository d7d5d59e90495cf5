//! Credentials extractor accepting JSON or URL-encoded form bodies.

use axum::extract::{Form, FromRequest, Request};
use axum::http::header::CONTENT_TYPE;
use axum::Json;
use validator::Validate;

use docstore_core::error::AppError;

use crate::dto::request::TokenRequest;
use crate::error::ApiError;
use crate::state::AppState;

/// Validated `TokenRequest` from either body encoding.
#[derive(Debug, Clone)]
pub struct Credentials(pub TokenRequest);

impl FromRequest<AppState> for Credentials {
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &AppState) -> Result<Self, Self::Rejection> {
        let is_json = req
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .is_some_and(|ct| ct.starts_with("application/json"));

        let body = if is_json {
            Json::<TokenRequest>::from_request(req, state)
                .await
                .map(|Json(b)| b)
                .map_err(|e| AppError::validation(e.body_text()))?
        } else {
            Form::<TokenRequest>::from_request(req, state)
                .await
                .map(|Form(b)| b)
                .map_err(|e| AppError::validation(e.body_text()))?
        };

        body.validate()
            .map_err(|e| AppError::validation(e.to_string()))?;
        Ok(Credentials(body))
    }
}
