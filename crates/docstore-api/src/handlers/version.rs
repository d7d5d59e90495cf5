//! Version metadata handlers.

use axum::Json;
use axum::extract::rejection::PathRejection;
use axum::extract::{Path, Query, State};
use uuid::Uuid;

use docstore_core::error::AppError;

use crate::dto::request::VersionQuery;
use crate::dto::response::FileVersionResponse;
use crate::error::ApiError;
use crate::extractors::AuthUser;
use crate::state::AppState;

/// GET /api/file_versions/?parent_url=...&revision=...
pub async fn list(
    auth: AuthUser,
    State(state): State<AppState>,
    Query(query): Query<VersionQuery>,
) -> Result<Json<Vec<FileVersionResponse>>, ApiError> {
    let versions = state
        .versions
        .list(&auth, query.parent_url.as_deref(), query.revision.as_deref())
        .await?;
    Ok(Json(versions.into_iter().map(Into::into).collect()))
}

/// GET /api/file_versions/{id}
pub async fn get(
    auth: AuthUser,
    State(state): State<AppState>,
    id: Result<Path<Uuid>, PathRejection>,
) -> Result<Json<FileVersionResponse>, ApiError> {
    let Path(id) = id.map_err(|_| AppError::not_found("File version not found"))?;
    let version = state.versions.get(&auth, id).await?;
    Ok(Json(version.into()))
}
