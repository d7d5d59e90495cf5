//! Upload and download handlers.

use axum::Json;
use axum::body::Body;
use axum::extract::multipart::MultipartRejection;
use axum::extract::{Multipart, Query, State};
use axum::http::{StatusCode, header};
use axum::response::Response;
use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, utf8_percent_encode};

use docstore_core::error::AppError;
use docstore_service::UploadParams;

use crate::dto::request::VersionQuery;
use crate::dto::response::FileVersionResponse;
use crate::error::ApiError;
use crate::extractors::AuthUser;
use crate::state::AppState;

/// Bytes left unescaped in an RFC 5987 `filename*` value (`attr-char`).
const ATTR_CHAR: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'!')
    .remove(b'#')
    .remove(b'$')
    .remove(b'&')
    .remove(b'+')
    .remove(b'-')
    .remove(b'.')
    .remove(b'^')
    .remove(b'_')
    .remove(b'`')
    .remove(b'|')
    .remove(b'~');

/// POST /api/files/upload
///
/// Multipart fields: `parent_url` (text) and `file` (the content; its
/// filename becomes the version's `file_name`).
pub async fn upload(
    auth: AuthUser,
    State(state): State<AppState>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<(StatusCode, Json<FileVersionResponse>), ApiError> {
    let mut multipart =
        multipart.map_err(|_| AppError::validation("parent_url and file are required."))?;
    let mut params = UploadParams::default();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::validation(format!("Invalid multipart body: {e}")))?
    {
        match field.name() {
            Some("parent_url") => {
                let value = field
                    .text()
                    .await
                    .map_err(|e| AppError::validation(format!("Invalid parent_url field: {e}")))?;
                params.parent_url = Some(value);
            }
            Some("file") => {
                params.file_name = field.file_name().map(str::to_string);
                let data = field
                    .bytes()
                    .await
                    .map_err(|e| AppError::validation(format!("Invalid file field: {e}")))?;
                params.data = Some(data);
            }
            _ => {}
        }
    }

    let version = state.versions.upload(&auth, params).await?;
    Ok((StatusCode::CREATED, Json(version.into())))
}

/// GET /api/files/download?parent_url=...&revision=...
pub async fn download(
    auth: AuthUser,
    State(state): State<AppState>,
    Query(query): Query<VersionQuery>,
) -> Result<Response, ApiError> {
    let result = state
        .versions
        .download(&auth, query.parent_url.as_deref(), query.revision.as_deref())
        .await?;

    Response::builder()
        .status(StatusCode::OK)
        .header(header::CONTENT_TYPE, result.content_type)
        .header(
            header::CONTENT_DISPOSITION,
            content_disposition(&result.filename),
        )
        .header(header::CONTENT_LENGTH, result.data.len())
        .header(header::ETAG, format!("\"{}\"", result.version.content_hash))
        .body(Body::from(result.data))
        .map_err(|e| AppError::internal(format!("Response build failed: {e}")).into())
}

/// `attachment` disposition with an ASCII `filename` fallback and the
/// exact name in `filename*`.
fn content_disposition(filename: &str) -> String {
    let fallback: String = filename
        .chars()
        .map(|c| {
            if (c.is_ascii_graphic() || c == ' ') && !matches!(c, '"' | '\\' | ';') {
                c
            } else {
                '_'
            }
        })
        .collect();
    let fallback = if fallback.trim().is_empty() {
        "download".to_string()
    } else {
        fallback
    };
    let encoded = utf8_percent_encode(filename, ATTR_CHAR);
    format!("attachment; filename=\"{fallback}\"; filename*=UTF-8''{encoded}")
}
