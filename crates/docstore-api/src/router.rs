//! Route definitions for the Docstore HTTP API.
//!
//! Every route is mounted under `/api` and also answers with a trailing
//! slash.

use axum::Router;
use axum::extract::DefaultBodyLimit;
use axum::routing::{MethodRouter, get, post};

use crate::handlers;
use crate::state::AppState;

/// Multipart framing allowance on top of the configured content limit.
const MULTIPART_OVERHEAD_BYTES: usize = 64 * 1024;

/// Build the API router with state attached.
pub fn build_router(state: AppState) -> Router {
    let body_limit = usize::try_from(state.config.storage.max_upload_size_bytes)
        .unwrap_or(usize::MAX)
        .saturating_add(MULTIPART_OVERHEAD_BYTES);

    let api_routes = Router::new()
        .merge(auth_routes())
        .merge(file_routes())
        .merge(version_routes())
        .merge(health_routes());

    Router::new()
        .nest("/api", api_routes)
        .layer(DefaultBodyLimit::max(body_limit))
        .with_state(state)
}

/// Register `path` and `path/` with the same handler.
fn both(router: Router<AppState>, path: &str, handler: MethodRouter<AppState>) -> Router<AppState> {
    router
        .route(path, handler.clone())
        .route(&format!("{path}/"), handler)
}

fn auth_routes() -> Router<AppState> {
    both(Router::new(), "/auth-token", post(handlers::auth::obtain_token))
}

fn file_routes() -> Router<AppState> {
    let router = both(Router::new(), "/files/upload", post(handlers::file::upload));
    both(router, "/files/download", get(handlers::file::download))
}

fn version_routes() -> Router<AppState> {
    let router = both(Router::new(), "/file_versions", get(handlers::version::list));
    both(router, "/file_versions/{id}", get(handlers::version::get))
}

fn health_routes() -> Router<AppState> {
    Router::new().route("/health", get(handlers::health::health))
}
