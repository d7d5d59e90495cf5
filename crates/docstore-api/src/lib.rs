//! # docstore-api
//!
//! HTTP API layer for Docstore built on Axum.
//!
//! Provides the REST endpoints under `/api`, the bearer-token extractor,
//! CORS and request logging middleware, DTOs, error mapping and the
//! server bootstrap that selects storage backends from configuration.

pub mod app;
pub mod dto;
pub mod error;
pub mod extractors;
pub mod handlers;
pub mod middleware;
pub mod router;
pub mod state;

pub use app::{build_app, build_state, run_server};
pub use state::AppState;
