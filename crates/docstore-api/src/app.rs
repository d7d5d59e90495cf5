//! Application builder and server bootstrap.

use std::sync::Arc;

use axum::Router;
use axum::middleware as axum_middleware;
use tower_http::trace::TraceLayer;
use tracing::{info, warn};

use docstore_core::config::{AppConfig, DatabaseBackend, StorageBackend};
use docstore_core::error::AppError;
use docstore_core::traits::storage::StorageProvider;
use docstore_database::{
    DatabasePool, MemoryUserStore, MemoryVersionStore, UserRepository, UserStore,
    VersionRepository, VersionStore,
};
use docstore_storage::{LocalStorageProvider, MemoryStorageProvider};

use crate::middleware::cors::build_cors_layer;
use crate::middleware::logging::request_logging;
use crate::router::build_router;
use crate::state::AppState;

/// Router plus CORS, tracing and request logging layers.
pub fn build_app(state: AppState) -> Router {
    let cors = build_cors_layer(&state.config.server.cors);
    build_router(state)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .layer(axum_middleware::from_fn(request_logging))
}

/// Construct stores and blob storage for the configured backends.
pub async fn build_state(config: AppConfig) -> Result<AppState, AppError> {
    let (version_store, user_store): (Arc<dyn VersionStore>, Arc<dyn UserStore>) =
        match config.database.backend {
            DatabaseBackend::Postgres => {
                let db = DatabasePool::connect_and_migrate(&config.database).await?;
                (
                    Arc::new(VersionRepository::new(db.pool().clone())),
                    Arc::new(UserRepository::new(db.pool().clone())),
                )
            }
            DatabaseBackend::Memory => {
                warn!("Using in-memory version store; records are lost on exit");
                (
                    Arc::new(MemoryVersionStore::new()),
                    Arc::new(MemoryUserStore::new()),
                )
            }
        };

    let storage: Arc<dyn StorageProvider> = match config.storage.backend {
        StorageBackend::Local => {
            Arc::new(LocalStorageProvider::new(&config.storage.root_path).await?)
        }
        StorageBackend::Memory => {
            warn!("Using in-memory blob storage; content is lost on exit");
            Arc::new(MemoryStorageProvider::new())
        }
    };

    info!(
        database = ?config.database.backend,
        storage = storage.provider_type(),
        "Backends initialized"
    );
    Ok(AppState::new(config, version_store, user_store, storage))
}

/// Build the state, bind, and serve until a shutdown signal arrives.
pub async fn run_server(config: AppConfig) -> Result<(), AppError> {
    let addr = format!("{}:{}", config.server.host, config.server.port);
    let state = build_state(config).await?;
    let app = build_app(state);

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| AppError::internal(format!("Failed to bind {addr}: {e}")))?;
    info!(%addr, "Docstore server listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| AppError::internal(format!("Server error: {e}")))?;

    info!("Docstore server shut down gracefully");
    Ok(())
}

/// Resolve on Ctrl+C or SIGTERM.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            warn!(error = %e, "Failed to listen for Ctrl+C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                warn!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
    info!("Shutdown signal received");
}
