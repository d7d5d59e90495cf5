//! Application state shared across all handlers and middleware.

use std::sync::Arc;

use docstore_auth::TokenService;
use docstore_core::config::AppConfig;
use docstore_core::traits::storage::StorageProvider;
use docstore_database::{UserStore, VersionStore};
use docstore_service::FileVersionService;

/// Dependencies available to every handler through `State<AppState>`.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Application configuration.
    pub config: Arc<AppConfig>,
    /// Versioning engine.
    pub versions: Arc<FileVersionService>,
    /// Credential exchange and bearer authentication.
    pub tokens: Arc<TokenService>,
}

impl AppState {
    /// Wire the services over the chosen backends.
    pub fn new(
        config: AppConfig,
        version_store: Arc<dyn VersionStore>,
        user_store: Arc<dyn UserStore>,
        storage: Arc<dyn StorageProvider>,
    ) -> Self {
        let versions = FileVersionService::new(version_store, storage, &config.storage);
        let tokens = TokenService::new(user_store, &config.auth);
        Self {
            config: Arc::new(config),
            versions: Arc::new(versions),
            tokens: Arc::new(tokens),
        }
    }
}
