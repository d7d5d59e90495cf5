//! Blob storage configuration.

use serde::{Deserialize, Serialize};

/// Which provider holds uploaded version content.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StorageBackend {
    /// Local filesystem under `root_path`.
    Local,
    /// Process memory.
    Memory,
}

/// Top-level storage configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    /// Storage provider.
    #[serde(default = "default_backend")]
    pub backend: StorageBackend,
    /// Root path for local file storage.
    #[serde(default = "default_root")]
    pub root_path: String,
    /// Maximum upload size in bytes (default 1 GB).
    #[serde(default = "default_max_upload")]
    pub max_upload_size_bytes: u64,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            backend: default_backend(),
            root_path: default_root(),
            max_upload_size_bytes: default_max_upload(),
        }
    }
}

fn default_backend() -> StorageBackend {
    StorageBackend::Local
}

fn default_root() -> String {
    "./data/storage".to_string()
}

fn default_max_upload() -> u64 {
    1_073_741_824 // 1 GB
}
