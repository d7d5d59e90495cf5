//! # docstore-storage
//!
//! Blob storage for version content and the SHA-256 content hasher.
//!
//! Providers implement [`docstore_core::traits::storage::StorageProvider`];
//! the service picks one at startup from `storage.backend`.

pub mod digest;
pub mod mime;
pub mod providers;

pub use digest::{ContentDigest, ContentHasher};
pub use providers::local::LocalStorageProvider;
pub use providers::memory::MemoryStorageProvider;
