//! # docstore-service
//!
//! The versioning engine. Handlers call [`FileVersionService`], which
//! serializes uploads per lineage with the [`VersionSequencer`], consults
//! the [`PermissionGate`], hashes content and persists records through the
//! store traits.

pub mod context;
pub mod version;

pub use context::RequestContext;
pub use version::{
    Access, DownloadResult, FileVersionService, HealthReport, LineageGuard, PermissionGate,
    UploadParams, VersionSequencer, WriteCheck,
};
