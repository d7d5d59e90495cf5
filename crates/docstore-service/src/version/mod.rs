//! File versioning: sequencing, permission checks and the service facade.

pub mod permission;
pub mod sequencer;
pub mod service;

pub use permission::{Access, PermissionGate, WriteCheck};
pub use sequencer::{LineageGuard, VersionSequencer};
pub use service::{DownloadResult, FileVersionService, HealthReport, UploadParams};
