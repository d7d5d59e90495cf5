//! File version domain entities.

pub mod version;

pub use version::{CreateFileVersion, FileVersion, VersionFilter};
