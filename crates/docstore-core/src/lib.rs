//! # docstore-core
//!
//! Core crate for Docstore. Contains configuration schemas, the unified
//! error system, the blob storage trait, and the lineage key type shared
//! by the versioning engine.
//!
//! This crate has **no** internal dependencies on other Docstore crates.

pub mod config;
pub mod error;
pub mod result;
pub mod traits;
pub mod types;

pub use error::AppError;
pub use result::AppResult;
