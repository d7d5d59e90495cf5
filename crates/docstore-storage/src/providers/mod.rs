//! Blob storage provider implementations.

pub mod local;
pub mod memory;
