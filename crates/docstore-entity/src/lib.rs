//! # docstore-entity
//!
//! Domain entity models for Docstore. Every struct in this crate represents
//! a database table row or the input needed to create one. Row types
//! derive `sqlx::FromRow`.

pub mod file;
pub mod user;
