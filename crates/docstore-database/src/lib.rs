//! # docstore-database
//!
//! Persistence for Docstore. The [`VersionStore`] and [`UserStore`] traits
//! are implemented twice: against PostgreSQL through sqlx, and in memory
//! for tests and single-process deployments.

pub mod connection;
pub mod memory;
pub mod migration;
pub mod repositories;
pub mod store;

pub use connection::DatabasePool;
pub use memory::{MemoryUserStore, MemoryVersionStore};
pub use repositories::{UserRepository, VersionRepository};
pub use store::{UserStore, VersionStore};
