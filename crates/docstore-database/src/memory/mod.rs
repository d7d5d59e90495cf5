//! In-process store implementations.
//!
//! Data lives only as long as the process. Used by the integration tests
//! and by `database.backend = "memory"`.

pub mod user;
pub mod version;

pub use user::MemoryUserStore;
pub use version::MemoryVersionStore;
