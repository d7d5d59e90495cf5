//! Custom Axum extractors.

pub mod auth;
pub mod credentials;

pub use auth::AuthUser;
pub use credentials::Credentials;
