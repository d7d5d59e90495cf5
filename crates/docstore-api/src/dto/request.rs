//! Request DTOs.

use serde::{Deserialize, Serialize};
use validator::Validate;

/// Credentials for `POST /api/auth-token`, as JSON or form fields.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct TokenRequest {
    /// Login email. `username` is accepted as an alias.
    #[serde(default, alias = "username")]
    #[validate(length(min = 1, message = "email is required."))]
    pub email: String,
    /// Plaintext password.
    #[serde(default)]
    #[validate(length(min = 1, message = "password is required."))]
    pub password: String,
}

/// Query string of the download and listing endpoints.
///
/// Values stay raw strings so that malformed revisions are reported by
/// the service, after authentication.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct VersionQuery {
    /// Lineage path.
    pub parent_url: Option<String>,
    /// Version number.
    pub revision: Option<String>,
}
