//! User entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// A registered user. Users only appear in the versioning engine as the
/// `owner_id` of the versions they upload.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct User {
    /// Unique user identifier.
    pub id: Uuid,
    /// Login email address, unique case-insensitively.
    pub email: String,
    /// Human-readable name.
    pub name: String,
    /// Argon2 password hash.
    #[serde(skip_serializing)]
    pub password_hash: String,
    /// Disabled users cannot obtain or use tokens.
    pub is_active: bool,
    /// When the user was created.
    pub created_at: DateTime<Utc>,
}

/// Data required to create a new user.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateUser {
    /// Login email address.
    pub email: String,
    /// Human-readable name.
    pub name: String,
    /// Pre-hashed password.
    pub password_hash: String,
}
