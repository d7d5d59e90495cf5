//! Credential exchange and bearer authentication.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::{debug, info};

use docstore_core::config::AuthConfig;
use docstore_core::error::AppError;
use docstore_core::result::AppResult;
use docstore_database::UserStore;
use docstore_entity::user::{CreateUser, User};

use crate::jwt::{JwtDecoder, JwtEncoder};
use crate::password::{PasswordHasher, PasswordPolicy};

/// Rejection message for any failed credential exchange.
const INVALID_CREDENTIALS: &str = "Unable to log in with provided credentials.";

/// A freshly signed bearer token.
#[derive(Debug, Clone, Serialize)]
pub struct IssuedToken {
    /// The token string.
    pub token: String,
    /// When the token stops being accepted.
    pub expires_at: DateTime<Utc>,
}

/// Issues tokens for valid credentials and resolves tokens back to users.
#[derive(Debug, Clone)]
pub struct TokenService {
    users: Arc<dyn UserStore>,
    encoder: JwtEncoder,
    decoder: JwtDecoder,
    hasher: PasswordHasher,
    policy: PasswordPolicy,
}

impl TokenService {
    /// Build the service over a user store.
    pub fn new(users: Arc<dyn UserStore>, config: &AuthConfig) -> Self {
        Self {
            users,
            encoder: JwtEncoder::new(config),
            decoder: JwtDecoder::new(config),
            hasher: PasswordHasher::new(),
            policy: PasswordPolicy::new(config),
        }
    }

    /// Exchange email and password for a bearer token.
    ///
    /// Unknown email, wrong password and disabled accounts all fail with
    /// the same `Validation` error.
    pub async fn obtain(&self, email: &str, password: &str) -> AppResult<IssuedToken> {
        if email.trim().is_empty() || password.is_empty() {
            return Err(AppError::validation(INVALID_CREDENTIALS));
        }

        let Some(user) = self.users.find_by_email(email.trim()).await? else {
            debug!(email, "Token request for unknown email");
            return Err(AppError::validation(INVALID_CREDENTIALS));
        };

        if !user.is_active || !self.hasher.verify_password(password, &user.password_hash)? {
            debug!(user_id = %user.id, "Token request rejected");
            return Err(AppError::validation(INVALID_CREDENTIALS));
        }

        let (token, expires_at) = self.encoder.issue(user.id, &user.email)?;
        info!(user_id = %user.id, "Issued bearer token");
        Ok(IssuedToken { token, expires_at })
    }

    /// Resolve a bearer token to an active user.
    pub async fn authenticate(&self, token: &str) -> AppResult<User> {
        let claims = self.decoder.decode(token)?;
        match self.users.find_by_id(claims.user_id()).await? {
            Some(user) if user.is_active => Ok(user),
            Some(_) => Err(AppError::authentication("User account is disabled")),
            None => Err(AppError::authentication("User no longer exists")),
        }
    }

    /// Create an account after checking the password policy.
    pub async fn register(&self, email: &str, name: &str, password: &str) -> AppResult<User> {
        let email = email.trim();
        if email.is_empty() || !email.contains('@') {
            return Err(AppError::validation("A valid email address is required."));
        }
        self.policy.validate(password)?;

        let user = self
            .users
            .create(CreateUser {
                email: email.to_string(),
                name: name.trim().to_string(),
                password_hash: self.hasher.hash_password(password)?,
            })
            .await?;
        info!(user_id = %user.id, email = %user.email, "Created user");
        Ok(user)
    }
}
