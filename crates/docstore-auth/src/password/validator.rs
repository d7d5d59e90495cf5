//! Password acceptance policy for new accounts.

use docstore_core::config::AuthConfig;
use docstore_core::error::AppError;

/// Minimum-length policy applied when users are created.
#[derive(Debug, Clone, Copy)]
pub struct PasswordPolicy {
    min_length: usize,
}

impl PasswordPolicy {
    /// Build the policy from configuration.
    pub fn new(config: &AuthConfig) -> Self {
        Self {
            min_length: config.password_min_length,
        }
    }

    /// Reject passwords that are too short or blank.
    pub fn validate(&self, password: &str) -> Result<(), AppError> {
        if password.trim().is_empty() {
            return Err(AppError::validation("Password must not be blank."));
        }
        if password.chars().count() < self.min_length {
            return Err(AppError::validation(format!(
                "Password must be at least {} characters.",
                self.min_length
            )));
        }
        Ok(())
    }
}
