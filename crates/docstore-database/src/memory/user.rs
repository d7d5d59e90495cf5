//! In-memory user store.

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;
use uuid::Uuid;

use docstore_core::error::AppError;
use docstore_core::result::AppResult;
use docstore_entity::user::{CreateUser, User};

use crate::store::UserStore;

/// Users kept in insertion order.
#[derive(Debug, Default)]
pub struct MemoryUserStore {
    users: RwLock<Vec<User>>,
}

impl MemoryUserStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UserStore for MemoryUserStore {
    async fn create(&self, input: CreateUser) -> AppResult<User> {
        let mut users = self.users.write().await;
        if users.iter().any(|u| u.email.eq_ignore_ascii_case(&input.email)) {
            return Err(AppError::conflict(format!(
                "A user with email {} already exists",
                input.email
            )));
        }

        let user = User {
            id: Uuid::new_v4(),
            email: input.email,
            name: input.name,
            password_hash: input.password_hash,
            is_active: true,
            created_at: Utc::now(),
        };
        users.push(user.clone());
        Ok(user)
    }

    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<User>> {
        Ok(self.users.read().await.iter().find(|u| u.id == id).cloned())
    }

    async fn find_by_email(&self, email: &str) -> AppResult<Option<User>> {
        Ok(self
            .users
            .read()
            .await
            .iter()
            .find(|u| u.email.eq_ignore_ascii_case(email))
            .cloned())
    }
}
