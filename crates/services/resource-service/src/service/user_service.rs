//! User service - Handles user-related business logic.

use async_trait::async_trait;
use std::sync::Arc;
use uuid::Uuid;

use common::{AppError, AppResult, OptionExt};
use domain::{validate, Principal, User};

use super::privileges::AccountPrivileges;
use crate::repository::UserRepository;

/// User service trait for dependency injection.
#[async_trait]
pub trait UserService: Send + Sync {
    /// List all users
    async fn list_users(&self) -> AppResult<Vec<User>>;

    /// Create a new user
    async fn create_user(&self, user: User) -> AppResult<User>;

    /// Get user by ID
    async fn get_user(&self, id: Uuid) -> AppResult<User>;

    /// Replace every attribute of the user with `id`
    async fn update_user(&self, id: Uuid, user: User) -> AppResult<User>;

    /// Delete user by ID
    async fn delete_user(&self, id: Uuid) -> AppResult<()>;

    /// Resolve the authenticated principal to its user account
    async fn get_current_user(&self, principal: Option<&Principal>) -> AppResult<User>;
}

/// Concrete implementation of UserService using repository.
pub struct UserManager {
    repo: Arc<dyn UserRepository>,
    privileges: Arc<dyn AccountPrivileges>,
}

impl UserManager {
    /// Create new user service instance with repository
    pub fn new(repo: Arc<dyn UserRepository>, privileges: Arc<dyn AccountPrivileges>) -> Self {
        Self { repo, privileges }
    }
}

#[async_trait]
impl UserService for UserManager {
    async fn list_users(&self) -> AppResult<Vec<User>> {
        self.repo.list().await
    }

    async fn create_user(&self, user: User) -> AppResult<User> {
        validate(&user)?;
        tracing::debug!(username = %user.username, "Converting user for storage");

        self.repo
            .create(user)
            .await
            .inspect_err(|e| tracing::error!("Failed to create user: {}", e))
    }

    async fn get_user(&self, id: Uuid) -> AppResult<User> {
        self.repo.find_by_id(id).await?.ok_or_not_found()
    }

    async fn update_user(&self, id: Uuid, user: User) -> AppResult<User> {
        validate(&user)?;

        self.repo
            .update(id, user)
            .await
            .inspect_err(|e| tracing::error!("Failed to update user {}: {}", id, e))
    }

    async fn delete_user(&self, id: Uuid) -> AppResult<()> {
        self.repo.delete(id).await
    }

    async fn get_current_user(&self, principal: Option<&Principal>) -> AppResult<User> {
        let email = principal
            .map(|p| p.email.as_str())
            .filter(|email| !email.is_empty())
            .ok_or(AppError::Unauthorized)?;

        let mut user = self.repo.find_by_email(email).await?.ok_or_not_found()?;
        user.permissions = self.privileges.permissions(&user);
        user.two_factor = self.privileges.two_factor(&user);

        Ok(user)
    }
}
