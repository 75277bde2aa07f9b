//! User provisioning used by the CLI and server bootstrap.

use std::sync::Arc;

use tracing::info;
use validator::ValidateEmail;

use noticeflow_auth::password::PasswordHasher;
use noticeflow_core::error::AppError;
use noticeflow_core::types::pagination::{PageRequest, PageResponse};
use noticeflow_database::store::UserStore;
use noticeflow_entity::user::{CreateUser, User, UserRole};

/// Password length accepted at sign-in and creation.
const PASSWORD_LENGTH: std::ops::RangeInclusive<usize> = 8..=50;

/// Creates and lists user accounts.
#[derive(Debug, Clone)]
pub struct UserService {
    /// User store.
    users: Arc<dyn UserStore>,
    /// Password hasher.
    hasher: PasswordHasher,
}

impl UserService {
    /// Creates a new user service.
    pub fn new(users: Arc<dyn UserStore>) -> Self {
        Self {
            users,
            hasher: PasswordHasher::new(),
        }
    }

    /// Creates a user with a hashed password.
    pub async fn create_user(
        &self,
        name: &str,
        email: &str,
        password: &str,
        role: UserRole,
    ) -> Result<User, AppError> {
        let name = name.trim();
        let email = email.trim().to_lowercase();

        if name.is_empty() {
            return Err(AppError::validation("Name is required"));
        }
        if !email.validate_email() {
            return Err(AppError::validation("Email must be a valid email"));
        }
        if !PASSWORD_LENGTH.contains(&password.chars().count()) {
            return Err(AppError::validation(
                "Password must be between 8 and 50 characters",
            ));
        }

        let password_hash = self.hasher.hash_password(password)?;
        let user = self
            .users
            .create(&CreateUser {
                name: name.to_string(),
                email,
                password_hash,
                role,
            })
            .await?;

        info!(user_id = %user.id, role = %user.role, "Created user");
        Ok(user)
    }

    /// Creates the user unless one with the same email exists.
    /// Returns `true` if a user was created.
    pub async fn ensure_user(
        &self,
        name: &str,
        email: &str,
        password: &str,
        role: UserRole,
    ) -> Result<bool, AppError> {
        if self.users.find_by_email(email.trim()).await?.is_some() {
            return Ok(false);
        }
        self.create_user(name, email, password, role).await?;
        Ok(true)
    }

    /// Lists users, newest first.
    pub async fn list_users(&self, page: PageRequest) -> Result<PageResponse<User>, AppError> {
        self.users.list(&page).await
    }
}
