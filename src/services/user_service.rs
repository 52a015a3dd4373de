use std::sync::Arc;

use crate::{
    errors::{AppError, AppResult},
    models::domain::User,
    repositories::UserRepository,
};

const BCRYPT_COST: u32 = bcrypt::DEFAULT_COST;

pub struct UserService {
    repository: Arc<dyn UserRepository>,
}

impl UserService {
    pub fn new(repository: Arc<dyn UserRepository>) -> Self {
        Self { repository }
    }

    /// Registers a new account. Email is normalized before the uniqueness
    /// check so `Jane@X.com` and `jane@x.com` are the same account.
    pub async fn register(&self, email: &str, password: &str) -> AppResult<User> {
        let email = User::normalize_email(email);
        if email.is_empty() || password.is_empty() {
            return Err(AppError::ValidationError("Missing credentials".to_string()));
        }

        if self.repository.find_by_email(&email).await?.is_some() {
            return Err(AppError::AlreadyExists("Email exists".to_string()));
        }

        let password_hash = bcrypt::hash(password, BCRYPT_COST)
            .map_err(|e| AppError::InternalError(format!("Failed to hash password: {}", e)))?;

        let user = User::new(&email, &password_hash);
        self.repository.create(user).await
    }

    /// Verifies credentials and returns the matching user. The same error is
    /// returned for an unknown email and a wrong password.
    pub async fn authenticate(&self, email: &str, password: &str) -> AppResult<User> {
        let email = User::normalize_email(email);
        if email.is_empty() || password.is_empty() {
            return Err(AppError::ValidationError("Missing credentials".to_string()));
        }

        let user = self
            .repository
            .find_by_email(&email)
            .await?
            .ok_or_else(|| AppError::Unauthorized("Invalid credentials".to_string()))?;

        let matches = bcrypt::verify(password, &user.password_hash)
            .map_err(|e| AppError::InternalError(format!("Failed to verify password: {}", e)))?;

        if !matches {
            return Err(AppError::Unauthorized("Invalid credentials".to_string()));
        }

        Ok(user)
    }

    pub async fn get_user(&self, id: &str) -> AppResult<User> {
        self.repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound("User not found".to_string()))
    }
}
