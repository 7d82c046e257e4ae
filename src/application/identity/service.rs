//! User management service: application-layer orchestration
//!
//! Registration, login and password changes live here. HTTP handlers are
//! thin wrappers that delegate to this service.

use std::sync::Arc;

use tracing::{info, warn};
use uuid::Uuid;

use crate::domain::{
    CreateUserDto, DomainError, DomainResult, User, UserRepositoryInterface, UserRole,
};
use crate::infrastructure::crypto::jwt::{create_token, JwtConfig};
use crate::infrastructure::crypto::password::{hash_password_async, verify_password_async};

/// Same message for unknown email and wrong password.
const INVALID_LOGIN: &str = "invalid username or password";

const INVALID_SESSION: &str = "Invalid session";

/// Authentication result returned after a successful login
#[derive(Debug, Clone)]
pub struct AuthResult {
    pub token: String,
    /// Token lifetime in seconds
    pub expires_in: i64,
    pub user: User,
}

/// Registration input, already validated by the caller.
#[derive(Debug, Clone)]
pub struct Registration {
    pub username: String,
    pub email: String,
    pub phone_number: String,
    pub password: String,
}

/// User service: orchestrates the identity use-cases.
///
/// Generic over `R: UserRepositoryInterface` so it stays decoupled from
/// the concrete persistence layer.
pub struct UserService<R: UserRepositoryInterface> {
    repo: Arc<R>,
    jwt_config: JwtConfig,
    bcrypt_cost: u32,
}

impl<R: UserRepositoryInterface> UserService<R> {
    pub fn new(repo: Arc<R>, jwt_config: JwtConfig, bcrypt_cost: u32) -> Self {
        Self {
            repo,
            jwt_config,
            bcrypt_cost,
        }
    }

    pub fn jwt_config(&self) -> &JwtConfig {
        &self.jwt_config
    }

    // ── Registration ────────────────────────────────────────────

    /// Register a new user with the standard role.
    pub async fn register(&self, input: Registration) -> DomainResult<User> {
        if self.repo.get_user_by_username(&input.username).await?.is_some() {
            return Err(DomainError::Conflict("Username already exists".into()));
        }
        if self.repo.get_user_by_email(&input.email).await?.is_some() {
            return Err(DomainError::Conflict("Email already exists".into()));
        }

        let password_hash = hash_password_async(input.password, self.bcrypt_cost).await?;

        let user = self
            .repo
            .create_user(CreateUserDto {
                username: input.username,
                email: input.email,
                phone_number: input.phone_number,
                password_hash,
                role: UserRole::STANDARD,
            })
            .await?;

        info!(user_id = %user.id, username = %user.username, "New user registered");
        Ok(user)
    }

    // ── Authentication ──────────────────────────────────────────

    /// Check email + password and issue a session token.
    pub async fn login(&self, email: &str, password: &str) -> DomainResult<AuthResult> {
        let Some(user) = self.repo.get_user_by_email(email).await? else {
            warn!("Login attempt for unknown email");
            return Err(DomainError::Unauthorized(INVALID_LOGIN.into()));
        };

        let valid =
            verify_password_async(password.to_string(), user.password_hash.clone()).await?;
        if !valid {
            warn!(user_id = %user.id, "Login attempt with wrong password");
            return Err(DomainError::Unauthorized(INVALID_LOGIN.into()));
        }

        let token = create_token(&user.id.to_string(), &self.jwt_config)
            .map_err(|e| DomainError::Internal(format!("Failed to create token: {}", e)))?;

        info!(user_id = %user.id, "User logged in");
        Ok(AuthResult {
            token,
            expires_in: self.jwt_config.expiration_secs(),
            user,
        })
    }

    // ── Commands ────────────────────────────────────────────────

    /// Overwrite the password of an authenticated user. A token whose user
    /// no longer exists is an invalid session.
    pub async fn update_password(&self, user_id: Uuid, new_password: String) -> DomainResult<()> {
        let new_hash = hash_password_async(new_password, self.bcrypt_cost).await?;
        self.repo
            .update_user_password(user_id, &new_hash)
            .await
            .map_err(|e| match e {
                DomainError::NotFound { .. } => {
                    warn!(%user_id, "Password change for unknown user");
                    DomainError::Unauthorized(INVALID_SESSION.into())
                }
                other => other,
            })?;

        info!(%user_id, "Password changed");
        Ok(())
    }
}
