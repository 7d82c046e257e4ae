use async_trait::async_trait;
use uuid::Uuid;

use super::{CreateUserDto, Credential, User};
use crate::domain::DomainResult;

#[async_trait]
pub trait UserRepositoryInterface: Send + Sync {
    /// Fails with `Conflict` when the username or email is taken.
    async fn create_user(&self, dto: CreateUserDto) -> DomainResult<User>;

    async fn get_user_by_email(&self, email: &str) -> DomainResult<Option<User>>;
    async fn get_user_by_username(&self, username: &str) -> DomainResult<Option<User>>;

    /// Loads only the fields needed to authorize a request.
    async fn get_credential(&self, id: Uuid) -> DomainResult<Option<Credential>>;

    async fn update_user_password(&self, id: Uuid, new_password_hash: &str) -> DomainResult<()>;
}
