use async_trait::async_trait;
use chrono::Utc;
use sea_orm::prelude::Expr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, FromQueryResult,
    QueryFilter, QuerySelect, Select, Set, SqlErr,
};
use uuid::Uuid;

use crate::domain::{
    CreateUserDto, Credential, DomainError, DomainResult, User, UserRepositoryInterface, UserRole,
};
use crate::infrastructure::database::entities::user;

pub struct UserRepository {
    db: DatabaseConnection,
}

impl UserRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    fn live() -> Select<user::Entity> {
        user::Entity::find().filter(user::Column::DeletedAt.is_null())
    }
}

/// Projection loaded for session hydration.
#[derive(Debug, FromQueryResult)]
struct CredentialRow {
    id: Uuid,
    username: String,
    email: String,
    phone_number: String,
    role: i32,
}

// ── Conversion helpers ──────────────────────────────────────────

fn user_model_to_domain(model: user::Model) -> User {
    User {
        id: model.id,
        username: model.username,
        email: model.email,
        phone_number: model.phone_number,
        password_hash: model.password_hash,
        role: UserRole(model.role),
        created_at: model.created_at,
        updated_at: model.updated_at,
    }
}

fn insert_err(e: DbErr) -> DomainError {
    match e.sql_err() {
        Some(SqlErr::UniqueConstraintViolation(_)) => {
            DomainError::Conflict("Username or email already exists".to_string())
        }
        _ => e.into(),
    }
}

// ── Repository implementation ───────────────────────────────────

#[async_trait]
impl UserRepositoryInterface for UserRepository {
    async fn create_user(&self, dto: CreateUserDto) -> DomainResult<User> {
        let now = Utc::now();

        let new_user = user::ActiveModel {
            id: Set(Uuid::new_v4()),
            username: Set(dto.username),
            email: Set(dto.email),
            phone_number: Set(dto.phone_number),
            password_hash: Set(dto.password_hash),
            role: Set(dto.role.0),
            created_at: Set(now),
            updated_at: Set(now),
            deleted_at: Set(None),
        };

        let model = new_user.insert(&self.db).await.map_err(insert_err)?;
        Ok(user_model_to_domain(model))
    }

    async fn get_user_by_email(&self, email: &str) -> DomainResult<Option<User>> {
        let model = Self::live()
            .filter(user::Column::Email.eq(email))
            .one(&self.db)
            .await?;

        Ok(model.map(user_model_to_domain))
    }

    async fn get_user_by_username(&self, username: &str) -> DomainResult<Option<User>> {
        let model = Self::live()
            .filter(user::Column::Username.eq(username))
            .one(&self.db)
            .await?;

        Ok(model.map(user_model_to_domain))
    }

    async fn get_credential(&self, id: Uuid) -> DomainResult<Option<Credential>> {
        let row = Self::live()
            .select_only()
            .columns([
                user::Column::Id,
                user::Column::Username,
                user::Column::Email,
                user::Column::PhoneNumber,
                user::Column::Role,
            ])
            .filter(user::Column::Id.eq(id))
            .into_model::<CredentialRow>()
            .one(&self.db)
            .await?;

        Ok(row.map(|r| Credential {
            id: r.id,
            username: r.username,
            email: r.email,
            phone_number: r.phone_number,
            role: UserRole(r.role),
        }))
    }

    async fn update_user_password(&self, id: Uuid, new_password_hash: &str) -> DomainResult<()> {
        let result = user::Entity::update_many()
            .col_expr(user::Column::PasswordHash, Expr::value(new_password_hash))
            .col_expr(user::Column::UpdatedAt, Expr::value(Utc::now()))
            .filter(user::Column::Id.eq(id))
            .filter(user::Column::DeletedAt.is_null())
            .exec(&self.db)
            .await?;

        if result.rows_affected == 0 {
            return Err(DomainError::not_found("User", id));
        }

        Ok(())
    }
}
