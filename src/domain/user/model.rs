use chrono::{DateTime, Utc};
use uuid::Uuid;

/// Integer role tier stored on every user.
///
/// Only tiers 0 and 1 carry meaning today; other values are kept as-is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct UserRole(pub i32);

impl UserRole {
    pub const STANDARD: UserRole = UserRole(0);
    pub const PRIVILEGED: UserRole = UserRole(1);
}

impl From<i32> for UserRole {
    fn from(v: i32) -> Self {
        UserRole(v)
    }
}

/// User model
#[derive(Clone, Debug)]
pub struct User {
    pub id: Uuid,
    pub username: String,
    pub email: String,
    pub phone_number: String,
    pub password_hash: String,
    pub role: UserRole,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Minimal user record attached to an authenticated request.
#[derive(Clone, Debug, PartialEq)]
pub struct Credential {
    pub id: Uuid,
    pub username: String,
    pub email: String,
    pub phone_number: String,
    pub role: UserRole,
}

impl From<User> for Credential {
    fn from(u: User) -> Self {
        Self {
            id: u.id,
            username: u.username,
            email: u.email,
            phone_number: u.phone_number,
            role: u.role,
        }
    }
}
