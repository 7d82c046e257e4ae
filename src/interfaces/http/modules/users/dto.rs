//! User DTOs

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::application::Registration;

/// Registration request
#[derive(Debug, Serialize, Deserialize, Validate, ToSchema)]
pub struct RegisterRequest {
    #[validate(length(min = 5, max = 30))]
    #[schema(example = "alice1")]
    pub username: String,
    #[validate(email, length(max = 50))]
    #[schema(example = "a@x.com")]
    pub email: String,
    #[validate(length(min = 1, max = 20))]
    pub phone_number: String,
    #[validate(length(min = 5, max = 20))]
    pub password: String,
}

impl From<RegisterRequest> for Registration {
    fn from(r: RegisterRequest) -> Self {
        Self {
            username: r.username,
            email: r.email,
            phone_number: r.phone_number,
            password: r.password,
        }
    }
}

/// Login request
#[derive(Debug, Serialize, Deserialize, Validate, ToSchema)]
pub struct LoginRequest {
    #[validate(length(min = 1))]
    pub email: String,
    #[validate(length(min = 1))]
    pub password: String,
}

/// Password change request
#[derive(Debug, Serialize, Deserialize, Validate, ToSchema)]
pub struct UpdatePasswordRequest {
    #[validate(length(min = 5, max = 20))]
    pub password: String,
}
