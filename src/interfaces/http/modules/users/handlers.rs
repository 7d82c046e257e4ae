//! User API handlers
//!
//! Registration, login and password change.
//! Delegates to `UserService` from the application/identity layer.

use std::sync::Arc;

use axum::{
    extract::State,
    http::{header::SET_COOKIE, StatusCode},
    response::IntoResponse,
    Extension, Json,
};
use cookie::{time::Duration as CookieDuration, Cookie, SameSite};
use uuid::Uuid;

use super::dto::{LoginRequest, RegisterRequest, UpdatePasswordRequest};
use crate::application::UserService;
use crate::infrastructure::database::repositories::UserRepository;
use crate::interfaces::http::common::{ApiError, MessageResponse, ValidatedJson};
use crate::interfaces::http::middleware::{RequestContext, SESSION_COOKIE};

/// User handler state, concrete over `UserRepository` for Axum compatibility.
#[derive(Clone)]
pub struct UserHandlerState {
    pub user_service: Arc<UserService<UserRepository>>,
}

/// `Set-Cookie` value carrying the session token.
pub fn session_cookie(token: String, max_age_secs: i64) -> String {
    Cookie::build((SESSION_COOKIE, token))
        .http_only(true)
        .same_site(SameSite::Lax)
        .max_age(CookieDuration::seconds(max_age_secs))
        .path("/")
        .build()
        .to_string()
}

#[utoipa::path(
    post,
    path = "/api/v1/user/register",
    tag = "Users",
    request_body = RegisterRequest,
    responses(
        (status = 201, description = "User registered", body = MessageResponse),
        (status = 400, description = "Validation error", body = MessageResponse),
        (status = 409, description = "Username or email taken", body = MessageResponse)
    )
)]
pub async fn register(
    State(state): State<UserHandlerState>,
    ValidatedJson(request): ValidatedJson<RegisterRequest>,
) -> Result<(StatusCode, Json<MessageResponse>), ApiError> {
    state.user_service.register(request.into()).await?;
    Ok((
        StatusCode::CREATED,
        Json(MessageResponse::new("registration success")),
    ))
}

#[utoipa::path(
    post,
    path = "/api/v1/user/Login",
    tag = "Users",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Logged in; session cookie set", body = MessageResponse),
        (status = 401, description = "Invalid email or password", body = MessageResponse)
    )
)]
pub async fn login(
    State(state): State<UserHandlerState>,
    ValidatedJson(request): ValidatedJson<LoginRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let auth = state
        .user_service
        .login(&request.email, &request.password)
        .await?;

    Ok((
        [(SET_COOKIE, session_cookie(auth.token, auth.expires_in))],
        Json(MessageResponse::new("login successful")),
    ))
}

#[utoipa::path(
    put,
    path = "/api/v1/user/update-password",
    tag = "Users",
    security(("session_cookie" = [])),
    request_body = UpdatePasswordRequest,
    responses(
        (status = 200, description = "Password updated", body = MessageResponse),
        (status = 400, description = "Validation error", body = MessageResponse),
        (status = 401, description = "No valid session", body = MessageResponse)
    )
)]
pub async fn update_password(
    State(state): State<UserHandlerState>,
    Extension(ctx): Extension<RequestContext>,
    ValidatedJson(request): ValidatedJson<UpdatePasswordRequest>,
) -> Result<Json<MessageResponse>, ApiError> {
    let user_id = ctx
        .user_id
        .as_deref()
        .and_then(|id| Uuid::parse_str(id).ok())
        .ok_or_else(|| ApiError::unauthorized("Invalid session"))?;

    state
        .user_service
        .update_password(user_id, request.password)
        .await?;

    Ok(Json(MessageResponse::new("Password updated successfully")))
}
