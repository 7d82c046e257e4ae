//! Session middleware for Axum
//!
//! Protected routes run an ordered list of stages:
//!
//! 1. [`authenticate`]: verifies the `token` cookie and records the user id.
//! 2. [`get_credential`]: loads the user behind that id.
//! 3. [`authorize`]: checks the loaded role against an allow-list.
//!
//! Each stage either enriches the [`RequestContext`] in the request
//! extensions and continues, or short-circuits with an error response.
//! The decision logic of every stage is a plain function so it can be
//! tested without a router.

use std::sync::Arc;

use axum::{
    body::Body,
    extract::State,
    http::{header, HeaderMap, Request},
    middleware::{from_fn_with_state, Next},
    response::{IntoResponse, Response},
    routing::MethodRouter,
};
use cookie::Cookie;
use tracing::{debug, error};
use uuid::Uuid;

use crate::domain::{Credential, DomainError, UserRepositoryInterface, UserRole};
use crate::infrastructure::crypto::jwt::{verify_token, JwtConfig};
use crate::interfaces::http::common::ApiError;

/// Name of the cookie carrying the session token
pub const SESSION_COOKIE: &str = "token";

/// Per-request session data, filled in stage by stage.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct RequestContext {
    /// Set by [`authenticate`]
    pub user_id: Option<String>,
    /// Set by [`get_credential`]
    pub credential: Option<Credential>,
}

/// State shared by the session stages
#[derive(Clone)]
pub struct AuthState {
    pub jwt_config: JwtConfig,
    pub users: Arc<dyn UserRepositoryInterface>,
}

/// Roles accepted by an [`authorize`] stage
#[derive(Clone, Debug)]
pub struct AllowedRoles(pub Vec<UserRole>);

impl AllowedRoles {
    pub fn new(roles: impl IntoIterator<Item = i32>) -> Self {
        Self(roles.into_iter().map(UserRole).collect())
    }

    pub fn contains(&self, role: UserRole) -> bool {
        self.0.contains(&role)
    }
}

// ── Stage logic ─────────────────────────────────────────────────

/// Value of the session cookie, if any `Cookie` header carries one.
pub fn session_token(headers: &HeaderMap) -> Option<String> {
    headers
        .get_all(header::COOKIE)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .flat_map(Cookie::split_parse)
        .filter_map(Result::ok)
        .find(|c| c.name() == SESSION_COOKIE)
        .map(|c| c.value().to_string())
}

/// Verify the session token and record its user id.
pub fn check_session(
    token: Option<&str>,
    config: &JwtConfig,
    mut ctx: RequestContext,
) -> Result<RequestContext, ApiError> {
    let Some(token) = token else {
        return Err(ApiError::unauthorized("Cannot access resources"));
    };

    match verify_token(token, config) {
        Ok(claims) => {
            ctx.user_id = Some(claims.user_id);
            Ok(ctx)
        }
        Err(e) => {
            debug!(error = %e, "Rejected session token");
            Err(ApiError::unauthorized("your session has expired"))
        }
    }
}

/// Attach the credential of the authenticated user.
pub async fn load_credential(
    users: &dyn UserRepositoryInterface,
    mut ctx: RequestContext,
) -> Result<RequestContext, ApiError> {
    let Some(user_id) = ctx.user_id.as_deref() else {
        return Err(ApiError::unauthorized("Invalid session"));
    };
    let Ok(id) = Uuid::parse_str(user_id) else {
        return Err(ApiError::unauthorized("Invalid session"));
    };

    match users.get_credential(id).await {
        Ok(Some(credential)) => {
            ctx.credential = Some(credential);
            Ok(ctx)
        }
        Ok(None) => Err(ApiError::not_found("Invalid session")),
        Err(e) => {
            error!(error = %e, "Failed to load credential");
            Err(ApiError::internal("Database error"))
        }
    }
}

/// Accept only a loaded credential whose role is allowed.
pub fn check_role(allowed: &AllowedRoles, ctx: &RequestContext) -> Result<(), ApiError> {
    match &ctx.credential {
        Some(credential) if allowed.contains(credential.role) => Ok(()),
        _ => Err(DomainError::Forbidden("Access denied".into()).into()),
    }
}

// ── Middleware wrappers ─────────────────────────────────────────

fn context_of(request: &Request<Body>) -> RequestContext {
    request
        .extensions()
        .get::<RequestContext>()
        .cloned()
        .unwrap_or_default()
}

/// Cookie session authentication middleware
pub async fn authenticate(
    State(auth_state): State<AuthState>,
    mut request: Request<Body>,
    next: Next,
) -> Response {
    let token = session_token(request.headers());
    let ctx = context_of(&request);

    match check_session(token.as_deref(), &auth_state.jwt_config, ctx) {
        Ok(ctx) => {
            request.extensions_mut().insert(ctx);
            next.run(request).await
        }
        Err(e) => e.into_response(),
    }
}

/// Credential hydration middleware; runs after [`authenticate`].
pub async fn get_credential(
    State(auth_state): State<AuthState>,
    mut request: Request<Body>,
    next: Next,
) -> Response {
    let ctx = context_of(&request);

    match load_credential(auth_state.users.as_ref(), ctx).await {
        Ok(ctx) => {
            request.extensions_mut().insert(ctx);
            next.run(request).await
        }
        Err(e) => e.into_response(),
    }
}

/// Role gate; runs after [`get_credential`].
pub async fn authorize(
    State(allowed): State<AllowedRoles>,
    request: Request<Body>,
    next: Next,
) -> Response {
    match check_role(&allowed, &context_of(&request)) {
        Ok(()) => next.run(request).await,
        Err(e) => e.into_response(),
    }
}

// ── Per-route pipelines ─────────────────────────────────────────

/// One step of a route's session pipeline
#[derive(Clone, Debug)]
pub enum Stage {
    Authenticate,
    GetCredential,
    Authorize(AllowedRoles),
}

/// Session cookie only
pub const SESSION: &[Stage] = &[Stage::Authenticate];

/// Session cookie plus a loaded credential
pub const SESSION_WITH_CREDENTIAL: &[Stage] = &[Stage::Authenticate, Stage::GetCredential];

/// Wrap `route` so `stages` run in the given order before the handler.
pub fn guard<S>(route: MethodRouter<S>, auth: &AuthState, stages: &[Stage]) -> MethodRouter<S>
where
    S: Clone + Send + Sync + 'static,
{
    // The last layer added runs first, so fold from the innermost stage.
    stages.iter().rev().fold(route, |route, stage| match stage {
        Stage::Authenticate => route.route_layer(from_fn_with_state(auth.clone(), authenticate)),
        Stage::GetCredential => route.route_layer(from_fn_with_state(auth.clone(), get_credential)),
        Stage::Authorize(roles) => route.route_layer(from_fn_with_state(roles.clone(), authorize)),
    })
}
