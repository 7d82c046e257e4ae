//! Category API handlers

use std::sync::Arc;

use axum::{extract::State, http::StatusCode, Json};

use super::dto::{CategoryDto, CategoryRequest};
use crate::application::CategoryService;
use crate::infrastructure::database::repositories::CategoryRepository;
use crate::interfaces::http::common::{ApiError, MessageResponse, PathId, ValidatedJson};

/// Category handler state, concrete over `CategoryRepository` for Axum compatibility.
#[derive(Clone)]
pub struct CategoryHandlerState {
    pub category_service: Arc<CategoryService<CategoryRepository>>,
}

#[utoipa::path(
    post,
    path = "/api/v1/category",
    tag = "Categories",
    security(("session_cookie" = [])),
    request_body = CategoryRequest,
    responses(
        (status = 201, description = "Category created", body = MessageResponse),
        (status = 400, description = "Validation error", body = MessageResponse),
        (status = 401, description = "No valid session", body = MessageResponse)
    )
)]
pub async fn create_category(
    State(state): State<CategoryHandlerState>,
    ValidatedJson(request): ValidatedJson<CategoryRequest>,
) -> Result<(StatusCode, Json<MessageResponse>), ApiError> {
    state.category_service.create(request.into()).await?;
    Ok((
        StatusCode::CREATED,
        Json(MessageResponse::new("new category created")),
    ))
}

#[utoipa::path(
    get,
    path = "/api/v1/category",
    tag = "Categories",
    responses(
        (status = 200, description = "All categories with their products", body = Vec<CategoryDto>)
    )
)]
pub async fn list_categories(
    State(state): State<CategoryHandlerState>,
) -> Result<Json<Vec<CategoryDto>>, ApiError> {
    let categories = state.category_service.list().await?;
    Ok(Json(categories.into_iter().map(CategoryDto::from).collect()))
}

#[utoipa::path(
    get,
    path = "/api/v1/category/{id}",
    tag = "Categories",
    params(("id" = i32, Path, description = "Category ID")),
    responses(
        (status = 200, description = "Category details", body = CategoryDto),
        (status = 400, description = "Non-numeric id", body = MessageResponse),
        (status = 404, description = "Category not found", body = MessageResponse)
    )
)]
pub async fn get_category(
    State(state): State<CategoryHandlerState>,
    PathId(id): PathId,
) -> Result<Json<CategoryDto>, ApiError> {
    let category = state.category_service.get(id).await?;
    Ok(Json(category.into()))
}

#[utoipa::path(
    put,
    path = "/api/v1/category/{id}",
    tag = "Categories",
    security(("session_cookie" = [])),
    params(("id" = i32, Path, description = "Category ID")),
    request_body = CategoryRequest,
    responses(
        (status = 200, description = "Category updated", body = MessageResponse),
        (status = 400, description = "Validation error", body = MessageResponse),
        (status = 404, description = "Category not found", body = MessageResponse)
    )
)]
pub async fn update_category(
    State(state): State<CategoryHandlerState>,
    PathId(id): PathId,
    ValidatedJson(request): ValidatedJson<CategoryRequest>,
) -> Result<Json<MessageResponse>, ApiError> {
    state.category_service.update(id, request.into()).await?;
    Ok(Json(MessageResponse::new("category updated")))
}

#[utoipa::path(
    delete,
    path = "/api/v1/category/{id}",
    tag = "Categories",
    security(("session_cookie" = [])),
    params(("id" = i32, Path, description = "Category ID")),
    responses(
        (status = 200, description = "Category deleted", body = MessageResponse),
        (status = 404, description = "Category not found", body = MessageResponse)
    )
)]
pub async fn delete_category(
    State(state): State<CategoryHandlerState>,
    PathId(id): PathId,
) -> Result<Json<MessageResponse>, ApiError> {
    state.category_service.delete(id).await?;
    Ok(Json(MessageResponse::new("category deleted")))
}
