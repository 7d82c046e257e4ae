//! Product API handlers

use std::sync::Arc;

use axum::{
    extract::{Query, State},
    http::StatusCode,
    Json,
};

use super::dto::{
    CreateProductRequest, ProductDto, ProductPageDto, ProductPageParams, UpdateProductRequest,
};
use crate::application::ProductService;
use crate::infrastructure::database::repositories::ProductRepository;
use crate::interfaces::http::common::{ApiError, MessageResponse, PathId, ValidatedJson};

/// Product handler state, concrete over `ProductRepository` for Axum compatibility.
#[derive(Clone)]
pub struct ProductHandlerState {
    pub product_service: Arc<ProductService<ProductRepository>>,
}

#[utoipa::path(
    post,
    path = "/api/v1/product",
    tag = "Products",
    security(("session_cookie" = [])),
    request_body = CreateProductRequest,
    responses(
        (status = 201, description = "Product created", body = MessageResponse),
        (status = 400, description = "Validation error", body = MessageResponse),
        (status = 401, description = "No valid session", body = MessageResponse),
        (status = 403, description = "Role not allowed", body = MessageResponse)
    )
)]
pub async fn create_product(
    State(state): State<ProductHandlerState>,
    ValidatedJson(request): ValidatedJson<CreateProductRequest>,
) -> Result<(StatusCode, Json<MessageResponse>), ApiError> {
    state.product_service.create(request.into()).await?;
    Ok((
        StatusCode::CREATED,
        Json(MessageResponse::new("new product created")),
    ))
}

#[utoipa::path(
    get,
    path = "/api/v1/product",
    tag = "Products",
    responses(
        (status = 200, description = "All products with their category", body = Vec<ProductDto>)
    )
)]
pub async fn list_products(
    State(state): State<ProductHandlerState>,
) -> Result<Json<Vec<ProductDto>>, ApiError> {
    let products = state.product_service.list().await?;
    Ok(Json(products.into_iter().map(ProductDto::from).collect()))
}

#[utoipa::path(
    get,
    path = "/api/v1/product/page",
    tag = "Products",
    params(ProductPageParams),
    responses(
        (status = 200, description = "One page of products", body = ProductPageDto)
    )
)]
pub async fn paginate_products(
    State(state): State<ProductHandlerState>,
    Query(params): Query<ProductPageParams>,
) -> Result<Json<ProductPageDto>, ApiError> {
    let page = state.product_service.paginate(params.into()).await?;
    Ok(Json(page.into()))
}

#[utoipa::path(
    get,
    path = "/api/v1/product/{id}",
    tag = "Products",
    params(("id" = i32, Path, description = "Product ID")),
    responses(
        (status = 200, description = "Product details", body = ProductDto),
        (status = 400, description = "Non-numeric id", body = MessageResponse),
        (status = 404, description = "Product not found", body = MessageResponse)
    )
)]
pub async fn get_product(
    State(state): State<ProductHandlerState>,
    PathId(id): PathId,
) -> Result<Json<ProductDto>, ApiError> {
    let product = state.product_service.get(id).await?;
    Ok(Json(product.into()))
}

#[utoipa::path(
    put,
    path = "/api/v1/product/{id}",
    tag = "Products",
    security(("session_cookie" = [])),
    params(("id" = i32, Path, description = "Product ID")),
    request_body = UpdateProductRequest,
    responses(
        (status = 200, description = "Product updated", body = MessageResponse),
        (status = 400, description = "Validation error", body = MessageResponse),
        (status = 404, description = "Product not found", body = MessageResponse)
    )
)]
pub async fn update_product(
    State(state): State<ProductHandlerState>,
    PathId(id): PathId,
    ValidatedJson(request): ValidatedJson<UpdateProductRequest>,
) -> Result<Json<MessageResponse>, ApiError> {
    state.product_service.update(id, request.into()).await?;
    Ok(Json(MessageResponse::new("product updated")))
}

#[utoipa::path(
    delete,
    path = "/api/v1/product/{id}",
    tag = "Products",
    security(("session_cookie" = [])),
    params(("id" = i32, Path, description = "Product ID")),
    responses(
        (status = 200, description = "Product deleted", body = MessageResponse),
        (status = 404, description = "Product not found", body = MessageResponse)
    )
)]
pub async fn delete_product(
    State(state): State<ProductHandlerState>,
    PathId(id): PathId,
) -> Result<Json<MessageResponse>, ApiError> {
    state.product_service.delete(id).await?;
    Ok(Json(MessageResponse::new("product deleted")))
}
