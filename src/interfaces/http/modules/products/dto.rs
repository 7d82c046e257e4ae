//! Product DTOs

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use validator::{Validate, ValidationError};

use crate::domain::{CreateProductDto, GetProductDto, Product, UpdateProductDto};
use crate::interfaces::http::modules::categories::CategoryRefDto;
use crate::shared::PaginatedResult;

/// Product API representation
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ProductDto {
    pub id: i32,
    pub name: String,
    #[serde(with = "rust_decimal::serde::float")]
    #[schema(value_type = f64)]
    pub price: Decimal,
    pub stock: i32,
    pub category_id: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    /// Owning category; omitted when listed under its category
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<CategoryRefDto>,
}

impl From<Product> for ProductDto {
    fn from(p: Product) -> Self {
        Self {
            id: p.id,
            name: p.name,
            price: p.price,
            stock: p.stock,
            category_id: p.category_id,
            created_at: p.created_at,
            updated_at: p.updated_at,
            category: p.category.map(CategoryRefDto::from),
        }
    }
}

fn positive_price(price: &Decimal) -> Result<(), ValidationError> {
    if price.is_sign_positive() && !price.is_zero() {
        Ok(())
    } else {
        Err(ValidationError::new("positive").with_message("must be greater than 0".into()))
    }
}

/// Create product request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateProductRequest {
    #[validate(length(min = 1, max = 100))]
    pub name: String,
    #[serde(with = "rust_decimal::serde::float")]
    #[schema(value_type = f64, example = 19.99)]
    #[validate(custom(function = "positive_price"))]
    pub price: Decimal,
    #[validate(range(min = 1))]
    pub category_id: i32,
    /// Defaults to 0
    #[validate(range(min = 0))]
    pub stock: Option<i32>,
}

impl From<CreateProductRequest> for CreateProductDto {
    fn from(r: CreateProductRequest) -> Self {
        Self {
            name: r.name,
            price: r.price,
            stock: r.stock,
            category_id: r.category_id,
        }
    }
}

/// Update product request; absent fields are left untouched
#[derive(Debug, Default, Deserialize, Validate, ToSchema)]
pub struct UpdateProductRequest {
    #[validate(length(min = 1, max = 100))]
    pub name: Option<String>,
    #[serde(default, with = "rust_decimal::serde::float_option")]
    #[schema(value_type = Option<f64>)]
    #[validate(custom(function = "positive_price"))]
    pub price: Option<Decimal>,
    #[validate(range(min = 1))]
    pub category_id: Option<i32>,
    #[validate(range(min = 0))]
    pub stock: Option<i32>,
}

impl From<UpdateProductRequest> for UpdateProductDto {
    fn from(r: UpdateProductRequest) -> Self {
        Self {
            name: r.name,
            price: r.price,
            stock: r.stock,
            category_id: r.category_id,
        }
    }
}

/// Paginated product query. Values that do not parse fall back to defaults.
#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ProductPageParams {
    /// "asc" (default) or "desc", on id
    pub sort: Option<String>,
    /// Zero-based page number
    pub page: Option<String>,
    /// Page size, default 10, at most 100
    pub limit: Option<String>,
    /// Case-insensitive substring of the product name
    pub search: Option<String>,
}

impl From<ProductPageParams> for GetProductDto {
    fn from(p: ProductPageParams) -> Self {
        GetProductDto::from_raw(
            p.sort.as_deref(),
            p.page.as_deref(),
            p.limit.as_deref(),
            p.search.as_deref(),
        )
    }
}

/// Page envelope
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ProductPageDto {
    pub data: Vec<ProductDto>,
    pub current_page: u64,
    pub data_limit: u64,
    pub total_rows: u64,
    pub total_pages: u64,
}

impl From<PaginatedResult<Product>> for ProductPageDto {
    fn from(r: PaginatedResult<Product>) -> Self {
        Self {
            data: r.items.into_iter().map(ProductDto::from).collect(),
            current_page: r.page,
            data_limit: r.limit,
            total_rows: r.total,
            total_pages: r.total_pages,
        }
    }
}
