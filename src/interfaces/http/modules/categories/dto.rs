//! Category DTOs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::domain::{Category, CreateCategoryDto, UpdateCategoryDto};
use crate::interfaces::http::modules::products::ProductDto;

/// Category API representation
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct CategoryDto {
    pub id: i32,
    pub name: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    /// Live products of the category
    pub products: Vec<ProductDto>,
}

impl From<Category> for CategoryDto {
    fn from(c: Category) -> Self {
        Self {
            id: c.id,
            name: c.name,
            created_at: c.created_at,
            updated_at: c.updated_at,
            products: c.products.into_iter().map(ProductDto::from).collect(),
        }
    }
}

/// Category as embedded in a product
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct CategoryRefDto {
    pub id: i32,
    pub name: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Category> for CategoryRefDto {
    fn from(c: Category) -> Self {
        Self {
            id: c.id,
            name: c.name,
            created_at: c.created_at,
            updated_at: c.updated_at,
        }
    }
}

/// Create or rename a category
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CategoryRequest {
    #[validate(length(min = 1, max = 50))]
    pub name: String,
}

impl From<CategoryRequest> for CreateCategoryDto {
    fn from(r: CategoryRequest) -> Self {
        Self { name: r.name }
    }
}

impl From<CategoryRequest> for UpdateCategoryDto {
    fn from(r: CategoryRequest) -> Self {
        Self { name: Some(r.name) }
    }
}
