use async_trait::async_trait;

use super::{CreateProductDto, GetProductDto, Product, UpdateProductDto};
use crate::domain::DomainResult;
use crate::shared::PaginatedResult;

/// Persistence for products. Soft-deleted rows are invisible to every
/// method; reads eager-load the owning category.
#[async_trait]
pub trait ProductRepositoryInterface: Send + Sync {
    /// Category existence is left to the foreign key constraint.
    async fn create_product(&self, dto: CreateProductDto) -> DomainResult<Product>;

    async fn list_products(&self) -> DomainResult<Vec<Product>>;
    async fn get_product_by_id(&self, id: i32) -> DomainResult<Option<Product>>;
    async fn paginate_products(&self, dto: GetProductDto) -> DomainResult<PaginatedResult<Product>>;

    async fn update_product(&self, id: i32, dto: UpdateProductDto)
        -> DomainResult<Option<Product>>;

    /// Soft delete. Fails with `NotFound` if no live row has `id`.
    async fn delete_product(&self, id: i32) -> DomainResult<()>;
}
