use async_trait::async_trait;

use super::{Category, CreateCategoryDto, UpdateCategoryDto};
use crate::domain::DomainResult;

/// Persistence for categories. Soft-deleted rows are invisible to every
/// method.
#[async_trait]
pub trait CategoryRepositoryInterface: Send + Sync {
    async fn create_category(&self, dto: CreateCategoryDto) -> DomainResult<Category>;

    /// All categories with their products eager-loaded.
    async fn list_categories(&self) -> DomainResult<Vec<Category>>;
    async fn get_category_by_id(&self, id: i32) -> DomainResult<Option<Category>>;

    async fn update_category(
        &self,
        id: i32,
        dto: UpdateCategoryDto,
    ) -> DomainResult<Option<Category>>;

    /// Soft delete. Fails with `NotFound` if no live row has `id`.
    async fn delete_category(&self, id: i32) -> DomainResult<()>;
}
