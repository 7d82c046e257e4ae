//! Category use-cases

use std::sync::Arc;

use tracing::info;

use crate::domain::{
    Category, CategoryRepositoryInterface, CreateCategoryDto, DomainError, DomainResult,
    UpdateCategoryDto,
};

pub struct CategoryService<R: CategoryRepositoryInterface> {
    repo: Arc<R>,
}

impl<R: CategoryRepositoryInterface> CategoryService<R> {
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }

    pub async fn create(&self, dto: CreateCategoryDto) -> DomainResult<Category> {
        let category = self.repo.create_category(dto).await?;
        info!(category_id = category.id, name = %category.name, "Category created");
        Ok(category)
    }

    /// Every live category with its live products.
    pub async fn list(&self) -> DomainResult<Vec<Category>> {
        self.repo.list_categories().await
    }

    pub async fn get(&self, id: i32) -> DomainResult<Category> {
        self.repo
            .get_category_by_id(id)
            .await?
            .ok_or_else(|| DomainError::not_found("Category", id))
    }

    pub async fn update(&self, id: i32, dto: UpdateCategoryDto) -> DomainResult<Category> {
        let category = self
            .repo
            .update_category(id, dto)
            .await?
            .ok_or_else(|| DomainError::not_found("Category", id))?;

        info!(category_id = id, "Category updated");
        Ok(category)
    }

    pub async fn delete(&self, id: i32) -> DomainResult<()> {
        self.repo.delete_category(id).await?;
        info!(category_id = id, "Category deleted");
        Ok(())
    }
}
