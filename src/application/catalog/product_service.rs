//! Product use-cases

use std::sync::Arc;

use tracing::{debug, info};

use crate::domain::{
    CreateProductDto, DomainError, DomainResult, GetProductDto, Product,
    ProductRepositoryInterface, UpdateProductDto,
};
use crate::shared::PaginatedResult;

pub struct ProductService<R: ProductRepositoryInterface> {
    repo: Arc<R>,
}

impl<R: ProductRepositoryInterface> ProductService<R> {
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }

    pub async fn create(&self, dto: CreateProductDto) -> DomainResult<Product> {
        let product = self.repo.create_product(dto).await?;
        info!(
            product_id = product.id,
            category_id = product.category_id,
            "Product created"
        );
        Ok(product)
    }

    pub async fn list(&self) -> DomainResult<Vec<Product>> {
        self.repo.list_products().await
    }

    pub async fn get(&self, id: i32) -> DomainResult<Product> {
        self.repo
            .get_product_by_id(id)
            .await?
            .ok_or_else(|| DomainError::not_found("Product", id))
    }

    pub async fn paginate(&self, dto: GetProductDto) -> DomainResult<PaginatedResult<Product>> {
        debug!(
            page = dto.page,
            limit = dto.limit,
            sort = ?dto.sort,
            search = %dto.search,
            "Paginating products"
        );
        self.repo.paginate_products(dto).await
    }

    /// Applies only the supplied non-zero fields.
    pub async fn update(&self, id: i32, dto: UpdateProductDto) -> DomainResult<Product> {
        let product = self
            .repo
            .update_product(id, dto)
            .await?
            .ok_or_else(|| DomainError::not_found("Product", id))?;

        info!(product_id = id, "Product updated");
        Ok(product)
    }

    pub async fn delete(&self, id: i32) -> DomainResult<()> {
        self.repo.delete_product(id).await?;
        info!(product_id = id, "Product deleted");
        Ok(())
    }
}
