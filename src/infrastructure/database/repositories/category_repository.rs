use async_trait::async_trait;
use chrono::Utc;
use sea_orm::prelude::Expr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, LoaderTrait, QueryFilter,
    QueryOrder, Set,
};

use super::product_repository::product_model_to_domain;
use crate::domain::{
    Category, CategoryRepositoryInterface, CreateCategoryDto, DomainError, DomainResult,
    UpdateCategoryDto,
};
use crate::infrastructure::database::entities::{category, product};

pub struct CategoryRepository {
    db: DatabaseConnection,
}

impl CategoryRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    async fn find_live(&self, id: i32) -> DomainResult<Option<category::Model>> {
        Ok(category::Entity::find_by_id(id)
            .filter(category::Column::DeletedAt.is_null())
            .one(&self.db)
            .await?)
    }

    /// Attach live products to each category, preserving order.
    async fn with_products(&self, models: Vec<category::Model>) -> DomainResult<Vec<Category>> {
        let products = models
            .load_many(
                product::Entity::find()
                    .filter(product::Column::DeletedAt.is_null())
                    .order_by_asc(product::Column::Id),
                &self.db,
            )
            .await?;

        Ok(models
            .into_iter()
            .zip(products)
            .map(|(model, products)| {
                let mut category = category_model_to_domain(model);
                category.products = products
                    .into_iter()
                    .map(|p| product_model_to_domain(p, None))
                    .collect();
                category
            })
            .collect())
    }
}

// ── Conversion helpers ──────────────────────────────────────────

pub(crate) fn category_model_to_domain(model: category::Model) -> Category {
    Category {
        id: model.id,
        name: model.name,
        created_at: model.created_at,
        updated_at: model.updated_at,
        products: Vec::new(),
    }
}

// ── Repository implementation ───────────────────────────────────

#[async_trait]
impl CategoryRepositoryInterface for CategoryRepository {
    async fn create_category(&self, dto: CreateCategoryDto) -> DomainResult<Category> {
        let now = Utc::now();

        let new_category = category::ActiveModel {
            name: Set(dto.name),
            created_at: Set(now),
            updated_at: Set(now),
            deleted_at: Set(None),
            ..Default::default()
        };

        let model = new_category.insert(&self.db).await?;
        Ok(category_model_to_domain(model))
    }

    async fn list_categories(&self) -> DomainResult<Vec<Category>> {
        let models = category::Entity::find()
            .filter(category::Column::DeletedAt.is_null())
            .order_by_asc(category::Column::Id)
            .all(&self.db)
            .await?;

        self.with_products(models).await
    }

    async fn get_category_by_id(&self, id: i32) -> DomainResult<Option<Category>> {
        let Some(model) = self.find_live(id).await? else {
            return Ok(None);
        };

        Ok(self.with_products(vec![model]).await?.pop())
    }

    async fn update_category(
        &self,
        id: i32,
        dto: UpdateCategoryDto,
    ) -> DomainResult<Option<Category>> {
        let Some(existing) = self.find_live(id).await? else {
            return Ok(None);
        };

        let dto = dto.without_zero_values();
        let mut active: category::ActiveModel = existing.into();

        if let Some(name) = dto.name {
            active.name = Set(name);
        }
        active.updated_at = Set(Utc::now());

        let updated = active.update(&self.db).await?;
        Ok(Some(category_model_to_domain(updated)))
    }

    async fn delete_category(&self, id: i32) -> DomainResult<()> {
        let now = Utc::now();
        let result = category::Entity::update_many()
            .col_expr(category::Column::DeletedAt, Expr::value(now))
            .col_expr(category::Column::UpdatedAt, Expr::value(now))
            .filter(category::Column::Id.eq(id))
            .filter(category::Column::DeletedAt.is_null())
            .exec(&self.db)
            .await?;

        if result.rows_affected == 0 {
            return Err(DomainError::not_found("Category", id));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use rust_decimal::Decimal;

    use super::*;
    use crate::domain::{CreateProductDto, ProductRepositoryInterface};
    use crate::infrastructure::database::connect_in_memory;
    use crate::infrastructure::database::repositories::ProductRepository;

    async fn repo() -> (CategoryRepository, DatabaseConnection) {
        let db = connect_in_memory().await;
        (CategoryRepository::new(db.clone()), db)
    }

    fn named(name: &str) -> CreateCategoryDto {
        CreateCategoryDto {
            name: name.to_string(),
        }
    }

    #[tokio::test]
    async fn create_then_get_returns_same_fields() {
        let (repo, _) = repo().await;

        let created = repo.create_category(named("Books")).await.unwrap();
        let fetched = repo.get_category_by_id(created.id).await.unwrap().unwrap();

        assert_eq!(fetched.name, "Books");
        assert_eq!(fetched.id, created.id);
        assert!(fetched.products.is_empty());
    }

    #[tokio::test]
    async fn list_eager_loads_live_products() {
        let (repo, db) = repo().await;
        let products = ProductRepository::new(db);

        let books = repo.create_category(named("Books")).await.unwrap();
        let games = repo.create_category(named("Games")).await.unwrap();

        let novel = products
            .create_product(CreateProductDto {
                name: "Novel".into(),
                price: Decimal::new(1299, 2),
                stock: None,
                category_id: books.id,
            })
            .await
            .unwrap();
        let atlas = products
            .create_product(CreateProductDto {
                name: "Atlas".into(),
                price: Decimal::new(2500, 2),
                stock: Some(3),
                category_id: books.id,
            })
            .await
            .unwrap();
        products.delete_product(atlas.id).await.unwrap();

        let all = repo.list_categories().await.unwrap();
        assert_eq!(all.len(), 2);
        assert_eq!(all[0].id, books.id);
        assert_eq!(all[0].products.len(), 1);
        assert_eq!(all[0].products[0].id, novel.id);
        assert_eq!(all[1].id, games.id);
        assert!(all[1].products.is_empty());
    }

    #[tokio::test]
    async fn update_with_empty_name_keeps_existing() {
        let (repo, _) = repo().await;
        let created = repo.create_category(named("Books")).await.unwrap();

        let updated = repo
            .update_category(created.id, UpdateCategoryDto { name: Some(String::new()) })
            .await
            .unwrap()
            .unwrap();
        assert_eq!(updated.name, "Books");

        let renamed = repo
            .update_category(created.id, UpdateCategoryDto { name: Some("Comics".into()) })
            .await
            .unwrap()
            .unwrap();
        assert_eq!(renamed.name, "Comics");
    }

    #[tokio::test]
    async fn update_missing_returns_none() {
        let (repo, _) = repo().await;
        let result = repo
            .update_category(42, UpdateCategoryDto { name: Some("X".into()) })
            .await
            .unwrap();
        assert!(result.is_none());
    }

    #[tokio::test]
    async fn delete_is_soft_and_not_repeatable() {
        let (repo, db) = repo().await;
        let created = repo.create_category(named("Books")).await.unwrap();

        repo.delete_category(created.id).await.unwrap();

        assert!(repo.get_category_by_id(created.id).await.unwrap().is_none());
        assert!(repo.list_categories().await.unwrap().is_empty());

        let second = repo.delete_category(created.id).await;
        assert!(matches!(second, Err(DomainError::NotFound { .. })));

        let row = category::Entity::find_by_id(created.id)
            .one(&db)
            .await
            .unwrap()
            .expect("row is kept");
        assert!(row.deleted_at.is_some());
    }

    #[tokio::test]
    async fn delete_missing_is_not_found() {
        let (repo, _) = repo().await;
        let result = repo.delete_category(999).await;
        assert!(matches!(result, Err(DomainError::NotFound { .. })));
    }
}
