use async_trait::async_trait;
use chrono::Utc;
use sea_orm::prelude::Expr;
use sea_orm::sea_query::Func;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, LoaderTrait, PaginatorTrait,
    QueryFilter, QueryOrder, QuerySelect, Select, Set,
};

use super::category_repository::category_model_to_domain;
use crate::domain::{
    CreateProductDto, DomainError, DomainResult, GetProductDto, Product,
    ProductRepositoryInterface, SortOrder, UpdateProductDto,
};
use crate::infrastructure::database::entities::{category, product};
use crate::shared::PaginatedResult;

pub struct ProductRepository {
    db: DatabaseConnection,
}

impl ProductRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    fn live() -> Select<product::Entity> {
        product::Entity::find().filter(product::Column::DeletedAt.is_null())
    }

    /// Attach the (live) owning category to each product, preserving order.
    async fn with_category(&self, models: Vec<product::Model>) -> DomainResult<Vec<Product>> {
        let categories = models
            .load_one(
                category::Entity::find().filter(category::Column::DeletedAt.is_null()),
                &self.db,
            )
            .await?;

        Ok(models
            .into_iter()
            .zip(categories)
            .map(|(model, category)| product_model_to_domain(model, category))
            .collect())
    }
}

// ── Conversion helpers ──────────────────────────────────────────

pub(crate) fn product_model_to_domain(
    model: product::Model,
    category: Option<category::Model>,
) -> Product {
    Product {
        id: model.id,
        name: model.name,
        price: model.price,
        stock: model.stock,
        category_id: model.category_id,
        created_at: model.created_at,
        updated_at: model.updated_at,
        category: category.map(category_model_to_domain),
    }
}

// ── Repository implementation ───────────────────────────────────

#[async_trait]
impl ProductRepositoryInterface for ProductRepository {
    async fn create_product(&self, dto: CreateProductDto) -> DomainResult<Product> {
        let now = Utc::now();

        let new_product = product::ActiveModel {
            name: Set(dto.name),
            price: Set(dto.price),
            stock: Set(dto.stock.unwrap_or(0)),
            category_id: Set(dto.category_id),
            created_at: Set(now),
            updated_at: Set(now),
            deleted_at: Set(None),
            ..Default::default()
        };

        let model = new_product.insert(&self.db).await?;

        self.with_category(vec![model])
            .await?
            .pop()
            .ok_or_else(|| DomainError::Internal("Product created but could not be loaded".into()))
    }

    async fn list_products(&self) -> DomainResult<Vec<Product>> {
        let models = Self::live()
            .order_by_asc(product::Column::Id)
            .all(&self.db)
            .await?;

        self.with_category(models).await
    }

    async fn get_product_by_id(&self, id: i32) -> DomainResult<Option<Product>> {
        let Some(model) = Self::live()
            .filter(product::Column::Id.eq(id))
            .one(&self.db)
            .await?
        else {
            return Ok(None);
        };

        Ok(self.with_category(vec![model]).await?.pop())
    }

    async fn paginate_products(&self, dto: GetProductDto) -> DomainResult<PaginatedResult<Product>> {
        let mut query = Self::live();

        if !dto.search.is_empty() {
            let pattern = format!("%{}%", dto.search.to_lowercase());
            query = query.filter(
                Expr::expr(Func::lower(Expr::col(product::Column::Name))).like(pattern),
            );
        }

        let total = query.clone().count(&self.db).await?;
        if dto.offset() >= total {
            return Ok(PaginatedResult::new(Vec::new(), total, dto.page, dto.limit));
        }

        query = match dto.sort {
            SortOrder::Asc => query.order_by_asc(product::Column::Id),
            SortOrder::Desc => query.order_by_desc(product::Column::Id),
        };

        let models = query
            .offset(dto.offset())
            .limit(dto.limit)
            .all(&self.db)
            .await?;

        let items = self.with_category(models).await?;

        Ok(PaginatedResult::new(items, total, dto.page, dto.limit))
    }

    async fn update_product(
        &self,
        id: i32,
        dto: UpdateProductDto,
    ) -> DomainResult<Option<Product>> {
        let Some(existing) = Self::live()
            .filter(product::Column::Id.eq(id))
            .one(&self.db)
            .await?
        else {
            return Ok(None);
        };

        let dto = dto.without_zero_values();
        let mut active: product::ActiveModel = existing.into();

        if let Some(name) = dto.name {
            active.name = Set(name);
        }
        if let Some(price) = dto.price {
            active.price = Set(price);
        }
        if let Some(stock) = dto.stock {
            active.stock = Set(stock);
        }
        if let Some(category_id) = dto.category_id {
            active.category_id = Set(category_id);
        }
        active.updated_at = Set(Utc::now());

        let updated = active.update(&self.db).await?;
        Ok(self.with_category(vec![updated]).await?.pop())
    }

    async fn delete_product(&self, id: i32) -> DomainResult<()> {
        let now = Utc::now();
        let result = product::Entity::update_many()
            .col_expr(product::Column::DeletedAt, Expr::value(now))
            .col_expr(product::Column::UpdatedAt, Expr::value(now))
            .filter(product::Column::Id.eq(id))
            .filter(product::Column::DeletedAt.is_null())
            .exec(&self.db)
            .await?;

        if result.rows_affected == 0 {
            return Err(DomainError::not_found("Product", id));
        }

        Ok(())
    }
}
