use chrono::{DateTime, Utc};
use rust_decimal::Decimal;

use crate::domain::Category;

/// Catalog product
#[derive(Debug, Clone, PartialEq)]
pub struct Product {
    pub id: i32,
    pub name: String,
    pub price: Decimal,
    pub stock: i32,
    pub category_id: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    /// Owning category, when eager-loaded.
    pub category: Option<Category>,
}
