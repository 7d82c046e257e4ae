use chrono::{DateTime, Utc};

use crate::domain::Product;

/// Catalog category
#[derive(Debug, Clone, PartialEq)]
pub struct Category {
    pub id: i32,
    pub name: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    /// Live products of the category. Only filled by queries that
    /// eager-load them; empty otherwise.
    pub products: Vec<Product>,
}
