//! Domain layer
//!
//! Aggregates of the storefront: catalog categories, products and users.
//! Each aggregate owns its model, DTOs and repository interface.

pub mod category;
pub mod product;
pub mod user;

pub use category::{Category, CategoryRepositoryInterface, CreateCategoryDto, UpdateCategoryDto};
pub use product::{
    CreateProductDto, GetProductDto, Product, ProductRepositoryInterface, SortOrder,
    UpdateProductDto,
};
pub use user::{CreateUserDto, Credential, User, UserRepositoryInterface, UserRole};

pub use crate::shared::{DomainError, DomainResult};
