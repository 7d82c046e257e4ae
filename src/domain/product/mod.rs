//! Product aggregate

pub mod model;
pub mod repository;

mod dto_create;
mod dto_get;
mod dto_update;

pub use dto_create::CreateProductDto;
pub use dto_get::{GetProductDto, SortOrder, DEFAULT_PAGE_LIMIT, MAX_PAGE_LIMIT};
pub use dto_update::UpdateProductDto;
pub use model::Product;
pub use repository::ProductRepositoryInterface;
