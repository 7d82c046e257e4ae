//! Category aggregate

pub mod model;
pub mod repository;

mod dto_create;
mod dto_update;

pub use dto_create::CreateCategoryDto;
pub use dto_update::UpdateCategoryDto;
pub use model::Category;
pub use repository::CategoryRepositoryInterface;
