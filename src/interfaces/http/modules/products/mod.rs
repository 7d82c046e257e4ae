//! Products module: product CRUD and paginated search

pub mod dto;
pub mod handlers;

pub use dto::*;
pub use handlers::*;
