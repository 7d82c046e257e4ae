//! Database entities module

pub mod category;
pub mod product;
pub mod user;

pub use category::Entity as Category;
pub use product::Entity as Product;
pub use user::Entity as User;
