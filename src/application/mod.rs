//! Application layer: use-cases orchestrating the repositories.

pub mod catalog;
pub mod identity;

pub use catalog::{CategoryService, ProductService};
pub use identity::{AuthResult, Registration, UserService};
