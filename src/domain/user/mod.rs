//! User aggregate
//!
//! Contains the User entity, the hydrated session credential, DTOs,
//! and the repository interface.

pub mod model;
pub mod repository;

mod dto_create;

pub use dto_create::CreateUserDto;
pub use model::{Credential, User, UserRole};
pub use repository::UserRepositoryInterface;
