//! Users module: registration, login and password change

pub mod dto;
pub mod handlers;

pub use dto::*;
pub use handlers::*;
