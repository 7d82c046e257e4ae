//! # Storefront Service
//!
//! REST backend for a small online store: a product catalog grouped into
//! categories, user registration and cookie-based sessions.
//!
//! ## Architecture
//!
//! The project follows Clean Architecture principles:
//!
//! - **domain**: Core entities, DTOs and repository traits
//! - **application**: Catalog and identity use-cases
//! - **infrastructure**: Database (SeaORM), JWT and password hashing
//! - **interfaces**: REST API with Swagger documentation
//! - **server**: Runtime wiring and graceful shutdown

pub mod application;
pub mod config;
pub mod domain;
pub mod infrastructure;
pub mod interfaces;
pub mod server;
pub mod shared;

pub use config::AppConfig;

// Re-export database types for easy access
pub use infrastructure::{init_database, DatabaseConfig};

// Re-export API router
pub use interfaces::http::create_api_router;
