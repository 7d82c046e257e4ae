//! HTTP REST API interfaces
//!
//! - `common`: error mapping and request extractors
//! - `middleware`: session stages (authenticate, credential, authorize)
//! - `modules`: handlers and DTOs per resource
//! - `router`: API router with Swagger documentation

pub mod common;
pub mod middleware;
pub mod modules;
pub mod router;

pub use router::create_api_router;
