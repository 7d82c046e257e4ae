//! Health module: liveness probe

pub mod handlers;

pub use handlers::*;
