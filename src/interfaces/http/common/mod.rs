//! Shared HTTP building blocks

pub mod error;
pub mod path_id;
pub mod validated_json;

pub use error::{ApiError, MessageResponse};
pub use path_id::PathId;
pub use validated_json::ValidatedJson;
