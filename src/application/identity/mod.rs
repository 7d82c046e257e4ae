//! Identity module: user registration, login and password changes.

pub mod service;

pub use service::{AuthResult, Registration, UserService};
