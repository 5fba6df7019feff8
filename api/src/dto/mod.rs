//! Request and response bodies

pub mod auth;
pub mod error;
pub mod health;

pub use error::{ErrorResponse, ErrorResponseExt};
