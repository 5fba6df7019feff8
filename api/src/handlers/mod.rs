//! Error handling shared by the route handlers

pub mod error;

pub use error::{
    handle_issuance_error, handle_proxy_error, handle_validation_errors,
    handle_verification_error, json_error_handler, not_found,
};
