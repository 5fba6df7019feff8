//! Email one-time-code route handlers
//!
//! - `POST /send-code` issues a code for an email address
//! - `POST /verify-code` checks a submitted code

pub mod send_code;
pub mod verify_code;
