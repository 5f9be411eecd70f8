//! Utility module - shared helpers and types
//!
//! - [`AppError`] / [`AppResult`] - application error type for API handlers
//! - [`AppResponse`] - JSON response envelope
//! - logging and time helpers

pub mod error;
pub mod logger;
pub mod time;

pub use error::{ok, ok_with_message};
pub use error::{AppError, AppResponse, AppResult};
