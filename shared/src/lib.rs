//! Shared types for the storefront backend
//!
//! Currently this crate carries the unified error system used by the API
//! server; a future client crate reuses the same codes and response shape.

pub mod error;

pub use error::{ApiResponse, AppError, AppResult, ErrorCategory, ErrorCode};
