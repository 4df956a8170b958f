//! Shared utilities for the HTTP boundary.
//!
//! - [`errors`]: [`errors::AppError`] and the error-kind to status table

pub mod errors;
