//! # Rollcall Core
//!
//! Domain error types shared by the association service and its record stores.
//!
//! - [`errors`]: [`ServiceError`], [`StoreError`] and the [`ErrorKind`] classification
//!
//! The HTTP boundary maps [`ErrorKind`] to status codes; nothing in this crate
//! knows about HTTP.
//!
//! # Example
//!
//! ```
//! use rollcall_core::{ErrorKind, ServiceError};
//!
//! let err = ServiceError::not_found("Student with email a@b.com not found");
//! assert_eq!(err.kind(), ErrorKind::NotFound);
//! ```

pub mod errors;

pub use errors::{ErrorKind, ServiceError, StoreError};
