//! Teacher and student data models and DTOs.
//!
//! Re-exports the entities and payloads from the `rollcall-models` crate and
//! adds the error body used in API docs.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

pub use rollcall_models::students::*;
pub use rollcall_models::teachers::*;

/// Body returned with every 4xx/5xx response.
#[derive(Serialize, Deserialize, Debug, ToSchema)]
pub struct ErrorResponse {
    pub message: String,
}
