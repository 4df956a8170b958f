//! Student entity and the suspend request.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::FieldOrder;
use crate::validation::validate_student_email;

/// A student known to the system.
///
/// Identity is the email; `suspended` only ever flips from `false` to `true`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, FromRow, ToSchema)]
pub struct Student {
    pub id: Uuid,
    pub email: String,
    pub suspended: bool,
    pub created_at: DateTime<Utc>,
}

impl Student {
    pub fn new(email: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            email: email.into(),
            suspended: false,
            created_at: Utc::now(),
        }
    }
}

/// Request body for `POST /api/suspend`.
#[derive(Deserialize, Debug, ToSchema, Validate)]
#[serde(deny_unknown_fields)]
pub struct SuspendStudentDto {
    #[validate(custom(function = "validate_student_email"))]
    #[schema(example = "studentmary@gmail.com")]
    pub student: String,
}

impl FieldOrder for SuspendStudentDto {
    const FIELDS: &'static [&'static str] = &["student"];
}
