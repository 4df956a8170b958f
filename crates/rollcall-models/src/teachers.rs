//! Teacher entity and the request/response payloads of the teacher endpoints.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;
use validator::Validate;

use crate::FieldOrder;
use crate::students::Student;
use crate::validation::{validate_student_emails, validate_teacher_email};

/// A teacher and the students registered to them.
///
/// `students` is a de-duplicated set keyed by email; it is loaded separately
/// from the `teacher_student` join, so it is skipped when decoding a row.
#[derive(Debug, Clone, PartialEq, Eq, FromRow)]
pub struct Teacher {
    pub id: Uuid,
    pub email: String,
    pub created_at: DateTime<Utc>,
    #[sqlx(skip)]
    pub students: Vec<Student>,
}

impl Teacher {
    pub fn new(email: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            email: email.into(),
            created_at: Utc::now(),
            students: Vec::new(),
        }
    }

    pub fn has_student(&self, email: &str) -> bool {
        self.students.iter().any(|s| s.email == email)
    }

    /// Adds `student` unless a student with the same email is already linked.
    /// Returns whether the link was added.
    pub fn link(&mut self, student: Student) -> bool {
        if self.has_student(&student.email) {
            return false;
        }
        self.students.push(student);
        true
    }

    pub fn student_emails(&self) -> Vec<String> {
        self.students.iter().map(|s| s.email.clone()).collect()
    }
}

/// Request body for `POST /api/register`.
#[derive(Deserialize, Debug, ToSchema, Validate)]
#[serde(deny_unknown_fields)]
pub struct RegisterStudentsDto {
    #[validate(custom(function = "validate_teacher_email"))]
    #[schema(example = "teacherken@gmail.com")]
    pub teacher: String,
    #[validate(
        length(min = 1, message = "At least one student must be provided"),
        custom(function = "validate_student_emails")
    )]
    #[schema(example = json!(["studentjon@gmail.com", "studenthon@gmail.com"]))]
    pub students: Vec<String>,
}

impl FieldOrder for RegisterStudentsDto {
    const FIELDS: &'static [&'static str] = &["teacher", "students"];
}

/// Query string for `GET /api/commonstudents`; `teacher` may repeat.
#[derive(Deserialize, Debug, Default, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct CommonStudentsQuery {
    /// Teacher emails; every one must exist.
    #[serde(default)]
    pub teacher: Vec<String>,
}

#[derive(Serialize, Deserialize, Debug, ToSchema)]
pub struct CommonStudentsResponse {
    pub students: Vec<String>,
}

/// Request body for `POST /api/retrievefornotifications`.
#[derive(Deserialize, Debug, ToSchema, Validate)]
#[serde(deny_unknown_fields)]
pub struct NotificationDto {
    #[validate(custom(function = "validate_teacher_email"))]
    #[schema(example = "teacherken@gmail.com")]
    pub teacher: String,
    #[validate(length(min = 1, message = "Notification text cannot be empty"))]
    #[schema(example = "Hello students! @studentagnes@gmail.com @studentmiche@gmail.com")]
    pub notification: String,
}

impl FieldOrder for NotificationDto {
    const FIELDS: &'static [&'static str] = &["teacher", "notification"];
}

#[derive(Serialize, Deserialize, Debug, ToSchema)]
pub struct NotificationRecipientsResponse {
    pub recipients: Vec<String>,
}
