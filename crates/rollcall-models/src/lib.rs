//! # Rollcall Models
//!
//! Domain models and DTOs for the Rollcall API.
//!
//! # Modules
//!
//! - [`students`]: the [`Student`] entity and the suspend request
//! - [`teachers`]: the [`Teacher`] entity and the register, common-students
//!   and notification payloads
//! - [`validation`]: email rules shared by the request payloads
//!
//! Request DTOs carry their validation rules as `validator` derives; the HTTP
//! boundary evaluates them before any service call.

pub mod students;
pub mod teachers;
pub mod validation;

pub use students::{Student, SuspendStudentDto};
pub use teachers::{
    CommonStudentsQuery, CommonStudentsResponse, NotificationDto, NotificationRecipientsResponse,
    RegisterStudentsDto, Teacher,
};

/// Request payload fields in declaration order.
///
/// Validation failures are reported for the first field in this order, so a
/// body with a bad `teacher` and a bad `students` names the teacher.
pub trait FieldOrder {
    const FIELDS: &'static [&'static str];
}
