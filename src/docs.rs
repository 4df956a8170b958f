use utoipa::OpenApi;

use crate::modules::teachers::model::{
    CommonStudentsResponse, ErrorResponse, NotificationDto, NotificationRecipientsResponse,
    RegisterStudentsDto, SuspendStudentDto,
};

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::modules::teachers::controller::register_students,
        crate::modules::teachers::controller::common_students,
        crate::modules::teachers::controller::suspend_student,
        crate::modules::teachers::controller::notification_recipients,
    ),
    components(
        schemas(
            RegisterStudentsDto,
            CommonStudentsResponse,
            SuspendStudentDto,
            NotificationDto,
            NotificationRecipientsResponse,
            ErrorResponse,
        )
    ),
    tags(
        (name = "Teachers", description = "Student registration, suspension and notification recipients")
    ),
    info(
        title = "Rollcall API",
        version = "0.1.0",
        description = "Administrative API for teachers to register, query, suspend and notify students.",
        license(
            name = "MIT"
        )
    )
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_openapi_lists_every_endpoint() {
        let doc = ApiDoc::openapi();
        for path in [
            "/api/register",
            "/api/commonstudents",
            "/api/suspend",
            "/api/retrievefornotifications",
        ] {
            assert!(doc.paths.paths.contains_key(path), "missing {path}");
        }
    }
}
