use crate::modules::teachers::model::{
    CommonStudentsQuery, CommonStudentsResponse, ErrorResponse, NotificationDto,
    NotificationRecipientsResponse, RegisterStudentsDto, SuspendStudentDto,
};
use crate::modules::teachers::service::TeacherService;
use crate::state::AppState;
use crate::utils::errors::AppError;
use crate::validator::ValidatedJson;
use axum::{Json, extract::State, http::StatusCode};
use axum_extra::extract::Query;
use tracing::instrument;

#[utoipa::path(
    post,
    path = "/api/register",
    request_body = RegisterStudentsDto,
    responses(
        (status = 204, description = "Students registered to the teacher"),
        (status = 400, description = "Invalid teacher or student email", body = ErrorResponse),
        (status = 409, description = "Teacher or student created concurrently", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tag = "Teachers"
)]
#[instrument(skip(state))]
pub async fn register_students(
    State(state): State<AppState>,
    ValidatedJson(dto): ValidatedJson<RegisterStudentsDto>,
) -> Result<StatusCode, AppError> {
    TeacherService::register(&state.repos, &dto.teacher, &dto.students).await?;
    Ok(StatusCode::NO_CONTENT)
}

#[utoipa::path(
    get,
    path = "/api/commonstudents",
    params(CommonStudentsQuery),
    responses(
        (status = 200, description = "Students registered to all given teachers", body = CommonStudentsResponse),
        (status = 400, description = "No teacher given", body = ErrorResponse),
        (status = 404, description = "One or more teachers not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tag = "Teachers"
)]
#[instrument(skip(state))]
pub async fn common_students(
    State(state): State<AppState>,
    Query(query): Query<CommonStudentsQuery>,
) -> Result<Json<CommonStudentsResponse>, AppError> {
    let students = TeacherService::common_students(&state.repos, &query.teacher).await?;
    Ok(Json(CommonStudentsResponse { students }))
}

#[utoipa::path(
    post,
    path = "/api/suspend",
    request_body = SuspendStudentDto,
    responses(
        (status = 204, description = "Student suspended"),
        (status = 400, description = "Invalid student email", body = ErrorResponse),
        (status = 404, description = "Student not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tag = "Teachers"
)]
#[instrument(skip(state))]
pub async fn suspend_student(
    State(state): State<AppState>,
    ValidatedJson(dto): ValidatedJson<SuspendStudentDto>,
) -> Result<StatusCode, AppError> {
    TeacherService::suspend_student(&state.repos, &dto.student).await?;
    Ok(StatusCode::NO_CONTENT)
}

#[utoipa::path(
    post,
    path = "/api/retrievefornotifications",
    request_body = NotificationDto,
    responses(
        (status = 200, description = "Students who should receive the notification", body = NotificationRecipientsResponse),
        (status = 400, description = "Invalid teacher email or empty notification", body = ErrorResponse),
        (status = 404, description = "Teacher not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tag = "Teachers"
)]
#[instrument(skip(state))]
pub async fn notification_recipients(
    State(state): State<AppState>,
    ValidatedJson(dto): ValidatedJson<NotificationDto>,
) -> Result<Json<NotificationRecipientsResponse>, AppError> {
    let recipients =
        TeacherService::notification_recipients(&state.repos, &dto.teacher, &dto.notification)
            .await?;
    Ok(Json(NotificationRecipientsResponse { recipients }))
}
