use crate::modules::teachers::controller::{
    common_students, notification_recipients, register_students, suspend_student,
};
use crate::state::AppState;
use axum::{
    Router,
    routing::{get, post},
};

pub fn init_teachers_router() -> Router<AppState> {
    Router::new()
        .route("/register", post(register_students))
        .route("/commonstudents", get(common_students))
        .route("/suspend", post(suspend_student))
        .route("/retrievefornotifications", post(notification_recipients))
}
