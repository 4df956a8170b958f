//! Repository tests against a live database.
//!
//! Run with `DATABASE_URL` pointing at a Postgres server and
//! `cargo test -- --ignored`.

mod common;

use axum::http::StatusCode;
use common::{generate_unique_email, get, post_json, sorted};
use rollcall::repositories::{
    PgStudentRepository, PgTeacherRepository, Repositories, StudentRepository, TeacherRepository,
};
use rollcall::router::init_router;
use rollcall::state::AppState;
use rollcall_config::CorsConfig;
use rollcall_core::StoreError;
use serde_json::json;
use sqlx::PgPool;

#[sqlx::test(migrations = "./migrations")]
#[ignore = "requires a running Postgres at DATABASE_URL"]
async fn test_create_rejects_duplicate_emails(pool: PgPool) {
    let teachers = PgTeacherRepository::new(pool.clone());
    let students = PgStudentRepository::new(pool);
    let teacher_email = generate_unique_email("teacher");
    let student_email = generate_unique_email("student");

    teachers.create(&teacher_email).await.unwrap();
    let student = students.create(&student_email).await.unwrap();
    assert!(!student.suspended);

    let err = teachers.create(&teacher_email).await.unwrap_err();
    assert!(matches!(err, StoreError::Duplicate { entity: "teacher", .. }));

    let err = students.create(&student_email).await.unwrap_err();
    assert!(matches!(err, StoreError::Duplicate { entity: "student", .. }));
}

#[sqlx::test(migrations = "./migrations")]
#[ignore = "requires a running Postgres at DATABASE_URL"]
async fn test_save_links_each_pair_once(pool: PgPool) {
    let teachers = PgTeacherRepository::new(pool.clone());
    let students = PgStudentRepository::new(pool.clone());

    let mut teacher = teachers.create("teacherken@gmail.com").await.unwrap();
    let jon = students.create("studentjon@gmail.com").await.unwrap();
    let hon = students.create("studenthon@gmail.com").await.unwrap();

    teacher.link(jon.clone());
    teacher.link(hon);
    teachers.save(&teacher).await.unwrap();
    teachers.save(&teacher).await.unwrap();

    let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM teacher_student")
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(count, 2);

    let loaded = teachers
        .find_by_email("teacherken@gmail.com")
        .await
        .unwrap()
        .unwrap();
    assert_eq!(
        loaded.student_emails(),
        vec!["studenthon@gmail.com", "studentjon@gmail.com"]
    );
}

#[sqlx::test(migrations = "./migrations")]
#[ignore = "requires a running Postgres at DATABASE_URL"]
async fn test_find_by_emails_in_loads_students(pool: PgPool) {
    let teachers = PgTeacherRepository::new(pool.clone());
    let students = PgStudentRepository::new(pool);

    let mut ken = teachers.create("teacherken@gmail.com").await.unwrap();
    teachers.create("teacherjoe@gmail.com").await.unwrap();
    ken.link(students.create("studentbob@gmail.com").await.unwrap());
    teachers.save(&ken).await.unwrap();

    let found = teachers
        .find_by_emails_in(&[
            "teacherken@gmail.com".to_string(),
            "teacherjoe@gmail.com".to_string(),
            "ghost@gmail.com".to_string(),
        ])
        .await
        .unwrap();

    assert_eq!(found.len(), 2);
    let ken = found.iter().find(|t| t.email == "teacherken@gmail.com").unwrap();
    let joe = found.iter().find(|t| t.email == "teacherjoe@gmail.com").unwrap();
    assert_eq!(ken.student_emails(), vec!["studentbob@gmail.com"]);
    assert!(joe.students.is_empty());

    let found = students
        .find_by_emails_in(&["studentbob@gmail.com".to_string(), "nobody@gmail.com".to_string()])
        .await
        .unwrap();
    assert_eq!(found.len(), 1);
}

#[sqlx::test(migrations = "./migrations")]
#[ignore = "requires a running Postgres at DATABASE_URL"]
async fn test_save_persists_suspension(pool: PgPool) {
    let students = PgStudentRepository::new(pool);

    let mut mary = students.create("studentmary@gmail.com").await.unwrap();
    mary.suspended = true;
    students.save(&mary).await.unwrap();

    let loaded = students
        .find_by_email("studentmary@gmail.com")
        .await
        .unwrap()
        .unwrap();
    assert!(loaded.suspended);
}

#[sqlx::test(migrations = "./migrations")]
#[ignore = "requires a running Postgres at DATABASE_URL"]
async fn test_api_flow_against_postgres(pool: PgPool) {
    dotenvy::dotenv().ok();
    let app = init_router(AppState::new(
        Repositories::postgres(pool),
        CorsConfig::from_env(),
    ));

    let (status, _) = post_json(
        &app,
        "/api/register",
        json!({
            "teacher": "teacherken@gmail.com",
            "students": ["commonstudent1@gmail.com", "studentbob@gmail.com"]
        }),
    )
    .await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (status, _) = post_json(
        &app,
        "/api/register",
        json!({
            "teacher": "teacherjoe@gmail.com",
            "students": ["commonstudent1@gmail.com"]
        }),
    )
    .await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (status, body) = get(
        &app,
        "/api/commonstudents?teacher=teacherken%40gmail.com&teacher=teacherjoe%40gmail.com",
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(sorted(&body["students"]), vec!["commonstudent1@gmail.com"]);

    let (status, _) = post_json(
        &app,
        "/api/suspend",
        json!({ "student": "studentbob@gmail.com" }),
    )
    .await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (status, body) = post_json(
        &app,
        "/api/retrievefornotifications",
        json!({ "teacher": "teacherken@gmail.com", "notification": "Hey everybody" }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "recipients": ["commonstudent1@gmail.com"] }));
}
