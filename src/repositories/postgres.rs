use anyhow::Context;
use async_trait::async_trait;
use rollcall_core::StoreError;
use rollcall_models::{Student, Teacher};
use sqlx::{FromRow, PgPool};
use std::collections::HashMap;
use tracing::instrument;
use uuid::Uuid;

use super::{StoreResult, StudentRepository, TeacherRepository};

fn insert_error(entity: &'static str, email: &str, e: sqlx::Error) -> StoreError {
    if let sqlx::Error::Database(db_err) = &e
        && db_err.is_unique_violation()
    {
        return StoreError::duplicate(entity, email);
    }
    StoreError::Backend(anyhow::Error::from(e).context(format!("Failed to insert {entity}")))
}

#[derive(FromRow)]
struct LinkedStudentRow {
    teacher_id: Uuid,
    #[sqlx(flatten)]
    student: Student,
}

#[derive(Debug, Clone)]
pub struct PgTeacherRepository {
    db: PgPool,
}

impl PgTeacherRepository {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }

    async fn attach_students(&self, teachers: &mut [Teacher]) -> StoreResult<()> {
        if teachers.is_empty() {
            return Ok(());
        }

        let ids: Vec<Uuid> = teachers.iter().map(|t| t.id).collect();
        let rows = sqlx::query_as::<_, LinkedStudentRow>(
            r#"SELECT ts.teacher_id, s.id, s.email, s.suspended, s.created_at
               FROM teacher_student ts
               JOIN student s ON s.id = ts.student_id
               WHERE ts.teacher_id = ANY($1)
               ORDER BY s.email"#,
        )
        .bind(&ids)
        .fetch_all(&self.db)
        .await
        .context("Failed to fetch students for teachers")?;

        let mut by_teacher: HashMap<Uuid, Vec<Student>> = HashMap::new();
        for row in rows {
            by_teacher.entry(row.teacher_id).or_default().push(row.student);
        }

        for teacher in teachers.iter_mut() {
            teacher.students = by_teacher.remove(&teacher.id).unwrap_or_default();
        }

        Ok(())
    }
}

#[async_trait]
impl TeacherRepository for PgTeacherRepository {
    #[instrument(skip(self))]
    async fn find_by_email(&self, email: &str) -> StoreResult<Option<Teacher>> {
        let teacher = sqlx::query_as::<_, Teacher>(
            "SELECT id, email, created_at FROM teacher WHERE email = $1",
        )
        .bind(email)
        .fetch_optional(&self.db)
        .await
        .context("Failed to fetch teacher by email")?;

        let Some(teacher) = teacher else {
            return Ok(None);
        };

        let mut found = [teacher];
        self.attach_students(&mut found).await?;
        let [teacher] = found;
        Ok(Some(teacher))
    }

    #[instrument(skip(self))]
    async fn find_by_emails_in(&self, emails: &[String]) -> StoreResult<Vec<Teacher>> {
        let mut teachers = sqlx::query_as::<_, Teacher>(
            "SELECT id, email, created_at FROM teacher WHERE email = ANY($1)",
        )
        .bind(emails)
        .fetch_all(&self.db)
        .await
        .context("Failed to fetch teachers by email")?;

        self.attach_students(&mut teachers).await?;
        Ok(teachers)
    }

    #[instrument(skip(self))]
    async fn create(&self, email: &str) -> StoreResult<Teacher> {
        sqlx::query_as::<_, Teacher>(
            r#"INSERT INTO teacher (email)
               VALUES ($1)
               RETURNING id, email, created_at"#,
        )
        .bind(email)
        .fetch_one(&self.db)
        .await
        .map_err(|e| insert_error("teacher", email, e))
    }

    #[instrument(skip(self, teacher), fields(teacher = %teacher.email))]
    async fn save(&self, teacher: &Teacher) -> StoreResult<()> {
        if teacher.students.is_empty() {
            return Ok(());
        }

        let student_ids: Vec<Uuid> = teacher.students.iter().map(|s| s.id).collect();
        sqlx::query(
            r#"INSERT INTO teacher_student (teacher_id, student_id)
               SELECT $1, UNNEST($2::uuid[])
               ON CONFLICT DO NOTHING"#,
        )
        .bind(teacher.id)
        .bind(&student_ids)
        .execute(&self.db)
        .await
        .context("Failed to save teacher students")?;

        Ok(())
    }
}

#[derive(Debug, Clone)]
pub struct PgStudentRepository {
    db: PgPool,
}

impl PgStudentRepository {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }
}

#[async_trait]
impl StudentRepository for PgStudentRepository {
    #[instrument(skip(self))]
    async fn find_by_email(&self, email: &str) -> StoreResult<Option<Student>> {
        let student = sqlx::query_as::<_, Student>(
            "SELECT id, email, suspended, created_at FROM student WHERE email = $1",
        )
        .bind(email)
        .fetch_optional(&self.db)
        .await
        .context("Failed to fetch student by email")?;

        Ok(student)
    }

    #[instrument(skip(self))]
    async fn find_by_emails_in(&self, emails: &[String]) -> StoreResult<Vec<Student>> {
        if emails.is_empty() {
            return Ok(Vec::new());
        }

        let students = sqlx::query_as::<_, Student>(
            "SELECT id, email, suspended, created_at FROM student WHERE email = ANY($1)",
        )
        .bind(emails)
        .fetch_all(&self.db)
        .await
        .context("Failed to fetch students by email")?;

        Ok(students)
    }

    #[instrument(skip(self))]
    async fn create(&self, email: &str) -> StoreResult<Student> {
        sqlx::query_as::<_, Student>(
            r#"INSERT INTO student (email)
               VALUES ($1)
               RETURNING id, email, suspended, created_at"#,
        )
        .bind(email)
        .fetch_one(&self.db)
        .await
        .map_err(|e| insert_error("student", email, e))
    }

    #[instrument(skip(self, student), fields(student = %student.email))]
    async fn save(&self, student: &Student) -> StoreResult<()> {
        sqlx::query("UPDATE student SET suspended = $2 WHERE id = $1")
            .bind(student.id)
            .bind(student.suspended)
            .execute(&self.db)
            .await
            .context("Failed to save student")?;

        Ok(())
    }
}
