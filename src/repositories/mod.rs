//! Data-access interface for teachers and students.
//!
//! The association service only talks to [`TeacherRepository`] and
//! [`StudentRepository`]. Two backends implement them:
//!
//! - [`postgres`]: `sqlx` over the `teacher`, `student` and `teacher_student` tables
//! - [`memory`]: a process-local store with the same uniqueness rules
//!
//! Both report duplicate emails as [`StoreError::Duplicate`] and pass every
//! other failure through as [`StoreError::Backend`].

use async_trait::async_trait;
use rollcall_core::StoreError;
use rollcall_models::{Student, Teacher};
use sqlx::PgPool;
use std::sync::Arc;

pub mod memory;
pub mod postgres;

pub use memory::MemoryStore;
pub use postgres::{PgStudentRepository, PgTeacherRepository};

pub type StoreResult<T> = Result<T, StoreError>;

#[async_trait]
pub trait TeacherRepository: Send + Sync {
    /// Teacher with its linked students, if one exists for `email`.
    async fn find_by_email(&self, email: &str) -> StoreResult<Option<Teacher>>;

    /// Every teacher whose email is in `emails`, students loaded.
    async fn find_by_emails_in(&self, emails: &[String]) -> StoreResult<Vec<Teacher>>;

    /// Inserts a teacher with no students.
    async fn create(&self, email: &str) -> StoreResult<Teacher>;

    /// Persists the teacher's student links. Pairs already stored are left alone.
    async fn save(&self, teacher: &Teacher) -> StoreResult<()>;
}

#[async_trait]
pub trait StudentRepository: Send + Sync {
    async fn find_by_email(&self, email: &str) -> StoreResult<Option<Student>>;

    async fn find_by_emails_in(&self, emails: &[String]) -> StoreResult<Vec<Student>>;

    /// Inserts an active (not suspended) student.
    async fn create(&self, email: &str) -> StoreResult<Student>;

    /// Persists the suspended flag.
    async fn save(&self, student: &Student) -> StoreResult<()>;
}

/// The pair of stores the service runs against.
#[derive(Clone)]
pub struct Repositories {
    pub teachers: Arc<dyn TeacherRepository>,
    pub students: Arc<dyn StudentRepository>,
}

impl Repositories {
    pub fn postgres(pool: PgPool) -> Self {
        Self {
            teachers: Arc::new(PgTeacherRepository::new(pool.clone())),
            students: Arc::new(PgStudentRepository::new(pool)),
        }
    }

    pub fn in_memory() -> Self {
        Self::from_memory(MemoryStore::default())
    }

    /// Shares one in-memory store between both repositories.
    pub fn from_memory(store: MemoryStore) -> Self {
        Self {
            teachers: Arc::new(store.clone()),
            students: Arc::new(store),
        }
    }
}

impl std::fmt::Debug for Repositories {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Repositories").finish_non_exhaustive()
    }
}
