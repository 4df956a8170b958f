use anyhow::anyhow;
use async_trait::async_trait;
use rollcall_core::StoreError;
use rollcall_models::{Student, Teacher};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

use super::{StoreResult, StudentRepository, TeacherRepository};

/// In-memory record store.
///
/// Clones share state. Emails are unique per entity and each
/// (teacher, student) pair is stored once, in link order.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    inner: Arc<RwLock<Inner>>,
}

#[derive(Debug, Default)]
struct Inner {
    /// Teacher rows by email; `students` is always empty here.
    teachers: HashMap<String, Teacher>,
    students: HashMap<String, Student>,
    student_emails: HashMap<Uuid, String>,
    links: HashMap<Uuid, Vec<Uuid>>,
}

impl Inner {
    fn load_teacher(&self, row: &Teacher) -> Teacher {
        let students = self
            .links
            .get(&row.id)
            .into_iter()
            .flatten()
            .filter_map(|id| self.student_emails.get(id))
            .filter_map(|email| self.students.get(email))
            .cloned()
            .collect();

        Teacher {
            students,
            ..row.clone()
        }
    }
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored (teacher, student) pairs.
    pub async fn link_count(&self) -> usize {
        self.inner.read().await.links.values().map(Vec::len).sum()
    }
}

#[async_trait]
impl TeacherRepository for MemoryStore {
    async fn find_by_email(&self, email: &str) -> StoreResult<Option<Teacher>> {
        let inner = self.inner.read().await;
        Ok(inner.teachers.get(email).map(|row| inner.load_teacher(row)))
    }

    async fn find_by_emails_in(&self, emails: &[String]) -> StoreResult<Vec<Teacher>> {
        let inner = self.inner.read().await;
        let mut found: Vec<Teacher> = Vec::new();
        for email in emails {
            if found.iter().any(|t| &t.email == email) {
                continue;
            }
            if let Some(row) = inner.teachers.get(email) {
                found.push(inner.load_teacher(row));
            }
        }
        Ok(found)
    }

    async fn create(&self, email: &str) -> StoreResult<Teacher> {
        let mut inner = self.inner.write().await;
        if inner.teachers.contains_key(email) {
            return Err(StoreError::duplicate("teacher", email));
        }

        let teacher = Teacher::new(email);
        inner.teachers.insert(email.to_string(), teacher.clone());
        Ok(teacher)
    }

    async fn save(&self, teacher: &Teacher) -> StoreResult<()> {
        let mut inner = self.inner.write().await;
        let known_teacher = inner
            .teachers
            .get(&teacher.email)
            .is_some_and(|row| row.id == teacher.id);
        if !known_teacher {
            return Err(anyhow!("teacher {} is not stored", teacher.email).into());
        }

        if let Some(missing) = teacher
            .students
            .iter()
            .find(|s| !inner.student_emails.contains_key(&s.id))
        {
            return Err(anyhow!("student {} is not stored", missing.email).into());
        }

        let links = inner.links.entry(teacher.id).or_default();
        for student in &teacher.students {
            if !links.contains(&student.id) {
                links.push(student.id);
            }
        }
        Ok(())
    }
}

#[async_trait]
impl StudentRepository for MemoryStore {
    async fn find_by_email(&self, email: &str) -> StoreResult<Option<Student>> {
        Ok(self.inner.read().await.students.get(email).cloned())
    }

    async fn find_by_emails_in(&self, emails: &[String]) -> StoreResult<Vec<Student>> {
        let inner = self.inner.read().await;
        let mut found: Vec<Student> = Vec::new();
        for email in emails {
            if found.iter().any(|s| &s.email == email) {
                continue;
            }
            if let Some(student) = inner.students.get(email) {
                found.push(student.clone());
            }
        }
        Ok(found)
    }

    async fn create(&self, email: &str) -> StoreResult<Student> {
        let mut inner = self.inner.write().await;
        if inner.students.contains_key(email) {
            return Err(StoreError::duplicate("student", email));
        }

        let student = Student::new(email);
        inner.student_emails.insert(student.id, student.email.clone());
        inner.students.insert(email.to_string(), student.clone());
        Ok(student)
    }

    async fn save(&self, student: &Student) -> StoreResult<()> {
        let mut inner = self.inner.write().await;
        match inner.students.get_mut(&student.email) {
            Some(stored) if stored.id == student.id => {
                stored.suspended = student.suspended;
                Ok(())
            }
            _ => Err(anyhow!("student {} is not stored", student.email).into()),
        }
    }
}
