use rollcall_core::ServiceError;
use rollcall_models::Student;
use rollcall_observability::{
    track_notification_recipients, track_student_suspended, track_students_registered,
};
use std::collections::HashMap;
use tracing::{debug, info, instrument};

use crate::modules::teachers::mentions::extract_mentioned_emails;
use crate::repositories::Repositories;

pub struct TeacherService;

impl TeacherService {
    /// Links every student in `student_emails` to the teacher, creating the
    /// teacher and any unknown students on the way.
    ///
    /// Pairs that are already linked are left as they are.
    #[instrument(skip(repos))]
    pub async fn register(
        repos: &Repositories,
        teacher_email: &str,
        student_emails: &[String],
    ) -> Result<(), ServiceError> {
        if student_emails.is_empty() {
            return Err(ServiceError::validation(
                "At least one student must be provided",
            ));
        }

        let existing = repos.teachers.find_by_email(teacher_email).await?;

        // Students first: a failed student insert must leave no teacher row
        let mut students = Vec::new();
        for email in student_emails {
            let already_linked = existing.as_ref().is_some_and(|t| t.has_student(email));
            if already_linked || students.iter().any(|s: &Student| &s.email == email) {
                continue;
            }

            let student = match repos.students.find_by_email(email).await? {
                Some(student) => student,
                None => repos.students.create(email).await?,
            };
            students.push(student);
        }

        let mut teacher = match existing {
            Some(teacher) => teacher,
            None => repos.teachers.create(teacher_email).await?,
        };

        let mut linked = 0;
        for student in students {
            if teacher.link(student) {
                linked += 1;
            }
        }

        repos.teachers.save(&teacher).await?;

        info!(teacher = %teacher.email, linked, "Registered students");
        track_students_registered(linked);

        Ok(())
    }

    /// Students registered to every one of `teacher_emails`.
    ///
    /// All teachers must exist. Result order follows the first resolved
    /// teacher's students; callers should treat it as a set.
    #[instrument(skip(repos))]
    pub async fn common_students(
        repos: &Repositories,
        teacher_emails: &[String],
    ) -> Result<Vec<String>, ServiceError> {
        // `?teacher=` arrives as an empty value and counts as absent
        let mut requested: Vec<String> = Vec::with_capacity(teacher_emails.len());
        for email in teacher_emails.iter().filter(|e| !e.trim().is_empty()) {
            if !requested.contains(email) {
                requested.push(email.clone());
            }
        }

        if requested.is_empty() {
            return Err(ServiceError::validation(
                "At least one teacher must be provided",
            ));
        }

        let teachers = repos.teachers.find_by_emails_in(&requested).await?;

        let missing: Vec<&str> = requested
            .iter()
            .filter(|email| !teachers.iter().any(|t| &t.email == *email))
            .map(String::as_str)
            .collect();
        if !missing.is_empty() {
            return Err(ServiceError::not_found(format!(
                "Teacher(s) not found: {}",
                missing.join(", ")
            )));
        }

        let [first, rest @ ..] = teachers.as_slice() else {
            return Ok(Vec::new());
        };
        if rest.is_empty() {
            return Ok(first.student_emails());
        }

        let mut counts: HashMap<&str, usize> = HashMap::new();
        for student in teachers.iter().flat_map(|t| &t.students) {
            *counts.entry(student.email.as_str()).or_insert(0) += 1;
        }

        let common = first
            .students
            .iter()
            .filter(|s| counts.get(s.email.as_str()) == Some(&teachers.len()))
            .map(|s| s.email.clone())
            .collect();

        Ok(common)
    }

    /// Stops a student from receiving notifications. Suspending twice is a no-op.
    #[instrument(skip(repos))]
    pub async fn suspend_student(
        repos: &Repositories,
        student_email: &str,
    ) -> Result<(), ServiceError> {
        let mut student = repos
            .students
            .find_by_email(student_email)
            .await?
            .ok_or_else(|| {
                ServiceError::not_found(format!("Student with email {student_email} not found"))
            })?;

        if student.suspended {
            debug!(student = %student.email, "Student already suspended");
            return Ok(());
        }

        student.suspended = true;
        repos.students.save(&student).await?;

        info!(student = %student.email, "Suspended student");
        track_student_suspended();

        Ok(())
    }

    /// Active students of the teacher plus active students @-mentioned in
    /// `notification`, without duplicates.
    #[instrument(skip(repos, notification))]
    pub async fn notification_recipients(
        repos: &Repositories,
        teacher_email: &str,
        notification: &str,
    ) -> Result<Vec<String>, ServiceError> {
        let teacher = repos
            .teachers
            .find_by_email(teacher_email)
            .await?
            .ok_or_else(|| {
                ServiceError::not_found(format!("Teacher with email {teacher_email} not found"))
            })?;

        let mut recipients: Vec<String> = teacher
            .students
            .iter()
            .filter(|s| !s.suspended)
            .map(|s| s.email.clone())
            .collect();

        let mentioned = extract_mentioned_emails(notification);
        if !mentioned.is_empty() {
            let known = repos.students.find_by_emails_in(&mentioned).await?;
            for email in &mentioned {
                let active = known.iter().any(|s| &s.email == email && !s.suspended);
                if active && !recipients.contains(email) {
                    recipients.push(email.clone());
                }
            }
        }

        debug!(
            teacher = %teacher.email,
            mentioned = mentioned.len(),
            recipients = recipients.len(),
            "Computed notification recipients"
        );
        track_notification_recipients(recipients.len());

        Ok(recipients)
    }
}
