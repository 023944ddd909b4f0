//! Teacher service implementation
//!
//! Business rules over teachers and students: registration, common students,
//! suspension, and notification recipients. The service owns no storage; it
//! works against any injected [`SchoolStore`].

use std::collections::{BTreeSet, HashSet};
use std::sync::Arc;
use futures::future::try_join_all;
use tracing::{debug, info};
use crate::database::SchoolStore;
use crate::models::student::{CreateStudentRequest, Student, UpdateStudentRequest};
use crate::models::teacher::{StudentFilter, TeacherWithStudents};
use crate::services::mentions::extract_mentions;
use crate::utils::errors::{RosterError, Result};
use crate::utils::helpers::dedup_preserving_order;
use crate::utils::logging::{log_notification, log_registration, log_suspension};

/// Teacher service for managing registrations and notifications
#[derive(Clone)]
pub struct TeacherService {
    store: Arc<dyn SchoolStore>,
}

impl TeacherService {
    /// Create a new TeacherService instance
    pub fn new(store: Arc<dyn SchoolStore>) -> Self {
        Self { store }
    }

    /// Register students to a teacher, creating either side on first reference
    ///
    /// Students already registered to the teacher are left as they are.
    pub async fn register_students(&self, teacher_email: &str, student_emails: &[String]) -> Result<()> {
        self.register_students_inner(teacher_email, student_emails)
            .await
            .map_err(failure("register students"))
    }

    /// Students registered to every one of the given teachers, sorted
    ///
    /// Returns an empty list unless the teachers found match the requested
    /// emails one for one, so a missing or repeated teacher yields nothing.
    /// Suspended students are never included.
    pub async fn get_common_students(&self, teacher_emails: &[String]) -> Result<Vec<String>> {
        self.get_common_students_inner(teacher_emails)
            .await
            .map_err(failure("get common students"))
    }

    /// Suspend a student
    ///
    /// Fails with [`RosterError::StudentNotFound`] for an unknown email.
    /// Suspending a suspended student succeeds.
    pub async fn suspend_student(&self, student_email: &str) -> Result<()> {
        self.suspend_student_inner(student_email)
            .await
            .map_err(failure("suspend student"))
    }

    /// Students who receive a notification, sorted
    ///
    /// Recipients are the teacher's active registered students plus every
    /// student mentioned in the text. Mentioned emails unknown to the store
    /// are created as new students; existing rows are left untouched.
    pub async fn get_notification_recipients(&self, teacher_email: &str, notification: &str) -> Result<Vec<String>> {
        self.get_notification_recipients_inner(teacher_email, notification)
            .await
            .map_err(failure("get notification recipients"))
    }

    async fn register_students_inner(&self, teacher_email: &str, student_emails: &[String]) -> Result<()> {
        debug!(teacher = %teacher_email, students = student_emails.len(), "Registering students");

        let teacher = match self.store.find_teacher_by_email(teacher_email, StudentFilter::All).await? {
            Some(existing) => existing,
            None => {
                let teacher = self.store.create_teacher(teacher_email).await?;
                info!(teacher_id = teacher.id, teacher = %teacher_email, "New teacher created");
                TeacherWithStudents { teacher, students: Vec::new() }
            }
        };

        let emails = dedup_preserving_order(student_emails);
        let students = try_join_all(emails.iter().map(|email| self.find_or_create_student(email))).await?;

        let registered: HashSet<i64> = teacher.student_ids().collect();
        let new_ids: Vec<i64> = students
            .iter()
            .map(|s| s.id)
            .filter(|id| !registered.contains(id))
            .collect();

        if !new_ids.is_empty() {
            self.store.update_teacher_students(teacher.teacher.id, &new_ids).await?;
        }

        log_registration(teacher_email, emails.len(), new_ids.len());
        Ok(())
    }

    async fn find_or_create_student(&self, email: &str) -> Result<Student> {
        if let Some(student) = self.store.find_student_by_email(email).await? {
            return Ok(student);
        }

        let student = self.store.create_student(email).await?;
        info!(student_id = student.id, student = %email, "New student created");
        Ok(student)
    }

    async fn get_common_students_inner(&self, teacher_emails: &[String]) -> Result<Vec<String>> {
        let requested = dedup_preserving_order(teacher_emails);
        if requested.is_empty() {
            return Ok(Vec::new());
        }

        // A repeated email is still one teacher, so it can never match the requested count.
        let teachers = self.store.find_teachers_by_emails(&requested, StudentFilter::Active).await?;
        if teachers.len() != teacher_emails.len() {
            debug!(requested = teacher_emails.len(), found = teachers.len(), "Teacher list does not match exactly");
            return Ok(Vec::new());
        }

        let mut teachers = teachers.into_iter();
        let mut common: BTreeSet<String> = match teachers.next() {
            Some(first) => first.student_emails().map(str::to_string).collect(),
            None => return Ok(Vec::new()),
        };
        for teacher in teachers {
            let emails: HashSet<&str> = teacher.student_emails().collect();
            common.retain(|email| emails.contains(email.as_str()));
        }

        debug!(teachers = requested.len(), common = common.len(), "Common students computed");
        Ok(common.into_iter().collect())
    }

    async fn suspend_student_inner(&self, student_email: &str) -> Result<()> {
        let student = self
            .store
            .find_student_by_email(student_email)
            .await?
            .ok_or_else(|| RosterError::StudentNotFound { email: student_email.to_string() })?;

        let update = UpdateStudentRequest { suspended: Some(true) };
        self.store.update_student(student_email, update).await?;

        log_suspension(student_email, student.suspended);
        Ok(())
    }

    async fn get_notification_recipients_inner(&self, teacher_email: &str, notification: &str) -> Result<Vec<String>> {
        let mentions = extract_mentions(notification);
        debug!(teacher = %teacher_email, mentions = mentions.len(), "Resolving notification recipients");

        let mut recipients: BTreeSet<String> = match self.store.find_teacher_by_email(teacher_email, StudentFilter::Active).await? {
            Some(teacher) => teacher.student_emails().map(str::to_string).collect(),
            None => BTreeSet::new(),
        };

        let mut created = 0;
        if !mentions.is_empty() {
            // Suspended students are not returned here; the bulk create below skips their rows.
            let active = self.store.find_students_by_emails(&mentions, Some(false)).await?;
            let active_emails: HashSet<&str> = active.iter().map(|s| s.email.as_str()).collect();

            let unknown: Vec<CreateStudentRequest> = mentions
                .iter()
                .filter(|email| !active_emails.contains(email.as_str()))
                .map(|email| CreateStudentRequest::active(email.as_str()))
                .collect();

            if !unknown.is_empty() {
                created = self.store.create_students_bulk(&unknown, true).await?;
            }
            recipients.extend(mentions.iter().cloned());
        }

        log_notification(teacher_email, mentions.len(), created as usize, recipients.len());
        Ok(recipients.into_iter().collect())
    }
}

/// Wrap a store failure with the operation it interrupted, keeping `StudentNotFound` as is
fn failure(operation: &'static str) -> impl FnOnce(RosterError) -> RosterError {
    move |err| match err {
        RosterError::StudentNotFound { .. } => err,
        other => RosterError::service_failure(operation, other),
    }
}
