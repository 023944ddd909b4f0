//! Storage contract consumed by the domain service
//!
//! The teacher service only ever talks to a `SchoolStore`, so the PostgreSQL
//! backed [`DatabaseService`](super::DatabaseService) can be swapped for the
//! [`InMemoryStore`](super::InMemoryStore) in tests.

use async_trait::async_trait;
use crate::models::student::{CreateStudentRequest, Student, UpdateStudentRequest};
use crate::models::teacher::{StudentFilter, Teacher, TeacherWithStudents};
use crate::utils::errors::Result;

#[async_trait]
pub trait SchoolStore: Send + Sync {
    /// Teacher with its registered students, or `None` when the email is unknown
    async fn find_teacher_by_email(&self, email: &str, filter: StudentFilter) -> Result<Option<TeacherWithStudents>>;

    async fn create_teacher(&self, email: &str) -> Result<Teacher>;

    /// Register students to a teacher in one atomic call; existing registrations are kept.
    /// Returns the number of registrations added.
    async fn update_teacher_students(&self, teacher_id: i64, student_ids: &[i64]) -> Result<u64>;

    async fn find_student_by_email(&self, email: &str) -> Result<Option<Student>>;

    /// Create an unsuspended student
    async fn create_student(&self, email: &str) -> Result<Student>;

    /// Students whose email is listed; `suspended` restricts to one state when set
    async fn find_students_by_emails(&self, emails: &[String], suspended: Option<bool>) -> Result<Vec<Student>>;

    /// Create students in one atomic call. Returns the number created.
    async fn create_students_bulk(&self, records: &[CreateStudentRequest], skip_existing: bool) -> Result<u64>;

    /// Fails with a row-not-found database error when the email is unknown
    async fn update_student(&self, email: &str, request: UpdateStudentRequest) -> Result<Student>;

    /// Teachers whose email is listed, each with its registered students
    async fn find_teachers_by_emails(&self, emails: &[String], filter: StudentFilter) -> Result<Vec<TeacherWithStudents>>;
}
