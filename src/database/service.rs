//! Database service layer
//!
//! This module provides a high-level interface to database operations and
//! implements the [`SchoolStore`] contract on top of the repositories.

use async_trait::async_trait;
use crate::database::{DatabasePool, SchoolStore, StudentRepository, TeacherRepository};
use crate::models::*;
use crate::utils::errors::Result;

#[derive(Debug, Clone)]
pub struct DatabaseService {
    pub teachers: TeacherRepository,
    pub students: StudentRepository,
    pool: DatabasePool,
}

impl DatabaseService {
    pub fn new(pool: DatabasePool) -> Self {
        Self {
            teachers: TeacherRepository::new(pool.clone()),
            students: StudentRepository::new(pool.clone()),
            pool,
        }
    }

    /// Check that the database answers, returning the round-trip latency
    pub async fn health_check(&self) -> Result<std::time::Duration> {
        super::connection::health_check(&self.pool).await
    }

    /// Get system statistics
    pub async fn get_system_stats(&self) -> Result<serde_json::Value> {
        let teachers = self.teachers.count().await?;
        let students = self.students.count().await?;

        Ok(serde_json::json!({
            "teachers": teachers,
            "students": students,
        }))
    }
}

#[async_trait]
impl SchoolStore for DatabaseService {
    async fn find_teacher_by_email(&self, email: &str, filter: StudentFilter) -> Result<Option<TeacherWithStudents>> {
        self.teachers.find_with_students(email, filter).await
    }

    async fn create_teacher(&self, email: &str) -> Result<Teacher> {
        self.teachers.create(email).await
    }

    async fn update_teacher_students(&self, teacher_id: i64, student_ids: &[i64]) -> Result<u64> {
        self.teachers.add_students(teacher_id, student_ids).await
    }

    async fn find_student_by_email(&self, email: &str) -> Result<Option<Student>> {
        self.students.find_by_email(email).await
    }

    async fn create_student(&self, email: &str) -> Result<Student> {
        self.students.create(email).await
    }

    async fn find_students_by_emails(&self, emails: &[String], suspended: Option<bool>) -> Result<Vec<Student>> {
        if emails.is_empty() {
            return Ok(Vec::new());
        }
        self.students.find_by_emails(emails, suspended).await
    }

    async fn create_students_bulk(&self, records: &[CreateStudentRequest], skip_existing: bool) -> Result<u64> {
        self.students.create_many(records, skip_existing).await
    }

    async fn update_student(&self, email: &str, request: UpdateStudentRequest) -> Result<Student> {
        self.students.update_by_email(email, request).await
    }

    async fn find_teachers_by_emails(&self, emails: &[String], filter: StudentFilter) -> Result<Vec<TeacherWithStudents>> {
        if emails.is_empty() {
            return Ok(Vec::new());
        }
        self.teachers.find_many_with_students(emails, filter).await
    }
}
