//! Teacher repository implementation

use std::collections::HashMap;
use std::time::Instant;
use sqlx::{FromRow, PgPool};
use chrono::Utc;
use crate::models::student::Student;
use crate::models::teacher::{StudentFilter, Teacher, TeacherWithStudents};
use crate::utils::errors::RosterError;
use crate::utils::logging::log_database_operation;

/// A student row joined with the teacher it is registered to
#[derive(Debug, FromRow)]
struct RegistrationRow {
    teacher_id: i64,
    #[sqlx(flatten)]
    student: Student,
}

#[derive(Clone, Debug)]
pub struct TeacherRepository {
    pool: PgPool,
}

impl TeacherRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Create a new teacher
    pub async fn create(&self, email: &str) -> Result<Teacher, RosterError> {
        let teacher = sqlx::query_as::<_, Teacher>(
            r#"
            INSERT INTO teachers (email, created_at, updated_at)
            VALUES ($1, $2, $3)
            RETURNING id, email, created_at, updated_at
            "#
        )
        .bind(email)
        .bind(Utc::now())
        .bind(Utc::now())
        .fetch_one(&self.pool)
        .await?;

        Ok(teacher)
    }

    /// Find teacher by email
    pub async fn find_by_email(&self, email: &str) -> Result<Option<Teacher>, RosterError> {
        let teacher = sqlx::query_as::<_, Teacher>(
            "SELECT id, email, created_at, updated_at FROM teachers WHERE email = $1"
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await?;

        Ok(teacher)
    }

    /// Find all teachers whose email is in the given list
    pub async fn find_by_emails(&self, emails: &[String]) -> Result<Vec<Teacher>, RosterError> {
        let teachers = sqlx::query_as::<_, Teacher>(
            "SELECT id, email, created_at, updated_at FROM teachers WHERE email = ANY($1) ORDER BY email"
        )
        .bind(emails)
        .fetch_all(&self.pool)
        .await?;

        Ok(teachers)
    }

    /// Find teacher by email together with its registered students
    pub async fn find_with_students(&self, email: &str, filter: StudentFilter) -> Result<Option<TeacherWithStudents>, RosterError> {
        let Some(teacher) = self.find_by_email(email).await? else {
            return Ok(None);
        };

        let students = self
            .registered_students(&[teacher.id], filter)
            .await?
            .into_iter()
            .map(|row| row.student)
            .collect();

        Ok(Some(TeacherWithStudents { teacher, students }))
    }

    /// Find teachers by email together with their registered students
    pub async fn find_many_with_students(&self, emails: &[String], filter: StudentFilter) -> Result<Vec<TeacherWithStudents>, RosterError> {
        let teachers = self.find_by_emails(emails).await?;
        if teachers.is_empty() {
            return Ok(Vec::new());
        }

        let ids: Vec<i64> = teachers.iter().map(|t| t.id).collect();
        let mut by_teacher: HashMap<i64, Vec<Student>> = HashMap::new();
        for row in self.registered_students(&ids, filter).await? {
            by_teacher.entry(row.teacher_id).or_default().push(row.student);
        }

        Ok(teachers
            .into_iter()
            .map(|teacher| {
                let students = by_teacher.remove(&teacher.id).unwrap_or_default();
                TeacherWithStudents { teacher, students }
            })
            .collect())
    }

    /// Register students to a teacher in one statement, skipping existing registrations
    pub async fn add_students(&self, teacher_id: i64, student_ids: &[i64]) -> Result<u64, RosterError> {
        let started = Instant::now();
        let result = sqlx::query(
            r#"
            INSERT INTO teacher_students (teacher_id, student_id, registered_at)
            SELECT $1, student_id, $3 FROM UNNEST($2::BIGINT[]) AS t(student_id)
            ON CONFLICT (teacher_id, student_id) DO NOTHING
            "#
        )
        .bind(teacher_id)
        .bind(student_ids)
        .bind(Utc::now())
        .execute(&self.pool)
        .await;

        log_database_operation("insert", "teacher_students", started.elapsed().as_millis() as u64, result.is_ok());
        Ok(result?.rows_affected())
    }

    /// Count total teachers
    pub async fn count(&self) -> Result<i64, RosterError> {
        let count: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM teachers")
            .fetch_one(&self.pool)
            .await?;

        Ok(count.0)
    }

    async fn registered_students(&self, teacher_ids: &[i64], filter: StudentFilter) -> Result<Vec<RegistrationRow>, RosterError> {
        let rows = sqlx::query_as::<_, RegistrationRow>(
            r#"
            SELECT ts.teacher_id, s.id, s.email, s.suspended, s.created_at, s.updated_at
            FROM teacher_students ts
            JOIN students s ON s.id = ts.student_id
            WHERE ts.teacher_id = ANY($1) AND ($2 OR s.suspended = FALSE)
            ORDER BY s.email
            "#
        )
        .bind(teacher_ids)
        .bind(filter == StudentFilter::All)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }
}
