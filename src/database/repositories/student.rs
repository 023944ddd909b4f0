//! Student repository implementation

use std::time::Instant;
use sqlx::PgPool;
use chrono::Utc;
use crate::models::student::{CreateStudentRequest, Student, UpdateStudentRequest};
use crate::utils::errors::RosterError;
use crate::utils::logging::log_database_operation;

#[derive(Clone, Debug)]
pub struct StudentRepository {
    pool: PgPool,
}

impl StudentRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Create a new, unsuspended student
    pub async fn create(&self, email: &str) -> Result<Student, RosterError> {
        let student = sqlx::query_as::<_, Student>(
            r#"
            INSERT INTO students (email, suspended, created_at, updated_at)
            VALUES ($1, FALSE, $2, $3)
            RETURNING id, email, suspended, created_at, updated_at
            "#
        )
        .bind(email)
        .bind(Utc::now())
        .bind(Utc::now())
        .fetch_one(&self.pool)
        .await?;

        Ok(student)
    }

    /// Create many students in one statement
    ///
    /// With `skip_existing`, emails that already exist are left untouched.
    /// Returns the number of rows inserted.
    pub async fn create_many(&self, requests: &[CreateStudentRequest], skip_existing: bool) -> Result<u64, RosterError> {
        if requests.is_empty() {
            return Ok(0);
        }

        let emails: Vec<String> = requests.iter().map(|r| r.email.clone()).collect();
        let suspended: Vec<bool> = requests.iter().map(|r| r.suspended).collect();

        let sql = if skip_existing {
            r#"
            INSERT INTO students (email, suspended, created_at, updated_at)
            SELECT email, suspended, $3, $3 FROM UNNEST($1::TEXT[], $2::BOOLEAN[]) AS t(email, suspended)
            ON CONFLICT (email) DO NOTHING
            "#
        } else {
            r#"
            INSERT INTO students (email, suspended, created_at, updated_at)
            SELECT email, suspended, $3, $3 FROM UNNEST($1::TEXT[], $2::BOOLEAN[]) AS t(email, suspended)
            "#
        };

        let started = Instant::now();
        let result = sqlx::query(sql)
            .bind(&emails)
            .bind(&suspended)
            .bind(Utc::now())
            .execute(&self.pool)
            .await;

        log_database_operation("insert", "students", started.elapsed().as_millis() as u64, result.is_ok());
        Ok(result?.rows_affected())
    }

    /// Find student by email
    pub async fn find_by_email(&self, email: &str) -> Result<Option<Student>, RosterError> {
        let student = sqlx::query_as::<_, Student>(
            "SELECT id, email, suspended, created_at, updated_at FROM students WHERE email = $1"
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await?;

        Ok(student)
    }

    /// Find students by email, optionally restricted to one suspension state
    pub async fn find_by_emails(&self, emails: &[String], suspended: Option<bool>) -> Result<Vec<Student>, RosterError> {
        let students = sqlx::query_as::<_, Student>(
            r#"
            SELECT id, email, suspended, created_at, updated_at
            FROM students
            WHERE email = ANY($1) AND ($2::BOOLEAN IS NULL OR suspended = $2)
            ORDER BY email
            "#
        )
        .bind(emails)
        .bind(suspended)
        .fetch_all(&self.pool)
        .await?;

        Ok(students)
    }

    /// Update student by email
    ///
    /// Fails with `sqlx::Error::RowNotFound` when no student has the email.
    pub async fn update_by_email(&self, email: &str, request: UpdateStudentRequest) -> Result<Student, RosterError> {
        let student = sqlx::query_as::<_, Student>(
            r#"
            UPDATE students
            SET suspended = COALESCE($2, suspended),
                updated_at = $3
            WHERE email = $1
            RETURNING id, email, suspended, created_at, updated_at
            "#
        )
        .bind(email)
        .bind(request.suspended)
        .bind(Utc::now())
        .fetch_one(&self.pool)
        .await?;

        Ok(student)
    }

    /// Count total students
    pub async fn count(&self) -> Result<i64, RosterError> {
        let count: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM students")
            .fetch_one(&self.pool)
            .await?;

        Ok(count.0)
    }
}
