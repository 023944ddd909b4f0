//! Teacher model

use serde::{Deserialize, Serialize};
use chrono::{DateTime, Utc};
use sqlx::FromRow;

use super::student::Student;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct Teacher {
    pub id: i64,
    pub email: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A teacher loaded together with its registered students
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TeacherWithStudents {
    pub teacher: Teacher,
    pub students: Vec<Student>,
}

impl TeacherWithStudents {
    pub fn student_ids(&self) -> impl Iterator<Item = i64> + '_ {
        self.students.iter().map(|s| s.id)
    }

    pub fn student_emails(&self) -> impl Iterator<Item = &str> + '_ {
        self.students.iter().map(|s| s.email.as_str())
    }
}

/// Which of a teacher's students to load alongside the teacher
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StudentFilter {
    All,
    Active,
}

impl StudentFilter {
    pub fn admits(&self, student: &Student) -> bool {
        match self {
            StudentFilter::All => true,
            StudentFilter::Active => !student.suspended,
        }
    }
}
