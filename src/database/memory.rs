//! In-memory `SchoolStore`
//!
//! Keeps teachers, students and registrations in process memory and records
//! every store call, so tests can observe side effects (such as students
//! created while resolving notification recipients) and inject failures.

use std::collections::{BTreeMap, BTreeSet, HashSet};
use std::sync::Arc;
use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::Mutex;
use crate::database::SchoolStore;
use crate::models::student::{CreateStudentRequest, Student, UpdateStudentRequest};
use crate::models::teacher::{StudentFilter, Teacher, TeacherWithStudents};
use crate::utils::errors::{RosterError, Result};

/// Store operations, as recorded in the call log
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StoreOperation {
    FindTeacherByEmail,
    CreateTeacher,
    UpdateTeacherStudents,
    FindStudentByEmail,
    CreateStudent,
    FindStudentsByEmails,
    CreateStudentsBulk,
    UpdateStudent,
    FindTeachersByEmails,
}

#[derive(Debug, Default)]
struct State {
    next_id: i64,
    teachers: BTreeMap<String, Teacher>,
    students: BTreeMap<String, Student>,
    /// (teacher_id, student_id)
    registrations: BTreeSet<(i64, i64)>,
    calls: Vec<StoreOperation>,
    failing: HashSet<StoreOperation>,
}

impl State {
    fn enter(&mut self, operation: StoreOperation) -> Result<()> {
        self.calls.push(operation);
        if self.failing.contains(&operation) {
            return Err(RosterError::Database(sqlx::Error::PoolTimedOut));
        }
        Ok(())
    }

    fn next_id(&mut self) -> i64 {
        self.next_id += 1;
        self.next_id
    }

    fn new_student(&mut self, email: &str, suspended: bool) -> Student {
        let now = Utc::now();
        let student = Student {
            id: self.next_id(),
            email: email.to_string(),
            suspended,
            created_at: now,
            updated_at: now,
        };
        self.students.insert(email.to_string(), student.clone());
        student
    }

    fn new_teacher(&mut self, email: &str) -> Teacher {
        let now = Utc::now();
        let teacher = Teacher {
            id: self.next_id(),
            email: email.to_string(),
            created_at: now,
            updated_at: now,
        };
        self.teachers.insert(email.to_string(), teacher.clone());
        teacher
    }

    fn with_students(&self, teacher: &Teacher, filter: StudentFilter) -> TeacherWithStudents {
        let students = self
            .students
            .values()
            .filter(|s| self.registrations.contains(&(teacher.id, s.id)) && filter.admits(s))
            .cloned()
            .collect();

        TeacherWithStudents {
            teacher: teacher.clone(),
            students,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct InMemoryStore {
    state: Arc<Mutex<State>>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every later call of `operation` fail with a database error
    pub async fn fail_on(&self, operation: StoreOperation) {
        self.state.lock().await.failing.insert(operation);
    }

    /// Every store call made so far, in order
    pub async fn calls(&self) -> Vec<StoreOperation> {
        self.state.lock().await.calls.clone()
    }

    pub async fn call_count(&self, operation: StoreOperation) -> usize {
        self.state.lock().await.calls.iter().filter(|c| **c == operation).count()
    }

    pub async fn student(&self, email: &str) -> Option<Student> {
        self.state.lock().await.students.get(email).cloned()
    }

    pub async fn teacher(&self, email: &str) -> Option<Teacher> {
        self.state.lock().await.teachers.get(email).cloned()
    }

    pub async fn student_count(&self) -> usize {
        self.state.lock().await.students.len()
    }

    /// Emails of all students registered to the teacher, suspended or not
    pub async fn registered_emails(&self, teacher_email: &str) -> Vec<String> {
        let state = self.state.lock().await;
        match state.teachers.get(teacher_email) {
            Some(teacher) => state
                .with_students(teacher, StudentFilter::All)
                .students
                .into_iter()
                .map(|s| s.email)
                .collect(),
            None => Vec::new(),
        }
    }

    /// Seed a teacher with registered students, bypassing the call log
    pub async fn seed_registrations(&self, teacher_email: &str, student_emails: &[&str]) {
        let mut state = self.state.lock().await;
        let existing = state.teachers.get(teacher_email).cloned();
        let teacher = match existing {
            Some(teacher) => teacher,
            None => state.new_teacher(teacher_email),
        };
        for email in student_emails {
            let existing = state.students.get(*email).cloned();
            let student = match existing {
                Some(student) => student,
                None => state.new_student(email, false),
            };
            state.registrations.insert((teacher.id, student.id));
        }
    }

    /// Seed a student in the given suspension state, bypassing the call log
    pub async fn seed_student(&self, email: &str, suspended: bool) {
        let mut state = self.state.lock().await;
        if !state.students.contains_key(email) {
            state.new_student(email, suspended);
        } else if let Some(student) = state.students.get_mut(email) {
            student.suspended = suspended;
        }
    }
}

#[async_trait]
impl SchoolStore for InMemoryStore {
    async fn find_teacher_by_email(&self, email: &str, filter: StudentFilter) -> Result<Option<TeacherWithStudents>> {
        let mut state = self.state.lock().await;
        state.enter(StoreOperation::FindTeacherByEmail)?;
        Ok(state.teachers.get(email).map(|t| state.with_students(t, filter)))
    }

    async fn create_teacher(&self, email: &str) -> Result<Teacher> {
        let mut state = self.state.lock().await;
        state.enter(StoreOperation::CreateTeacher)?;
        if state.teachers.contains_key(email) {
            return Err(RosterError::Conflict(format!("teacher {} already exists", email)));
        }
        Ok(state.new_teacher(email))
    }

    async fn update_teacher_students(&self, teacher_id: i64, student_ids: &[i64]) -> Result<u64> {
        let mut state = self.state.lock().await;
        state.enter(StoreOperation::UpdateTeacherStudents)?;
        if !state.teachers.values().any(|t| t.id == teacher_id) {
            return Err(RosterError::Database(sqlx::Error::RowNotFound));
        }
        let known: HashSet<i64> = state.students.values().map(|s| s.id).collect();
        if let Some(missing) = student_ids.iter().find(|id| !known.contains(*id)) {
            return Err(RosterError::InvalidInput(format!("unknown student id {}", missing)));
        }

        let added = student_ids
            .iter()
            .filter(|id| state.registrations.insert((teacher_id, **id)))
            .count();
        Ok(added as u64)
    }

    async fn find_student_by_email(&self, email: &str) -> Result<Option<Student>> {
        let mut state = self.state.lock().await;
        state.enter(StoreOperation::FindStudentByEmail)?;
        Ok(state.students.get(email).cloned())
    }

    async fn create_student(&self, email: &str) -> Result<Student> {
        let mut state = self.state.lock().await;
        state.enter(StoreOperation::CreateStudent)?;
        if state.students.contains_key(email) {
            return Err(RosterError::Conflict(format!("student {} already exists", email)));
        }
        Ok(state.new_student(email, false))
    }

    async fn find_students_by_emails(&self, emails: &[String], suspended: Option<bool>) -> Result<Vec<Student>> {
        let mut state = self.state.lock().await;
        state.enter(StoreOperation::FindStudentsByEmails)?;
        let wanted: HashSet<&str> = emails.iter().map(String::as_str).collect();
        Ok(state
            .students
            .values()
            .filter(|s| wanted.contains(s.email.as_str()))
            .filter(|s| suspended.map_or(true, |flag| s.suspended == flag))
            .cloned()
            .collect())
    }

    async fn create_students_bulk(&self, records: &[CreateStudentRequest], skip_existing: bool) -> Result<u64> {
        let mut state = self.state.lock().await;
        state.enter(StoreOperation::CreateStudentsBulk)?;
        if !skip_existing {
            if let Some(existing) = records.iter().find(|r| state.students.contains_key(&r.email)) {
                return Err(RosterError::Conflict(format!("student {} already exists", existing.email)));
            }
        }

        let mut created = 0;
        for record in records {
            if !state.students.contains_key(&record.email) {
                state.new_student(&record.email, record.suspended);
                created += 1;
            }
        }
        Ok(created)
    }

    async fn update_student(&self, email: &str, request: UpdateStudentRequest) -> Result<Student> {
        let mut state = self.state.lock().await;
        state.enter(StoreOperation::UpdateStudent)?;
        let student = state
            .students
            .get_mut(email)
            .ok_or(RosterError::Database(sqlx::Error::RowNotFound))?;
        if let Some(suspended) = request.suspended {
            student.suspended = suspended;
        }
        student.updated_at = Utc::now();
        Ok(student.clone())
    }

    async fn find_teachers_by_emails(&self, emails: &[String], filter: StudentFilter) -> Result<Vec<TeacherWithStudents>> {
        let mut state = self.state.lock().await;
        state.enter(StoreOperation::FindTeachersByEmails)?;
        let wanted: HashSet<&str> = emails.iter().map(String::as_str).collect();
        Ok(state
            .teachers
            .values()
            .filter(|t| wanted.contains(t.email.as_str()))
            .map(|t| state.with_students(t, filter))
            .collect())
    }
}
