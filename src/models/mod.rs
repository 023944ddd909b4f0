//! Data models module
//!
//! This module contains all data structures used throughout the application

pub mod teacher;
pub mod student;
pub mod requests;

// Re-export commonly used models
pub use teacher::{Teacher, TeacherWithStudents, StudentFilter};
pub use student::{Student, CreateStudentRequest, UpdateStudentRequest};
pub use requests::{
    RegisterRequest, CommonStudentsQuery, SuspendRequest, NotificationRequest,
    CommonStudentsResponse, NotificationRecipientsResponse, ErrorResponse,
};
