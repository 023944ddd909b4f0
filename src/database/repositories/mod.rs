//! Database repositories module
//!
//! This module contains all repository implementations for data access

pub mod teacher;
pub mod student;

// Re-export repositories
pub use teacher::TeacherRepository;
pub use student::StudentRepository;
