//! ClassRoster
//!
//! Administration of teachers and their students: registering students to
//! teachers, finding the students common to a set of teachers, suspending
//! students, and working out who receives a teacher's notification.

#![allow(non_snake_case)]

pub mod config;
pub mod handlers;
pub mod services;
pub mod models;
pub mod database;
pub mod utils;

// Re-export commonly used types
pub use config::Settings;
pub use utils::errors::{RosterError, Result, ErrorKind};

// Re-export main components for easy access
pub use database::{DatabaseService, InMemoryStore, SchoolStore};
pub use services::{ServiceFactory, TeacherService};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name
pub const NAME: &str = env!("CARGO_PKG_NAME");

/// Get library information
pub fn info() -> String {
    format!("{} v{}", NAME, VERSION)
}
