//! Database module
//!
//! This module handles database connections, the storage contract used by
//! the domain service, and its PostgreSQL and in-memory implementations.

pub mod connection;
pub mod memory;
pub mod repositories;
pub mod service;
pub mod store;

// Re-export commonly used database components
pub use connection::{DatabasePool, DatabaseConfig, create_pool, run_migrations, health_check};
pub use memory::{InMemoryStore, StoreOperation};
pub use repositories::{TeacherRepository, StudentRepository};
pub use service::DatabaseService;
pub use store::SchoolStore;
