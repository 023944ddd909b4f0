//! Test helpers module
//!
//! Shared setup for the ClassRoster integration tests: services over an
//! in-memory store, and a PostgreSQL test database.

#![allow(dead_code)]

pub mod database_helper;

pub use database_helper::*;

use std::sync::Arc;
use ClassRoster::{InMemoryStore, ServiceFactory, TeacherService};

/// A teacher service over a fresh in-memory store, plus a handle to inspect the store
pub fn in_memory_service() -> (TeacherService, InMemoryStore) {
    let store = InMemoryStore::new();
    (TeacherService::new(Arc::new(store.clone())), store)
}

/// A service factory over a fresh in-memory store, plus a handle to inspect the store
pub fn in_memory_factory() -> (ServiceFactory, InMemoryStore) {
    let store = InMemoryStore::new();
    (ServiceFactory::with_store(Arc::new(store.clone())), store)
}

/// Turn string literals into owned emails
pub fn emails(values: &[&str]) -> Vec<String> {
    values.iter().map(|v| v.to_string()).collect()
}
