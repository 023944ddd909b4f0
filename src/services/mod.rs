//! Services module
//!
//! This module contains business logic services

pub mod mentions;
pub mod teacher;

// Re-export commonly used services
pub use mentions::extract_mentions;
pub use teacher::TeacherService;

use std::sync::Arc;
use crate::database::{DatabaseService, SchoolStore};

/// Service factory for creating and managing all services
#[derive(Clone)]
pub struct ServiceFactory {
    pub teacher_service: TeacherService,
    database: Option<DatabaseService>,
}

impl ServiceFactory {
    /// Create a new ServiceFactory backed by PostgreSQL
    pub fn new(database: DatabaseService) -> Self {
        let store: Arc<dyn SchoolStore> = Arc::new(database.clone());
        Self {
            teacher_service: TeacherService::new(store),
            database: Some(database),
        }
    }

    /// Create a ServiceFactory over any store, e.g. an in-memory one
    pub fn with_store(store: Arc<dyn SchoolStore>) -> Self {
        Self {
            teacher_service: TeacherService::new(store),
            database: None,
        }
    }

    /// Health check for all services
    pub async fn health_check(&self) -> ServiceHealthStatus {
        let (database_healthy, database_latency_ms) = match &self.database {
            Some(database) => match database.health_check().await {
                Ok(latency) => (true, Some(latency.as_millis() as u64)),
                Err(_) => (false, None),
            },
            None => (true, None),
        };

        ServiceHealthStatus {
            database_healthy,
            database_latency_ms,
            persistent: self.database.is_some(),
            teacher_service_ready: true, // Always ready if constructed
        }
    }
}

/// Health status for all services
#[derive(Debug, Clone, serde::Serialize)]
pub struct ServiceHealthStatus {
    pub database_healthy: bool,
    pub database_latency_ms: Option<u64>,
    pub persistent: bool,
    pub teacher_service_ready: bool,
}

impl ServiceHealthStatus {
    /// Check if all critical services are healthy
    pub fn is_healthy(&self) -> bool {
        self.database_healthy && self.teacher_service_ready
    }

    /// Get list of unhealthy services
    pub fn get_issues(&self) -> Vec<String> {
        let mut issues = Vec::new();

        if !self.database_healthy {
            issues.push("Database connection failed".to_string());
        }
        if !self.teacher_service_ready {
            issues.push("Teacher service not ready".to_string());
        }

        issues
    }
}
