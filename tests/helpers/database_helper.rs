//! Test database helper utilities
//!
//! Provides a migrated PostgreSQL database for integration tests, taken from
//! `TEST_DATABASE_URL` when set and otherwise started with testcontainers.
//! When neither is available the database tests are skipped.

use std::sync::{Arc, Once};
use sqlx::PgPool;
use testcontainers::{runners::AsyncRunner, ContainerAsync};
use testcontainers_modules::postgres::Postgres as PostgresImage;
use ClassRoster::database::{run_migrations, DatabaseService};
use ClassRoster::{SchoolStore, TeacherService};

static INIT: Once = Once::new();

/// Test database helper that manages PostgreSQL test database setup
pub struct TestDatabase {
    pub pool: PgPool,
    pub database_url: String,
    _container: Option<ContainerAsync<PostgresImage>>,
}

impl TestDatabase {
    /// Start a clean, migrated database, or `None` when no database is reachable
    pub async fn start() -> Option<Self> {
        // Initialize logging once
        INIT.call_once(|| {
            let _ = tracing_subscriber::fmt::try_init();
        });

        let (database_url, container) = match std::env::var("TEST_DATABASE_URL") {
            Ok(url) => (url, None),
            Err(_) => {
                let container = match PostgresImage::default().start().await {
                    Ok(container) => container,
                    Err(e) => {
                        eprintln!("Skipping database test, no TEST_DATABASE_URL and no container runtime: {}", e);
                        return None;
                    }
                };
                let host = container.get_host().await.ok()?;
                let port = container.get_host_port_ipv4(5432).await.ok()?;
                let url = format!("postgres://postgres:postgres@{}:{}/postgres", host, port);
                (url, Some(container))
            }
        };

        let pool = PgPool::connect(&database_url)
            .await
            .expect("Failed to connect to test database");
        run_migrations(&pool).await.expect("Failed to run migrations");

        let database = Self {
            pool,
            database_url,
            _container: container,
        };
        database.cleanup().await.expect("Failed to clean test database");
        Some(database)
    }

    /// Clean all test data from the database
    pub async fn cleanup(&self) -> Result<(), sqlx::Error> {
        sqlx::query("TRUNCATE teacher_students, students, teachers RESTART IDENTITY CASCADE")
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    pub fn database_service(&self) -> DatabaseService {
        DatabaseService::new(self.pool.clone())
    }

    pub fn teacher_service(&self) -> TeacherService {
        let store: Arc<dyn SchoolStore> = Arc::new(self.database_service());
        TeacherService::new(store)
    }

    /// Count rows in a table
    pub async fn count_records(&self, table: &str) -> Result<i64, sqlx::Error> {
        let count: (i64,) = sqlx::query_as(&format!("SELECT COUNT(*) FROM {}", table))
            .fetch_one(&self.pool)
            .await?;

        Ok(count.0)
    }

    /// Suspension flag of a student, `None` when the student does not exist
    pub async fn suspended(&self, email: &str) -> Result<Option<bool>, sqlx::Error> {
        let row: Option<(bool,)> = sqlx::query_as("SELECT suspended FROM students WHERE email = $1")
            .bind(email)
            .fetch_optional(&self.pool)
            .await?;

        Ok(row.map(|r| r.0))
    }
}
