//! Logging configuration and setup
//!
//! This module provides logging initialization and structured logging utilities
//! for the ClassRoster application.

use tracing::{debug, error, info};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};
use crate::config::LoggingConfig;
use crate::utils::errors::{Result, RosterError};

/// Initialize logging based on configuration
///
/// Console output goes to stderr so command output on stdout stays parseable.
///
/// Returns the guard of the file writer when file logging is enabled; it must
/// stay alive for buffered lines to reach the file.
pub fn init_logging(config: &LoggingConfig) -> Result<Option<WorkerGuard>> {
    let filter = EnvFilter::try_new(&config.level)
        .map_err(|e| RosterError::Config(format!("Invalid log filter '{}': {}", config.level, e)))?;

    let console_layer = match config.format.as_str() {
        "json" => fmt::layer().json().with_writer(std::io::stderr).boxed(),
        _ => fmt::layer().with_writer(std::io::stderr).boxed(),
    };

    let (file_layer, guard) = match config.file_path.as_deref() {
        Some(dir) if !dir.is_empty() => {
            let file_appender = tracing_appender::rolling::daily(dir, "classroster.log");
            let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);
            let layer = fmt::layer().with_ansi(false).with_writer(non_blocking).boxed();
            (Some(layer), Some(guard))
        }
        _ => (None, None),
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(console_layer)
        .with(file_layer)
        .try_init()
        .map_err(|e| RosterError::Config(format!("Failed to install subscriber: {}", e)))?;

    info!("Logging initialized with level: {}", config.level);
    Ok(guard)
}

/// Log a registration of students to a teacher
pub fn log_registration(teacher_email: &str, requested: usize, newly_linked: usize) {
    info!(
        teacher = teacher_email,
        requested = requested,
        newly_linked = newly_linked,
        "Students registered to teacher"
    );
}

/// Log a student suspension
pub fn log_suspension(student_email: &str, was_suspended: bool) {
    if was_suspended {
        debug!(student = student_email, "Student was already suspended");
    } else {
        info!(student = student_email, "Student suspended");
    }
}

/// Log a notification recipient computation
pub fn log_notification(teacher_email: &str, mentions: usize, created: usize, recipients: usize) {
    info!(
        teacher = teacher_email,
        mentions = mentions,
        created_students = created,
        recipients = recipients,
        "Notification recipients resolved"
    );
}

/// Log database operations
pub fn log_database_operation(operation: &str, table: &str, duration_ms: u64, success: bool) {
    if success {
        debug!(
            operation = operation,
            table = table,
            duration_ms = duration_ms,
            "Database operation completed"
        );
    } else {
        error!(
            operation = operation,
            table = table,
            duration_ms = duration_ms,
            "Database operation failed"
        );
    }
}
