//! ClassRoster
//!
//! Main application entry point

use std::process::ExitCode;
use anyhow::Context;
use clap::{Parser, Subcommand};
use tracing::info;

use ClassRoster::{
    config::Settings,
    database::{connection::{create_pool, run_migrations, DatabaseConfig}, DatabaseService},
    handlers::{self, HandlerResponse},
    models::{CommonStudentsQuery, NotificationRequest, RegisterRequest, SuspendRequest},
    services::ServiceFactory,
    utils::logging,
};

#[derive(Parser)]
#[command(name = "classroster", version, about = "Manage teachers, students and notification recipients")]
struct Cli {
    /// Configuration file name, without extension
    #[arg(long, default_value = "config")]
    config: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Register one or more students to a teacher
    Register {
        #[arg(long)]
        teacher: String,
        #[arg(long = "student", required = true)]
        students: Vec<String>,
    },
    /// List students registered to all of the given teachers
    CommonStudents {
        #[arg(long = "teacher", required = true)]
        teachers: Vec<String>,
    },
    /// Suspend a student
    Suspend {
        #[arg(long)]
        student: String,
    },
    /// List the students who receive a notification
    RetrieveForNotifications {
        #[arg(long)]
        teacher: String,
        #[arg(long)]
        notification: String,
    },
    /// Apply database migrations and exit
    Migrate,
    /// Check the database connection and print statistics
    Health,
}

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    dotenv::dotenv().ok();
    let cli = Cli::parse();

    // Load configuration
    let settings = Settings::from_file(&cli.config).context("Failed to load settings")?;
    settings.validate()?;

    // Initialize logging
    let _log_guard = logging::init_logging(&settings.logging)?;

    info!("Starting {}", ClassRoster::info());

    // Initialize database connection
    info!("Connecting to database...");
    let pool = create_pool(&DatabaseConfig::from(&settings.database))
        .await
        .context("Failed to connect to database")?;

    if settings.database.run_migrations || matches!(cli.command, Command::Migrate) {
        run_migrations(&pool).await?;
    }

    let database = DatabaseService::new(pool);
    let services = ServiceFactory::new(database.clone());

    let response = match cli.command {
        Command::Register { teacher, students } => {
            let request = RegisterRequest {
                teacher: Some(teacher),
                students: Some(students),
            };
            handlers::respond(handlers::handle_register(&services, request).await)
        }
        Command::CommonStudents { teachers } => {
            let query = CommonStudentsQuery { teacher: teachers };
            handlers::respond(handlers::handle_common_students(&services, query).await)
        }
        Command::Suspend { student } => {
            let request = SuspendRequest { student: Some(student) };
            handlers::respond(handlers::handle_suspend(&services, request).await)
        }
        Command::RetrieveForNotifications { teacher, notification } => {
            let request = NotificationRequest {
                teacher: Some(teacher),
                notification: Some(notification),
            };
            handlers::respond(handlers::handle_retrieve_for_notifications(&services, request).await)
        }
        Command::Migrate => HandlerResponse::no_content(),
        Command::Health => {
            let status = services.health_check().await;
            let stats = database.get_system_stats().await.ok();
            HandlerResponse {
                status: if status.is_healthy() { 200 } else { 503 },
                body: Some(serde_json::json!({
                    "healthy": status.is_healthy(),
                    "issues": status.get_issues(),
                    "database_latency_ms": status.database_latency_ms,
                    "stats": stats,
                })),
            }
        }
    };

    emit(&response)
}

/// Print the response body and map the status onto a process exit code
fn emit(response: &HandlerResponse) -> anyhow::Result<ExitCode> {
    if let Some(body) = &response.body {
        let rendered = serde_json::to_string_pretty(body)?;
        if response.is_success() {
            println!("{}", rendered);
        } else {
            eprintln!("{}", rendered);
        }
    }

    Ok(match response.status {
        200..=299 => ExitCode::SUCCESS,
        400..=499 => ExitCode::from(2),
        _ => ExitCode::FAILURE,
    })
}
