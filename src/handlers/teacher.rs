//! Teacher API handlers

use tracing::info;
use crate::models::{
    CommonStudentsQuery, CommonStudentsResponse, NotificationRecipientsResponse, NotificationRequest,
    RegisterRequest, SuspendRequest,
};
use crate::services::ServiceFactory;
use crate::utils::errors::Result;
use super::HandlerResponse;

/// Handle `POST /api/register`
pub async fn handle_register(services: &ServiceFactory, request: RegisterRequest) -> Result<HandlerResponse> {
    request.validate()?;
    let teacher = request.teacher.unwrap_or_default();
    let students = request.students.unwrap_or_default();

    info!(teacher = %teacher, students = students.len(), "Handling register request");
    services.teacher_service.register_students(&teacher, &students).await?;

    Ok(HandlerResponse::no_content())
}

/// Handle `GET /api/commonstudents`
pub async fn handle_common_students(services: &ServiceFactory, query: CommonStudentsQuery) -> Result<HandlerResponse> {
    query.validate()?;

    info!(teachers = query.teacher.len(), "Handling common students request");
    let students = services.teacher_service.get_common_students(&query.teacher).await?;

    HandlerResponse::ok(&CommonStudentsResponse { students })
}

/// Handle `POST /api/suspend`
pub async fn handle_suspend(services: &ServiceFactory, request: SuspendRequest) -> Result<HandlerResponse> {
    request.validate()?;
    let student = request.student.unwrap_or_default();

    info!(student = %student, "Handling suspend request");
    services.teacher_service.suspend_student(&student).await?;

    Ok(HandlerResponse::no_content())
}

/// Handle `POST /api/retrievefornotifications`
pub async fn handle_retrieve_for_notifications(services: &ServiceFactory, request: NotificationRequest) -> Result<HandlerResponse> {
    request.validate()?;
    let teacher = request.teacher.unwrap_or_default();
    let notification = request.notification.unwrap_or_default();

    info!(teacher = %teacher, "Handling notification recipients request");
    let recipients = services
        .teacher_service
        .get_notification_recipients(&teacher, &notification)
        .await?;

    HandlerResponse::ok(&NotificationRecipientsResponse { recipients })
}
