//! Request handlers module
//!
//! Handlers validate request payloads, call the teacher service, and turn the
//! outcome into a status code plus an optional JSON body. They know nothing
//! about the transport that delivered the request.

pub mod teacher;

use serde::Serialize;
use tracing::{error, warn};
use crate::models::ErrorResponse;
use crate::utils::errors::{ErrorSeverity, Result, RosterError};

pub use teacher::{handle_common_students, handle_register, handle_retrieve_for_notifications, handle_suspend};

/// Outcome of a handled request
#[derive(Debug, Clone, PartialEq)]
pub struct HandlerResponse {
    pub status: u16,
    pub body: Option<serde_json::Value>,
}

impl HandlerResponse {
    pub fn no_content() -> Self {
        Self { status: 204, body: None }
    }

    pub fn ok<T: Serialize>(body: &T) -> Result<Self> {
        Ok(Self {
            status: 200,
            body: Some(serde_json::to_value(body)?),
        })
    }

    pub fn from_error(err: &RosterError) -> Self {
        let status = err.status_code();
        match err.severity() {
            ErrorSeverity::Info | ErrorSeverity::Warning => warn!(status = status, error = %err, "Request rejected"),
            ErrorSeverity::Error | ErrorSeverity::Critical => error!(status = status, error = %err, "Request failed"),
        }

        Self {
            status,
            body: serde_json::to_value(ErrorResponse::from(err)).ok(),
        }
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Collapse a handler result into a response, reporting errors the way the API does
pub fn respond(result: Result<HandlerResponse>) -> HandlerResponse {
    match result {
        Ok(response) => response,
        Err(err) => HandlerResponse::from_error(&err),
    }
}
