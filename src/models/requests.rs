//! Request and response payloads of the teacher API
//!
//! Payloads are validated here, before they reach the domain service, with the
//! same messages the API has always reported.

use serde::{Deserialize, Deserializer, Serialize};
use crate::utils::errors::{RosterError, Result};
use crate::utils::helpers::is_valid_email;

/// `POST /api/register`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RegisterRequest {
    pub teacher: Option<String>,
    pub students: Option<Vec<String>>,
}

/// `GET /api/commonstudents?teacher=...`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CommonStudentsQuery {
    #[serde(default, deserialize_with = "one_or_many")]
    pub teacher: Vec<String>,
}

/// `POST /api/suspend`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SuspendRequest {
    pub student: Option<String>,
}

/// `POST /api/retrievefornotifications`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NotificationRequest {
    pub teacher: Option<String>,
    pub notification: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommonStudentsResponse {
    pub students: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NotificationRecipientsResponse {
    pub recipients: Vec<String>,
}

/// Body reported for any failed request
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub message: String,
}

impl From<&RosterError> for ErrorResponse {
    fn from(err: &RosterError) -> Self {
        Self {
            message: err.public_message(),
        }
    }
}

impl RegisterRequest {
    pub fn validate(&self) -> Result<()> {
        require_email(self.teacher.as_deref(), "Teacher email is required", "Teacher must be a valid email address")?;

        let students = self
            .students
            .as_ref()
            .ok_or_else(|| invalid("Students array is required"))?;
        if students.is_empty() {
            return Err(invalid("At least one student email is required"));
        }
        if students.iter().any(|s| !is_valid_email(s)) {
            return Err(invalid("All student entries must be valid email addresses"));
        }

        Ok(())
    }
}

impl CommonStudentsQuery {
    pub fn validate(&self) -> Result<()> {
        if self.teacher.is_empty() || self.teacher.iter().any(|t| t.is_empty()) {
            return Err(invalid("At least one teacher parameter is required"));
        }
        if self.teacher.iter().any(|t| !is_valid_email(t)) {
            return Err(invalid("All teacher parameters must be valid email addresses"));
        }

        Ok(())
    }
}

impl SuspendRequest {
    pub fn validate(&self) -> Result<()> {
        require_email(self.student.as_deref(), "Student email is required", "Student must be a valid email address")
    }
}

impl NotificationRequest {
    pub fn validate(&self) -> Result<()> {
        require_email(self.teacher.as_deref(), "Teacher email is required", "Teacher must be a valid email address")?;
        if self.notification.is_none() {
            return Err(invalid("Notification text is required"));
        }

        Ok(())
    }
}

fn invalid(message: &str) -> RosterError {
    RosterError::InvalidInput(message.to_string())
}

fn require_email(value: Option<&str>, missing: &str, malformed: &str) -> Result<()> {
    match value {
        None | Some("") => Err(invalid(missing)),
        Some(email) if !is_valid_email(email) => Err(invalid(malformed)),
        Some(_) => Ok(()),
    }
}

/// Accept `teacher=a` as well as `teacher=a&teacher=b`
fn one_or_many<'de, D>(deserializer: D) -> std::result::Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum OneOrMany {
        One(String),
        Many(Vec<String>),
    }

    Ok(match OneOrMany::deserialize(deserializer)? {
        OneOrMany::One(value) => vec![value],
        OneOrMany::Many(values) => values,
    })
}
