use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// ContactMessage entity - an inbound contact-form submission.
///
/// Messages are never deleted; administrators only toggle `is_resolved`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContactMessage {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub subject: String,
    pub message: String,
    pub is_resolved: bool,
    pub created_on: DateTime<Utc>,
}

impl ContactMessage {
    pub fn new(name: String, email: String, subject: String, message: String) -> Self {
        Self {
            id: Uuid::new_v4(),
            name,
            email,
            subject,
            message,
            is_resolved: false,
            created_on: Utc::now(),
        }
    }
}
