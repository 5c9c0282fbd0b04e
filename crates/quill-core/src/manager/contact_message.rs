use std::sync::Arc;

use uuid::Uuid;
use validator::ValidateEmail;

use crate::domain::ContactMessage;
use crate::error::DomainError;
use crate::ports::{ContactMessageQuery, ContactMessageRepository};

const NAME_MAX: usize = 100;
const SUBJECT_MAX: usize = 200;

/// Fields for a contact-form submission.
#[derive(Debug, Clone)]
pub struct NewContactMessage {
    pub name: String,
    pub email: String,
    pub subject: String,
    pub message: String,
}

/// Entity manager for contact messages.
///
/// There is deliberately no delete: messages are retained indefinitely and
/// administrators only flip the resolution flag.
pub struct ContactMessageManager {
    messages: Arc<dyn ContactMessageRepository>,
}

impl ContactMessageManager {
    pub fn new(messages: Arc<dyn ContactMessageRepository>) -> Self {
        Self { messages }
    }

    /// Record a contact-form submission.
    pub async fn create(&self, new: NewContactMessage) -> Result<ContactMessage, DomainError> {
        let name = new.name.trim().to_owned();
        let subject = new.subject.trim().to_owned();

        if name.is_empty() {
            return Err(DomainError::Validation("name is required".into()));
        }
        if name.chars().count() > NAME_MAX {
            return Err(DomainError::Validation(format!(
                "name exceeds {NAME_MAX} characters"
            )));
        }
        if !new.email.validate_email() {
            return Err(DomainError::Validation(format!(
                "\"{}\" is not a valid email address",
                new.email
            )));
        }
        if subject.is_empty() {
            return Err(DomainError::Validation("subject is required".into()));
        }
        if subject.chars().count() > SUBJECT_MAX {
            return Err(DomainError::Validation(format!(
                "subject exceeds {SUBJECT_MAX} characters"
            )));
        }
        if new.message.trim().is_empty() {
            return Err(DomainError::Validation("message is required".into()));
        }

        let message = ContactMessage::new(name, new.email, subject, new.message);
        self.messages
            .insert(message)
            .await
            .map_err(DomainError::repo)
    }

    /// Mark a message resolved. Idempotent.
    pub async fn mark_resolved(&self, id: Uuid) -> Result<ContactMessage, DomainError> {
        self.set_resolved(id, true).await
    }

    /// Mark a message unresolved. Idempotent.
    pub async fn mark_unresolved(&self, id: Uuid) -> Result<ContactMessage, DomainError> {
        self.set_resolved(id, false).await
    }

    pub async fn get(&self, id: Uuid) -> Result<ContactMessage, DomainError> {
        self.require(id).await
    }

    pub async fn list(
        &self,
        query: &ContactMessageQuery,
    ) -> Result<Vec<ContactMessage>, DomainError> {
        self.messages.list(query).await.map_err(DomainError::repo)
    }

    async fn set_resolved(&self, id: Uuid, resolved: bool) -> Result<ContactMessage, DomainError> {
        let mut message = self.require(id).await?;
        if message.is_resolved == resolved {
            return Ok(message);
        }
        message.is_resolved = resolved;
        self.messages
            .update(message)
            .await
            .map_err(DomainError::repo)
    }

    async fn require(&self, id: Uuid) -> Result<ContactMessage, DomainError> {
        self.messages
            .find_by_id(id)
            .await
            .map_err(DomainError::repo)?
            .ok_or(DomainError::NotFound {
                entity: "contact message",
                id,
            })
    }
}
