use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Comment entity - a reader comment attached to a post.
///
/// `post_id` is never reassigned after creation. Comments are destroyed with
/// their owning post (cascade).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Comment {
    pub id: Uuid,
    pub post_id: Uuid,
    pub author_id: Uuid,
    pub content: String,
    pub approved: bool,
    pub created_on: DateTime<Utc>,
    pub updated_on: DateTime<Utc>,
}

impl Comment {
    /// Create a new comment. Always starts unapproved; moderation cannot be
    /// bypassed at creation.
    pub fn new(post_id: Uuid, author_id: Uuid, content: String) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            post_id,
            author_id,
            content,
            approved: false,
            created_on: now,
            updated_on: now,
        }
    }
}
