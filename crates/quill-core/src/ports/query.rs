//! Query specifications for the listing/search screens.
//!
//! Each struct is the explicit, typed equivalent of an admin screen's filter
//! and search configuration: repositories translate them into storage-level
//! filtering, free-text search, and pagination.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::PostStatus;

/// Filters for listing posts. Results are ordered `created_on` descending.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PostQuery {
    pub status: Option<PostStatus>,
    pub author_id: Option<Uuid>,
    pub created_after: Option<DateTime<Utc>>,
    pub created_before: Option<DateTime<Utc>>,
    /// Free-text search over title and content.
    pub search: Option<String>,
    pub limit: Option<u64>,
    pub offset: Option<u64>,
}

/// Filters for listing comments. Results are ordered `created_on` ascending
/// (conversational order).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CommentQuery {
    pub post_id: Option<Uuid>,
    pub author_id: Option<Uuid>,
    pub approved: Option<bool>,
    pub created_after: Option<DateTime<Utc>>,
    pub created_before: Option<DateTime<Utc>>,
    /// Free-text search over content.
    pub search: Option<String>,
    pub limit: Option<u64>,
    pub offset: Option<u64>,
}

/// Filters for listing contact messages. Results are ordered `created_on`
/// descending.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ContactMessageQuery {
    pub is_resolved: Option<bool>,
    pub created_after: Option<DateTime<Utc>>,
    pub created_before: Option<DateTime<Utc>>,
    /// Free-text search over name, email, and subject.
    pub search: Option<String>,
    pub limit: Option<u64>,
    pub offset: Option<u64>,
}
