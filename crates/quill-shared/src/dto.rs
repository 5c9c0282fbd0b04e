//! Data Transfer Objects - request/response types for the admin API.
//!
//! Post status travels as the integer the schema stores: 0 = draft,
//! 1 = published.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Request to register a new user.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegisterRequest {
    pub email: String,
    pub password: String,
}

/// Request to login.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Response containing a user's public information.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserResponse {
    pub id: Uuid,
    pub email: String,
    pub is_admin: bool,
}

/// Response containing authentication tokens.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthResponse {
    pub access_token: String,
    pub token_type: String,
    pub expires_in: u64,
}

/// Request to create a post.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PostCreateRequest {
    pub title: String,
    /// Pre-populated from the title when omitted.
    #[serde(default)]
    pub slug: Option<String>,
    /// Defaults to the authenticated caller.
    #[serde(default)]
    pub author_id: Option<Uuid>,
    pub content: String,
    #[serde(default)]
    pub excerpt: Option<String>,
    #[serde(default)]
    pub featured_image: Option<String>,
    #[serde(default)]
    pub status: Option<i32>,
}

/// Request to update a post. Omitted fields are left untouched; an empty
/// `featured_image` clears the image.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PostUpdateRequest {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub slug: Option<String>,
    #[serde(default)]
    pub content: Option<String>,
    #[serde(default)]
    pub excerpt: Option<String>,
    #[serde(default)]
    pub featured_image: Option<String>,
    #[serde(default)]
    pub status: Option<i32>,
}

/// A post as returned by the API.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PostResponse {
    pub id: Uuid,
    pub title: String,
    pub slug: String,
    pub author_id: Uuid,
    pub content: String,
    pub excerpt: String,
    pub featured_image: Option<String>,
    pub status: i32,
    pub created_on: DateTime<Utc>,
    pub updated_on: DateTime<Utc>,
    pub published_on: Option<DateTime<Utc>>,
}

/// List-screen filters for posts.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PostListParams {
    pub status: Option<i32>,
    pub author_id: Option<Uuid>,
    pub created_after: Option<DateTime<Utc>>,
    pub created_before: Option<DateTime<Utc>>,
    pub search: Option<String>,
    pub limit: Option<u64>,
    pub offset: Option<u64>,
}

/// Likes count for a post.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LikeCountResponse {
    pub post_id: Uuid,
    pub likes: u64,
}

/// Request to create a comment on a post.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CommentCreateRequest {
    pub content: String,
}

/// Request to edit a comment's content.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CommentUpdateRequest {
    pub content: String,
}

/// A comment as returned by the API.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CommentResponse {
    pub id: Uuid,
    pub post_id: Uuid,
    pub author_id: Uuid,
    pub content: String,
    pub approved: bool,
    pub created_on: DateTime<Utc>,
    pub updated_on: DateTime<Utc>,
}

/// List-screen filters for comments.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CommentListParams {
    pub post_id: Option<Uuid>,
    pub author_id: Option<Uuid>,
    pub approved: Option<bool>,
    pub created_after: Option<DateTime<Utc>>,
    pub created_before: Option<DateTime<Utc>>,
    pub search: Option<String>,
    pub limit: Option<u64>,
    pub offset: Option<u64>,
}

/// The admin bulk action: approve a selected set of comments.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BulkApproveRequest {
    pub ids: Vec<Uuid>,
}

/// Outcome of a bulk approval.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BulkApproveResponse {
    pub approved: u64,
}

/// A contact-form submission.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContactMessageRequest {
    pub name: String,
    pub email: String,
    pub subject: String,
    pub message: String,
}

/// A contact message as returned by the API.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContactMessageResponse {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub subject: String,
    pub message: String,
    pub is_resolved: bool,
    pub created_on: DateTime<Utc>,
}

/// List-screen filters for contact messages.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ContactListParams {
    pub is_resolved: Option<bool>,
    pub created_after: Option<DateTime<Utc>>,
    pub created_before: Option<DateTime<Utc>>,
    pub search: Option<String>,
    pub limit: Option<u64>,
    pub offset: Option<u64>,
}
