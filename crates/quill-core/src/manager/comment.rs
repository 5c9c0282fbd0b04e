use std::sync::Arc;

use chrono::Utc;
use uuid::Uuid;

use crate::domain::Comment;
use crate::error::{DomainError, RepoError};
use crate::ports::{
    BaseRepository, CommentQuery, CommentRepository, PostRepository, UserRepository,
};

const CONTENT_MAX: usize = 1000;

/// Fields for creating a comment.
#[derive(Debug, Clone)]
pub struct NewComment {
    pub post_id: Uuid,
    pub author_id: Uuid,
    pub content: String,
}

/// Entity manager for comments.
pub struct CommentManager {
    comments: Arc<dyn CommentRepository>,
    posts: Arc<dyn PostRepository>,
    users: Arc<dyn UserRepository>,
}

impl CommentManager {
    pub fn new(
        comments: Arc<dyn CommentRepository>,
        posts: Arc<dyn PostRepository>,
        users: Arc<dyn UserRepository>,
    ) -> Self {
        Self {
            comments,
            posts,
            users,
        }
    }

    /// Create a comment against an existing post.
    ///
    /// Always starts unapproved, whatever the caller intended: moderation
    /// cannot be bypassed at creation.
    pub async fn create(&self, new: NewComment) -> Result<Comment, DomainError> {
        validate_content(&new.content)?;

        if self
            .posts
            .find_by_id(new.post_id)
            .await
            .map_err(DomainError::repo)?
            .is_none()
        {
            return Err(DomainError::Validation(format!(
                "post {} does not exist",
                new.post_id
            )));
        }
        if self
            .users
            .find_by_id(new.author_id)
            .await
            .map_err(DomainError::repo)?
            .is_none()
        {
            return Err(DomainError::Validation(format!(
                "author {} does not exist",
                new.author_id
            )));
        }

        let comment = Comment::new(new.post_id, new.author_id, new.content);
        self.comments
            .insert(comment)
            .await
            .map_err(DomainError::repo)
    }

    /// Replace a comment's content (administrator edit).
    pub async fn update(&self, id: Uuid, content: String) -> Result<Comment, DomainError> {
        validate_content(&content)?;

        let mut comment = self.require(id).await?;
        comment.content = content;
        comment.updated_on = Utc::now();
        self.comments
            .update(comment)
            .await
            .map_err(DomainError::repo)
    }

    /// Approve a single comment. Approving an already-approved comment is a
    /// no-op, not an error.
    pub async fn approve(&self, id: Uuid) -> Result<Comment, DomainError> {
        let mut comment = self.require(id).await?;
        if comment.approved {
            return Ok(comment);
        }
        comment.approved = true;
        comment.updated_on = Utc::now();
        self.comments
            .update(comment)
            .await
            .map_err(DomainError::repo)
    }

    /// Approve many comments in a single batch write.
    ///
    /// Idempotent: already-approved comments and unknown ids are skipped.
    /// Returns the number of rows touched.
    pub async fn bulk_approve(&self, ids: &[Uuid]) -> Result<u64, DomainError> {
        if ids.is_empty() {
            return Ok(0);
        }
        tracing::debug!(count = ids.len(), "bulk-approving comments");
        self.comments
            .approve_many(ids)
            .await
            .map_err(DomainError::repo)
    }

    /// Delete a comment. Comments have no dependents, so nothing cascades.
    pub async fn delete(&self, id: Uuid) -> Result<(), DomainError> {
        match self.comments.delete(id).await {
            Ok(()) => Ok(()),
            Err(RepoError::NotFound) => Err(DomainError::NotFound {
                entity: "comment",
                id,
            }),
            Err(err) => Err(DomainError::repo(err)),
        }
    }

    pub async fn get(&self, id: Uuid) -> Result<Comment, DomainError> {
        self.require(id).await
    }

    pub async fn list(&self, query: &CommentQuery) -> Result<Vec<Comment>, DomainError> {
        self.comments.list(query).await.map_err(DomainError::repo)
    }

    async fn require(&self, id: Uuid) -> Result<Comment, DomainError> {
        self.comments
            .find_by_id(id)
            .await
            .map_err(DomainError::repo)?
            .ok_or(DomainError::NotFound {
                entity: "comment",
                id,
            })
    }
}

fn validate_content(content: &str) -> Result<(), DomainError> {
    if content.trim().is_empty() {
        return Err(DomainError::Validation("content is required".into()));
    }
    if content.chars().count() > CONTENT_MAX {
        return Err(DomainError::Validation(format!(
            "content exceeds {CONTENT_MAX} characters"
        )));
    }
    Ok(())
}
