use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::{Comment, ContactMessage, Post, User};
use crate::error::RepoError;
use crate::ports::{CommentQuery, ContactMessageQuery, PostQuery};

/// Generic repository trait defining standard CRUD operations.
///
/// `insert` and `update` are separate on purpose: every entity here carries a
/// client-generated UUID, so the primary key cannot be used to tell a new
/// record from an existing one.
#[async_trait]
pub trait BaseRepository<T, ID>: Send + Sync {
    /// Find an entity by its unique ID.
    async fn find_by_id(&self, id: ID) -> Result<Option<T>, RepoError>;

    /// Persist a new entity.
    async fn insert(&self, entity: T) -> Result<T, RepoError>;

    /// Overwrite an existing entity in a single row write.
    async fn update(&self, entity: T) -> Result<T, RepoError>;

    /// Delete an entity by its ID.
    async fn delete(&self, id: ID) -> Result<(), RepoError>;
}

/// User repository with domain-specific methods.
#[async_trait]
pub trait UserRepository: BaseRepository<User, Uuid> {
    /// Find a user by their email address.
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, RepoError>;
}

/// Post repository.
///
/// `delete` cascades: all comments and likes attached to the post go away in
/// the same logical operation, or the delete fails as a whole.
#[async_trait]
pub trait PostRepository: BaseRepository<Post, Uuid> {
    async fn find_by_slug(&self, slug: &str) -> Result<Option<Post>, RepoError>;

    async fn find_by_title(&self, title: &str) -> Result<Option<Post>, RepoError>;

    /// List posts matching the query, newest first.
    async fn list(&self, query: &PostQuery) -> Result<Vec<Post>, RepoError>;

    /// Add a user to the post's likes set. Set semantics: liking twice is a
    /// no-op.
    async fn add_like(&self, post_id: Uuid, user_id: Uuid) -> Result<(), RepoError>;

    /// Remove a user from the post's likes set. Idempotent.
    async fn remove_like(&self, post_id: Uuid, user_id: Uuid) -> Result<(), RepoError>;

    /// Current cardinality of the likes set. Side-effect-free.
    async fn count_likes(&self, post_id: Uuid) -> Result<u64, RepoError>;
}

/// Comment repository.
#[async_trait]
pub trait CommentRepository: BaseRepository<Comment, Uuid> {
    /// List comments matching the query, oldest first.
    async fn list(&self, query: &CommentQuery) -> Result<Vec<Comment>, RepoError>;

    /// Approve many comments in one batch write. Ids that do not resolve are
    /// skipped; returns the number of rows actually touched.
    async fn approve_many(&self, ids: &[Uuid]) -> Result<u64, RepoError>;
}

/// Contact message repository. No delete: messages are retained indefinitely.
#[async_trait]
pub trait ContactMessageRepository: Send + Sync {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<ContactMessage>, RepoError>;

    async fn insert(&self, message: ContactMessage) -> Result<ContactMessage, RepoError>;

    async fn update(&self, message: ContactMessage) -> Result<ContactMessage, RepoError>;

    /// List messages matching the query, newest first.
    async fn list(&self, query: &ContactMessageQuery) -> Result<Vec<ContactMessage>, RepoError>;
}
