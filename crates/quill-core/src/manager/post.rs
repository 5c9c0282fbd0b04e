use std::sync::Arc;

use chrono::Utc;
use uuid::Uuid;

use crate::domain::{Post, PostStatus, slugify};
use crate::error::{DomainError, RepoError};
use crate::ports::{BaseRepository, PostQuery, PostRepository, UserRepository};

const TITLE_MAX: usize = 200;
const SLUG_MAX: usize = 200;
const EXCERPT_MAX: usize = 500;

/// Fields for creating a post.
#[derive(Debug, Clone)]
pub struct PostDraft {
    pub title: String,
    /// Pre-populated from the title when unset (initial entry only).
    pub slug: Option<String>,
    /// Defaults to the acting user when unset.
    pub author_id: Option<Uuid>,
    pub content: String,
    pub excerpt: Option<String>,
    pub featured_image: Option<String>,
    pub status: Option<PostStatus>,
}

/// Field changes for updating a post. Unset fields are left untouched.
///
/// The slug is never regenerated from a title change; it only moves when the
/// caller supplies one explicitly.
#[derive(Debug, Clone, Default)]
pub struct PostChanges {
    pub title: Option<String>,
    pub slug: Option<String>,
    pub content: Option<String>,
    pub excerpt: Option<String>,
    /// An empty string clears the image.
    pub featured_image: Option<String>,
    pub status: Option<PostStatus>,
}

/// Entity manager for posts.
pub struct PostManager {
    posts: Arc<dyn PostRepository>,
    users: Arc<dyn UserRepository>,
}

impl PostManager {
    pub fn new(posts: Arc<dyn PostRepository>, users: Arc<dyn UserRepository>) -> Self {
        Self { posts, users }
    }

    /// Create a post.
    ///
    /// The author defaults to `acting_user` when the draft leaves it unset.
    /// Title and slug collisions surface as validation failures. A post
    /// created directly as `Published` latches `published_on` immediately.
    pub async fn create(&self, draft: PostDraft, acting_user: Uuid) -> Result<Post, DomainError> {
        let title = draft.title.trim().to_owned();
        if title.is_empty() {
            return Err(DomainError::Validation("title is required".into()));
        }
        if title.chars().count() > TITLE_MAX {
            return Err(DomainError::Validation(format!(
                "title exceeds {TITLE_MAX} characters"
            )));
        }
        if draft.content.is_empty() {
            return Err(DomainError::Validation("content is required".into()));
        }

        let slug = match draft.slug {
            Some(slug) => validate_slug(&slug)?,
            None => slugify(&title),
        };
        if slug.is_empty() {
            return Err(DomainError::Validation(
                "slug cannot be derived from the title; supply one explicitly".into(),
            ));
        }

        let excerpt = draft.excerpt.unwrap_or_default();
        if excerpt.chars().count() > EXCERPT_MAX {
            return Err(DomainError::Validation(format!(
                "excerpt exceeds {EXCERPT_MAX} characters"
            )));
        }

        let author_id = draft.author_id.unwrap_or(acting_user);
        if self
            .users
            .find_by_id(author_id)
            .await
            .map_err(DomainError::repo)?
            .is_none()
        {
            return Err(DomainError::Validation(format!(
                "author {author_id} does not exist"
            )));
        }

        if self
            .posts
            .find_by_title(&title)
            .await
            .map_err(DomainError::repo)?
            .is_some()
        {
            return Err(DomainError::Validation(format!(
                "a post titled \"{title}\" already exists"
            )));
        }
        if self
            .posts
            .find_by_slug(&slug)
            .await
            .map_err(DomainError::repo)?
            .is_some()
        {
            return Err(DomainError::Validation(format!(
                "slug \"{slug}\" is already in use"
            )));
        }

        let mut post = Post::new(
            title,
            slug,
            author_id,
            draft.content,
            excerpt,
            draft.featured_image.filter(|img| !img.is_empty()),
            draft.status.unwrap_or_default(),
        );
        if post.status == PostStatus::Published {
            post.published_on = Some(post.created_on);
        }

        tracing::debug!(post_id = %post.id, slug = %post.slug, "creating post");
        self.posts.insert(post).await.map_err(DomainError::repo)
    }

    /// Apply field changes to a post.
    ///
    /// Refreshes `updated_on`, and latches `published_on` the first time the
    /// status lands on `Published`. The latch is derived here and written in
    /// the same single-row update as the rest of the change set; it is never
    /// overwritten once set.
    pub async fn update(&self, id: Uuid, changes: PostChanges) -> Result<Post, DomainError> {
        let mut post = self.require(id).await?;

        if let Some(title) = changes.title {
            let title = title.trim().to_owned();
            if title.is_empty() {
                return Err(DomainError::Validation("title is required".into()));
            }
            if title.chars().count() > TITLE_MAX {
                return Err(DomainError::Validation(format!(
                    "title exceeds {TITLE_MAX} characters"
                )));
            }
            if title != post.title {
                if let Some(other) = self
                    .posts
                    .find_by_title(&title)
                    .await
                    .map_err(DomainError::repo)?
                {
                    if other.id != id {
                        return Err(DomainError::Validation(format!(
                            "a post titled \"{title}\" already exists"
                        )));
                    }
                }
                post.title = title;
            }
        }

        if let Some(slug) = changes.slug {
            let slug = validate_slug(&slug)?;
            if slug != post.slug {
                if let Some(other) = self
                    .posts
                    .find_by_slug(&slug)
                    .await
                    .map_err(DomainError::repo)?
                {
                    if other.id != id {
                        return Err(DomainError::Validation(format!(
                            "slug \"{slug}\" is already in use"
                        )));
                    }
                }
                post.slug = slug;
            }
        }

        if let Some(content) = changes.content {
            if content.is_empty() {
                return Err(DomainError::Validation("content is required".into()));
            }
            post.content = content;
        }

        if let Some(excerpt) = changes.excerpt {
            if excerpt.chars().count() > EXCERPT_MAX {
                return Err(DomainError::Validation(format!(
                    "excerpt exceeds {EXCERPT_MAX} characters"
                )));
            }
            post.excerpt = excerpt;
        }

        if let Some(image) = changes.featured_image {
            post.featured_image = if image.is_empty() { None } else { Some(image) };
        }

        if let Some(status) = changes.status {
            post.status = status;
        }

        post.updated_on = Utc::now();
        if post.status == PostStatus::Published && post.published_on.is_none() {
            post.published_on = Some(post.updated_on);
        }

        self.posts.update(post).await.map_err(DomainError::repo)
    }

    /// Delete a post. Cascades to all of its comments and likes; the whole
    /// operation succeeds or fails together.
    pub async fn delete(&self, id: Uuid) -> Result<(), DomainError> {
        tracing::debug!(post_id = %id, "deleting post (cascades to comments)");
        match self.posts.delete(id).await {
            Ok(()) => Ok(()),
            Err(RepoError::NotFound) => Err(DomainError::NotFound { entity: "post", id }),
            Err(err) => Err(DomainError::repo(err)),
        }
    }

    pub async fn get(&self, id: Uuid) -> Result<Post, DomainError> {
        self.require(id).await
    }

    pub async fn get_by_slug(&self, slug: &str) -> Result<Option<Post>, DomainError> {
        self.posts
            .find_by_slug(slug)
            .await
            .map_err(DomainError::repo)
    }

    pub async fn list(&self, query: &PostQuery) -> Result<Vec<Post>, DomainError> {
        self.posts.list(query).await.map_err(DomainError::repo)
    }

    /// Size of the post's likes set.
    pub async fn count_likes(&self, id: Uuid) -> Result<u64, DomainError> {
        self.require(id).await?;
        self.posts.count_likes(id).await.map_err(DomainError::repo)
    }

    /// Add the user to the post's likes set. Liking twice is a no-op.
    pub async fn like(&self, post_id: Uuid, user_id: Uuid) -> Result<(), DomainError> {
        self.require(post_id).await?;
        self.posts
            .add_like(post_id, user_id)
            .await
            .map_err(DomainError::repo)
    }

    /// Remove the user from the post's likes set. Idempotent.
    pub async fn unlike(&self, post_id: Uuid, user_id: Uuid) -> Result<(), DomainError> {
        self.require(post_id).await?;
        self.posts
            .remove_like(post_id, user_id)
            .await
            .map_err(DomainError::repo)
    }

    async fn require(&self, id: Uuid) -> Result<Post, DomainError> {
        self.posts
            .find_by_id(id)
            .await
            .map_err(DomainError::repo)?
            .ok_or(DomainError::NotFound { entity: "post", id })
    }
}

fn validate_slug(slug: &str) -> Result<String, DomainError> {
    let slug = slug.trim().to_owned();
    if slug.is_empty() {
        return Err(DomainError::Validation("slug is required".into()));
    }
    if slug.chars().count() > SLUG_MAX {
        return Err(DomainError::Validation(format!(
            "slug exceeds {SLUG_MAX} characters"
        )));
    }
    if !slug
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
    {
        return Err(DomainError::Validation(
            "slug may only contain letters, digits, hyphens and underscores".into(),
        ));
    }
    Ok(slug.to_ascii_lowercase())
}
