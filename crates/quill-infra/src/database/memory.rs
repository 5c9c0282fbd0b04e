//! In-memory repositories - used as fallback when no database is configured.
//!
//! All repositories share one [`InMemoryStore`] so that cross-entity rules
//! (cascade delete, reference checks, unique columns) behave like the real
//! database. Note: data is lost on process restart.

use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;
use uuid::Uuid;

use quill_core::domain::{Comment, ContactMessage, Post, User};
use quill_core::error::RepoError;
use quill_core::ports::{
    BaseRepository, CommentQuery, CommentRepository, ContactMessageQuery,
    ContactMessageRepository, PostQuery, PostRepository, UserRepository,
};

#[derive(Default)]
struct Stores {
    users: HashMap<Uuid, User>,
    posts: HashMap<Uuid, Post>,
    comments: HashMap<Uuid, Comment>,
    messages: HashMap<Uuid, ContactMessage>,
    likes: HashSet<(Uuid, Uuid)>,
}

/// Shared backing store for the in-memory repositories.
#[derive(Clone, Default)]
pub struct InMemoryStore {
    inner: Arc<RwLock<Stores>>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

/// In-memory user repository.
pub struct InMemoryUserRepository {
    store: InMemoryStore,
}

impl InMemoryUserRepository {
    pub fn new(store: &InMemoryStore) -> Self {
        Self {
            store: store.clone(),
        }
    }
}

#[async_trait]
impl BaseRepository<User, Uuid> for InMemoryUserRepository {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, RepoError> {
        let stores = self.store.inner.read().await;
        Ok(stores.users.get(&id).cloned())
    }

    async fn insert(&self, user: User) -> Result<User, RepoError> {
        let mut stores = self.store.inner.write().await;
        if stores.users.values().any(|u| u.email == user.email) {
            return Err(RepoError::Constraint(
                "record violates a uniqueness constraint".to_string(),
            ));
        }
        stores.users.insert(user.id, user.clone());
        Ok(user)
    }

    async fn update(&self, user: User) -> Result<User, RepoError> {
        let mut stores = self.store.inner.write().await;
        if !stores.users.contains_key(&user.id) {
            return Err(RepoError::NotFound);
        }
        stores.users.insert(user.id, user.clone());
        Ok(user)
    }

    async fn delete(&self, id: Uuid) -> Result<(), RepoError> {
        let mut stores = self.store.inner.write().await;
        stores.users.remove(&id).ok_or(RepoError::NotFound)?;
        Ok(())
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, RepoError> {
        let stores = self.store.inner.read().await;
        Ok(stores.users.values().find(|u| u.email == email).cloned())
    }
}

/// In-memory post repository.
pub struct InMemoryPostRepository {
    store: InMemoryStore,
}

impl InMemoryPostRepository {
    pub fn new(store: &InMemoryStore) -> Self {
        Self {
            store: store.clone(),
        }
    }
}

#[async_trait]
impl BaseRepository<Post, Uuid> for InMemoryPostRepository {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Post>, RepoError> {
        let stores = self.store.inner.read().await;
        Ok(stores.posts.get(&id).cloned())
    }

    async fn insert(&self, post: Post) -> Result<Post, RepoError> {
        let mut stores = self.store.inner.write().await;
        if stores
            .posts
            .values()
            .any(|p| p.title == post.title || p.slug == post.slug)
        {
            return Err(RepoError::Constraint(
                "record violates a uniqueness constraint".to_string(),
            ));
        }
        stores.posts.insert(post.id, post.clone());
        Ok(post)
    }

    async fn update(&self, post: Post) -> Result<Post, RepoError> {
        let mut stores = self.store.inner.write().await;
        if !stores.posts.contains_key(&post.id) {
            return Err(RepoError::NotFound);
        }
        if stores
            .posts
            .values()
            .any(|p| p.id != post.id && (p.title == post.title || p.slug == post.slug))
        {
            return Err(RepoError::Constraint(
                "record violates a uniqueness constraint".to_string(),
            ));
        }
        stores.posts.insert(post.id, post.clone());
        Ok(post)
    }

    /// Cascade: comments and likes attached to the post go away with it.
    async fn delete(&self, id: Uuid) -> Result<(), RepoError> {
        let mut stores = self.store.inner.write().await;
        stores.posts.remove(&id).ok_or(RepoError::NotFound)?;
        stores.comments.retain(|_, c| c.post_id != id);
        stores.likes.retain(|(post_id, _)| *post_id != id);
        Ok(())
    }
}

#[async_trait]
impl PostRepository for InMemoryPostRepository {
    async fn find_by_slug(&self, slug: &str) -> Result<Option<Post>, RepoError> {
        let stores = self.store.inner.read().await;
        Ok(stores.posts.values().find(|p| p.slug == slug).cloned())
    }

    async fn find_by_title(&self, title: &str) -> Result<Option<Post>, RepoError> {
        let stores = self.store.inner.read().await;
        Ok(stores.posts.values().find(|p| p.title == title).cloned())
    }

    async fn list(&self, query: &PostQuery) -> Result<Vec<Post>, RepoError> {
        let stores = self.store.inner.read().await;
        let mut posts: Vec<Post> = stores
            .posts
            .values()
            .filter(|p| query.status.is_none_or(|s| p.status == s))
            .filter(|p| query.author_id.is_none_or(|a| p.author_id == a))
            .filter(|p| query.created_after.is_none_or(|t| p.created_on >= t))
            .filter(|p| query.created_before.is_none_or(|t| p.created_on <= t))
            .filter(|p| {
                query
                    .search
                    .as_deref()
                    .is_none_or(|term| p.title.contains(term) || p.content.contains(term))
            })
            .cloned()
            .collect();

        // Newest first.
        posts.sort_by(|a, b| b.created_on.cmp(&a.created_on));
        Ok(paginate(posts, query.offset, query.limit))
    }

    async fn add_like(&self, post_id: Uuid, user_id: Uuid) -> Result<(), RepoError> {
        let mut stores = self.store.inner.write().await;
        if !stores.posts.contains_key(&post_id) || !stores.users.contains_key(&user_id) {
            return Err(RepoError::Constraint(
                "like references a missing post or user".to_string(),
            ));
        }
        stores.likes.insert((post_id, user_id));
        Ok(())
    }

    async fn remove_like(&self, post_id: Uuid, user_id: Uuid) -> Result<(), RepoError> {
        let mut stores = self.store.inner.write().await;
        stores.likes.remove(&(post_id, user_id));
        Ok(())
    }

    async fn count_likes(&self, post_id: Uuid) -> Result<u64, RepoError> {
        let stores = self.store.inner.read().await;
        Ok(stores
            .likes
            .iter()
            .filter(|(liked, _)| *liked == post_id)
            .count() as u64)
    }
}

/// In-memory comment repository.
pub struct InMemoryCommentRepository {
    store: InMemoryStore,
}

impl InMemoryCommentRepository {
    pub fn new(store: &InMemoryStore) -> Self {
        Self {
            store: store.clone(),
        }
    }
}

#[async_trait]
impl BaseRepository<Comment, Uuid> for InMemoryCommentRepository {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Comment>, RepoError> {
        let stores = self.store.inner.read().await;
        Ok(stores.comments.get(&id).cloned())
    }

    async fn insert(&self, comment: Comment) -> Result<Comment, RepoError> {
        let mut stores = self.store.inner.write().await;
        if !stores.posts.contains_key(&comment.post_id)
            || !stores.users.contains_key(&comment.author_id)
        {
            return Err(RepoError::Constraint(
                "comment references a missing post or author".to_string(),
            ));
        }
        stores.comments.insert(comment.id, comment.clone());
        Ok(comment)
    }

    async fn update(&self, comment: Comment) -> Result<Comment, RepoError> {
        let mut stores = self.store.inner.write().await;
        if !stores.comments.contains_key(&comment.id) {
            return Err(RepoError::NotFound);
        }
        stores.comments.insert(comment.id, comment.clone());
        Ok(comment)
    }

    async fn delete(&self, id: Uuid) -> Result<(), RepoError> {
        let mut stores = self.store.inner.write().await;
        stores.comments.remove(&id).ok_or(RepoError::NotFound)?;
        Ok(())
    }
}

#[async_trait]
impl CommentRepository for InMemoryCommentRepository {
    async fn list(&self, query: &CommentQuery) -> Result<Vec<Comment>, RepoError> {
        let stores = self.store.inner.read().await;
        let mut comments: Vec<Comment> = stores
            .comments
            .values()
            .filter(|c| query.post_id.is_none_or(|p| c.post_id == p))
            .filter(|c| query.author_id.is_none_or(|a| c.author_id == a))
            .filter(|c| query.approved.is_none_or(|ap| c.approved == ap))
            .filter(|c| query.created_after.is_none_or(|t| c.created_on >= t))
            .filter(|c| query.created_before.is_none_or(|t| c.created_on <= t))
            .filter(|c| {
                query
                    .search
                    .as_deref()
                    .is_none_or(|term| c.content.contains(term))
            })
            .cloned()
            .collect();

        // Conversational order: oldest first.
        comments.sort_by(|a, b| a.created_on.cmp(&b.created_on));
        Ok(paginate(comments, query.offset, query.limit))
    }

    async fn approve_many(&self, ids: &[Uuid]) -> Result<u64, RepoError> {
        let wanted: HashSet<Uuid> = ids.iter().copied().collect();
        let mut stores = self.store.inner.write().await;
        let mut touched = 0;
        for comment in stores.comments.values_mut() {
            if wanted.contains(&comment.id) {
                comment.approved = true;
                touched += 1;
            }
        }
        Ok(touched)
    }
}

/// In-memory contact message repository.
pub struct InMemoryContactMessageRepository {
    store: InMemoryStore,
}

impl InMemoryContactMessageRepository {
    pub fn new(store: &InMemoryStore) -> Self {
        Self {
            store: store.clone(),
        }
    }
}

#[async_trait]
impl ContactMessageRepository for InMemoryContactMessageRepository {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<ContactMessage>, RepoError> {
        let stores = self.store.inner.read().await;
        Ok(stores.messages.get(&id).cloned())
    }

    async fn insert(&self, message: ContactMessage) -> Result<ContactMessage, RepoError> {
        let mut stores = self.store.inner.write().await;
        stores.messages.insert(message.id, message.clone());
        Ok(message)
    }

    async fn update(&self, message: ContactMessage) -> Result<ContactMessage, RepoError> {
        let mut stores = self.store.inner.write().await;
        if !stores.messages.contains_key(&message.id) {
            return Err(RepoError::NotFound);
        }
        stores.messages.insert(message.id, message.clone());
        Ok(message)
    }

    async fn list(&self, query: &ContactMessageQuery) -> Result<Vec<ContactMessage>, RepoError> {
        let stores = self.store.inner.read().await;
        let mut messages: Vec<ContactMessage> = stores
            .messages
            .values()
            .filter(|m| query.is_resolved.is_none_or(|r| m.is_resolved == r))
            .filter(|m| query.created_after.is_none_or(|t| m.created_on >= t))
            .filter(|m| query.created_before.is_none_or(|t| m.created_on <= t))
            .filter(|m| {
                query.search.as_deref().is_none_or(|term| {
                    m.name.contains(term) || m.email.contains(term) || m.subject.contains(term)
                })
            })
            .cloned()
            .collect();

        messages.sort_by(|a, b| b.created_on.cmp(&a.created_on));
        Ok(paginate(messages, query.offset, query.limit))
    }
}

fn paginate<T>(items: Vec<T>, offset: Option<u64>, limit: Option<u64>) -> Vec<T> {
    let iter = items.into_iter().skip(offset.unwrap_or(0) as usize);
    match limit {
        Some(limit) => iter.take(limit as usize).collect(),
        None => iter.collect(),
    }
}

#[cfg(test)]
mod tests {
    use chrono::Duration;

    use quill_core::DomainError;
    use quill_core::domain::{Post, PostStatus};
    use quill_core::manager::{
        CommentManager, ContactMessageManager, NewComment, NewContactMessage, PostChanges,
        PostDraft, PostManager,
    };

    use super::*;

    struct Fixture {
        posts: PostManager,
        comments: CommentManager,
        contact: ContactMessageManager,
        post_repo: Arc<InMemoryPostRepository>,
        comment_repo: Arc<InMemoryCommentRepository>,
        author: Uuid,
    }

    async fn fixture() -> Fixture {
        let store = InMemoryStore::new();
        let users = Arc::new(InMemoryUserRepository::new(&store));
        let post_repo = Arc::new(InMemoryPostRepository::new(&store));
        let comment_repo = Arc::new(InMemoryCommentRepository::new(&store));
        let message_repo = Arc::new(InMemoryContactMessageRepository::new(&store));

        let author = users
            .insert(User::new("author@example.com".into(), "hash".into()))
            .await
            .unwrap()
            .id;

        Fixture {
            posts: PostManager::new(post_repo.clone(), users.clone()),
            comments: CommentManager::new(comment_repo.clone(), post_repo.clone(), users.clone()),
            contact: ContactMessageManager::new(message_repo),
            post_repo,
            comment_repo,
            author,
        }
    }

    fn draft(title: &str) -> PostDraft {
        PostDraft {
            title: title.into(),
            slug: None,
            author_id: None,
            content: "body".into(),
            excerpt: None,
            featured_image: None,
            status: None,
        }
    }

    fn publish() -> PostChanges {
        PostChanges {
            status: Some(PostStatus::Published),
            ..Default::default()
        }
    }

    fn unpublish() -> PostChanges {
        PostChanges {
            status: Some(PostStatus::Draft),
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn published_on_latches_on_first_publish_only() {
        let fx = fixture().await;
        let post = fx.posts.create(draft("Latch"), fx.author).await.unwrap();
        assert_eq!(post.status, PostStatus::Draft);
        assert!(post.published_on.is_none());

        let post = fx.posts.update(post.id, publish()).await.unwrap();
        let first = post.published_on.expect("latch set on first publish");

        let post = fx.posts.update(post.id, unpublish()).await.unwrap();
        assert_eq!(post.status, PostStatus::Draft);
        assert_eq!(post.published_on, Some(first), "latch survives unpublish");

        let post = fx.posts.update(post.id, publish()).await.unwrap();
        assert_eq!(post.published_on, Some(first), "latch never overwritten");
    }

    #[tokio::test]
    async fn created_as_published_latches_immediately() {
        let fx = fixture().await;
        let mut d = draft("Straight to published");
        d.status = Some(PostStatus::Published);
        let post = fx.posts.create(d, fx.author).await.unwrap();
        assert_eq!(post.published_on, Some(post.created_on));
    }

    #[tokio::test]
    async fn duplicate_title_and_slug_are_validation_errors() {
        let fx = fixture().await;
        fx.posts.create(draft("Same Title"), fx.author).await.unwrap();

        let err = fx
            .posts
            .create(draft("Same Title"), fx.author)
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::Validation(_)));

        // Different title, colliding derived slug.
        let err = fx
            .posts
            .create(draft("same title"), fx.author)
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::Validation(_)));
    }

    #[tokio::test]
    async fn author_defaults_to_acting_user() {
        let fx = fixture().await;
        let post = fx.posts.create(draft("Ownership"), fx.author).await.unwrap();
        assert_eq!(post.author_id, fx.author);
    }

    #[tokio::test]
    async fn unknown_author_is_a_validation_error() {
        let fx = fixture().await;
        let mut d = draft("Ghost author");
        d.author_id = Some(Uuid::new_v4());
        let err = fx.posts.create(d, fx.author).await.unwrap_err();
        assert!(matches!(err, DomainError::Validation(_)));
    }

    #[tokio::test]
    async fn slug_is_derived_once_and_not_regenerated() {
        let fx = fixture().await;
        let post = fx
            .posts
            .create(draft("My First Post!"), fx.author)
            .await
            .unwrap();
        assert_eq!(post.slug, "my-first-post");

        let post = fx
            .posts
            .update(
                post.id,
                PostChanges {
                    title: Some("A Different Title".into()),
                    ..Default::default()
                },
            )
            .await
            .unwrap();
        assert_eq!(post.title, "A Different Title");
        assert_eq!(post.slug, "my-first-post", "slug untouched by title change");

        let post = fx
            .posts
            .update(
                post.id,
                PostChanges {
                    slug: Some("fresh-slug".into()),
                    ..Default::default()
                },
            )
            .await
            .unwrap();
        assert_eq!(post.slug, "fresh-slug");
    }

    #[tokio::test]
    async fn delete_cascades_to_comments_only_of_that_post() {
        let fx = fixture().await;
        let doomed = fx.posts.create(draft("Doomed"), fx.author).await.unwrap();
        let kept = fx.posts.create(draft("Kept"), fx.author).await.unwrap();

        for text in ["first", "second"] {
            fx.comments
                .create(NewComment {
                    post_id: doomed.id,
                    author_id: fx.author,
                    content: text.into(),
                })
                .await
                .unwrap();
        }
        let survivor = fx
            .comments
            .create(NewComment {
                post_id: kept.id,
                author_id: fx.author,
                content: "still here".into(),
            })
            .await
            .unwrap();

        fx.posts.delete(doomed.id).await.unwrap();

        let orphans = fx
            .comments
            .list(&CommentQuery {
                post_id: Some(doomed.id),
                ..Default::default()
            })
            .await
            .unwrap();
        assert!(orphans.is_empty(), "no comment survives its parent post");

        assert!(
            fx.comment_repo
                .find_by_id(survivor.id)
                .await
                .unwrap()
                .is_some()
        );
    }

    #[tokio::test]
    async fn comments_start_unapproved_and_enforce_length() {
        let fx = fixture().await;
        let post = fx.posts.create(draft("Moderated"), fx.author).await.unwrap();

        let comment = fx
            .comments
            .create(NewComment {
                post_id: post.id,
                author_id: fx.author,
                content: "hello".into(),
            })
            .await
            .unwrap();
        assert!(!comment.approved);

        let err = fx
            .comments
            .create(NewComment {
                post_id: post.id,
                author_id: fx.author,
                content: "x".repeat(1001),
            })
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::Validation(_)));

        let err = fx
            .comments
            .create(NewComment {
                post_id: Uuid::new_v4(),
                author_id: fx.author,
                content: "dangling".into(),
            })
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::Validation(_)));
    }

    #[tokio::test]
    async fn bulk_approve_is_idempotent_over_mixed_sets() {
        let fx = fixture().await;
        let post = fx.posts.create(draft("Busy thread"), fx.author).await.unwrap();

        let mut ids = Vec::new();
        for text in ["one", "two", "three"] {
            let comment = fx
                .comments
                .create(NewComment {
                    post_id: post.id,
                    author_id: fx.author,
                    content: text.into(),
                })
                .await
                .unwrap();
            ids.push(comment.id);
        }

        // One comment already approved before the batch runs.
        fx.comments.approve(ids[0]).await.unwrap();

        let touched = fx.comments.bulk_approve(&ids).await.unwrap();
        assert_eq!(touched, 3);

        let approved = fx
            .comments
            .list(&CommentQuery {
                post_id: Some(post.id),
                approved: Some(true),
                ..Default::default()
            })
            .await
            .unwrap();
        assert_eq!(approved.len(), 3);

        // Second run: no error, no observable change.
        let touched = fx.comments.bulk_approve(&ids).await.unwrap();
        assert_eq!(touched, 3);

        // Unknown ids are skipped, not errors.
        let touched = fx
            .comments
            .bulk_approve(&[ids[0], Uuid::new_v4()])
            .await
            .unwrap();
        assert_eq!(touched, 1);
    }

    #[tokio::test]
    async fn likes_behave_as_a_set() {
        let fx = fixture().await;
        let post = fx.posts.create(draft("Popular"), fx.author).await.unwrap();
        assert_eq!(fx.posts.count_likes(post.id).await.unwrap(), 0);

        fx.posts.like(post.id, fx.author).await.unwrap();
        fx.posts.like(post.id, fx.author).await.unwrap();
        assert_eq!(fx.posts.count_likes(post.id).await.unwrap(), 1);

        fx.posts.unlike(post.id, fx.author).await.unwrap();
        fx.posts.unlike(post.id, fx.author).await.unwrap();
        assert_eq!(fx.posts.count_likes(post.id).await.unwrap(), 0);
    }

    #[tokio::test]
    async fn posts_list_newest_first_comments_oldest_first() {
        let fx = fixture().await;
        let base = chrono::Utc::now();

        for (i, title) in ["Oldest", "Middle", "Newest"].iter().enumerate() {
            let mut post = Post::new(
                (*title).to_string(),
                title.to_lowercase(),
                fx.author,
                "body".into(),
                String::new(),
                None,
                PostStatus::Draft,
            );
            post.created_on = base + Duration::seconds(i as i64);
            fx.post_repo.insert(post).await.unwrap();
        }

        let titles: Vec<String> = fx
            .posts
            .list(&PostQuery::default())
            .await
            .unwrap()
            .into_iter()
            .map(|p| p.title)
            .collect();
        assert_eq!(titles, ["Newest", "Middle", "Oldest"]);

        let thread = fx.posts.get_by_slug("oldest").await.unwrap().unwrap();
        for (i, text) in ["first", "second", "third"].iter().enumerate() {
            let mut comment = Comment::new(thread.id, fx.author, (*text).to_string());
            comment.created_on = base + Duration::seconds(i as i64);
            fx.comment_repo.insert(comment).await.unwrap();
        }

        let contents: Vec<String> = fx
            .comments
            .list(&CommentQuery {
                post_id: Some(thread.id),
                ..Default::default()
            })
            .await
            .unwrap()
            .into_iter()
            .map(|c| c.content)
            .collect();
        assert_eq!(contents, ["first", "second", "third"]);
    }

    #[tokio::test]
    async fn post_list_filters_by_status_and_search() {
        let fx = fixture().await;
        let mut d = draft("Rust ownership explained");
        d.status = Some(PostStatus::Published);
        fx.posts.create(d, fx.author).await.unwrap();
        fx.posts
            .create(draft("Gardening notes"), fx.author)
            .await
            .unwrap();

        let published = fx
            .posts
            .list(&PostQuery {
                status: Some(PostStatus::Published),
                ..Default::default()
            })
            .await
            .unwrap();
        assert_eq!(published.len(), 1);
        assert_eq!(published[0].title, "Rust ownership explained");

        let hits = fx
            .posts
            .list(&PostQuery {
                search: Some("Gardening".into()),
                ..Default::default()
            })
            .await
            .unwrap();
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].title, "Gardening notes");
    }

    #[tokio::test]
    async fn contact_messages_validate_email_and_toggle_resolution() {
        let fx = fixture().await;

        let err = fx
            .contact
            .create(NewContactMessage {
                name: "Visitor".into(),
                email: "not-an-email".into(),
                subject: "Hi".into(),
                message: "Hello there".into(),
            })
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::Validation(_)));

        let message = fx
            .contact
            .create(NewContactMessage {
                name: "Visitor".into(),
                email: "visitor@example.com".into(),
                subject: "Hi".into(),
                message: "Hello there".into(),
            })
            .await
            .unwrap();
        assert!(!message.is_resolved);

        let message = fx.contact.mark_resolved(message.id).await.unwrap();
        assert!(message.is_resolved);
        let message = fx.contact.mark_resolved(message.id).await.unwrap();
        assert!(message.is_resolved, "resolving twice is a no-op");

        let message = fx.contact.mark_unresolved(message.id).await.unwrap();
        assert!(!message.is_resolved);
    }
}
