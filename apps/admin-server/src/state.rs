//! Application state - shared across all handlers.

use std::sync::Arc;

use quill_core::manager::{CommentManager, ContactMessageManager, PostManager};
use quill_core::ports::{
    CommentRepository, ContactMessageRepository, PostRepository, UserRepository,
};
use quill_infra::database::{
    DatabaseConfig, DatabaseConnections, InMemoryCommentRepository,
    InMemoryContactMessageRepository, InMemoryPostRepository, InMemoryStore,
    InMemoryUserRepository, PostgresCommentRepository, PostgresContactMessageRepository,
    PostgresPostRepository, PostgresUserRepository,
};

type Repositories = (
    Option<Arc<DatabaseConnections>>,
    Arc<dyn UserRepository>,
    Arc<dyn PostRepository>,
    Arc<dyn CommentRepository>,
    Arc<dyn ContactMessageRepository>,
);

/// Shared application state: the three entity managers plus the identity
/// repository the auth handlers work against.
#[derive(Clone)]
pub struct AppState {
    pub posts: Arc<PostManager>,
    pub comments: Arc<CommentManager>,
    pub contact: Arc<ContactMessageManager>,
    pub users: Arc<dyn UserRepository>,
    pub db: Option<Arc<DatabaseConnections>>,
}

impl AppState {
    /// Build the application state with appropriate implementations.
    ///
    /// With a database configured the managers run over the Postgres
    /// repositories; otherwise everything falls back to a shared in-memory
    /// store.
    pub async fn new(db_config: Option<&DatabaseConfig>) -> Self {
        let (db, users, post_repo, comment_repo, message_repo): Repositories = match db_config {
            Some(config) => match DatabaseConnections::init(config).await {
                Ok(connections) => {
                    let conn = Arc::new(connections);
                    (
                        Some(conn.clone()),
                        Arc::new(PostgresUserRepository::new(conn.main.clone())),
                        Arc::new(PostgresPostRepository::new(conn.main.clone())),
                        Arc::new(PostgresCommentRepository::new(conn.main.clone())),
                        Arc::new(PostgresContactMessageRepository::new(conn.main.clone())),
                    )
                }
                Err(e) => {
                    tracing::error!(
                        "Failed to connect to database: {}. Using in-memory fallback.",
                        e
                    );
                    Self::in_memory()
                }
            },
            None => {
                tracing::warn!("DATABASE_URL not set. Running without database (in-memory mode).");
                Self::in_memory()
            }
        };

        let posts = Arc::new(PostManager::new(post_repo.clone(), users.clone()));
        let comments = Arc::new(CommentManager::new(comment_repo, post_repo, users.clone()));
        let contact = Arc::new(ContactMessageManager::new(message_repo));

        tracing::info!("Application state initialized");

        Self {
            posts,
            comments,
            contact,
            users,
            db,
        }
    }

    fn in_memory() -> Repositories {
        let store = InMemoryStore::new();
        (
            None,
            Arc::new(InMemoryUserRepository::new(&store)),
            Arc::new(InMemoryPostRepository::new(&store)),
            Arc::new(InMemoryCommentRepository::new(&store)),
            Arc::new(InMemoryContactMessageRepository::new(&store)),
        )
    }
}
