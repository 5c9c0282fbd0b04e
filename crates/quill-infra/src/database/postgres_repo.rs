//! PostgreSQL repository implementations.

use async_trait::async_trait;
use sea_orm::sea_query::{Expr, OnConflict};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, DbConn, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder, QuerySelect, Set,
};
use uuid::Uuid;

use quill_core::domain::{Comment, ContactMessage, Post, User};
use quill_core::error::RepoError;
use quill_core::ports::{
    CommentQuery, CommentRepository, ContactMessageQuery, ContactMessageRepository, PostQuery,
    PostRepository, UserRepository,
};

use super::entity::comment::{self, Entity as CommentEntity};
use super::entity::contact_message::{self, Entity as ContactMessageEntity};
use super::entity::post::{self, Entity as PostEntity};
use super::entity::post_like::{self, Entity as PostLikeEntity};
use super::entity::user::{self, Entity as UserEntity};
use super::postgres_base::{PostgresBaseRepository, map_db_err};

/// PostgreSQL user repository.
pub type PostgresUserRepository = PostgresBaseRepository<UserEntity>;

/// PostgreSQL post repository.
pub type PostgresPostRepository = PostgresBaseRepository<PostEntity>;

/// PostgreSQL comment repository.
pub type PostgresCommentRepository = PostgresBaseRepository<CommentEntity>;

/// PostgreSQL contact message repository.
pub struct PostgresContactMessageRepository {
    db: DbConn,
}

impl PostgresContactMessageRepository {
    pub fn new(db: DbConn) -> Self {
        Self { db }
    }
}

#[async_trait]
impl UserRepository for PostgresUserRepository {
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, RepoError> {
        // Keep the address itself out of the logs
        let masked = email
            .split_once('@')
            .map(|(_, domain)| format!("***@{domain}"))
            .unwrap_or_else(|| "***".to_string());
        tracing::debug!(user_email = %masked, "Finding user by email");

        let result = UserEntity::find()
            .filter(user::Column::Email.eq(email))
            .one(&self.db)
            .await
            .map_err(|e| RepoError::Query(e.to_string()))?;

        Ok(result.map(Into::into))
    }
}

#[async_trait]
impl PostRepository for PostgresPostRepository {
    async fn find_by_slug(&self, slug: &str) -> Result<Option<Post>, RepoError> {
        let result = PostEntity::find()
            .filter(post::Column::Slug.eq(slug))
            .one(&self.db)
            .await
            .map_err(|e| RepoError::Query(e.to_string()))?;

        Ok(result.map(Into::into))
    }

    async fn find_by_title(&self, title: &str) -> Result<Option<Post>, RepoError> {
        let result = PostEntity::find()
            .filter(post::Column::Title.eq(title))
            .one(&self.db)
            .await
            .map_err(|e| RepoError::Query(e.to_string()))?;

        Ok(result.map(Into::into))
    }

    async fn list(&self, query: &PostQuery) -> Result<Vec<Post>, RepoError> {
        let mut select = PostEntity::find();

        if let Some(status) = query.status {
            select = select.filter(post::Column::Status.eq(i32::from(status)));
        }
        if let Some(author_id) = query.author_id {
            select = select.filter(post::Column::AuthorId.eq(author_id));
        }
        if let Some(after) = query.created_after {
            select = select.filter(post::Column::CreatedOn.gte(after));
        }
        if let Some(before) = query.created_before {
            select = select.filter(post::Column::CreatedOn.lte(before));
        }
        if let Some(term) = &query.search {
            select = select.filter(
                Condition::any()
                    .add(post::Column::Title.contains(term))
                    .add(post::Column::Content.contains(term)),
            );
        }

        let mut select = select.order_by_desc(post::Column::CreatedOn);
        if let Some(limit) = query.limit {
            select = select.limit(limit);
        }
        if let Some(offset) = query.offset {
            select = select.offset(offset);
        }

        let rows = select
            .all(&self.db)
            .await
            .map_err(|e| RepoError::Query(e.to_string()))?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    async fn add_like(&self, post_id: Uuid, user_id: Uuid) -> Result<(), RepoError> {
        let like = post_like::ActiveModel {
            post_id: Set(post_id),
            user_id: Set(user_id),
        };

        // Set semantics: an existing (post, user) row stays as it is.
        PostLikeEntity::insert(like)
            .on_conflict(
                OnConflict::columns([post_like::Column::PostId, post_like::Column::UserId])
                    .do_nothing()
                    .to_owned(),
            )
            .exec_without_returning(&self.db)
            .await
            .map_err(map_db_err)?;

        Ok(())
    }

    async fn remove_like(&self, post_id: Uuid, user_id: Uuid) -> Result<(), RepoError> {
        PostLikeEntity::delete_many()
            .filter(post_like::Column::PostId.eq(post_id))
            .filter(post_like::Column::UserId.eq(user_id))
            .exec(&self.db)
            .await
            .map_err(|e| RepoError::Query(e.to_string()))?;

        Ok(())
    }

    async fn count_likes(&self, post_id: Uuid) -> Result<u64, RepoError> {
        PostLikeEntity::find()
            .filter(post_like::Column::PostId.eq(post_id))
            .count(&self.db)
            .await
            .map_err(|e| RepoError::Query(e.to_string()))
    }
}

#[async_trait]
impl CommentRepository for PostgresCommentRepository {
    async fn list(&self, query: &CommentQuery) -> Result<Vec<Comment>, RepoError> {
        let mut select = CommentEntity::find();

        if let Some(post_id) = query.post_id {
            select = select.filter(comment::Column::PostId.eq(post_id));
        }
        if let Some(author_id) = query.author_id {
            select = select.filter(comment::Column::AuthorId.eq(author_id));
        }
        if let Some(approved) = query.approved {
            select = select.filter(comment::Column::Approved.eq(approved));
        }
        if let Some(after) = query.created_after {
            select = select.filter(comment::Column::CreatedOn.gte(after));
        }
        if let Some(before) = query.created_before {
            select = select.filter(comment::Column::CreatedOn.lte(before));
        }
        if let Some(term) = &query.search {
            select = select.filter(comment::Column::Content.contains(term));
        }

        // Conversational order: oldest first.
        let mut select = select.order_by_asc(comment::Column::CreatedOn);
        if let Some(limit) = query.limit {
            select = select.limit(limit);
        }
        if let Some(offset) = query.offset {
            select = select.offset(offset);
        }

        let rows = select
            .all(&self.db)
            .await
            .map_err(|e| RepoError::Query(e.to_string()))?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    async fn approve_many(&self, ids: &[Uuid]) -> Result<u64, RepoError> {
        let result = CommentEntity::update_many()
            .col_expr(comment::Column::Approved, Expr::value(true))
            .filter(comment::Column::Id.is_in(ids.iter().copied()))
            .exec(&self.db)
            .await
            .map_err(|e| RepoError::Query(e.to_string()))?;

        Ok(result.rows_affected)
    }
}

#[async_trait]
impl ContactMessageRepository for PostgresContactMessageRepository {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<ContactMessage>, RepoError> {
        let result = ContactMessageEntity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| RepoError::Query(e.to_string()))?;

        Ok(result.map(Into::into))
    }

    async fn insert(&self, message: ContactMessage) -> Result<ContactMessage, RepoError> {
        let active: contact_message::ActiveModel = message.into();
        let model = active.insert(&self.db).await.map_err(map_db_err)?;
        Ok(model.into())
    }

    async fn update(&self, message: ContactMessage) -> Result<ContactMessage, RepoError> {
        let active: contact_message::ActiveModel = message.into();
        let model = active.update(&self.db).await.map_err(map_db_err)?;
        Ok(model.into())
    }

    async fn list(&self, query: &ContactMessageQuery) -> Result<Vec<ContactMessage>, RepoError> {
        let mut select = ContactMessageEntity::find();

        if let Some(is_resolved) = query.is_resolved {
            select = select.filter(contact_message::Column::IsResolved.eq(is_resolved));
        }
        if let Some(after) = query.created_after {
            select = select.filter(contact_message::Column::CreatedOn.gte(after));
        }
        if let Some(before) = query.created_before {
            select = select.filter(contact_message::Column::CreatedOn.lte(before));
        }
        if let Some(term) = &query.search {
            select = select.filter(
                Condition::any()
                    .add(contact_message::Column::Name.contains(term))
                    .add(contact_message::Column::Email.contains(term))
                    .add(contact_message::Column::Subject.contains(term)),
            );
        }

        let mut select = select.order_by_desc(contact_message::Column::CreatedOn);
        if let Some(limit) = query.limit {
            select = select.limit(limit);
        }
        if let Some(offset) = query.offset {
            select = select.offset(offset);
        }

        let rows = select
            .all(&self.db)
            .await
            .map_err(|e| RepoError::Query(e.to_string()))?;

        Ok(rows.into_iter().map(Into::into).collect())
    }
}
