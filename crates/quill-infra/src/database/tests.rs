use chrono::Utc;
use sea_orm::{DatabaseBackend, MockDatabase, MockExecResult};
use uuid::Uuid;

use quill_core::domain::{Post, PostStatus};
use quill_core::ports::{BaseRepository, CommentRepository, ContactMessageRepository};

use crate::database::entity::{contact_message, post};
use crate::database::postgres_repo::{
    PostgresCommentRepository, PostgresContactMessageRepository, PostgresPostRepository,
};

#[tokio::test]
async fn find_post_by_id_maps_columns() {
    let post_id = Uuid::new_v4();
    let author_id = Uuid::new_v4();
    let now = Utc::now();

    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results(vec![vec![post::Model {
            id: post_id,
            title: "Test Post".to_owned(),
            slug: "test-post".to_owned(),
            author_id,
            content: "Content".to_owned(),
            excerpt: String::new(),
            featured_image: None,
            status: 1,
            created_on: now.into(),
            updated_on: now.into(),
            published_on: Some(now.into()),
        }]])
        .into_connection();

    let repo = PostgresPostRepository::new(db);

    let result: Option<Post> = repo.find_by_id(post_id).await.unwrap();

    let post = result.expect("post found");
    assert_eq!(post.id, post_id);
    assert_eq!(post.title, "Test Post");
    assert_eq!(post.slug, "test-post");
    assert_eq!(post.status, PostStatus::Published);
    assert_eq!(post.published_on, Some(now));
}

#[tokio::test]
async fn approve_many_is_one_batch_write() {
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_exec_results(vec![MockExecResult {
            last_insert_id: 0,
            rows_affected: 3,
        }])
        .into_connection();

    let repo = PostgresCommentRepository::new(db);

    let ids = [Uuid::new_v4(), Uuid::new_v4(), Uuid::new_v4()];
    let touched = repo.approve_many(&ids).await.unwrap();

    assert_eq!(touched, 3);
}

#[tokio::test]
async fn find_contact_message_by_id_maps_columns() {
    let message_id = Uuid::new_v4();
    let now = Utc::now();

    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results(vec![vec![contact_message::Model {
            id: message_id,
            name: "Visitor".to_owned(),
            email: "visitor@example.com".to_owned(),
            subject: "Hello".to_owned(),
            message: "Just saying hi".to_owned(),
            is_resolved: false,
            created_on: now.into(),
        }]])
        .into_connection();

    let repo = PostgresContactMessageRepository::new(db);

    let message = repo.find_by_id(message_id).await.unwrap().expect("found");
    assert_eq!(message.email, "visitor@example.com");
    assert!(!message.is_resolved);
}
