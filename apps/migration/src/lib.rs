//! Schema migrations for the Quill blog database.

pub use sea_orm_migration::prelude::*;

mod m20250715_000001_create_users;
mod m20250715_000002_create_posts;
mod m20250715_000003_create_comments;
mod m20250715_000004_create_post_likes;
mod m20250715_000005_create_contact_messages;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20250715_000001_create_users::Migration),
            Box::new(m20250715_000002_create_posts::Migration),
            Box::new(m20250715_000003_create_comments::Migration),
            Box::new(m20250715_000004_create_post_likes::Migration),
            Box::new(m20250715_000005_create_contact_messages::Migration),
        ]
    }
}
