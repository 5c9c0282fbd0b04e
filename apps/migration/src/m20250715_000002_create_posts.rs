use sea_orm_migration::{prelude::*, schema::*};

use super::m20250715_000001_create_users::Users;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Posts::Table)
                    .if_not_exists()
                    .col(uuid(Posts::Id).primary_key())
                    .col(string_len_uniq(Posts::Title, 200))
                    .col(string_len_uniq(Posts::Slug, 200))
                    .col(uuid(Posts::AuthorId))
                    .col(text(Posts::Content))
                    .col(text(Posts::Excerpt))
                    .col(string_null(Posts::FeaturedImage))
                    .col(integer(Posts::Status).default(0))
                    .col(timestamp_with_time_zone(Posts::CreatedOn))
                    .col(timestamp_with_time_zone(Posts::UpdatedOn))
                    .col(timestamp_with_time_zone_null(Posts::PublishedOn))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_posts_author")
                            .from(Posts::Table, Posts::AuthorId)
                            .to(Users::Table, Users::Id)
                            .on_update(ForeignKeyAction::Cascade)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_posts_created_on")
                    .table(Posts::Table)
                    .col(Posts::CreatedOn)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Posts::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum Posts {
    Table,
    Id,
    Title,
    Slug,
    AuthorId,
    Content,
    Excerpt,
    FeaturedImage,
    Status,
    CreatedOn,
    UpdatedOn,
    PublishedOn,
}
