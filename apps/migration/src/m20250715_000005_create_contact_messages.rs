use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(ContactMessages::Table)
                    .if_not_exists()
                    .col(uuid(ContactMessages::Id).primary_key())
                    .col(string_len(ContactMessages::Name, 100))
                    .col(string_len(ContactMessages::Email, 254))
                    .col(string_len(ContactMessages::Subject, 200))
                    .col(text(ContactMessages::Message))
                    .col(boolean(ContactMessages::IsResolved).default(false))
                    .col(timestamp_with_time_zone(ContactMessages::CreatedOn))
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_contact_messages_created_on")
                    .table(ContactMessages::Table)
                    .col(ContactMessages::CreatedOn)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(ContactMessages::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum ContactMessages {
    Table,
    Id,
    Name,
    Email,
    Subject,
    Message,
    IsResolved,
    CreatedOn,
}
