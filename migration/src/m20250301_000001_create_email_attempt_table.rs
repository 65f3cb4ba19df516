use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(EmailAttempt::Table)
                    .if_not_exists()
                    .col(string(EmailAttempt::Email).primary_key())
                    .col(integer(EmailAttempt::Count))
                    .col(timestamp_with_time_zone(EmailAttempt::LastAttemptAt))
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_email_attempt_last_attempt_at")
                    .table(EmailAttempt::Table)
                    .col(EmailAttempt::LastAttemptAt)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(EmailAttempt::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum EmailAttempt {
    Table,
    Email,
    Count,
    LastAttemptAt,
}
