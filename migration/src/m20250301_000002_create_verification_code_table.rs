use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(VerificationCode::Table)
                    .if_not_exists()
                    .col(string(VerificationCode::Session).primary_key())
                    .col(string(VerificationCode::Code))
                    .col(timestamp_with_time_zone(VerificationCode::CreatedAt))
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(VerificationCode::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum VerificationCode {
    Table,
    Session,
    Code,
    CreatedAt,
}
