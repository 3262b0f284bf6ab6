use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Fine: owner + status for the outstanding listing
        manager
            .create_index(
                Index::create()
                    .name("idx_fine_user_status")
                    .table(Fine::Table)
                    .col(Fine::UserId)
                    .col(Fine::Status)
                    .to_owned(),
            )
            .await?;

        // Payment: index on owner
        manager
            .create_index(
                Index::create()
                    .name("idx_payment_user")
                    .table(Payment::Table)
                    .col(Payment::UserId)
                    .to_owned(),
            )
            .await?;

        // Payment: receipt numbers are unique
        manager
            .create_index(
                Index::create()
                    .name("uniq_payment_reference")
                    .table(Payment::Table)
                    .col(Payment::ReferenceId)
                    .unique()
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(Index::drop().name("idx_fine_user_status").table(Fine::Table).to_owned())
            .await?;
        manager
            .drop_index(Index::drop().name("idx_payment_user").table(Payment::Table).to_owned())
            .await?;
        manager
            .drop_index(Index::drop().name("uniq_payment_reference").table(Payment::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum Fine { Table, UserId, Status }

#[derive(DeriveIden)]
enum Payment { Table, UserId, ReferenceId }
