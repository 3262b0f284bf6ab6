//! Create `fine` table.
//!
//! `payment_id` is a plain nullable column: the payment row is created after
//! the fine, and `payment.related_fine` carries the enforced FK instead.
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Fine::Table)
                    .if_not_exists()
                    .col(uuid(Fine::Id).primary_key())
                    .col(uuid(Fine::UserId).not_null())
                    .col(string_len(Fine::FineNumber, 64).unique_key().not_null())
                    .col(double(Fine::Amount).not_null())
                    .col(string_len(Fine::Reason, 255).not_null())
                    .col(string_len(Fine::Location, 255).not_null())
                    .col(timestamp_with_time_zone(Fine::Date).not_null())
                    .col(timestamp_with_time_zone(Fine::DueDate).not_null())
                    .col(string_len(Fine::Status, 16).not_null())
                    .col(ColumnDef::new(Fine::PaymentId).uuid().null())
                    .col(timestamp_with_time_zone(Fine::CreatedAt).not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_fine_user")
                            .from(Fine::Table, Fine::UserId)
                            .to(User::Table, User::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(Fine::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum Fine {
    Table,
    Id,
    UserId,
    FineNumber,
    Amount,
    Reason,
    Location,
    Date,
    DueDate,
    Status,
    PaymentId,
    CreatedAt,
}

#[derive(DeriveIden)]
enum User { Table, Id }
