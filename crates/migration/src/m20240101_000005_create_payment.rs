//! Create `payment` table with FKs to `user`, and optional FKs to `fine` / `license`.
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Payment::Table)
                    .if_not_exists()
                    .col(uuid(Payment::Id).primary_key())
                    .col(uuid(Payment::UserId).not_null())
                    .col(double(Payment::Amount).not_null())
                    .col(timestamp_with_time_zone(Payment::PaymentDate).not_null())
                    .col(string_len(Payment::PaymentMethod, 32).not_null())
                    .col(string_len(Payment::PaymentType, 32).not_null())
                    .col(string_len(Payment::ReferenceId, 64).not_null())
                    .col(string_len(Payment::Status, 16).not_null())
                    .col(ColumnDef::new(Payment::RelatedFine).uuid().null())
                    .col(ColumnDef::new(Payment::RelatedLicense).uuid().null())
                    .col(timestamp_with_time_zone(Payment::CreatedAt).not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_payment_user")
                            .from(Payment::Table, Payment::UserId)
                            .to(User::Table, User::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_payment_fine")
                            .from(Payment::Table, Payment::RelatedFine)
                            .to(Fine::Table, Fine::Id)
                            .on_delete(ForeignKeyAction::SetNull)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_payment_license")
                            .from(Payment::Table, Payment::RelatedLicense)
                            .to(License::Table, License::Id)
                            .on_delete(ForeignKeyAction::SetNull)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(Payment::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum Payment {
    Table,
    Id,
    UserId,
    Amount,
    PaymentDate,
    PaymentMethod,
    PaymentType,
    ReferenceId,
    Status,
    RelatedFine,
    RelatedLicense,
    CreatedAt,
}

#[derive(DeriveIden)]
enum User { Table, Id }

#[derive(DeriveIden)]
enum Fine { Table, Id }

#[derive(DeriveIden)]
enum License { Table, Id }
