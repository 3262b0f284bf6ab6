//! Create `license` table. One license per user, enforced by a unique `user_id`.
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(License::Table)
                    .if_not_exists()
                    .col(uuid(License::Id).primary_key())
                    .col(uuid(License::UserId).unique_key().not_null())
                    .col(string_len(License::LicenseNumber, 64).unique_key().not_null())
                    .col(timestamp_with_time_zone(License::IssuedDate).not_null())
                    .col(timestamp_with_time_zone(License::ExpiryDate).not_null())
                    .col(string_len(License::Category, 32).not_null())
                    .col(string_len(License::Status, 16).not_null())
                    .col(json(License::Restrictions).not_null())
                    .col(timestamp_with_time_zone(License::CreatedAt).not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_license_user")
                            .from(License::Table, License::UserId)
                            .to(User::Table, User::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(License::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum License {
    Table,
    Id,
    UserId,
    LicenseNumber,
    IssuedDate,
    ExpiryDate,
    Category,
    Status,
    Restrictions,
    CreatedAt,
}

#[derive(DeriveIden)]
enum User { Table, Id }
