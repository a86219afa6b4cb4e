//! Create `veterinarian` table.
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Veterinarian::Table)
                    .if_not_exists()
                    .col(pk_auto(Veterinarian::Id))
                    .col(string_len(Veterinarian::Name, 128))
                    .col(timestamp_with_time_zone(Veterinarian::CreatedAt))
                    .col(timestamp_with_time_zone(Veterinarian::UpdatedAt))
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(Veterinarian::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum Veterinarian { Table, Id, Name, CreatedAt, UpdatedAt }
