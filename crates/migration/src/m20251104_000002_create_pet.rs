//! Create `pet` table with FK to `client` (cascade on delete).
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Pet::Table)
                    .if_not_exists()
                    .col(pk_auto(Pet::Id))
                    .col(integer(Pet::ClientId))
                    .col(string_len(Pet::Name, 128))
                    .col(string_len(Pet::Species, 64))
                    .col(string_len_null(Pet::Breed, 64))
                    .col(timestamp_with_time_zone(Pet::CreatedAt))
                    .col(timestamp_with_time_zone(Pet::UpdatedAt))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_pet_client")
                            .from(Pet::Table, Pet::ClientId)
                            .to(Client::Table, Client::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(Pet::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum Pet { Table, Id, ClientId, Name, Species, Breed, CreatedAt, UpdatedAt }

#[derive(DeriveIden)]
enum Client { Table, Id }
