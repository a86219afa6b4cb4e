//! Create `photo` table: uploaded pet pictures.
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Photo::Table)
                    .if_not_exists()
                    .col(pk_auto(Photo::Id))
                    .col(integer(Photo::PetId))
                    .col(string_len(Photo::OriginalName, 255))
                    .col(string_len(Photo::Filename, 255))
                    .col(timestamp_with_time_zone(Photo::CreatedAt))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_photo_pet")
                            .from(Photo::Table, Photo::PetId)
                            .to(Pet::Table, Pet::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(Photo::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum Photo { Table, Id, PetId, OriginalName, Filename, CreatedAt }

#[derive(DeriveIden)]
enum Pet { Table, Id }
