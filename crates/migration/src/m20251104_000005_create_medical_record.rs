//! Create `medical_record` table (pet history entries).
//!
//! Attached file references live in `files` as a JSON array serialized to text.
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(MedicalRecord::Table)
                    .if_not_exists()
                    .col(pk_auto(MedicalRecord::Id))
                    .col(integer(MedicalRecord::PetId))
                    .col(date(MedicalRecord::Date))
                    .col(string_len(MedicalRecord::Kind, 64))
                    .col(text(MedicalRecord::Description))
                    .col(string_len(MedicalRecord::Responsible, 128))
                    .col(text_null(MedicalRecord::Files))
                    .col(timestamp_with_time_zone(MedicalRecord::CreatedAt))
                    .col(timestamp_with_time_zone(MedicalRecord::UpdatedAt))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_medical_record_pet")
                            .from(MedicalRecord::Table, MedicalRecord::PetId)
                            .to(Pet::Table, Pet::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(MedicalRecord::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum MedicalRecord {
    Table,
    Id,
    PetId,
    Date,
    Kind,
    Description,
    Responsible,
    Files,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum Pet { Table, Id }
