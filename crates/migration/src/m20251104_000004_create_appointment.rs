//! Create `appointment` table.
//!
//! Belongs to `pet` (cascade); the veterinarian reference is cleared when the
//! veterinarian is removed. Status and service line are stored as short strings.
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Appointment::Table)
                    .if_not_exists()
                    .col(pk_auto(Appointment::Id))
                    .col(integer(Appointment::PetId))
                    .col(integer_null(Appointment::VeterinarianId))
                    .col(string_len(Appointment::ServiceLine, 16))
                    .col(timestamp_with_time_zone(Appointment::ScheduledAt))
                    .col(string_len(Appointment::Status, 16))
                    .col(text_null(Appointment::Notes))
                    .col(timestamp_with_time_zone(Appointment::CreatedAt))
                    .col(timestamp_with_time_zone(Appointment::UpdatedAt))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_appointment_pet")
                            .from(Appointment::Table, Appointment::PetId)
                            .to(Pet::Table, Pet::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_appointment_veterinarian")
                            .from(Appointment::Table, Appointment::VeterinarianId)
                            .to(Veterinarian::Table, Veterinarian::Id)
                            .on_delete(ForeignKeyAction::SetNull)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(Appointment::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum Appointment {
    Table,
    Id,
    PetId,
    VeterinarianId,
    ServiceLine,
    ScheduledAt,
    Status,
    Notes,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum Pet { Table, Id }

#[derive(DeriveIden)]
enum Veterinarian { Table, Id }
