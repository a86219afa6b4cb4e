use sea_orm_migration::prelude::*;
use sea_orm_migration::sea_orm::ConnectionTrait;

#[derive(DeriveMigrationName)]
pub struct Migration;

/// One active appointment per (pet, service line, instant). Cancelled rows are
/// excluded so a cancelled slot can be booked again.
const ACTIVE_SLOT_INDEX: &str = "CREATE UNIQUE INDEX IF NOT EXISTS uniq_appointment_active_slot \
     ON appointment (pet_id, service_line, scheduled_at) WHERE status <> 'cancelado'";

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Pet: index on client_id
        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_pet_client")
                    .table(Pet::Table)
                    .col(Pet::ClientId)
                    .to_owned(),
            )
            .await?;

        // Appointment: listing is ordered and range-filtered by scheduled_at
        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_appointment_scheduled_at")
                    .table(Appointment::Table)
                    .col(Appointment::ScheduledAt)
                    .to_owned(),
            )
            .await?;

        // sea-query has no portable partial-index builder; the statement is
        // valid for both Postgres and SQLite.
        manager
            .get_connection()
            .execute_unprepared(ACTIVE_SLOT_INDEX)
            .await?;

        // MedicalRecord: history lookups by pet
        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_medical_record_pet")
                    .table(MedicalRecord::Table)
                    .col(MedicalRecord::PetId)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(Index::drop().name("idx_pet_client").table(Pet::Table).to_owned())
            .await?;
        manager
            .drop_index(Index::drop().name("idx_appointment_scheduled_at").table(Appointment::Table).to_owned())
            .await?;
        manager
            .drop_index(Index::drop().name("uniq_appointment_active_slot").table(Appointment::Table).to_owned())
            .await?;
        manager
            .drop_index(Index::drop().name("idx_medical_record_pet").table(MedicalRecord::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum Pet { Table, ClientId }

#[derive(DeriveIden)]
enum Appointment { Table, ScheduledAt }

#[derive(DeriveIden)]
enum MedicalRecord { Table, PetId }
