//! Migrator registering entity-specific migrations in dependency order.
//! Indexes are applied last.
pub use sea_orm_migration::prelude::*;

mod m20251104_000001_create_client;
mod m20251104_000002_create_pet;
mod m20251104_000003_create_veterinarian;
mod m20251104_000004_create_appointment;
mod m20251104_000005_create_medical_record;
mod m20251104_000006_create_photo;
mod m20251104_000007_add_indexes;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20251104_000001_create_client::Migration),
            Box::new(m20251104_000002_create_pet::Migration),
            Box::new(m20251104_000003_create_veterinarian::Migration),
            Box::new(m20251104_000004_create_appointment::Migration),
            Box::new(m20251104_000005_create_medical_record::Migration),
            Box::new(m20251104_000006_create_photo::Migration),
            // Indexes should always be applied last
            Box::new(m20251104_000007_add_indexes::Migration),
        ]
    }
}
