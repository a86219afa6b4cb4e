#![cfg(test)]
use std::sync::Arc;

use migration::MigratorTrait;
use models::db::connect_with_config;
use sea_orm::DatabaseConnection;

use crate::appointment::{repository::SeaOrmAppointmentRepository, AppointmentService};
use crate::client::{repository::SeaOrmClientRepository, ClientService};
use crate::medical_record::{repository::SeaOrmMedicalRecordRepository, MedicalRecordService};
use crate::pet::{repository::SeaOrmPetRepository, PetService};
use crate::upload::UploadStore;
use crate::veterinarian::{repository::SeaOrmVeterinarianRepository, VeterinarianService};

/// Fresh in-memory SQLite database with every migration applied.
/// Each call is isolated: one pooled connection, one private database.
pub async fn get_db() -> Result<DatabaseConnection, anyhow::Error> {
    let db = connect_with_config(&configs::DatabaseConfig::in_memory()).await?;
    migration::Migrator::up(&db, None).await?;
    Ok(db)
}

/// All services wired against one test database and a temp upload directory.
pub struct Fixture {
    pub db: DatabaseConnection,
    pub clients: ClientService,
    pub pets: PetService,
    pub veterinarians: VeterinarianService,
    pub appointments: AppointmentService,
    pub records: MedicalRecordService,
    pub uploads: Arc<UploadStore>,
}

pub async fn fixture() -> Result<Fixture, anyhow::Error> {
    let db = get_db().await?;
    let clients_repo = Arc::new(SeaOrmClientRepository { db: db.clone() });
    let pets_repo = Arc::new(SeaOrmPetRepository { db: db.clone() });
    let vets_repo = Arc::new(SeaOrmVeterinarianRepository { db: db.clone() });
    let root = std::env::temp_dir().join(format!("lolli-test-{}", uuid::Uuid::new_v4()));
    let uploads = Arc::new(UploadStore::new(root));
    uploads.ensure_dirs().await?;

    Ok(Fixture {
        clients: ClientService::new(clients_repo.clone(), pets_repo.clone(), uploads.clone()),
        pets: PetService::new(pets_repo.clone(), clients_repo, uploads.clone()),
        veterinarians: VeterinarianService::new(vets_repo.clone()),
        appointments: AppointmentService::new(
            Arc::new(SeaOrmAppointmentRepository { db: db.clone() }),
            pets_repo.clone(),
            vets_repo,
        ),
        records: MedicalRecordService::new(
            Arc::new(SeaOrmMedicalRecordRepository { db: db.clone() }),
            pets_repo,
            uploads.clone(),
        ),
        uploads,
        db,
    })
}
