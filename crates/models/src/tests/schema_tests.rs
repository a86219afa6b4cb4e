use anyhow::Result;
use chrono::{NaiveDate, TimeZone, Utc};
use migration::MigratorTrait;
use sea_orm::{ActiveModelTrait, DatabaseConnection, EntityTrait, ModelTrait, PaginatorTrait, Set};

use crate::appointment::{AppointmentStatus, ServiceLine};
use crate::{appointment, client, db, medical_record, pet, veterinarian};

async fn setup_test_db() -> Result<DatabaseConnection> {
    let db = db::connect_with_config(&configs::DatabaseConfig::in_memory()).await?;
    migration::Migrator::up(&db, None).await?;
    Ok(db)
}

async fn seed_pet(db: &DatabaseConnection) -> Result<(client::Model, pet::Model)> {
    let now = Utc::now();
    let c = client::ActiveModel {
        name: Set("Maria Souza".into()),
        email: Set("maria@example.com".into()),
        phone: Set("11987654321".into()),
        created_at: Set(now),
        updated_at: Set(now),
        ..Default::default()
    }
    .insert(db)
    .await?;
    let p = pet::ActiveModel {
        client_id: Set(c.id),
        name: Set("Rex".into()),
        species: Set("cachorro".into()),
        breed: Set(None),
        created_at: Set(now),
        updated_at: Set(now),
        ..Default::default()
    }
    .insert(db)
    .await?;
    Ok((c, p))
}

fn appointment_at(pet_id: i32, line: ServiceLine, status: AppointmentStatus) -> appointment::ActiveModel {
    let now = Utc::now();
    appointment::ActiveModel {
        pet_id: Set(pet_id),
        veterinarian_id: Set(None),
        service_line: Set(line),
        scheduled_at: Set(Utc.with_ymd_and_hms(2025, 6, 1, 10, 0, 0).unwrap()),
        status: Set(status),
        notes: Set(None),
        created_at: Set(now),
        updated_at: Set(now),
        ..Default::default()
    }
}

#[tokio::test]
async fn enums_round_trip_through_string_columns() -> Result<()> {
    let db = setup_test_db().await?;
    let (_, p) = seed_pet(&db).await?;
    let a = appointment_at(p.id, ServiceLine::Petshop, AppointmentStatus::Agendado).insert(&db).await?;
    let found = appointment::Entity::find_by_id(a.id).one(&db).await?.unwrap();
    assert_eq!(found.service_line, ServiceLine::Petshop);
    assert_eq!(found.status, AppointmentStatus::Agendado);
    assert_eq!(found.scheduled_at, Utc.with_ymd_and_hms(2025, 6, 1, 10, 0, 0).unwrap());
    Ok(())
}

#[tokio::test]
async fn active_slot_index_rejects_duplicates_but_not_cancelled() -> Result<()> {
    let db = setup_test_db().await?;
    let (_, p) = seed_pet(&db).await?;
    appointment_at(p.id, ServiceLine::Clinico, AppointmentStatus::Cancelado).insert(&db).await?;
    appointment_at(p.id, ServiceLine::Clinico, AppointmentStatus::Agendado).insert(&db).await?;
    appointment_at(p.id, ServiceLine::Petshop, AppointmentStatus::Agendado).insert(&db).await?;
    let dup = appointment_at(p.id, ServiceLine::Clinico, AppointmentStatus::Confirmado).insert(&db).await;
    assert!(dup.is_err());
    Ok(())
}

#[tokio::test]
async fn deleting_client_cascades_to_pet_history() -> Result<()> {
    let db = setup_test_db().await?;
    let (c, p) = seed_pet(&db).await?;
    appointment_at(p.id, ServiceLine::Clinico, AppointmentStatus::Agendado).insert(&db).await?;
    let now = Utc::now();
    medical_record::ActiveModel {
        pet_id: Set(p.id),
        date: Set(NaiveDate::from_ymd_opt(2025, 6, 1).unwrap()),
        kind: Set("vacina".into()),
        description: Set("V10".into()),
        responsible: Set("Dr. Paulo".into()),
        files: Set(None),
        created_at: Set(now),
        updated_at: Set(now),
        ..Default::default()
    }
    .insert(&db)
    .await?;

    c.delete(&db).await?;
    assert_eq!(pet::Entity::find().count(&db).await?, 0);
    assert_eq!(appointment::Entity::find().count(&db).await?, 0);
    assert_eq!(medical_record::Entity::find().count(&db).await?, 0);
    Ok(())
}

#[tokio::test]
async fn deleting_veterinarian_clears_assignment() -> Result<()> {
    let db = setup_test_db().await?;
    let (_, p) = seed_pet(&db).await?;
    let now = Utc::now();
    let vet = veterinarian::ActiveModel {
        name: Set("Dra. Ana".into()),
        created_at: Set(now),
        updated_at: Set(now),
        ..Default::default()
    }
    .insert(&db)
    .await?;
    let mut am = appointment_at(p.id, ServiceLine::Clinico, AppointmentStatus::Agendado);
    am.veterinarian_id = Set(Some(vet.id));
    let a = am.insert(&db).await?;

    vet.delete(&db).await?;
    let found = appointment::Entity::find_by_id(a.id).one(&db).await?.unwrap();
    assert_eq!(found.veterinarian_id, None);
    Ok(())
}
