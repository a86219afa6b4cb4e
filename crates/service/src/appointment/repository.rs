use async_trait::async_trait;
use chrono::{DateTime, Utc};
use models::appointment::{self, AppointmentStatus, ServiceLine};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, QueryFilter, QueryOrder, Set, SqlErr,
};

use super::domain::{AppointmentFilter, UpperBound};
use crate::errors::ServiceError;

pub const SLOT_TAKEN: &str = "pet already has an active appointment at this time for this service line";

#[derive(Debug, Clone)]
pub struct NewAppointment {
    pub pet_id: i32,
    pub veterinarian_id: Option<i32>,
    pub service_line: ServiceLine,
    pub scheduled_at: DateTime<Utc>,
    pub notes: Option<String>,
}

#[async_trait]
pub trait AppointmentRepository: Send + Sync {
    /// Insert with status `agendado`. A clash on the active-slot index is a Conflict.
    async fn insert(&self, appointment: NewAppointment) -> Result<appointment::Model, ServiceError>;
    async fn get(&self, id: i32) -> Result<Option<appointment::Model>, ServiceError>;
    async fn find_active(&self, pet_id: i32, line: ServiceLine, at: DateTime<Utc>) -> Result<Option<appointment::Model>, ServiceError>;
    async fn list(&self, filter: &AppointmentFilter) -> Result<Vec<appointment::Model>, ServiceError>;
    /// Move `id` from `expected` to `next` in one conditional write. `None`
    /// when the row is gone or no longer holds `expected`.
    async fn set_status(
        &self,
        id: i32,
        expected: AppointmentStatus,
        next: AppointmentStatus,
    ) -> Result<Option<appointment::Model>, ServiceError>;
}

fn map_write_err(e: DbErr) -> ServiceError {
    match e.sql_err() {
        Some(SqlErr::UniqueConstraintViolation(_)) => ServiceError::Conflict(SLOT_TAKEN.to_string()),
        _ => ServiceError::db(e),
    }
}

/// SeaORM-backed repository implementation.
pub struct SeaOrmAppointmentRepository {
    pub db: DatabaseConnection,
}

#[async_trait]
impl AppointmentRepository for SeaOrmAppointmentRepository {
    async fn insert(&self, input: NewAppointment) -> Result<appointment::Model, ServiceError> {
        let now = Utc::now();
        appointment::ActiveModel {
            pet_id: Set(input.pet_id),
            veterinarian_id: Set(input.veterinarian_id),
            service_line: Set(input.service_line),
            scheduled_at: Set(input.scheduled_at),
            status: Set(AppointmentStatus::Agendado),
            notes: Set(input.notes),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        }
        .insert(&self.db)
        .await
        .map_err(map_write_err)
    }

    async fn get(&self, id: i32) -> Result<Option<appointment::Model>, ServiceError> {
        appointment::Entity::find_by_id(id).one(&self.db).await.map_err(ServiceError::db)
    }

    async fn find_active(&self, pet_id: i32, line: ServiceLine, at: DateTime<Utc>) -> Result<Option<appointment::Model>, ServiceError> {
        appointment::Entity::find()
            .filter(appointment::Column::PetId.eq(pet_id))
            .filter(appointment::Column::ServiceLine.eq(line))
            .filter(appointment::Column::ScheduledAt.eq(at))
            .filter(appointment::Column::Status.ne(AppointmentStatus::Cancelado))
            .one(&self.db)
            .await
            .map_err(ServiceError::db)
    }

    async fn list(&self, filter: &AppointmentFilter) -> Result<Vec<appointment::Model>, ServiceError> {
        let mut q = appointment::Entity::find();
        if let Some(from) = filter.from {
            q = q.filter(appointment::Column::ScheduledAt.gte(from));
        }
        match filter.to {
            Some(UpperBound::Inclusive(end)) => q = q.filter(appointment::Column::ScheduledAt.lte(end)),
            Some(UpperBound::Before(end)) => q = q.filter(appointment::Column::ScheduledAt.lt(end)),
            None => {}
        }
        if let Some(line) = filter.service_line {
            q = q.filter(appointment::Column::ServiceLine.eq(line));
        }
        if let Some(pet_id) = filter.pet_id {
            q = q.filter(appointment::Column::PetId.eq(pet_id));
        }
        q.order_by_asc(appointment::Column::ScheduledAt)
            .order_by_asc(appointment::Column::Id)
            .all(&self.db)
            .await
            .map_err(ServiceError::db)
    }

    async fn set_status(
        &self,
        id: i32,
        expected: AppointmentStatus,
        next: AppointmentStatus,
    ) -> Result<Option<appointment::Model>, ServiceError> {
        let res = appointment::Entity::update_many()
            .set(appointment::ActiveModel { status: Set(next), updated_at: Set(Utc::now()), ..Default::default() })
            .filter(appointment::Column::Id.eq(id))
            .filter(appointment::Column::Status.eq(expected))
            .exec(&self.db)
            .await
            .map_err(map_write_err)?;
        if res.rows_affected == 0 {
            return Ok(None);
        }
        self.get(id).await
    }
}
