use async_trait::async_trait;
use chrono::{NaiveDate, Utc};
use models::medical_record;
use sea_orm::{ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, Set};

use crate::errors::ServiceError;

#[derive(Debug, Clone)]
pub struct NewRecord {
    pub pet_id: i32,
    pub date: NaiveDate,
    pub kind: String,
    pub description: String,
    pub responsible: String,
    pub files: Vec<String>,
}

#[async_trait]
pub trait MedicalRecordRepository: Send + Sync {
    async fn insert(&self, record: NewRecord) -> Result<medical_record::Model, ServiceError>;
    async fn get(&self, id: i32) -> Result<Option<medical_record::Model>, ServiceError>;
    /// Newest first: date desc, then id desc.
    async fn list_for_pet(&self, pet_id: i32) -> Result<Vec<medical_record::Model>, ServiceError>;
    async fn set_responsible(&self, id: i32, responsible: &str) -> Result<Option<medical_record::Model>, ServiceError>;
    async fn delete(&self, id: i32) -> Result<bool, ServiceError>;
}

pub struct SeaOrmMedicalRecordRepository {
    pub db: DatabaseConnection,
}

#[async_trait]
impl MedicalRecordRepository for SeaOrmMedicalRecordRepository {
    async fn insert(&self, input: NewRecord) -> Result<medical_record::Model, ServiceError> {
        let files = medical_record::encode_files(&input.files)?;
        let now = Utc::now();
        medical_record::ActiveModel {
            pet_id: Set(input.pet_id),
            date: Set(input.date),
            kind: Set(input.kind),
            description: Set(input.description),
            responsible: Set(input.responsible),
            files: Set(files),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        }
        .insert(&self.db)
        .await
        .map_err(ServiceError::db)
    }

    async fn get(&self, id: i32) -> Result<Option<medical_record::Model>, ServiceError> {
        medical_record::Entity::find_by_id(id).one(&self.db).await.map_err(ServiceError::db)
    }

    async fn list_for_pet(&self, pet_id: i32) -> Result<Vec<medical_record::Model>, ServiceError> {
        medical_record::Entity::find()
            .filter(medical_record::Column::PetId.eq(pet_id))
            .order_by_desc(medical_record::Column::Date)
            .order_by_desc(medical_record::Column::Id)
            .all(&self.db)
            .await
            .map_err(ServiceError::db)
    }

    async fn set_responsible(&self, id: i32, responsible: &str) -> Result<Option<medical_record::Model>, ServiceError> {
        let Some(found) = self.get(id).await? else { return Ok(None) };
        let mut am: medical_record::ActiveModel = found.into();
        am.responsible = Set(responsible.to_string());
        am.updated_at = Set(Utc::now());
        am.update(&self.db).await.map(Some).map_err(ServiceError::db)
    }

    async fn delete(&self, id: i32) -> Result<bool, ServiceError> {
        let res = medical_record::Entity::delete_by_id(id).exec(&self.db).await.map_err(ServiceError::db)?;
        Ok(res.rows_affected > 0)
    }
}
