use async_trait::async_trait;
use chrono::Utc;
use models::veterinarian;
use sea_orm::{ActiveModelTrait, DatabaseConnection, EntityTrait, QueryOrder, Set};

use crate::errors::ServiceError;

#[async_trait]
pub trait VeterinarianRepository: Send + Sync {
    async fn create(&self, name: &str) -> Result<veterinarian::Model, ServiceError>;
    async fn get(&self, id: i32) -> Result<Option<veterinarian::Model>, ServiceError>;
    async fn list(&self) -> Result<Vec<veterinarian::Model>, ServiceError>;
    async fn update(&self, id: i32, name: &str) -> Result<Option<veterinarian::Model>, ServiceError>;
    async fn delete(&self, id: i32) -> Result<bool, ServiceError>;
}

pub struct SeaOrmVeterinarianRepository {
    pub db: DatabaseConnection,
}

#[async_trait]
impl VeterinarianRepository for SeaOrmVeterinarianRepository {
    async fn create(&self, name: &str) -> Result<veterinarian::Model, ServiceError> {
        let now = Utc::now();
        veterinarian::ActiveModel {
            name: Set(name.to_string()),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        }
        .insert(&self.db)
        .await
        .map_err(ServiceError::db)
    }

    async fn get(&self, id: i32) -> Result<Option<veterinarian::Model>, ServiceError> {
        veterinarian::Entity::find_by_id(id).one(&self.db).await.map_err(ServiceError::db)
    }

    async fn list(&self) -> Result<Vec<veterinarian::Model>, ServiceError> {
        veterinarian::Entity::find()
            .order_by_asc(veterinarian::Column::Name)
            .all(&self.db)
            .await
            .map_err(ServiceError::db)
    }

    async fn update(&self, id: i32, name: &str) -> Result<Option<veterinarian::Model>, ServiceError> {
        let Some(found) = self.get(id).await? else { return Ok(None) };
        let mut am: veterinarian::ActiveModel = found.into();
        am.name = Set(name.to_string());
        am.updated_at = Set(Utc::now());
        am.update(&self.db).await.map(Some).map_err(ServiceError::db)
    }

    async fn delete(&self, id: i32) -> Result<bool, ServiceError> {
        let res = veterinarian::Entity::delete_by_id(id).exec(&self.db).await.map_err(ServiceError::db)?;
        Ok(res.rows_affected > 0)
    }
}
