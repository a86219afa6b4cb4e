use async_trait::async_trait;
use chrono::Utc;
use models::{pet, photo};
use sea_orm::{ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, Set};
use serde::Deserialize;

use crate::errors::ServiceError;

#[derive(Debug, Clone, Deserialize)]
pub struct NewPet {
    #[serde(default, alias = "nome")]
    pub name: String,
    #[serde(default, alias = "especie")]
    pub species: String,
    #[serde(default, alias = "raca")]
    pub breed: Option<String>,
}

#[async_trait]
pub trait PetRepository: Send + Sync {
    async fn create(&self, client_id: i32, pet: NewPet) -> Result<pet::Model, ServiceError>;
    async fn get(&self, id: i32) -> Result<Option<pet::Model>, ServiceError>;
    async fn list(&self, client_id: Option<i32>) -> Result<Vec<pet::Model>, ServiceError>;
    async fn update(&self, id: i32, pet: NewPet) -> Result<Option<pet::Model>, ServiceError>;
    async fn delete(&self, id: i32) -> Result<bool, ServiceError>;
    async fn add_photo(&self, pet_id: i32, original_name: &str, filename: &str) -> Result<photo::Model, ServiceError>;
    async fn photos(&self, pet_id: i32) -> Result<Vec<photo::Model>, ServiceError>;

    async fn exists(&self, id: i32) -> Result<bool, ServiceError> {
        Ok(self.get(id).await?.is_some())
    }
}

/// SeaORM-backed repository implementation.
pub struct SeaOrmPetRepository {
    pub db: DatabaseConnection,
}

#[async_trait]
impl PetRepository for SeaOrmPetRepository {
    async fn create(&self, client_id: i32, input: NewPet) -> Result<pet::Model, ServiceError> {
        let now = Utc::now();
        pet::ActiveModel {
            client_id: Set(client_id),
            name: Set(input.name),
            species: Set(input.species),
            breed: Set(input.breed),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        }
        .insert(&self.db)
        .await
        .map_err(ServiceError::db)
    }

    async fn get(&self, id: i32) -> Result<Option<pet::Model>, ServiceError> {
        pet::Entity::find_by_id(id).one(&self.db).await.map_err(ServiceError::db)
    }

    async fn list(&self, client_id: Option<i32>) -> Result<Vec<pet::Model>, ServiceError> {
        let mut q = pet::Entity::find();
        if let Some(cid) = client_id {
            q = q.filter(pet::Column::ClientId.eq(cid));
        }
        q.order_by_asc(pet::Column::Name)
            .order_by_asc(pet::Column::Id)
            .all(&self.db)
            .await
            .map_err(ServiceError::db)
    }

    async fn update(&self, id: i32, input: NewPet) -> Result<Option<pet::Model>, ServiceError> {
        let Some(found) = self.get(id).await? else { return Ok(None) };
        let mut am: pet::ActiveModel = found.into();
        am.name = Set(input.name);
        am.species = Set(input.species);
        am.breed = Set(input.breed);
        am.updated_at = Set(Utc::now());
        am.update(&self.db).await.map(Some).map_err(ServiceError::db)
    }

    async fn delete(&self, id: i32) -> Result<bool, ServiceError> {
        let res = pet::Entity::delete_by_id(id).exec(&self.db).await.map_err(ServiceError::db)?;
        Ok(res.rows_affected > 0)
    }

    async fn add_photo(&self, pet_id: i32, original_name: &str, filename: &str) -> Result<photo::Model, ServiceError> {
        photo::ActiveModel {
            pet_id: Set(pet_id),
            original_name: Set(original_name.to_string()),
            filename: Set(filename.to_string()),
            created_at: Set(Utc::now()),
            ..Default::default()
        }
        .insert(&self.db)
        .await
        .map_err(ServiceError::db)
    }

    async fn photos(&self, pet_id: i32) -> Result<Vec<photo::Model>, ServiceError> {
        photo::Entity::find()
            .filter(photo::Column::PetId.eq(pet_id))
            .order_by_asc(photo::Column::Id)
            .all(&self.db)
            .await
            .map_err(ServiceError::db)
    }
}
