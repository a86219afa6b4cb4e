use async_trait::async_trait;
use chrono::Utc;
use models::{client, pet};
use sea_orm::{ActiveModelTrait, DatabaseConnection, EntityTrait, QueryOrder, Set, TransactionTrait};

use crate::errors::ServiceError;
use crate::pet::NewPet;

/// Validated client fields (phone already reduced to digits).
#[derive(Debug, Clone)]
pub struct NewClient {
    pub name: String,
    pub email: String,
    pub phone: String,
}

#[async_trait]
pub trait ClientRepository: Send + Sync {
    /// Insert the client and its pets atomically.
    async fn create(&self, client: NewClient, pets: Vec<NewPet>) -> Result<(client::Model, Vec<pet::Model>), ServiceError>;
    async fn get(&self, id: i32) -> Result<Option<client::Model>, ServiceError>;
    async fn list(&self) -> Result<Vec<client::Model>, ServiceError>;
    async fn update(&self, id: i32, client: NewClient) -> Result<Option<client::Model>, ServiceError>;
    async fn delete(&self, id: i32) -> Result<bool, ServiceError>;
}

/// SeaORM-backed repository implementation.
pub struct SeaOrmClientRepository {
    pub db: DatabaseConnection,
}

#[async_trait]
impl ClientRepository for SeaOrmClientRepository {
    async fn create(&self, input: NewClient, pets: Vec<NewPet>) -> Result<(client::Model, Vec<pet::Model>), ServiceError> {
        let txn = self.db.begin().await.map_err(ServiceError::db)?;
        let now = Utc::now();
        let created = client::ActiveModel {
            name: Set(input.name),
            email: Set(input.email),
            phone: Set(input.phone),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        }
        .insert(&txn)
        .await
        .map_err(ServiceError::db)?;

        let mut created_pets = Vec::with_capacity(pets.len());
        for p in pets {
            let row = pet::ActiveModel {
                client_id: Set(created.id),
                name: Set(p.name),
                species: Set(p.species),
                breed: Set(p.breed),
                created_at: Set(now),
                updated_at: Set(now),
                ..Default::default()
            }
            .insert(&txn)
            .await
            .map_err(ServiceError::db)?;
            created_pets.push(row);
        }
        txn.commit().await.map_err(ServiceError::db)?;
        Ok((created, created_pets))
    }

    async fn get(&self, id: i32) -> Result<Option<client::Model>, ServiceError> {
        client::Entity::find_by_id(id).one(&self.db).await.map_err(ServiceError::db)
    }

    async fn list(&self) -> Result<Vec<client::Model>, ServiceError> {
        client::Entity::find()
            .order_by_asc(client::Column::Name)
            .order_by_asc(client::Column::Id)
            .all(&self.db)
            .await
            .map_err(ServiceError::db)
    }

    async fn update(&self, id: i32, input: NewClient) -> Result<Option<client::Model>, ServiceError> {
        let Some(found) = self.get(id).await? else { return Ok(None) };
        let mut am: client::ActiveModel = found.into();
        am.name = Set(input.name);
        am.email = Set(input.email);
        am.phone = Set(input.phone);
        am.updated_at = Set(Utc::now());
        am.update(&self.db).await.map(Some).map_err(ServiceError::db)
    }

    async fn delete(&self, id: i32) -> Result<bool, ServiceError> {
        let res = client::Entity::delete_by_id(id).exec(&self.db).await.map_err(ServiceError::db)?;
        Ok(res.rows_affected > 0)
    }
}
