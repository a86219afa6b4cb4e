use std::sync::Arc;

use models::{client, pet};
use serde::Serialize;
use tracing::{info, instrument};

use crate::client::repository::{ClientRepository, NewClient};
use crate::errors::ServiceError;
use crate::pet::{NewPet, PetRepository};
use crate::upload::{UploadKind, UploadStore};

/// A client as returned by create: with the pets registered alongside.
#[derive(Debug, Clone, Serialize)]
pub struct ClientWithPets {
    #[serde(flatten)]
    pub client: client::Model,
    pub pets: Vec<pet::Model>,
}

/// Client registry. Validation is collected across the client and every pet.
pub struct ClientService {
    repo: Arc<dyn ClientRepository>,
    pets: Arc<dyn PetRepository>,
    uploads: Arc<UploadStore>,
}

impl ClientService {
    pub fn new(repo: Arc<dyn ClientRepository>, pets: Arc<dyn PetRepository>, uploads: Arc<UploadStore>) -> Self {
        Self { repo, pets, uploads }
    }

    fn validate(name: &str, email: &str, phone: &str, pets: &[NewPet]) -> Result<NewClient, ServiceError> {
        let mut errors = Vec::new();
        let phone = match client::validate(name, email, phone) {
            Ok(digits) => digits,
            Err(e) => {
                errors.extend(ServiceError::from(e).into_messages());
                String::new()
            }
        };
        for (i, p) in pets.iter().enumerate() {
            if let Err(e) = pet::validate(&p.name, &p.species) {
                errors.extend(ServiceError::from(e).into_messages().into_iter().map(|m| format!("pets[{i}]: {m}")));
            }
        }
        if !errors.is_empty() {
            return Err(ServiceError::Validation(errors));
        }
        Ok(NewClient { name: name.trim().to_string(), email: email.trim().to_string(), phone })
    }

    #[instrument(skip(self, pets), fields(pets = pets.len()))]
    pub async fn create(&self, name: &str, email: &str, phone: &str, pets: Vec<NewPet>) -> Result<ClientWithPets, ServiceError> {
        let input = Self::validate(name, email, phone, &pets)?;
        let (client, pets) = self.repo.create(input, pets).await?;
        info!(client_id = client.id, pets = pets.len(), "client_created");
        Ok(ClientWithPets { client, pets })
    }

    pub async fn get(&self, id: i32) -> Result<client::Model, ServiceError> {
        self.repo.get(id).await?.ok_or_else(|| ServiceError::not_found("client"))
    }

    pub async fn list(&self) -> Result<Vec<client::Model>, ServiceError> { self.repo.list().await }

    /// Partial update: absent fields keep their stored value; the merged
    /// result is validated as a whole.
    #[instrument(skip(self, name, email, phone))]
    pub async fn update(&self, id: i32, name: Option<&str>, email: Option<&str>, phone: Option<&str>) -> Result<client::Model, ServiceError> {
        let current = self.get(id).await?;
        let input = Self::validate(
            name.unwrap_or(&current.name),
            email.unwrap_or(&current.email),
            phone.unwrap_or(&current.phone),
            &[],
        )?;
        self.repo.update(id, input).await?.ok_or_else(|| ServiceError::not_found("client"))
    }

    /// Removes the client with its pets, their history and photo files.
    #[instrument(skip(self))]
    pub async fn delete(&self, id: i32) -> Result<(), ServiceError> {
        let mut files = Vec::new();
        for pet in self.pets.list(Some(id)).await? {
            files.extend(self.pets.photos(pet.id).await?.into_iter().map(|p| p.filename));
        }
        if !self.repo.delete(id).await? {
            return Err(ServiceError::not_found("client"));
        }
        for filename in &files {
            self.uploads.discard(UploadKind::Photo, filename).await;
        }
        info!(client_id = id, photos = files.len(), "client_deleted");
        Ok(())
    }
}
