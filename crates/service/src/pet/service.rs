use std::sync::Arc;

use models::{pet, photo};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{info, instrument};

use crate::client::ClientRepository;
use crate::errors::ServiceError;
use crate::input;
use crate::pet::repository::{NewPet, PetRepository};
use crate::upload::{IncomingFile, StoredFile, UploadKind, UploadStore};

/// A stored photo with its public URL.
#[derive(Debug, Clone, Serialize)]
pub struct PhotoView {
    #[serde(flatten)]
    pub photo: photo::Model,
    pub url: String,
}

impl From<photo::Model> for PhotoView {
    fn from(photo: photo::Model) -> Self {
        let url = format!("/uploads/{}/{}", UploadKind::Photo.subdir(), photo.filename);
        Self { photo, url }
    }
}

/// `POST /pets` body: the owner id plus the pet fields, checked together.
#[derive(Debug, Clone, Deserialize)]
pub struct PetDraft {
    #[serde(default, alias = "cliente_id")]
    pub client_id: Option<Value>,
    #[serde(flatten)]
    pub pet: NewPet,
}

pub struct PetService {
    pets: Arc<dyn PetRepository>,
    clients: Arc<dyn ClientRepository>,
    uploads: Arc<UploadStore>,
}

impl PetService {
    pub fn new(pets: Arc<dyn PetRepository>, clients: Arc<dyn ClientRepository>, uploads: Arc<UploadStore>) -> Self {
        Self { pets, clients, uploads }
    }

    fn normalize(mut input: NewPet) -> Result<NewPet, ServiceError> {
        pet::validate(&input.name, &input.species)?;
        input.name = input.name.trim().to_string();
        input.species = input.species.trim().to_string();
        input.breed = input.breed.map(|b| b.trim().to_string()).filter(|b| !b.is_empty());
        Ok(input)
    }

    #[instrument(skip(self, input))]
    pub async fn create(&self, client_id: i32, input: NewPet) -> Result<pet::Model, ServiceError> {
        let input = Self::normalize(input)?;
        if self.clients.get(client_id).await?.is_none() {
            return Err(ServiceError::not_found("client"));
        }
        let created = self.pets.create(client_id, input).await?;
        info!(pet_id = created.id, client_id, "pet_created");
        Ok(created)
    }

    /// Validate owner id and pet fields in one pass, then [`Self::create`].
    pub async fn create_draft(&self, draft: PetDraft) -> Result<pet::Model, ServiceError> {
        let mut errors = Vec::new();
        let client_id = input::required_id("client_id", draft.client_id.as_ref()).map_err(|e| errors.push(e)).ok();
        if let Err(e) = pet::validate(&draft.pet.name, &draft.pet.species) {
            errors.extend(ServiceError::from(e).into_messages());
        }
        match client_id {
            Some(client_id) if errors.is_empty() => self.create(client_id, draft.pet).await,
            _ => Err(ServiceError::Validation(errors)),
        }
    }

    pub async fn get(&self, id: i32) -> Result<pet::Model, ServiceError> {
        self.pets.get(id).await?.ok_or_else(|| ServiceError::not_found("pet"))
    }

    pub async fn list(&self, client_id: Option<i32>) -> Result<Vec<pet::Model>, ServiceError> {
        self.pets.list(client_id).await
    }

    #[instrument(skip(self, input))]
    pub async fn update(&self, id: i32, input: NewPet) -> Result<pet::Model, ServiceError> {
        let input = Self::normalize(input)?;
        self.pets.update(id, input).await?.ok_or_else(|| ServiceError::not_found("pet"))
    }

    /// Removes the pet along with its appointments, history and photos.
    #[instrument(skip(self))]
    pub async fn delete(&self, id: i32) -> Result<(), ServiceError> {
        let photos = self.pets.photos(id).await?;
        if !self.pets.delete(id).await? {
            return Err(ServiceError::not_found("pet"));
        }
        for photo in &photos {
            self.uploads.discard(UploadKind::Photo, &photo.filename).await;
        }
        info!(pet_id = id, photos = photos.len(), "pet_deleted");
        Ok(())
    }

    /// Store a photo file and attach it to the pet. The file is removed again
    /// if the record cannot be written.
    #[instrument(skip(self, file), fields(original = %file.original_name))]
    pub async fn attach_photo(&self, pet_id: i32, file: &IncomingFile) -> Result<PhotoView, ServiceError> {
        if !self.pets.exists(pet_id).await? {
            return Err(ServiceError::not_found("pet"));
        }
        let StoredFile { original_name, filename, .. } = self.uploads.save(UploadKind::Photo, file).await?;
        match self.pets.add_photo(pet_id, &original_name, &filename).await {
            Ok(photo) => {
                info!(pet_id, photo_id = photo.id, "photo_attached");
                Ok(photo.into())
            }
            Err(e) => {
                self.uploads.discard(UploadKind::Photo, &filename).await;
                Err(e)
            }
        }
    }

    pub async fn photos(&self, pet_id: i32) -> Result<Vec<PhotoView>, ServiceError> {
        if !self.pets.exists(pet_id).await? {
            return Err(ServiceError::not_found("pet"));
        }
        Ok(self.pets.photos(pet_id).await?.into_iter().map(PhotoView::from).collect())
    }
}
