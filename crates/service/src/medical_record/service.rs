use std::sync::Arc;

use models::medical_record;
use tracing::{info, instrument};

use super::domain::{parse_date, AppendRequest, MedicalRecord, RecordChanges};
use super::repository::{MedicalRecordRepository, NewRecord};
use crate::errors::ServiceError;
use crate::pet::PetRepository;
use crate::upload::{IncomingFile, StoredFile, UploadKind, UploadStore};

pub struct MedicalRecordService {
    repo: Arc<dyn MedicalRecordRepository>,
    pets: Arc<dyn PetRepository>,
    uploads: Arc<UploadStore>,
}

impl MedicalRecordService {
    pub fn new(repo: Arc<dyn MedicalRecordRepository>, pets: Arc<dyn PetRepository>, uploads: Arc<UploadStore>) -> Self {
        Self { repo, pets, uploads }
    }

    async fn ensure_pet(&self, pet_id: i32) -> Result<(), ServiceError> {
        if self.pets.exists(pet_id).await? { Ok(()) } else { Err(ServiceError::not_found("pet")) }
    }

    #[instrument(skip(self, req), fields(files = req.files.len()))]
    pub async fn append(&self, pet_id: i32, req: AppendRequest) -> Result<MedicalRecord, ServiceError> {
        self.ensure_pet(pet_id).await?;

        let mut errors = Vec::new();
        let date = if req.date.trim().is_empty() {
            errors.push("date is required".to_string());
            None
        } else {
            let parsed = parse_date(&req.date);
            if parsed.is_none() {
                errors.push(format!("invalid date: {}", req.date.trim()));
            }
            parsed
        };
        if let Err(e) = medical_record::validate(&req.kind, &req.description, &req.responsible) {
            errors.extend(ServiceError::from(e).into_messages());
        }
        let (Some(date), true) = (date, errors.is_empty()) else {
            return Err(ServiceError::Validation(errors));
        };

        let files = req.files.into_iter().map(|f| f.trim().to_string()).filter(|f| !f.is_empty()).collect();
        let created = self
            .repo
            .insert(NewRecord {
                pet_id,
                date,
                kind: req.kind.trim().to_string(),
                description: req.description.trim().to_string(),
                responsible: req.responsible.trim().to_string(),
                files,
            })
            .await?;
        info!(record_id = created.id, pet_id, "medical_record_appended");
        Ok(created.into())
    }

    pub async fn list_for_pet(&self, pet_id: i32) -> Result<Vec<MedicalRecord>, ServiceError> {
        self.ensure_pet(pet_id).await?;
        Ok(self.repo.list_for_pet(pet_id).await?.into_iter().map(MedicalRecord::from).collect())
    }

    pub async fn get(&self, id: i32) -> Result<MedicalRecord, ServiceError> {
        self.repo.get(id).await?.map(MedicalRecord::from).ok_or_else(|| ServiceError::not_found("medical record"))
    }

    /// Entries are immutable apart from the responsible party.
    #[instrument(skip(self, changes))]
    pub async fn update(&self, id: i32, changes: RecordChanges) -> Result<MedicalRecord, ServiceError> {
        let mut errors = Vec::new();
        for (field, present) in [
            ("date", changes.date.is_some()),
            ("type", changes.kind.is_some()),
            ("description", changes.description.is_some()),
            ("files", changes.files.is_some()),
        ] {
            if present {
                errors.push(format!("{field} cannot be changed"));
            }
        }
        let responsible = changes.responsible.as_deref().map(str::trim).unwrap_or_default();
        if responsible.is_empty() {
            errors.push("responsible is required".to_string());
        }
        if !errors.is_empty() {
            return Err(ServiceError::Validation(errors));
        }
        let updated = self
            .repo
            .set_responsible(id, responsible)
            .await?
            .ok_or_else(|| ServiceError::not_found("medical record"))?;
        info!(record_id = id, "medical_record_responsible_changed");
        Ok(updated.into())
    }

    #[instrument(skip(self))]
    pub async fn delete(&self, id: i32) -> Result<(), ServiceError> {
        if !self.repo.delete(id).await? {
            return Err(ServiceError::not_found("medical record"));
        }
        Ok(())
    }

    /// Store document attachments for a pet's history. Every file is checked
    /// before anything is written; a failed write removes the earlier ones.
    #[instrument(skip(self, files), fields(count = files.len()))]
    pub async fn store_documents(&self, pet_id: i32, files: &[IncomingFile]) -> Result<Vec<StoredFile>, ServiceError> {
        self.ensure_pet(pet_id).await?;
        if files.is_empty() {
            return Err(ServiceError::Validation(vec!["no file received".to_string()]));
        }
        for f in files {
            UploadKind::Document.check(&f.original_name, f.content_type.as_deref())?;
        }
        let mut stored = Vec::with_capacity(files.len());
        for f in files {
            match self.uploads.save(UploadKind::Document, f).await {
                Ok(s) => stored.push(s),
                Err(e) => {
                    for s in &stored {
                        self.uploads.discard(UploadKind::Document, &s.filename).await;
                    }
                    return Err(e);
                }
            }
        }
        info!(pet_id, count = stored.len(), "documents_stored");
        Ok(stored)
    }
}
