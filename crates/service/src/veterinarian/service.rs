use std::sync::Arc;

use models::veterinarian;
use tracing::{info, instrument};

use crate::errors::ServiceError;
use crate::veterinarian::repository::VeterinarianRepository;

pub struct VeterinarianService {
    repo: Arc<dyn VeterinarianRepository>,
}

impl VeterinarianService {
    pub fn new(repo: Arc<dyn VeterinarianRepository>) -> Self { Self { repo } }

    #[instrument(skip(self))]
    pub async fn create(&self, name: &str) -> Result<veterinarian::Model, ServiceError> {
        veterinarian::validate(name)?;
        let created = self.repo.create(name.trim()).await?;
        info!(veterinarian_id = created.id, "veterinarian_created");
        Ok(created)
    }

    pub async fn get(&self, id: i32) -> Result<veterinarian::Model, ServiceError> {
        self.repo.get(id).await?.ok_or_else(|| ServiceError::not_found("veterinarian"))
    }

    pub async fn list(&self) -> Result<Vec<veterinarian::Model>, ServiceError> { self.repo.list().await }

    pub async fn update(&self, id: i32, name: &str) -> Result<veterinarian::Model, ServiceError> {
        veterinarian::validate(name)?;
        self.repo.update(id, name.trim()).await?.ok_or_else(|| ServiceError::not_found("veterinarian"))
    }

    /// Appointments assigned to this veterinarian keep existing, unassigned.
    #[instrument(skip(self))]
    pub async fn delete(&self, id: i32) -> Result<(), ServiceError> {
        if !self.repo.delete(id).await? {
            return Err(ServiceError::not_found("veterinarian"));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use crate::errors::ServiceError;
    use crate::test_support::fixture;

    #[tokio::test]
    async fn crud() -> anyhow::Result<()> {
        let f = fixture().await?;
        assert!(matches!(f.veterinarians.create("  ").await, Err(ServiceError::Model(_))));
        let v = f.veterinarians.create("Dra. Ana Lima").await?;
        let v = f.veterinarians.update(v.id, "Dra. Ana Lima Costa").await?;
        assert_eq!(f.veterinarians.get(v.id).await?.name, "Dra. Ana Lima Costa");
        assert_eq!(f.veterinarians.list().await?.len(), 1);
        f.veterinarians.delete(v.id).await?;
        assert!(matches!(f.veterinarians.get(v.id).await, Err(ServiceError::NotFound(_))));
        Ok(())
    }
}
