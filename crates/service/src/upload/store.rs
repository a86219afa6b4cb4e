use std::path::{Path, PathBuf};

use serde::Serialize;
use tokio::fs;
use tracing::{info, instrument, warn};

use super::policy::{generate_filename, UploadKind};
use crate::errors::ServiceError;

/// A file as received from a multipart body.
#[derive(Debug, Clone)]
pub struct IncomingFile {
    pub original_name: String,
    pub content_type: Option<String>,
    pub bytes: Vec<u8>,
}

/// Where an upload ended up. `url` is served under `/uploads`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StoredFile {
    pub original_name: String,
    pub filename: String,
    pub url: String,
}

/// Writes uploads below a root directory, one subdirectory per kind.
#[derive(Debug, Clone)]
pub struct UploadStore {
    root: PathBuf,
}

impl UploadStore {
    pub fn new(root: impl Into<PathBuf>) -> Self { Self { root: root.into() } }

    pub fn root(&self) -> &Path { &self.root }

    pub async fn ensure_dirs(&self) -> Result<(), ServiceError> {
        for kind in [UploadKind::Photo, UploadKind::Document] {
            fs::create_dir_all(self.root.join(kind.subdir()))
                .await
                .map_err(|e| ServiceError::Storage(e.to_string()))?;
        }
        Ok(())
    }

    pub fn path_of(&self, kind: UploadKind, filename: &str) -> PathBuf {
        self.root.join(kind.subdir()).join(filename)
    }

    /// Check the type, then write under a generated name.
    #[instrument(skip(self, file), fields(original = %file.original_name, size = file.bytes.len()))]
    pub async fn save(&self, kind: UploadKind, file: &IncomingFile) -> Result<StoredFile, ServiceError> {
        kind.check(&file.original_name, file.content_type.as_deref())?;
        let filename = generate_filename(&file.original_name);
        let dir = self.root.join(kind.subdir());
        fs::create_dir_all(&dir).await.map_err(|e| ServiceError::Storage(e.to_string()))?;
        fs::write(dir.join(&filename), &file.bytes)
            .await
            .map_err(|e| ServiceError::Storage(e.to_string()))?;
        info!(%filename, "upload_stored");
        Ok(StoredFile {
            original_name: file.original_name.clone(),
            url: format!("/uploads/{}/{}", kind.subdir(), filename),
            filename,
        })
    }

    /// Best-effort removal, used to roll back a write whose record failed.
    pub async fn discard(&self, kind: UploadKind, filename: &str) {
        if let Err(e) = fs::remove_file(self.path_of(kind, filename)).await {
            warn!(%filename, error = %e, "upload_discard_failed");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_store() -> UploadStore {
        UploadStore::new(std::env::temp_dir().join(format!("lolli-store-{}", uuid::Uuid::new_v4())))
    }

    #[tokio::test]
    async fn saves_under_kind_directory() {
        let store = temp_store();
        let file = IncomingFile { original_name: "rex.png".into(), content_type: Some("image/png".into()), bytes: vec![1, 2, 3] };
        let stored = store.save(UploadKind::Photo, &file).await.unwrap();
        assert!(stored.url.starts_with("/uploads/images/"));
        assert!(stored.filename.ends_with(".png"));
        let on_disk = fs::read(store.path_of(UploadKind::Photo, &stored.filename)).await.unwrap();
        assert_eq!(on_disk, vec![1, 2, 3]);

        store.discard(UploadKind::Photo, &stored.filename).await;
        assert!(!store.path_of(UploadKind::Photo, &stored.filename).exists());
    }

    #[tokio::test]
    async fn rejected_type_writes_nothing() {
        let store = temp_store();
        store.ensure_dirs().await.unwrap();
        let file = IncomingFile { original_name: "notes.txt".into(), content_type: Some("text/plain".into()), bytes: b"hi".to_vec() };
        assert!(matches!(store.save(UploadKind::Photo, &file).await, Err(ServiceError::UnexpectedFileType(_))));
        let mut entries = fs::read_dir(store.root().join("images")).await.unwrap();
        assert!(entries.next_entry().await.unwrap().is_none());
    }
}
