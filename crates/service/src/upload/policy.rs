use std::path::Path;

use rand::Rng;

use crate::errors::ServiceError;

const PHOTO_TYPES: [&str; 3] = ["image/png", "image/jpeg", "image/jpg"];
const DOCUMENT_TYPES: [&str; 4] = ["image/png", "image/jpeg", "image/jpg", "application/pdf"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UploadKind {
    /// Pet pictures, under `images/`.
    Photo,
    /// Medical record attachments, under `files/`.
    Document,
}

impl UploadKind {
    pub fn subdir(self) -> &'static str {
        match self {
            UploadKind::Photo => "images",
            UploadKind::Document => "files",
        }
    }

    pub fn allowed_types(self) -> &'static [&'static str] {
        match self {
            UploadKind::Photo => &PHOTO_TYPES,
            UploadKind::Document => &DOCUMENT_TYPES,
        }
    }

    pub fn rejection_message(self) -> &'static str {
        match self {
            UploadKind::Photo => "file must be PNG or JPG",
            UploadKind::Document => "invalid file type (accepts PNG/JPG/PDF)",
        }
    }

    /// The extension must name an accepted type, and so must the declared
    /// content type when one was sent. Stored files keep the extension.
    pub fn check(self, original_name: &str, content_type: Option<&str>) -> Result<(), ServiceError> {
        let allowed = self.allowed_types();
        let by_extension = mime_from_extension(original_name).filter(|m| allowed.contains(m));
        let declared_ok = content_type
            .map(|ct| ct.split(';').next().unwrap_or(ct).trim().to_ascii_lowercase())
            .filter(|ct| !ct.is_empty() && ct != "application/octet-stream")
            .map_or(true, |ct| allowed.contains(&ct.as_str()));
        if by_extension.is_some() && declared_ok {
            Ok(())
        } else {
            Err(ServiceError::UnexpectedFileType(self.rejection_message().to_string()))
        }
    }
}

fn mime_from_extension(name: &str) -> Option<&'static str> {
    let ext = Path::new(name).extension()?.to_str()?.to_ascii_lowercase();
    match ext.as_str() {
        "png" => Some("image/png"),
        "jpg" | "jpeg" => Some("image/jpeg"),
        "pdf" => Some("application/pdf"),
        _ => None,
    }
}

/// `{epoch-millis}_{10000..=19999}{.ext}`; the extension is empty when the
/// original name has none.
pub fn generate_filename(original_name: &str) -> String {
    let ext = Path::new(original_name)
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| format!(".{e}"))
        .unwrap_or_default();
    let suffix: u32 = rand::thread_rng().gen_range(10000..20000);
    format!("{}_{}{}", chrono::Utc::now().timestamp_millis(), suffix, ext)
}
