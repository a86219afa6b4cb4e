//! Pet medical history ("prontuário"): dated entries with optional attachments.

pub mod domain;
pub mod repository;
pub mod service;

pub use domain::{AppendRequest, MedicalRecord, RecordChanges};
pub use repository::{MedicalRecordRepository, SeaOrmMedicalRecordRepository};
pub use service::MedicalRecordService;
