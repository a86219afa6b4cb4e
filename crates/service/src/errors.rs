use models::appointment::AppointmentStatus;
use sea_orm::DbErr;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("validation error: {}", .0.join("; "))]
    Validation(Vec<String>),
    #[error("not found: {0}")]
    NotFound(String),
    #[error("conflict: {0}")]
    Conflict(String),
    #[error("invalid status transition from {from} to {to}")]
    InvalidTransition { from: AppointmentStatus, to: AppointmentStatus },
    #[error("{0}")]
    UnexpectedFileType(String),
    #[error("storage error: {0}")]
    Storage(String),
    #[error("database error: {0}")]
    Db(String),
    #[error("model error: {0}")]
    Model(#[from] models::errors::ModelError),
}

impl ServiceError {
    pub fn not_found(entity: &str) -> Self { Self::NotFound(format!("{} not found", entity)) }

    pub fn db(e: DbErr) -> Self { Self::Db(e.to_string()) }

    pub fn into_messages(self) -> Vec<String> {
        match self {
            ServiceError::Validation(m) | ServiceError::Model(models::errors::ModelError::Validation(m)) => m,
            other => vec![other.to_string()],
        }
    }
}
