use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use crate::errors::ModelError;

/// One dated entry in a pet's history.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "medical_record")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub pet_id: i32,
    pub date: Date,
    /// Kind of entry (consulta, vacina, exame...).
    pub kind: String,
    #[sea_orm(column_type = "Text")]
    pub description: String,
    pub responsible: String,
    /// JSON array of upload references, or NULL when nothing is attached.
    #[sea_orm(column_type = "Text", nullable)]
    pub files: Option<String>,
    pub created_at: DateTimeUtc,
    pub updated_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter)]
pub enum Relation {
    Pet,
}

impl RelationTrait for Relation {
    fn def(&self) -> RelationDef {
        match self {
            Relation::Pet => Entity::belongs_to(super::pet::Entity)
                .from(Column::PetId)
                .to(super::pet::Column::Id)
                .on_delete(ForeignKeyAction::Cascade)
                .into(),
        }
    }
}

impl Related<super::pet::Entity> for Entity {
    fn to() -> RelationDef { Relation::Pet.def() }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    /// Decoded file references; a malformed column reads as empty.
    pub fn file_list(&self) -> Vec<String> {
        self.files
            .as_deref()
            .and_then(|raw| serde_json::from_str(raw).ok())
            .unwrap_or_default()
    }
}

/// Encode file references for storage. An empty list is stored as NULL.
pub fn encode_files(files: &[String]) -> Result<Option<String>, ModelError> {
    if files.is_empty() {
        return Ok(None);
    }
    serde_json::to_string(files).map(Some).map_err(|e| ModelError::Db(e.to_string()))
}

pub fn validate(kind: &str, description: &str, responsible: &str) -> Result<(), ModelError> {
    let mut errors = Vec::new();
    if kind.trim().is_empty() { errors.push("type is required".to_string()); }
    if description.trim().is_empty() { errors.push("description is required".to_string()); }
    if responsible.trim().is_empty() { errors.push("responsible is required".to_string()); }
    ModelError::check(errors)
}
