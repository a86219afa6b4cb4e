//! Appointment entity and its status state machine.
//!
//! ```text
//! agendado ──► confirmado ──► concluido
//!    │             │
//!    └─────────────┴──► cancelado
//! ```
//! `concluido` and `cancelado` are terminal.
use std::fmt;
use std::str::FromStr;

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use crate::errors::ModelError;

pub const NOTES_MAX_CHARS: usize = 500;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(16))")]
#[serde(rename_all = "lowercase")]
pub enum ServiceLine {
    /// Veterinary consultation.
    #[sea_orm(string_value = "clinico")]
    Clinico,
    /// Grooming / aesthetics.
    #[sea_orm(string_value = "petshop")]
    Petshop,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(16))")]
#[serde(rename_all = "lowercase")]
pub enum AppointmentStatus {
    #[sea_orm(string_value = "agendado")]
    Agendado,
    #[sea_orm(string_value = "confirmado")]
    Confirmado,
    #[sea_orm(string_value = "concluido")]
    Concluido,
    #[sea_orm(string_value = "cancelado")]
    Cancelado,
}

impl ServiceLine {
    pub fn as_str(self) -> &'static str {
        match self {
            ServiceLine::Clinico => "clinico",
            ServiceLine::Petshop => "petshop",
        }
    }
}

impl AppointmentStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            AppointmentStatus::Agendado => "agendado",
            AppointmentStatus::Confirmado => "confirmado",
            AppointmentStatus::Concluido => "concluido",
            AppointmentStatus::Cancelado => "cancelado",
        }
    }

    pub fn is_terminal(self) -> bool {
        matches!(self, AppointmentStatus::Concluido | AppointmentStatus::Cancelado)
    }

    /// Whether `self -> next` is an allowed edge. Self-loops are never allowed.
    pub fn can_transition_to(self, next: AppointmentStatus) -> bool {
        use AppointmentStatus::*;
        matches!(
            (self, next),
            (Agendado, Confirmado) | (Agendado, Cancelado) | (Confirmado, Concluido) | (Confirmado, Cancelado)
        )
    }
}

impl fmt::Display for ServiceLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { f.write_str(self.as_str()) }
}

impl fmt::Display for AppointmentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { f.write_str(self.as_str()) }
}

impl FromStr for ServiceLine {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "clinico" => Ok(ServiceLine::Clinico),
            "petshop" => Ok(ServiceLine::Petshop),
            other => Err(ModelError::Validation(vec![format!("unknown service line '{other}'")])),
        }
    }
}

impl FromStr for AppointmentStatus {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "agendado" => Ok(AppointmentStatus::Agendado),
            "confirmado" => Ok(AppointmentStatus::Confirmado),
            "concluido" => Ok(AppointmentStatus::Concluido),
            "cancelado" => Ok(AppointmentStatus::Cancelado),
            other => Err(ModelError::Validation(vec![format!("unknown status '{other}'")])),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "appointment")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub pet_id: i32,
    pub veterinarian_id: Option<i32>,
    pub service_line: ServiceLine,
    /// Always UTC.
    pub scheduled_at: DateTimeUtc,
    pub status: AppointmentStatus,
    #[sea_orm(column_type = "Text", nullable)]
    pub notes: Option<String>,
    pub created_at: DateTimeUtc,
    pub updated_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter)]
pub enum Relation {
    Pet,
    Veterinarian,
}

impl RelationTrait for Relation {
    fn def(&self) -> RelationDef {
        match self {
            Relation::Pet => Entity::belongs_to(super::pet::Entity)
                .from(Column::PetId)
                .to(super::pet::Column::Id)
                .on_delete(ForeignKeyAction::Cascade)
                .into(),
            Relation::Veterinarian => Entity::belongs_to(super::veterinarian::Entity)
                .from(Column::VeterinarianId)
                .to(super::veterinarian::Column::Id)
                .on_delete(ForeignKeyAction::SetNull)
                .into(),
        }
    }
}

impl Related<super::pet::Entity> for Entity {
    fn to() -> RelationDef { Relation::Pet.def() }
}

impl Related<super::veterinarian::Entity> for Entity {
    fn to() -> RelationDef { Relation::Veterinarian.def() }
}

impl ActiveModelBehavior for ActiveModel {}

pub fn validate_notes(notes: Option<&str>) -> Vec<String> {
    match notes {
        Some(n) if n.chars().count() > NOTES_MAX_CHARS => {
            vec![format!("notes must have at most {NOTES_MAX_CHARS} characters")]
        }
        _ => Vec::new(),
    }
}
