use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use crate::errors::ModelError;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "pet")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub client_id: i32,
    pub name: String,
    pub species: String,
    pub breed: Option<String>,
    pub created_at: DateTimeUtc,
    pub updated_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter)]
pub enum Relation {
    Client,
    Appointment,
    MedicalRecord,
    Photo,
}

impl RelationTrait for Relation {
    fn def(&self) -> RelationDef {
        match self {
            Relation::Client => Entity::belongs_to(super::client::Entity)
                .from(Column::ClientId)
                .to(super::client::Column::Id)
                .on_delete(ForeignKeyAction::Cascade)
                .into(),
            Relation::Appointment => Entity::has_many(super::appointment::Entity).into(),
            Relation::MedicalRecord => Entity::has_many(super::medical_record::Entity).into(),
            Relation::Photo => Entity::has_many(super::photo::Entity).into(),
        }
    }
}

impl Related<super::client::Entity> for Entity {
    fn to() -> RelationDef { Relation::Client.def() }
}

impl Related<super::appointment::Entity> for Entity {
    fn to() -> RelationDef { Relation::Appointment.def() }
}

impl Related<super::medical_record::Entity> for Entity {
    fn to() -> RelationDef { Relation::MedicalRecord.def() }
}

impl Related<super::photo::Entity> for Entity {
    fn to() -> RelationDef { Relation::Photo.def() }
}

impl ActiveModelBehavior for ActiveModel {}

pub fn validate(name: &str, species: &str) -> Result<(), ModelError> {
    let mut errors = Vec::new();
    if name.trim().is_empty() { errors.push("pet name is required".to_string()); }
    if species.trim().is_empty() { errors.push("pet species is required".to_string()); }
    ModelError::check(errors)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn name_and_species_required() {
        assert!(validate("Rex", "cachorro").is_ok());
        match validate(" ", "") {
            Err(ModelError::Validation(msgs)) => assert_eq!(msgs.len(), 2),
            other => panic!("unexpected: {other:?}"),
        }
    }
}
