use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use crate::errors::ModelError;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "veterinarian")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub name: String,
    pub created_at: DateTimeUtc,
    pub updated_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter)]
pub enum Relation {
    Appointment,
}

impl RelationTrait for Relation {
    fn def(&self) -> RelationDef {
        match self { Relation::Appointment => Entity::has_many(super::appointment::Entity).into() }
    }
}

impl Related<super::appointment::Entity> for Entity {
    fn to() -> RelationDef { Relation::Appointment.def() }
}

impl ActiveModelBehavior for ActiveModel {}

pub fn validate(name: &str) -> Result<(), ModelError> {
    if name.trim().is_empty() {
        return Err(ModelError::Validation(vec!["veterinarian name is required".into()]));
    }
    Ok(())
}
