use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "photo")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub pet_id: i32,
    pub original_name: String,
    /// Name under `<uploads>/images`.
    pub filename: String,
    pub created_at: DateTimeUtc,
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
