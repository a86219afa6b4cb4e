use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use crate::errors::ModelError;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "client")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub name: String,
    pub email: String,
    /// Digits only.
    pub phone: String,
    pub created_at: DateTimeUtc,
    pub updated_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter)]
pub enum Relation {
    Pet,
}

impl RelationTrait for Relation {
    fn def(&self) -> RelationDef {
        match self { Relation::Pet => Entity::has_many(super::pet::Entity).into() }
    }
}

impl Related<super::pet::Entity> for Entity {
    fn to() -> RelationDef { Relation::Pet.def() }
}

impl ActiveModelBehavior for ActiveModel {}

/// Strip everything that is not an ASCII digit.
pub fn normalize_phone(phone: &str) -> String {
    phone.chars().filter(|c| c.is_ascii_digit()).collect()
}

pub fn is_valid_email(email: &str) -> bool {
    let email = email.trim();
    if email.chars().any(char::is_whitespace) { return false; }
    let Some((local, domain)) = email.split_once('@') else { return false };
    !local.is_empty()
        && !domain.contains('@')
        && domain.contains('.')
        && !domain.starts_with('.')
        && !domain.ends_with('.')
}

/// Validate client fields, returning the normalized phone on success.
pub fn validate(name: &str, email: &str, phone: &str) -> Result<String, ModelError> {
    let mut errors = Vec::new();
    if name.trim().chars().count() < 3 {
        errors.push("name must have at least 3 characters".to_string());
    }
    if !is_valid_email(email) {
        errors.push("invalid email".to_string());
    }
    let digits = normalize_phone(phone);
    if !(10..=11).contains(&digits.len()) {
        errors.push("phone must have 10 or 11 digits".to_string());
    }
    ModelError::check(errors)?;
    Ok(digits)
}
