//! Service layer providing the clinic's business operations on top of models.
//! - Separates business rules (scheduling, status transitions, history) from data access.
//! - Each entity is reached through a repository trait; SeaORM implementations are injected.
//! - Reuses validation and entity definitions in the `models` crate.

pub mod errors;
pub mod input;
pub mod auth;
pub mod runtime;
pub mod upload;
pub mod client;
pub mod pet;
pub mod veterinarian;
pub mod appointment;
pub mod medical_record;
#[cfg(test)]
pub mod test_support;
