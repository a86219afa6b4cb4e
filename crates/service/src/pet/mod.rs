//! Pets and their photos.

pub mod repository;
pub mod service;

pub use repository::{NewPet, PetRepository, SeaOrmPetRepository};
pub use service::{PetDraft, PetService, PhotoView};
