//! Clients (pet owners): repository + service.

pub mod repository;
pub mod service;

pub use repository::{ClientRepository, NewClient, SeaOrmClientRepository};
pub use service::{ClientService, ClientWithPets};
