pub mod repository;
pub mod service;

pub use repository::{SeaOrmVeterinarianRepository, VeterinarianRepository};
pub use service::VeterinarianService;
