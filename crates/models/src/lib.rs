pub mod errors;
pub mod db;
pub mod client;
pub mod pet;
pub mod veterinarian;
pub mod appointment;
pub mod medical_record;
pub mod photo;

#[cfg(test)]
mod tests;
