//! Appointment scheduling for the clinical and pet-shop lines.
//!
//! Invariants:
//! - a pet holds at most one non-cancelled appointment per (service line, instant);
//! - status only moves along the edges in [`models::appointment::AppointmentStatus::can_transition_to`].

pub mod domain;
pub mod repository;
pub mod service;

pub use domain::{AppointmentFilter, ScheduleDraft, ScheduleRequest, UpperBound};
pub use repository::{AppointmentRepository, SeaOrmAppointmentRepository};
pub use service::AppointmentService;
