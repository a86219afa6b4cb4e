use std::sync::Arc;

use models::appointment::{self, AppointmentStatus};
use tracing::{info, instrument, warn};

use super::domain::{AppointmentFilter, ScheduleDraft, ScheduleRequest};
use super::repository::{AppointmentRepository, NewAppointment, SLOT_TAKEN};
use crate::errors::ServiceError;
use crate::pet::PetRepository;
use crate::veterinarian::VeterinarianRepository;

pub struct AppointmentService {
    repo: Arc<dyn AppointmentRepository>,
    pets: Arc<dyn PetRepository>,
    veterinarians: Arc<dyn VeterinarianRepository>,
}

impl AppointmentService {
    pub fn new(
        repo: Arc<dyn AppointmentRepository>,
        pets: Arc<dyn PetRepository>,
        veterinarians: Arc<dyn VeterinarianRepository>,
    ) -> Self {
        Self { repo, pets, veterinarians }
    }

    /// Book a slot. The pre-check gives a clean Conflict in the common case;
    /// the unique index settles concurrent bookings.
    #[instrument(skip(self, req), fields(pet_id = req.pet_id, line = %req.service_line, at = %req.scheduled_at))]
    pub async fn schedule(&self, req: ScheduleRequest) -> Result<appointment::Model, ServiceError> {
        let notes = req.notes.map(|n| n.trim().to_string()).filter(|n| !n.is_empty());
        let errors = appointment::validate_notes(notes.as_deref());
        if !errors.is_empty() {
            return Err(ServiceError::Validation(errors));
        }

        if !self.pets.exists(req.pet_id).await? {
            return Err(ServiceError::not_found("pet"));
        }
        if let Some(vet_id) = req.veterinarian_id {
            if self.veterinarians.get(vet_id).await?.is_none() {
                return Err(ServiceError::not_found("veterinarian"));
            }
        }
        if let Some(existing) = self.repo.find_active(req.pet_id, req.service_line, req.scheduled_at).await? {
            warn!(existing_id = existing.id, "slot_conflict");
            return Err(ServiceError::Conflict(SLOT_TAKEN.to_string()));
        }

        let created = self
            .repo
            .insert(NewAppointment {
                pet_id: req.pet_id,
                veterinarian_id: req.veterinarian_id,
                service_line: req.service_line,
                scheduled_at: req.scheduled_at,
                notes,
            })
            .await?;
        info!(appointment_id = created.id, "appointment_scheduled");
        Ok(created)
    }

    /// Parse a raw body, then [`Self::schedule`].
    pub async fn schedule_draft(&self, draft: &ScheduleDraft) -> Result<appointment::Model, ServiceError> {
        self.schedule(ScheduleRequest::parse(draft)?).await
    }

    pub async fn get(&self, id: i32) -> Result<appointment::Model, ServiceError> {
        self.repo.get(id).await?.ok_or_else(|| ServiceError::not_found("appointment"))
    }

    pub async fn list(&self, filter: &AppointmentFilter) -> Result<Vec<appointment::Model>, ServiceError> {
        self.repo.list(filter).await
    }

    #[instrument(skip(self))]
    pub async fn update_status(&self, id: i32, next: AppointmentStatus) -> Result<appointment::Model, ServiceError> {
        let current = self.get(id).await?;
        if !current.status.can_transition_to(next) {
            return Err(ServiceError::InvalidTransition { from: current.status, to: next });
        }
        match self.repo.set_status(id, current.status, next).await? {
            Some(updated) => {
                info!(appointment_id = id, from = %current.status, to = %next, "appointment_status_changed");
                Ok(updated)
            }
            None => Err(self.lost_race(id, next).await),
        }
    }

    /// `update_status(id, cancelado)`, except that an already cancelled
    /// appointment is returned as is.
    #[instrument(skip(self))]
    pub async fn cancel(&self, id: i32) -> Result<appointment::Model, ServiceError> {
        let current = self.get(id).await?;
        if current.status == AppointmentStatus::Cancelado {
            return Ok(current);
        }
        if !current.status.can_transition_to(AppointmentStatus::Cancelado) {
            return Err(ServiceError::InvalidTransition { from: current.status, to: AppointmentStatus::Cancelado });
        }
        match self.repo.set_status(id, current.status, AppointmentStatus::Cancelado).await? {
            Some(updated) => {
                info!(appointment_id = id, from = %current.status, "appointment_cancelled");
                Ok(updated)
            }
            None => match self.get(id).await? {
                concurrent if concurrent.status == AppointmentStatus::Cancelado => Ok(concurrent),
                _ => Err(self.lost_race(id, AppointmentStatus::Cancelado).await),
            },
        }
    }

    /// The conditional write matched nothing: the row is gone or another
    /// request moved it first.
    async fn lost_race(&self, id: i32, next: AppointmentStatus) -> ServiceError {
        match self.repo.get(id).await {
            Ok(Some(now)) => {
                warn!(appointment_id = id, status = %now.status, to = %next, "status_changed_concurrently");
                ServiceError::InvalidTransition { from: now.status, to: next }
            }
            Ok(None) => ServiceError::not_found("appointment"),
            Err(e) => e,
        }
    }
}

#[cfg(test)]
mod tests {
    use chrono::{DateTime, TimeZone, Utc};
    use models::appointment::{AppointmentStatus::*, ServiceLine};

    use super::*;
    use crate::appointment::UpperBound;
    use crate::pet::NewPet;
    use crate::test_support::{fixture, Fixture};

    fn at(h: u32) -> DateTime<Utc> { Utc.with_ymd_and_hms(2025, 6, 1, h, 0, 0).unwrap() }

    fn req(pet_id: i32, line: ServiceLine, when: DateTime<Utc>) -> ScheduleRequest {
        ScheduleRequest { pet_id, service_line: line, scheduled_at: when, notes: None, veterinarian_id: None }
    }

    async fn seed_pets(f: &Fixture, n: usize) -> anyhow::Result<Vec<i32>> {
        let pets = (0..n)
            .map(|i| NewPet { name: format!("Pet {i}"), species: "gato".into(), breed: None })
            .collect();
        let created = f.clients.create("Joana Dias", "joana@example.com", "21987654321", pets).await?;
        Ok(created.pets.iter().map(|p| p.id).collect())
    }

    #[tokio::test]
    async fn same_slot_twice_conflicts() -> anyhow::Result<()> {
        let f = fixture().await?;
        let ids = seed_pets(&f, 5).await?;
        assert_eq!(ids[4], 5);

        let first = f.appointments.schedule(req(5, ServiceLine::Clinico, at(10))).await?;
        assert_eq!(first.status, Agendado);
        assert!(matches!(
            f.appointments.schedule(req(5, ServiceLine::Clinico, at(10))).await,
            Err(ServiceError::Conflict(_))
        ));
        Ok(())
    }

    #[tokio::test]
    async fn other_line_or_cancelled_slot_is_free() -> anyhow::Result<()> {
        let f = fixture().await?;
        let pet = seed_pets(&f, 1).await?[0];
        let first = f.appointments.schedule(req(pet, ServiceLine::Clinico, at(10))).await?;
        f.appointments.schedule(req(pet, ServiceLine::Petshop, at(10))).await?;

        f.appointments.cancel(first.id).await?;
        let again = f.appointments.schedule(req(pet, ServiceLine::Clinico, at(10))).await?;
        assert_eq!(again.status, Agendado);
        Ok(())
    }

    #[tokio::test]
    async fn unique_index_backs_the_precheck() -> anyhow::Result<()> {
        let f = fixture().await?;
        let pet = seed_pets(&f, 1).await?[0];
        let repo = crate::appointment::SeaOrmAppointmentRepository { db: f.db.clone() };
        let new = || NewAppointment { pet_id: pet, veterinarian_id: None, service_line: ServiceLine::Clinico, scheduled_at: at(9), notes: None };
        repo.insert(new()).await?;
        assert!(matches!(repo.insert(new()).await, Err(ServiceError::Conflict(_))));
        Ok(())
    }

    #[tokio::test]
    async fn transitions_follow_the_table() -> anyhow::Result<()> {
        let f = fixture().await?;
        let pet = seed_pets(&f, 1).await?[0];

        let a = f.appointments.schedule(req(pet, ServiceLine::Clinico, at(8))).await?;
        assert!(matches!(
            f.appointments.update_status(a.id, Concluido).await,
            Err(ServiceError::InvalidTransition { from: Agendado, to: Concluido })
        ));
        assert!(matches!(f.appointments.update_status(a.id, Agendado).await, Err(ServiceError::InvalidTransition { .. })));
        assert_eq!(f.appointments.update_status(a.id, Confirmado).await?.status, Confirmado);
        assert_eq!(f.appointments.update_status(a.id, Concluido).await?.status, Concluido);
        for to in [Agendado, Confirmado, Cancelado] {
            assert!(matches!(f.appointments.update_status(a.id, to).await, Err(ServiceError::InvalidTransition { .. })));
        }
        assert!(matches!(f.appointments.cancel(a.id).await, Err(ServiceError::InvalidTransition { .. })));

        let b = f.appointments.schedule(req(pet, ServiceLine::Petshop, at(8))).await?;
        let cancelled = f.appointments.cancel(b.id).await?;
        assert_eq!(cancelled.status, Cancelado);
        let again = f.appointments.cancel(b.id).await?;
        assert_eq!((again.id, again.status), (b.id, Cancelado));
        assert!(matches!(f.appointments.update_status(b.id, Confirmado).await, Err(ServiceError::InvalidTransition { .. })));
        Ok(())
    }

    #[tokio::test]
    async fn missing_references_and_long_notes() -> anyhow::Result<()> {
        let f = fixture().await?;
        assert!(matches!(f.appointments.schedule(req(99, ServiceLine::Clinico, at(8))).await, Err(ServiceError::NotFound(_))));
        assert!(matches!(f.appointments.get(99).await, Err(ServiceError::NotFound(_))));
        assert!(matches!(f.appointments.update_status(99, Confirmado).await, Err(ServiceError::NotFound(_))));

        let pet = seed_pets(&f, 1).await?[0];
        let mut with_vet = req(pet, ServiceLine::Clinico, at(8));
        with_vet.veterinarian_id = Some(7);
        assert!(matches!(f.appointments.schedule(with_vet).await, Err(ServiceError::NotFound(_))));

        let mut long = req(pet, ServiceLine::Clinico, at(8));
        long.notes = Some("a".repeat(501));
        assert!(matches!(f.appointments.schedule(long).await, Err(ServiceError::Validation(_))));
        Ok(())
    }

    #[tokio::test]
    async fn list_filters_and_orders_by_time() -> anyhow::Result<()> {
        let f = fixture().await?;
        let ids = seed_pets(&f, 2).await?;
        f.appointments.schedule(req(ids[0], ServiceLine::Clinico, at(15))).await?;
        f.appointments.schedule(req(ids[1], ServiceLine::Petshop, at(9))).await?;
        f.appointments.schedule(req(ids[0], ServiceLine::Petshop, at(12))).await?;

        let all = f.appointments.list(&AppointmentFilter::default()).await?;
        let hours: Vec<_> = all.iter().map(|a| a.scheduled_at).collect();
        assert_eq!(hours, vec![at(9), at(12), at(15)]);

        let petshop = AppointmentFilter { service_line: Some(ServiceLine::Petshop), ..Default::default() };
        assert_eq!(f.appointments.list(&petshop).await?.len(), 2);

        let window = AppointmentFilter { from: Some(at(12)), to: Some(UpperBound::Inclusive(at(15))), ..Default::default() };
        assert_eq!(f.appointments.list(&window).await?.len(), 2);

        let by_pet = AppointmentFilter { pet_id: Some(ids[1]), ..Default::default() };
        assert_eq!(f.appointments.list(&by_pet).await?.len(), 1);
        Ok(())
    }

    #[tokio::test]
    async fn racing_transitions_leave_one_winner() -> anyhow::Result<()> {
        let f = fixture().await?;
        let pet = seed_pets(&f, 1).await?[0];

        for round in 0..10u32 {
            let a = f.appointments.schedule(req(pet, ServiceLine::Clinico, at(round))).await?;
            f.appointments.update_status(a.id, Confirmado).await?;

            let (done, cancelled) =
                tokio::join!(f.appointments.update_status(a.id, Concluido), f.appointments.update_status(a.id, Cancelado));
            let stored = f.appointments.get(a.id).await?.status;
            match (done, cancelled) {
                (Ok(x), Err(ServiceError::InvalidTransition { from, .. })) => {
                    assert_eq!((x.status, stored, from), (Concluido, Concluido, Concluido));
                }
                (Err(ServiceError::InvalidTransition { from, .. }), Ok(y)) => {
                    assert_eq!((y.status, stored, from), (Cancelado, Cancelado, Cancelado));
                }
                other => panic!("round {round}: expected exactly one winner, got {other:?}"),
            }
        }
        Ok(())
    }

    #[tokio::test]
    async fn racing_cancels_are_both_idempotent() -> anyhow::Result<()> {
        let f = fixture().await?;
        let pet = seed_pets(&f, 1).await?[0];
        let a = f.appointments.schedule(req(pet, ServiceLine::Petshop, at(11))).await?;

        let (x, y) = tokio::join!(f.appointments.cancel(a.id), f.appointments.cancel(a.id));
        assert_eq!(x?.status, Cancelado);
        assert_eq!(y?.status, Cancelado);
        Ok(())
    }

    #[tokio::test]
    async fn stale_status_write_is_refused() -> anyhow::Result<()> {
        let f = fixture().await?;
        let pet = seed_pets(&f, 1).await?[0];
        let a = f.appointments.schedule(req(pet, ServiceLine::Clinico, at(7))).await?;
        let repo = crate::appointment::SeaOrmAppointmentRepository { db: f.db.clone() };

        assert!(repo.set_status(a.id, Confirmado, Concluido).await?.is_none());
        assert_eq!(f.appointments.get(a.id).await?.status, Agendado);
        assert_eq!(repo.set_status(a.id, Agendado, Confirmado).await?.map(|m| m.status), Some(Confirmado));
        assert!(repo.set_status(999, Agendado, Confirmado).await?.is_none());
        Ok(())
    }

    #[tokio::test]
    async fn draft_errors_come_back_together() -> anyhow::Result<()> {
        let f = fixture().await?;
        let draft: ScheduleDraft = serde_json::from_value(serde_json::json!({
            "pet_id": "x", "service_line": "banho", "scheduled_at": "amanha", "notes": "a".repeat(600)
        }))?;
        match f.appointments.schedule_draft(&draft).await {
            Err(ServiceError::Validation(msgs)) => assert_eq!(msgs.len(), 4, "{msgs:?}"),
            other => panic!("unexpected: {other:?}"),
        }
        Ok(())
    }
}
