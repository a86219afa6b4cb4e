use chrono::{DateTime, Days, NaiveDate, Utc};
use models::appointment::{self, ServiceLine};
use serde::Deserialize;
use serde_json::Value;

use crate::errors::ServiceError;
use crate::input;

#[derive(Debug, Clone)]
pub struct ScheduleRequest {
    pub pet_id: i32,
    pub service_line: ServiceLine,
    pub scheduled_at: DateTime<Utc>,
    pub notes: Option<String>,
    pub veterinarian_id: Option<i32>,
}

/// Scheduling body as received. Fields stay untyped until [`ScheduleRequest::parse`].
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ScheduleDraft {
    #[serde(default)]
    pub pet_id: Option<Value>,
    #[serde(default)]
    pub service_line: Option<Value>,
    #[serde(default, alias = "data_hora")]
    pub scheduled_at: Option<Value>,
    #[serde(default, alias = "observacoes")]
    pub notes: Option<Value>,
    #[serde(default, alias = "veterinario_id")]
    pub veterinarian_id: Option<Value>,
}

impl ScheduleRequest {
    /// Type-check a draft, collecting every bad field.
    pub fn parse(draft: &ScheduleDraft) -> Result<Self, ServiceError> {
        let mut errors = Vec::new();

        let pet_id = keep(input::required_id("pet_id", draft.pet_id.as_ref()), &mut errors);
        let service_line = match keep(input::required_text("service_line", draft.service_line.as_ref()), &mut errors) {
            Some(raw) => match raw.parse::<ServiceLine>() {
                Ok(line) => Some(line),
                Err(e) => {
                    errors.extend(ServiceError::from(e).into_messages());
                    None
                }
            },
            None => None,
        };
        let scheduled_at = match keep(input::required_text("scheduled_at", draft.scheduled_at.as_ref()), &mut errors) {
            Some(raw) => match DateTime::parse_from_rfc3339(&raw) {
                Ok(t) => Some(t.with_timezone(&Utc)),
                Err(_) => {
                    errors.push(format!("scheduled_at must be an RFC 3339 date-time: {raw}"));
                    None
                }
            },
            None => None,
        };
        let notes = keep(input::optional_text("notes", draft.notes.as_ref()), &mut errors).flatten();
        errors.extend(appointment::validate_notes(notes.as_deref()));
        let veterinarian_id =
            keep(input::optional_id("veterinarian_id", draft.veterinarian_id.as_ref()), &mut errors).flatten();

        match (pet_id, service_line, scheduled_at) {
            (Some(pet_id), Some(service_line), Some(scheduled_at)) if errors.is_empty() => {
                Ok(ScheduleRequest { pet_id, service_line, scheduled_at, notes, veterinarian_id })
            }
            _ => Err(ServiceError::Validation(errors)),
        }
    }
}

fn keep<T>(res: Result<T, String>, errors: &mut Vec<String>) -> Option<T> {
    res.map_err(|e| errors.push(e)).ok()
}

/// Upper end of a listing window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpperBound {
    /// An explicit instant, included.
    Inclusive(DateTime<Utc>),
    /// Midnight after a bare `to` day, excluded.
    Before(DateTime<Utc>),
}

impl UpperBound {
    fn admits(self, t: DateTime<Utc>) -> bool {
        match self {
            UpperBound::Inclusive(end) => t <= end,
            UpperBound::Before(end) => t < end,
        }
    }
}

/// Listing filter. `from` is inclusive.
#[derive(Debug, Clone, Default)]
pub struct AppointmentFilter {
    pub from: Option<DateTime<Utc>>,
    pub to: Option<UpperBound>,
    pub service_line: Option<ServiceLine>,
    pub pet_id: Option<i32>,
}

impl AppointmentFilter {
    /// Build from raw query values, collecting every malformed one.
    pub fn parse(from: Option<&str>, to: Option<&str>, service_line: Option<&str>, pet_id: Option<i32>) -> Result<Self, ServiceError> {
        let mut errors = Vec::new();
        let mut filter = AppointmentFilter { pet_id, ..Default::default() };

        if let Some(raw) = from.filter(|s| !s.trim().is_empty()) {
            match parse_bound(raw) {
                Some(TimeBound::Instant(t)) => filter.from = Some(t),
                Some(TimeBound::Day(d)) => filter.from = Some(d.and_time(chrono::NaiveTime::MIN).and_utc()),
                None => errors.push(format!("invalid 'from' date: {raw}")),
            }
        }
        if let Some(raw) = to.filter(|s| !s.trim().is_empty()) {
            match parse_bound(raw) {
                Some(TimeBound::Instant(t)) => filter.to = Some(UpperBound::Inclusive(t)),
                Some(TimeBound::Day(d)) => match d.checked_add_days(Days::new(1)) {
                    Some(next) => filter.to = Some(UpperBound::Before(next.and_time(chrono::NaiveTime::MIN).and_utc())),
                    None => errors.push(format!("invalid 'to' date: {raw}")),
                },
                None => errors.push(format!("invalid 'to' date: {raw}")),
            }
        }
        if let Some(raw) = service_line.filter(|s| !s.trim().is_empty()) {
            match raw.parse::<ServiceLine>() {
                Ok(line) => filter.service_line = Some(line),
                Err(e) => errors.extend(ServiceError::from(e).into_messages()),
            }
        }
        if let (Some(f), Some(t)) = (filter.from, filter.to) {
            if !t.admits(f) {
                errors.push("'from' must not be after 'to'".to_string());
            }
        }

        if errors.is_empty() { Ok(filter) } else { Err(ServiceError::Validation(errors)) }
    }
}

/// A parsed `from`/`to` value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimeBound {
    Instant(DateTime<Utc>),
    /// Bare `YYYY-MM-DD`, a whole UTC day.
    Day(NaiveDate),
}

/// RFC 3339 instant or a bare `YYYY-MM-DD`.
pub fn parse_bound(raw: &str) -> Option<TimeBound> {
    let raw = raw.trim();
    if let Ok(t) = DateTime::parse_from_rfc3339(raw) {
        return Some(TimeBound::Instant(t.with_timezone(&Utc)));
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d").ok().map(TimeBound::Day)
}
