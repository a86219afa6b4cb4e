use chrono::{DateTime, NaiveDate, Utc};
use models::medical_record;
use serde::Serialize;

/// History entry as exposed to callers, with attachments decoded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MedicalRecord {
    pub id: i32,
    pub pet_id: i32,
    pub date: NaiveDate,
    #[serde(rename = "type")]
    pub kind: String,
    pub description: String,
    pub responsible: String,
    pub files: Vec<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<medical_record::Model> for MedicalRecord {
    fn from(m: medical_record::Model) -> Self {
        let files = m.file_list();
        Self {
            id: m.id,
            pet_id: m.pet_id,
            date: m.date,
            kind: m.kind,
            description: m.description,
            responsible: m.responsible,
            files,
            created_at: m.created_at,
            updated_at: m.updated_at,
        }
    }
}

/// Raw input for a new entry; checked as a whole by the service.
#[derive(Debug, Clone, Default)]
pub struct AppendRequest {
    pub date: String,
    pub kind: String,
    pub description: String,
    pub responsible: String,
    pub files: Vec<String>,
}

/// Requested changes to an existing entry. Only `responsible` is writable;
/// the other fields are carried so the service can reject them by name.
#[derive(Debug, Clone, Default)]
pub struct RecordChanges {
    pub responsible: Option<String>,
    pub date: Option<String>,
    pub kind: Option<String>,
    pub description: Option<String>,
    pub files: Option<Vec<String>>,
}

/// `YYYY-MM-DD`, or the calendar date of an RFC 3339 instant.
pub fn parse_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .or_else(|| DateTime::parse_from_rfc3339(raw).ok().map(|t| t.date_naive()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dates() {
        let d = NaiveDate::from_ymd_opt(2025, 6, 1).unwrap();
        assert_eq!(parse_date("2025-06-01"), Some(d));
        assert_eq!(parse_date("2025-06-01T09:30:00-03:00"), Some(d));
        assert_eq!(parse_date("01/06/2025"), None);
    }
}
