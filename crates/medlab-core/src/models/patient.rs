//! Patient models.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::labels::{ActiveStatus, Gender, Tone};
use super::record::{Checks, EntityKind, FieldError, FieldValue, Record};

/// A registered patient.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Patient {
    /// Stable patient id (e.g. "P001")
    pub id: String,
    /// Full name
    pub name: String,
    /// Age in years
    pub age: u32,
    pub gender: Gender,
    /// Contact phone
    pub phone: String,
    /// Contact email
    pub email: String,
    /// City or street address
    pub address: String,
    /// Date of the most recent visit
    pub last_visit: NaiveDate,
    pub status: ActiveStatus,
}

impl Patient {
    /// Create an active patient with the required fields; contact details
    /// start empty and the visit date is today.
    pub fn new(id: String, name: String, age: u32, gender: Gender) -> Self {
        Self {
            id,
            name,
            age,
            gender,
            phone: String::new(),
            email: String::new(),
            address: String::new(),
            last_visit: chrono::Utc::now().date_naive(),
            status: ActiveStatus::Active,
        }
    }

    pub fn is_active(&self) -> bool {
        self.status == ActiveStatus::Active
    }
}

impl Record for Patient {
    const KIND: EntityKind = EntityKind::Patient;
    const FIELDS: &'static [&'static str] = &[
        "id", "name", "age", "gender", "phone", "email", "address", "lastVisit", "status",
    ];
    const SEARCH_FIELDS: &'static [&'static str] = &["name", "id"];

    fn id(&self) -> &str {
        &self.id
    }

    fn status_tone(&self) -> Tone {
        self.status.tone()
    }

    fn field(&self, name: &str) -> Option<FieldValue> {
        Some(match name {
            "id" => FieldValue::text(&self.id),
            "name" => FieldValue::text(&self.name),
            "age" => self.age.into(),
            "gender" => FieldValue::label(self.gender),
            "phone" => FieldValue::text(&self.phone),
            "email" => FieldValue::text(&self.email),
            "address" => FieldValue::text(&self.address),
            "lastVisit" => self.last_visit.into(),
            "status" => FieldValue::label(self.status),
            _ => return None,
        })
    }

    fn field_errors(&self) -> Vec<FieldError> {
        Checks::new()
            .require("id", &self.id)
            .require("name", &self.name)
            .ensure(self.age <= 150, "age", "must be between 0 and 150")
            .ensure(
                self.email.is_empty() || self.email.contains('@'),
                "email",
                "must be a valid email address",
            )
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_patient() {
        let patient = Patient::new("P010".into(), "Ramesh Kumar".into(), 45, Gender::Male);
        assert_eq!(patient.name, "Ramesh Kumar");
        assert!(patient.is_active());
        assert!(patient.validate().is_ok());
    }

    #[test]
    fn test_fields() {
        let patient = Patient::new("P010".into(), "Ramesh Kumar".into(), 45, Gender::Male);
        assert_eq!(patient.field("age"), Some(FieldValue::Number(45.0)));
        assert_eq!(patient.field("status"), Some(FieldValue::Enum("active".into())));
        assert_eq!(patient.field("species"), None);
        assert_eq!(patient.display_fields().len(), Patient::FIELDS.len());
    }

    #[test]
    fn test_validation() {
        let mut patient = Patient::new("P010".into(), "".into(), 200, Gender::Female);
        patient.email = "not-an-email".into();
        let err = patient.validate().unwrap_err();
        let fields: Vec<_> = err.errors.iter().map(|e| e.field.as_str()).collect();
        assert_eq!(fields, vec!["name", "age", "email"]);
    }

    #[test]
    fn test_serde_camel_case() {
        let patient = Patient::new("P010".into(), "Amit".into(), 28, Gender::Male);
        let json = serde_json::to_string(&patient).unwrap();
        assert!(json.contains("\"lastVisit\""));
        let back: Patient = serde_json::from_str(&json).unwrap();
        assert_eq!(back, patient);
    }
}
