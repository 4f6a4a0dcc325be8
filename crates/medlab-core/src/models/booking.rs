//! Test booking models.

use chrono::NaiveTime;
use serde::{Deserialize, Serialize};

use super::labels::{label_enum, Tone};
use super::record::{Checks, EntityKind, FieldError, FieldValue, Record};

label_enum! {
    pub enum BookingStatus {
        Pending => "Pending",
        InProgress => "In Progress",
        Completed => "Completed",
    }
}

impl BookingStatus {
    pub fn tone(&self) -> Tone {
        match self {
            BookingStatus::Pending => Tone::Warning,
            BookingStatus::InProgress => Tone::Info,
            BookingStatus::Completed => Tone::Success,
        }
    }
}

/// A booked sample collection slot.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Booking {
    /// Booking id (e.g. "BK001")
    pub id: String,
    pub patient_name: String,
    pub test_name: String,
    pub status: BookingStatus,
    /// Collection slot
    pub slot: NaiveTime,
}

impl Booking {
    pub fn new(id: String, patient_name: String, test_name: String, slot: NaiveTime) -> Self {
        Self {
            id,
            patient_name,
            test_name,
            status: BookingStatus::Pending,
            slot,
        }
    }
}

impl Record for Booking {
    const KIND: EntityKind = EntityKind::Booking;
    const FIELDS: &'static [&'static str] = &["id", "patientName", "testName", "status", "time"];
    const SEARCH_FIELDS: &'static [&'static str] = &["patientName", "testName", "id"];

    fn id(&self) -> &str {
        &self.id
    }

    fn status_tone(&self) -> Tone {
        self.status.tone()
    }

    fn field(&self, name: &str) -> Option<FieldValue> {
        Some(match name {
            "id" => FieldValue::text(&self.id),
            "patientName" => FieldValue::text(&self.patient_name),
            "testName" => FieldValue::text(&self.test_name),
            "status" => FieldValue::label(self.status),
            "time" => FieldValue::text(self.slot.format("%I:%M %p").to_string()),
            _ => return None,
        })
    }

    fn field_errors(&self) -> Vec<FieldError> {
        Checks::new()
            .require("id", &self.id)
            .require("patientName", &self.patient_name)
            .require("testName", &self.test_name)
            .finish()
    }
}
