//! Test catalogue models.

use serde::{Deserialize, Serialize};

use super::labels::{ActiveStatus, Tone};
use super::record::{Checks, EntityKind, FieldError, FieldValue, Record};

/// A diagnostic test offered in the catalogue.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct LabTest {
    /// Catalogue id (e.g. "T001")
    pub id: String,
    /// Test name (e.g. "Complete Blood Count (CBC)")
    pub name: String,
    /// Department (e.g. "Hematology", "Biochemistry")
    pub category: String,
    /// Price charged to franchise partners
    pub b2b_price: f64,
    /// Maximum retail price charged to patients
    pub mrp: f64,
    /// Turnaround time (e.g. "4-6 hours")
    pub duration: String,
    /// Parameters covered by the test
    pub description: String,
    pub status: ActiveStatus,
}

impl LabTest {
    /// Create an active test with both price points.
    pub fn new(id: String, name: String, category: String, b2b_price: f64, mrp: f64) -> Self {
        Self {
            id,
            name,
            category,
            b2b_price,
            mrp,
            duration: String::new(),
            description: String::new(),
            status: ActiveStatus::Active,
        }
    }

    /// Franchise margin between the retail and partner price.
    pub fn margin(&self) -> f64 {
        self.mrp - self.b2b_price
    }

    pub fn is_active(&self) -> bool {
        self.status == ActiveStatus::Active
    }
}

impl Record for LabTest {
    const KIND: EntityKind = EntityKind::LabTest;
    const FIELDS: &'static [&'static str] = &[
        "id",
        "name",
        "category",
        "b2bPrice",
        "mrp",
        "margin",
        "duration",
        "description",
        "status",
    ];
    const SEARCH_FIELDS: &'static [&'static str] = &["name", "category", "id"];

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
            "category" => FieldValue::text(&self.category),
            "b2bPrice" => self.b2b_price.into(),
            "mrp" => self.mrp.into(),
            "margin" => self.margin().into(),
            "duration" => FieldValue::text(&self.duration),
            "description" => FieldValue::text(&self.description),
            "status" => FieldValue::label(self.status),
            _ => return None,
        })
    }

    fn field_errors(&self) -> Vec<FieldError> {
        Checks::new()
            .require("id", &self.id)
            .require("name", &self.name)
            .require("category", &self.category)
            .non_negative("b2bPrice", self.b2b_price)
            .non_negative("mrp", self.mrp)
            .ensure(
                self.mrp >= self.b2b_price,
                "mrp",
                "must not be below the B2B price",
            )
            .finish()
    }
}
