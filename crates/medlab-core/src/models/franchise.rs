//! Franchise network models.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::labels::{label_enum, Tone};
use super::record::{Checks, EntityKind, FieldError, FieldValue, Record};

label_enum! {
    pub enum FranchiseStatus {
        Active => "Active",
        UnderReview => "Under Review",
        Inactive => "Inactive",
    }
}

impl FranchiseStatus {
    pub fn tone(&self) -> Tone {
        match self {
            FranchiseStatus::Active => Tone::Success,
            FranchiseStatus::UnderReview => Tone::Warning,
            FranchiseStatus::Inactive => Tone::Danger,
        }
    }
}

label_enum! {
    /// Bucket of a 0-100 performance score.
    pub enum PerformanceBand {
        Excellent => "Excellent",
        Good => "Good",
        Fair => "Fair",
        Poor => "Poor",
    }
}

impl PerformanceBand {
    pub fn from_score(score: u8) -> Self {
        match score {
            90.. => PerformanceBand::Excellent,
            80..=89 => PerformanceBand::Good,
            70..=79 => PerformanceBand::Fair,
            _ => PerformanceBand::Poor,
        }
    }

    pub fn tone(&self) -> Tone {
        match self {
            PerformanceBand::Excellent => Tone::Success,
            PerformanceBand::Good => Tone::Info,
            PerformanceBand::Fair => Tone::Warning,
            PerformanceBand::Poor => Tone::Danger,
        }
    }
}

/// A franchise location in the lab network.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Franchise {
    /// Franchise id (e.g. "FRN001")
    pub id: String,
    pub name: String,
    pub owner_name: String,
    /// Short location label
    pub location: String,
    /// Full postal address
    pub address: String,
    pub phone: String,
    pub email: String,
    pub established_date: NaiveDate,
    pub status: FranchiseStatus,
    pub tests_completed: u32,
    pub monthly_revenue: f64,
    pub staff_count: u32,
    /// 0-100
    pub performance_score: u8,
}

impl Franchise {
    pub fn new(id: String, name: String, owner_name: String, location: String) -> Self {
        Self {
            id,
            name,
            owner_name,
            location,
            address: String::new(),
            phone: String::new(),
            email: String::new(),
            established_date: chrono::Utc::now().date_naive(),
            status: FranchiseStatus::UnderReview,
            tests_completed: 0,
            monthly_revenue: 0.0,
            staff_count: 0,
            performance_score: 0,
        }
    }

    pub fn performance_band(&self) -> PerformanceBand {
        PerformanceBand::from_score(self.performance_score)
    }

    pub fn is_active(&self) -> bool {
        self.status == FranchiseStatus::Active
    }
}

impl Record for Franchise {
    const KIND: EntityKind = EntityKind::Franchise;
    const FIELDS: &'static [&'static str] = &[
        "id",
        "name",
        "ownerName",
        "location",
        "address",
        "phone",
        "email",
        "establishedDate",
        "status",
        "testsCompleted",
        "monthlyRevenue",
        "staff",
        "performanceScore",
    ];
    const SEARCH_FIELDS: &'static [&'static str] = &["name", "ownerName", "location"];

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
            "ownerName" => FieldValue::text(&self.owner_name),
            "location" => FieldValue::text(&self.location),
            "address" => FieldValue::text(&self.address),
            "phone" => FieldValue::text(&self.phone),
            "email" => FieldValue::text(&self.email),
            "establishedDate" => self.established_date.into(),
            "status" => FieldValue::label(self.status),
            "testsCompleted" => self.tests_completed.into(),
            "monthlyRevenue" => self.monthly_revenue.into(),
            "staff" => self.staff_count.into(),
            "performanceScore" => FieldValue::Number(f64::from(self.performance_score)),
            _ => return None,
        })
    }

    fn field_errors(&self) -> Vec<FieldError> {
        Checks::new()
            .require("id", &self.id)
            .require("name", &self.name)
            .require("ownerName", &self.owner_name)
            .require("location", &self.location)
            .non_negative("monthlyRevenue", self.monthly_revenue)
            .ensure(
                self.performance_score <= 100,
                "performanceScore",
                "must be between 0 and 100",
            )
            .finish()
    }
}
