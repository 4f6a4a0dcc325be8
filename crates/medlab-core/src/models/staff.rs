//! Staff models.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::labels::{label_enum, Tone};
use super::record::{Checks, EntityKind, FieldError, FieldValue, Record};

label_enum! {
    pub enum StaffStatus {
        Active => "Active",
        OnLeave => "On Leave",
        Inactive => "Inactive",
    }
}

impl StaffStatus {
    pub fn tone(&self) -> Tone {
        match self {
            StaffStatus::Active => Tone::Success,
            StaffStatus::OnLeave => Tone::Warning,
            StaffStatus::Inactive => Tone::Danger,
        }
    }
}

label_enum! {
    pub enum Shift {
        Day => "Day",
        Morning => "Morning",
        Evening => "Evening",
        Night => "Night",
    }
}

/// A lab employee.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct StaffMember {
    /// Employee id (e.g. "STF001")
    pub id: String,
    pub name: String,
    /// Job title (e.g. "Senior Technician")
    pub role: String,
    pub department: String,
    pub email: String,
    pub phone: String,
    pub join_date: NaiveDate,
    pub status: StaffStatus,
    pub shift: Shift,
    /// Monthly salary; only admins may see or edit it
    pub salary: f64,
}

impl StaffMember {
    pub fn new(id: String, name: String, role: String, department: String) -> Self {
        Self {
            id,
            name,
            role,
            department,
            email: String::new(),
            phone: String::new(),
            join_date: chrono::Utc::now().date_naive(),
            status: StaffStatus::Active,
            shift: Shift::Day,
            salary: 0.0,
        }
    }
}

impl Record for StaffMember {
    const KIND: EntityKind = EntityKind::StaffMember;
    const FIELDS: &'static [&'static str] = &[
        "id",
        "name",
        "role",
        "department",
        "email",
        "phone",
        "joinDate",
        "shift",
        "salary",
        "status",
    ];
    const SEARCH_FIELDS: &'static [&'static str] = &["name", "role", "department"];

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
            "role" => FieldValue::text(&self.role),
            "department" => FieldValue::text(&self.department),
            "email" => FieldValue::text(&self.email),
            "phone" => FieldValue::text(&self.phone),
            "joinDate" => self.join_date.into(),
            "shift" => FieldValue::label(self.shift),
            "salary" => self.salary.into(),
            "status" => FieldValue::label(self.status),
            _ => return None,
        })
    }

    fn field_errors(&self) -> Vec<FieldError> {
        Checks::new()
            .require("id", &self.id)
            .require("name", &self.name)
            .require("role", &self.role)
            .require("department", &self.department)
            .non_negative("salary", self.salary)
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
    fn test_on_leave_label() {
        assert_eq!(StaffStatus::OnLeave.label(), "On Leave");
        assert_eq!("on leave".parse::<StaffStatus>().unwrap(), StaffStatus::OnLeave);
        assert_eq!(StaffStatus::OnLeave.tone(), Tone::Warning);
    }

    #[test]
    fn test_negative_salary_rejected() {
        let mut member = StaffMember::new(
            "STF002".into(),
            "Michael Chen".into(),
            "Senior Technician".into(),
            "Hematology".into(),
        );
        assert!(member.validate().is_ok());
        member.salary = -5.0;
        assert_eq!(member.validate().unwrap_err().errors[0].field, "salary");
    }
}
