//! Account and organization settings.

use serde::{Deserialize, Serialize};

use super::record::{Checks, FieldError};

/// Signed-in user's editable profile.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub designation: String,
    pub lab_name: String,
    pub address: String,
}

impl Default for UserProfile {
    fn default() -> Self {
        Self {
            name: "Dr. Rajesh Kumar".into(),
            email: "rajesh.kumar@pathlab.com".into(),
            phone: "+91 9876543210".into(),
            designation: "Senior Pathologist".into(),
            lab_name: "PATHO LAB - FAMILY DIAGNOSTIC".into(),
            address: "123 Medical Complex, Health Street, Mumbai - 400001".into(),
        }
    }
}

impl UserProfile {
    pub fn field_errors(&self) -> Vec<FieldError> {
        Checks::new()
            .require("name", &self.name)
            .require("email", &self.email)
            .ensure(self.email.contains('@'), "email", "must be a valid email address")
            .finish()
    }
}

/// Network-wide settings, editable by admins only.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct OrganizationSettings {
    pub name: String,
    pub address: String,
    /// Default payment term for new invoices
    pub payment_terms_days: u32,
}

impl Default for OrganizationSettings {
    fn default() -> Self {
        Self {
            name: "MedLab Pro Diagnostics".into(),
            address: "123 Medical Street, Healthcare City".into(),
            payment_terms_days: 7,
        }
    }
}

impl OrganizationSettings {
    pub fn field_errors(&self) -> Vec<FieldError> {
        Checks::new()
            .require("name", &self.name)
            .ensure(
                self.payment_terms_days <= 365,
                "paymentTermsDays",
                "must be at most 365 days",
            )
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        assert!(UserProfile::default().field_errors().is_empty());
        assert!(OrganizationSettings::default().field_errors().is_empty());
    }

    #[test]
    fn test_profile_email_required() {
        let profile = UserProfile {
            email: "nobody".into(),
            ..UserProfile::default()
        };
        assert_eq!(profile.field_errors()[0].field, "email");
    }
}
