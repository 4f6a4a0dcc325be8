//! Lab report models.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::labels::{label_enum, Tone};
use super::record::{Checks, EntityKind, FieldError, FieldValue, Record};

label_enum! {
    pub enum ReportStatus {
        Completed => "completed",
        Processing => "processing",
        Pending => "pending",
        Rejected => "rejected",
    }
}

impl ReportStatus {
    pub fn tone(&self) -> Tone {
        match self {
            ReportStatus::Completed => Tone::Success,
            ReportStatus::Processing => Tone::Info,
            ReportStatus::Pending => Tone::Warning,
            ReportStatus::Rejected => Tone::Danger,
        }
    }
}

/// A lab report for one test on one patient.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Report {
    /// Report id (e.g. "RPT-001")
    pub id: String,
    /// Weak reference to the patient
    pub patient_id: String,
    pub patient_name: String,
    pub test_name: String,
    pub request_date: NaiveDate,
    /// Set exactly when the report is completed
    pub completion_date: Option<NaiveDate>,
    pub status: ReportStatus,
    /// Summary of findings or processing notes
    pub findings: String,
    pub technician: String,
}

impl Report {
    /// Create a pending report requested today.
    pub fn new(id: String, patient_id: String, patient_name: String, test_name: String) -> Self {
        Self {
            id,
            patient_id,
            patient_name,
            test_name,
            request_date: chrono::Utc::now().date_naive(),
            completion_date: None,
            status: ReportStatus::Pending,
            findings: String::new(),
            technician: String::new(),
        }
    }

    /// Mark the report completed on `on` with its findings.
    pub fn complete(&mut self, on: NaiveDate, findings: String) {
        self.status = ReportStatus::Completed;
        self.completion_date = Some(on);
        self.findings = findings;
    }

    /// Only completed reports can be downloaded.
    pub fn is_downloadable(&self) -> bool {
        self.status == ReportStatus::Completed
    }
}

impl Record for Report {
    const KIND: EntityKind = EntityKind::Report;
    const FIELDS: &'static [&'static str] = &[
        "id",
        "patientId",
        "patientName",
        "testName",
        "requestDate",
        "completionDate",
        "status",
        "findings",
        "technician",
    ];
    const SEARCH_FIELDS: &'static [&'static str] = &["patientName", "id", "testName"];

    fn id(&self) -> &str {
        &self.id
    }

    fn status_tone(&self) -> Tone {
        self.status.tone()
    }

    fn field(&self, name: &str) -> Option<FieldValue> {
        Some(match name {
            "id" => FieldValue::text(&self.id),
            "patientId" => FieldValue::text(&self.patient_id),
            "patientName" => FieldValue::text(&self.patient_name),
            "testName" => FieldValue::text(&self.test_name),
            "requestDate" => self.request_date.into(),
            "completionDate" => return self.completion_date.map(FieldValue::Date),
            "status" => FieldValue::label(self.status),
            "findings" => FieldValue::text(&self.findings),
            "technician" => FieldValue::text(&self.technician),
            _ => return None,
        })
    }

    fn field_errors(&self) -> Vec<FieldError> {
        let completed = self.status == ReportStatus::Completed;
        let mut checks = Checks::new();
        checks
            .require("id", &self.id)
            .require("patientId", &self.patient_id)
            .require("testName", &self.test_name)
            .ensure(
                completed == self.completion_date.is_some(),
                "completionDate",
                "must be set exactly when the report is completed",
            );
        if let Some(done) = self.completion_date {
            checks.ensure(
                done >= self.request_date,
                "completionDate",
                "must not be before the request date",
            );
        }
        checks.finish()
    }
}
